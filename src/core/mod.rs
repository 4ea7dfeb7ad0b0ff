pub mod controller;
pub mod lifecycle;
pub mod reports;
