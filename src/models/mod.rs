pub mod employee;
pub mod role;
pub mod settings;
pub mod shift;
pub mod time_log;

pub use employee::Employee;
pub use role::Role;
pub use settings::Settings;
pub use shift::Shift;
pub use time_log::{EditRecord, LogStatus, TimeLog};
