use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff roles at the venue. The set is fixed; reports and the clock-in
/// board group employees by it but no logic branches on a specific role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Server,
    Kitchen,
    Bar,
    Manager,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "server" => Some(Role::Server),
            "kitchen" => Some(Role::Kitchen),
            "bar" => Some(Role::Bar),
            "manager" => Some(Role::Manager),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Server => "Server",
            Role::Kitchen => "Kitchen",
            Role::Bar => "Bar",
            Role::Manager => "Manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
