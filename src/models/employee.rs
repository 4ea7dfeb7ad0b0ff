use super::role::Role;
use serde::{Deserialize, Serialize};

/// A staff member. Employees with logs are never hard-deleted: removal
/// flips `is_active` off so historical logs stay addressable by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub is_active: bool,
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            is_active: true,
        }
    }
}
