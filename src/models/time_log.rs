use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A log is `Active` exactly while `clock_out` is null. `Completed` is
/// terminal except through an administrative edit that clears the
/// clock-out again (nothing in the CLI does that, but the model does not
/// forbid it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Active,
    Completed,
}

/// One administrative change to a log's clock times. The sequence on a
/// log only ever grows; records are never rewritten or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRecord {
    /// When the edit was made, not the shift date.
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_in: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_out: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_in: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_out: Option<DateTime<Utc>>,
    pub reason: String,
    pub admin_name: String,
}

/// One worked (or in-progress) shift for an employee.
///
/// `date` is the shift's logical calendar day and drives retention and
/// monthly grouping; the clock instants are full UTC timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLog {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub clock_in: DateTime<Utc>,
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    pub status: LogStatus,
    #[serde(default)]
    pub edits: Vec<EditRecord>,
}

impl TimeLog {
    pub fn is_active(&self) -> bool {
        self.status == LogStatus::Active
    }

    /// Worked hours for a completed log; `None` while still active.
    pub fn hours(&self) -> Option<f64> {
        self.clock_out
            .map(|out| (out - self.clock_in).num_seconds() as f64 / 3600.0)
    }
}
