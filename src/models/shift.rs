use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A planned shift on the roster. Scheduling data only: nothing couples a
/// shift to the time logs an employee actually produces that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
