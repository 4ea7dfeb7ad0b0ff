use serde::{Deserialize, Serialize};

/// Singleton settings row. An empty `settings` table means the system has
/// never been set up and drives the first-run flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub id: String,
    /// Admin-gate code, compared by exact string match.
    pub pin_code: String,
    /// Identity that can authorize PIN changes.
    #[serde(default)]
    pub admin_user_id: Option<String>,
}
