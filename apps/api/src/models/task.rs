use serde::Deserialize;

/// Owner name used when a task row carries neither `username` nor `assigned_to`.
pub const UNKNOWN_USER: &str = "Unknown";

/// A row of the external `tasks` collection. Read-only to this service.
/// Every column is optional; extra columns are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
}

impl TaskRecord {
    /// Owner identifier: `username`, then `assigned_to`, then [`UNKNOWN_USER`].
    pub fn owner(&self) -> &str {
        non_empty(self.username.as_deref())
            .or_else(|| non_empty(self.assigned_to.as_deref()))
            .unwrap_or(UNKNOWN_USER)
    }

    pub fn note(&self) -> Option<&str> {
        non_empty(self.notes.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
