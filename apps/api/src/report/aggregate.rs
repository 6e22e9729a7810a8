//! Aggregator: reduces raw task rows into organization totals and a per-user breakdown.
//!
//! Pure and synchronous. The per-user map keeps first-seen order so the prompt
//! lists users in the order the store returned them.

use indexmap::IndexMap;

use crate::models::task::TaskRecord;

/// Status marker treated as "completed" unless `DONE_STATUS` overrides it.
pub const DEFAULT_DONE_STATUS: &str = "finished";

/// Display name used when no record carries an organization name.
pub const UNKNOWN_ORG: &str = "Unknown Org";

/// Decides which task statuses count as completed.
/// Matching ignores surrounding whitespace and letter case.
#[derive(Debug, Clone)]
pub struct CompletionPolicy {
    done_status: String,
}

impl CompletionPolicy {
    pub fn new(done_status: impl Into<String>) -> Self {
        Self {
            done_status: done_status.into().trim().to_lowercase(),
        }
    }

    pub fn done_status(&self) -> &str {
        &self.done_status
    }

    pub fn is_completed(&self, task: &TaskRecord) -> bool {
        task.status
            .as_deref()
            .map(|s| s.trim().to_lowercase() == self.done_status)
            .unwrap_or(false)
    }
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_DONE_STATUS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSummary {
    pub assigned: u32,
    pub completed: u32,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub organization_name: String,
    pub per_user: IndexMap<String, UserSummary>,
}

/// Reduces `tasks` into an [`AggregateReport`] in a single pass.
///
/// Rows without an owner are grouped under the placeholder user rather than dropped.
pub fn aggregate(tasks: &[TaskRecord], policy: &CompletionPolicy) -> AggregateReport {
    let organization_name = tasks
        .first()
        .and_then(|t| t.organization_name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(UNKNOWN_ORG)
        .to_string();

    let mut per_user: IndexMap<String, UserSummary> = IndexMap::new();
    let mut completed_tasks = 0;

    for task in tasks {
        let done = policy.is_completed(task);
        let summary = per_user
            .entry(task.owner().to_string())
            .or_insert_with(UserSummary::default);

        summary.assigned += 1;
        if done {
            summary.completed += 1;
            completed_tasks += 1;
        }
        if let Some(note) = task.note() {
            summary.notes.push(note.to_string());
        }
    }

    AggregateReport {
        total_tasks: tasks.len() as u32,
        completed_tasks,
        organization_name,
        per_user,
    }
}
