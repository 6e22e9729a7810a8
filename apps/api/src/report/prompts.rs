// Prompt constants and the prompt builder for the productivity report.

use crate::llm_client::prompts::HTML_ONLY_INSTRUCTION;
use crate::report::aggregate::{AggregateReport, UserSummary};

/// Role sentence for the report-writing call. Combined with
/// [`HTML_ONLY_INSTRUCTION`] by [`report_system_prompt`].
pub const REPORT_SYSTEM_ROLE: &str =
    "You are an assistant generating professional productivity reports.";

/// Formatting instruction that opens every report prompt.
pub const REPORT_PROMPT_PREAMBLE: &str = "Generate a weekly productivity report for the team \
    in clean, readable HTML format. Use structured sections with headings, bullet points, \
    and tables where appropriate. Avoid markdown, asterisks, or code blocks.";

pub fn report_system_prompt() -> String {
    format!("{REPORT_SYSTEM_ROLE} {HTML_ONLY_INSTRUCTION}")
}

/// Serializes the aggregate into the user message for the oracle.
///
/// Deterministic: the same aggregate always yields the same text. User lines follow
/// the aggregate's first-seen order. Nothing is escaped.
pub fn build_prompt(org_id: &str, report: &AggregateReport) -> String {
    let user_lines = report
        .per_user
        .iter()
        .map(|(user, summary)| user_line(user, summary))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{REPORT_PROMPT_PREAMBLE}\n\n\
         - Total Tasks: {total}\n\
         - Completed: {completed}\n\
         - Organization: {org_name} (ID: {org_id})\n\n\
         Users:\n{user_lines}\n",
        total = report.total_tasks,
        completed = report.completed_tasks,
        org_name = report.organization_name,
    )
}

fn user_line(user: &str, summary: &UserSummary) -> String {
    let notes = if summary.notes.is_empty() {
        "None".to_string()
    } else {
        summary.notes.join("; ")
    };
    format!(
        "{user} – {}/{} tasks completed. Notes: {notes}",
        summary.completed, summary.assigned
    )
}
