//! Axum route handler for the report endpoint.

use anyhow::Context;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::render::output::DOWNLOAD_FILENAME;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub org_id: String,
}

/// POST /generate-report
///
/// Runs the full pipeline for the organization and streams back the PDF.
/// The temporary file is removed once the body has been sent.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Response, AppError> {
    let org_id = request.org_id.trim();
    if org_id.is_empty() {
        return Err(AppError::Validation("org_id cannot be empty".to_string()));
    }

    let report = state.pipeline.run(org_id).await?;
    info!(
        "Delivering report for org {} ({} users)",
        org_id,
        report.aggregate.per_user.len()
    );
    let body = report
        .file
        .into_body()
        .await
        .context("Failed to open rendered report")?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_request_deserialization() {
        let request: ReportRequest =
            serde_json::from_value(serde_json::json!({"org_id": "team-42"})).unwrap();
        assert_eq!(request.org_id, "team-42");
    }

    #[test]
    fn test_report_request_requires_org_id() {
        let result: Result<ReportRequest, _> = serde_json::from_value(serde_json::json!({}));
        assert!(result.is_err());
    }
}
