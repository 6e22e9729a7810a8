use std::sync::Arc;

use crate::report::pipeline::ReportPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Report pipeline with the store, LLM and PDF renderer already wired in.
    pub pipeline: Arc<ReportPipeline>,
}
