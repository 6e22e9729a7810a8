//! Report generation: orchestrates the full pipeline for one request.
//!
//! Flow: fetch_tasks → aggregate → build_prompt → LLM generate →
//!       HTML shell → PDF render → write report file.
//!
//! Single pass, no shared mutable state. Any stage failure aborts the request.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{GenerationOptions, TextGenerator};
use crate::render::output::ReportFile;
use crate::render::PdfRenderer;
use crate::report::aggregate::{aggregate, AggregateReport, CompletionPolicy};
use crate::report::prompts::{build_prompt, report_system_prompt};
use crate::report::template::render_report_html;
use crate::store::TaskStore;

/// Output budget for the narrative report.
pub const REPORT_MAX_TOKENS: u32 = 1000;
pub const REPORT_TEMPERATURE: f32 = 0.7;

pub const REPORT_OPTIONS: GenerationOptions = GenerationOptions {
    max_tokens: REPORT_MAX_TOKENS,
    temperature: REPORT_TEMPERATURE,
};

/// Result of a pipeline run. `file` deletes itself when dropped.
#[derive(Debug)]
pub struct GeneratedReport {
    pub aggregate: AggregateReport,
    pub file: ReportFile,
}

/// The report pipeline with its collaborators injected.
#[derive(Clone)]
pub struct ReportPipeline {
    store: Arc<dyn TaskStore>,
    llm: Arc<dyn TextGenerator>,
    renderer: Arc<dyn PdfRenderer>,
    policy: CompletionPolicy,
    output_dir: PathBuf,
}

impl ReportPipeline {
    pub fn new(
        store: Arc<dyn TaskStore>,
        llm: Arc<dyn TextGenerator>,
        renderer: Arc<dyn PdfRenderer>,
        policy: CompletionPolicy,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            store,
            llm,
            renderer,
            policy,
            output_dir,
        }
    }

    /// Runs every stage for `org_id` and returns the written report file.
    pub async fn run(&self, org_id: &str) -> Result<GeneratedReport, AppError> {
        // Step 1: Fetch
        let tasks = self.store.fetch_tasks(org_id).await?;

        // Step 2: Aggregate
        let aggregate = aggregate(&tasks, &self.policy);
        info!(
            "Aggregated org {}: {}/{} tasks completed across {} users",
            org_id,
            aggregate.completed_tasks,
            aggregate.total_tasks,
            aggregate.per_user.len()
        );

        // Step 3: Prompt
        let prompt = build_prompt(org_id, &aggregate);

        // Step 4: Generate narrative and wrap it in the document shell
        let fragment = self
            .llm
            .generate(&report_system_prompt(), &prompt, REPORT_OPTIONS)
            .await
            .map_err(|e| AppError::Llm(format!("Report generation failed: {e}")))?;
        let html = render_report_html(&fragment);

        // Step 5: Render and persist
        let pdf = self.renderer.render(&html).await?;
        let file = ReportFile::create(&self.output_dir, &pdf)
            .await
            .with_context(|| format!("Failed to write report under {}", self.output_dir.display()))?;

        info!(
            "Rendered report for org {} ({} bytes) to {}",
            org_id,
            pdf.len(),
            file.path().display()
        );

        Ok(GeneratedReport { aggregate, file })
    }
}
