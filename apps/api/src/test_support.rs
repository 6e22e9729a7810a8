//! Test doubles for the pipeline's external collaborators.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{GenerationOptions, LlmError, TextGenerator};
use crate::models::task::TaskRecord;
use crate::render::{BuiltinPdfRenderer, PdfRenderer, RenderError};
use crate::store::{StoreError, TaskStore};

pub fn task(team_id: &str, status: &str, username: Option<&str>, notes: Option<&str>) -> TaskRecord {
    TaskRecord {
        team_id: Some(team_id.to_string()),
        status: Some(status.to_string()),
        username: username.map(String::from),
        notes: notes.map(String::from),
        ..Default::default()
    }
}

/// Returns the same rows for every organization and records which ids were asked for.
pub struct StubStore {
    tasks: Vec<TaskRecord>,
    requested: Mutex<Vec<String>>,
}

impl StubStore {
    pub fn new(tasks: Vec<TaskRecord>) -> Self {
        Self {
            tasks,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_orgs(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskStore for StubStore {
    async fn fetch_tasks(&self, org_id: &str) -> Result<Vec<TaskRecord>, StoreError> {
        self.requested.lock().unwrap().push(org_id.to_string());
        Ok(self.tasks.clone())
    }
}

pub struct FailingStore;

#[async_trait]
impl TaskStore for FailingStore {
    async fn fetch_tasks(&self, _org_id: &str) -> Result<Vec<TaskRecord>, StoreError> {
        Err(StoreError::Api {
            status: 503,
            message: "store unavailable".to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct GenerateCall {
    pub system: String,
    pub prompt: String,
    pub options: GenerationOptions,
}

/// Deterministic oracle: returns a fixed completion (or a fixed failure) and records calls.
pub struct StubGenerator {
    response: Option<String>,
    calls: Mutex<Vec<GenerateCall>>,
}

impl StubGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<GenerateCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(GenerateCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
            options,
        });
        self.response.clone().ok_or(LlmError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        })
    }
}

pub struct FailingRenderer;

#[async_trait]
impl PdfRenderer for FailingRenderer {
    async fn render(&self, _html: &str) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::InvalidOutput)
    }
}

/// Records every document it is asked to render, then renders it with the built-in engine.
#[derive(Default)]
pub struct CapturingRenderer {
    rendered: Mutex<Vec<String>>,
}

impl CapturingRenderer {
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.lock().unwrap().clone()
    }
}

#[async_trait]
impl PdfRenderer for CapturingRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        self.rendered.lock().unwrap().push(html.to_string());
        BuiltinPdfRenderer.render(html).await
    }
}
