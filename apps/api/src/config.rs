use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::report::aggregate::DEFAULT_DONE_STATUS;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Browser origins allowed to call the API when `CORS_ALLOWED_ORIGINS` is unset.
const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:3001",
    "https://lavureai.com",
    "https://www.lavureai.com",
    "https://prodai-iyfp-bmo2s63bw-vishal-puttaguntas-projects.vercel.app",
];

/// Which HTML-to-PDF converter backs the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfEngine {
    /// External `wkhtmltopdf` process. Full CSS support.
    Wkhtmltopdf,
    /// In-process text layout via `printpdf`. No external binary needed.
    Builtin,
}

impl PdfEngine {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wkhtmltopdf" => Ok(PdfEngine::Wkhtmltopdf),
            "builtin" => Ok(PdfEngine::Builtin),
            other => bail!("PDF_ENGINE must be 'wkhtmltopdf' or 'builtin', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
    /// Status value that marks a task as completed (compared case-insensitively).
    pub done_status: String,
    pub report_output_dir: PathBuf,
    pub pdf_engine: PdfEngine,
    pub wkhtmltopdf_path: String,
    pub cors_allowed_origins: Vec<String>,
    pub http_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            supabase_url: require_env("SUPABASE_URL")?,
            supabase_service_key: require_env("SUPABASE_SERVICE_KEY")?,
            done_status: optional_env("DONE_STATUS")
                .unwrap_or_else(|| DEFAULT_DONE_STATUS.to_string()),
            report_output_dir: optional_env("REPORT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            pdf_engine: PdfEngine::parse(
                &optional_env("PDF_ENGINE").unwrap_or_else(|| "wkhtmltopdf".to_string()),
            )?,
            wkhtmltopdf_path: optional_env("WKHTMLTOPDF_PATH")
                .unwrap_or_else(|| "wkhtmltopdf".to_string()),
            cors_allowed_origins: optional_env("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()),
            http_timeout: Duration::from_secs(
                optional_env("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|| "60".to_string())
                    .parse::<u64>()
                    .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
