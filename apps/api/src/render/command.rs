use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::{ensure_pdf, PdfRenderer, RenderError};

/// Arguments that make `wkhtmltopdf` read HTML from stdin and write the PDF to stdout.
const WKHTMLTOPDF_ARGS: &[&str] = &[
    "--quiet",
    "--encoding",
    "utf-8",
    "--disable-javascript",
    "-",
    "-",
];

/// Renders by piping the HTML through an external converter process.
/// The process must read HTML on stdin and write PDF bytes to stdout.
#[derive(Debug, Clone)]
pub struct CommandPdfRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandPdfRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn wkhtmltopdf(path: impl Into<String>) -> Self {
        Self::new(path, WKHTMLTOPDF_ARGS.iter().map(|a| a.to_string()).collect())
    }
}

#[async_trait]
impl PdfRenderer for CommandPdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin concurrently so a converter that streams output early cannot deadlock.
        let mut stdin = child.stdin.take();
        let input = html.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            if let Some(stdin) = stdin.as_mut() {
                stdin.write_all(&input).await?;
                stdin.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        });

        let output = child.wait_with_output().await?;
        let write_result = writer
            .await
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        if !output.status.success() {
            return Err(RenderError::Converter {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        // A converter may exit successfully before consuming all of stdin.
        match write_result {
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                debug!("{} closed stdin early", self.program);
            }
            other => other?,
        }

        debug!(
            "{} produced {} bytes of PDF",
            self.program,
            output.stdout.len()
        );
        ensure_pdf(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str) -> CommandPdfRenderer {
        CommandPdfRenderer::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[tokio::test]
    async fn test_pipes_html_through_converter() {
        let renderer = shell("cat >/dev/null; printf '%%PDF-1.4 fake'");
        let bytes = renderer.render("<p>hello</p>").await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4 fake");
    }

    #[tokio::test]
    async fn test_converter_ignoring_stdin_still_succeeds() {
        let renderer = shell("printf '%%PDF-1.4 early'");
        let html = format!("<p>{}</p>", "x".repeat(1 << 20));
        let bytes = renderer.render(&html).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4 early");
    }

    #[tokio::test]
    async fn test_converter_receives_html_on_stdin() {
        // Echo the input back behind a PDF signature.
        let renderer = shell("printf '%%PDF '; cat");
        let bytes = renderer.render("<h1>Team</h1>").await.unwrap();
        assert_eq!(bytes, b"%PDF <h1>Team</h1>");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_converter_error() {
        let renderer = shell("cat >/dev/null; echo 'bad html' >&2; exit 3");
        let err = renderer.render("<p>").await.unwrap_err();
        match err {
            RenderError::Converter { stderr, .. } => assert_eq!(stderr, "bad html"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let renderer = CommandPdfRenderer::wkhtmltopdf("/nonexistent/wkhtmltopdf-binary");
        let err = renderer.render("<p>").await.unwrap_err();
        assert!(matches!(err, RenderError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_non_pdf_output_is_rejected() {
        let renderer = shell("cat >/dev/null; printf 'oops'");
        let err = renderer.render("<p>").await.unwrap_err();
        assert!(matches!(err, RenderError::InvalidOutput));
    }
}
