use std::path::{Path, PathBuf};

use axum::body::Body;
use futures::StreamExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};
use uuid::Uuid;

/// Name the client sees for every report, regardless of the file on disk.
pub const DOWNLOAD_FILENAME: &str = "team-report.pdf";

/// A rendered report on local disk. The file is deleted when this value is dropped.
///
/// Ownership moves into the response body stream in [`ReportFile::into_body`], so the
/// file lives exactly as long as the download.
#[derive(Debug)]
pub struct ReportFile {
    path: PathBuf,
}

impl ReportFile {
    /// Writes `bytes` to a fresh `report_<uuid>.pdf` inside `dir`.
    pub async fn create(dir: &Path, bytes: &[u8]) -> std::io::Result<Self> {
        let file = ReportFile {
            path: dir.join(format!("report_{}.pdf", Uuid::new_v4().simple())),
        };
        tokio::fs::write(&file.path, bytes).await?;
        debug!("Wrote {} bytes to {}", bytes.len(), file.path.display());
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Streams the file as a response body. Deletion happens once the stream
    /// is exhausted or the body is dropped.
    pub async fn into_body(self) -> std::io::Result<Body> {
        let handle = tokio::fs::File::open(&self.path).await?;
        let stream = ReaderStream::new(handle).map(move |chunk| {
            let _keep_alive = &self;
            chunk
        });
        Ok(Body::from_stream(stream))
    }
}

impl Drop for ReportFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {e}", self.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_report_name(path: &Path) -> bool {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        name.starts_with("report_") && name.ends_with(".pdf") && name.len() == "report_".len() + 32 + 4
    }

    #[tokio::test]
    async fn test_create_writes_uniquely_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = ReportFile::create(dir.path(), b"%PDF-a").await.unwrap();
        let b = ReportFile::create(dir.path(), b"%PDF-b").await.unwrap();

        assert_ne!(a.path(), b.path());
        assert!(is_report_name(a.path()));
        assert_eq!(std::fs::read(a.path()).unwrap(), b"%PDF-a");
    }

    #[tokio::test]
    async fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = ReportFile::create(dir.path(), b"%PDF").await.unwrap();
        let path = file.path().to_path_buf();
        assert!(path.exists());

        drop(file);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_body_streams_contents_then_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let contents = vec![b'x'; 100_000];
        let file = ReportFile::create(dir.path(), &contents).await.unwrap();
        let path = file.path().to_path_buf();

        let body = file.into_body().await.unwrap();
        assert!(path.exists(), "file must survive until the body is consumed");

        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        assert_eq!(bytes.len(), contents.len());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_create_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(ReportFile::create(&missing, b"%PDF").await.is_err());
    }
}
