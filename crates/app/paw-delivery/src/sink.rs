//! Local persistence of downloaded artifacts.
//!
//! The preferred sink in an interactive host is a "save as" dialog the
//! host implements against [`ArtifactSink`]; user dismissal there comes
//! back as [`SaveOutcome::Cancelled`] and must stay a deliberate abort.
//! [`DirectorySink`] is the non-interactive fallback writing straight into
//! a downloads directory.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

/// What became of the artifact offered to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written; the path is wherever the sink put it (`None` for sinks
    /// that hand the bytes elsewhere).
    Saved(Option<PathBuf>),
    /// The user dismissed the interactive surface.
    Cancelled,
}

#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn save(&self, filename: &str, bytes: &Bytes) -> std::io::Result<SaveOutcome>;
}

/// Writes into a fixed directory via a `.part` temporary.
///
/// The temporary is consumed by the final rename on success and removed on
/// the failure path, so neither outcome leaves a stray partial file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ArtifactSink for DirectorySink {
    async fn save(&self, filename: &str, bytes: &Bytes) -> std::io::Result<SaveOutcome> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.dir.join(filename);
        let part = self.dir.join(format!("{filename}.part"));

        if let Err(e) = tokio::fs::write(&part, bytes).await {
            let _ = tokio::fs::remove_file(&part).await;
            return Err(e);
        }
        match tokio::fs::rename(&part, &target).await {
            Ok(()) => {
                debug!(path = %target.display(), "artifact saved");
                Ok(SaveOutcome::Saved(Some(target)))
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&part).await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_and_leaves_no_temporary() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        let outcome = sink
            .save("book_b1.pdf", &Bytes::from_static(b"%PDF-1.7"))
            .await
            .unwrap();

        let path = dir.path().join("book_b1.pdf");
        assert_eq!(outcome, SaveOutcome::Saved(Some(path.clone())));
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.7");
        assert!(!dir.path().join("book_b1.pdf.part").exists());
    }

    #[tokio::test]
    async fn failed_rename_cleans_up_the_temporary() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the target name makes the rename fail.
        std::fs::create_dir(dir.path().join("book_b1.pdf")).unwrap();
        let sink = DirectorySink::new(dir.path());

        let result = sink
            .save("book_b1.pdf", &Bytes::from_static(b"%PDF-1.7"))
            .await;

        assert!(result.is_err());
        assert!(!dir.path().join("book_b1.pdf.part").exists());
    }
}
