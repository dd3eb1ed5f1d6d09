use paw_api::{ApiError, UserFacing};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Rejected client-side; no network call was made.
    #[error("invalid upload: {0}")]
    Validation(&'static str),

    /// Phase 1 — the backend refused to issue a write credential.
    #[error("could not obtain an upload credential: {0}")]
    Credential(#[source] ApiError),

    /// Phase 2 — the direct write to storage failed.
    #[error("transfer to storage failed: {0}")]
    Transfer(#[source] ApiError),

    /// Phase 2 — the user cancelled mid-transfer. Not a failure; callers
    /// suppress error toasts for this.
    #[error("upload aborted")]
    Aborted,

    /// Phase 3 failed after the object already landed in storage: the
    /// record does not reference the upload yet. Inconsistent but
    /// recoverable, and must be presented as a warning distinct from an
    /// outright failure.
    #[error("upload succeeded but could not be saved: {source}")]
    CommitFailedAfterUpload {
        final_url: String,
        #[source]
        source: ApiError,
    },
}

impl UserFacing for UploadError {
    fn notice_key(&self) -> Option<&'static str> {
        match self {
            UploadError::Validation(_) => Some("upload.invalid_file"),
            UploadError::Credential(_) => Some("upload.credential_failed"),
            UploadError::Transfer(_) => Some("upload.transfer_failed"),
            UploadError::Aborted => None,
            UploadError::CommitFailedAfterUpload { .. } => Some("upload.saved_but_not_linked"),
        }
    }
}
