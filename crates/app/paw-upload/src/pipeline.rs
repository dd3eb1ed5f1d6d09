use std::sync::Arc;

use bytes::Bytes;
use paw_api::{ApiClient, ApiError, ProgressFn};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::UploadError;
use crate::types::{AcquireResponse, CommitTarget, UploadSource, UploadTicket};
use crate::validate::validate;

/// Orchestrates the acquire → transfer → commit upload sequence.
pub struct UploadPipeline {
    client: Arc<ApiClient>,
}

impl UploadPipeline {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Run the full pipeline and return the stored object's public URL.
    ///
    /// `progress` observes the transfer phase with percentages in
    /// `[0, 100]`, non-decreasing, possibly never called; `cancel` aborts
    /// the transfer and surfaces as [`UploadError::Aborted`].
    pub async fn upload(
        &self,
        source: UploadSource,
        target: CommitTarget,
        progress: Option<ProgressFn>,
        cancel: CancellationToken,
    ) -> Result<String, UploadError> {
        validate(&source)?;

        let ticket = self.acquire(&source.content_type, &target).await?;
        self.transfer(&ticket, source.bytes, progress, cancel)
            .await?;
        self.commit(&target, &ticket.final_url).await?;

        info!(final_url = %ticket.final_url, "upload complete");
        Ok(ticket.final_url)
    }

    /// Phase 1: request a short-lived write credential.
    async fn acquire(
        &self,
        content_type: &str,
        target: &CommitTarget,
    ) -> Result<UploadTicket, UploadError> {
        let response: AcquireResponse = self
            .client
            .post_json(
                &target.acquire_path(),
                &json!({ "contentType": content_type }),
            )
            .await
            .map_err(UploadError::Credential)?;

        debug!(upload_url = %response.upload_url, "upload credential acquired");
        Ok(UploadTicket {
            content_type: content_type.to_string(),
            upload_url: response.upload_url,
            final_url: response.final_url,
        })
    }

    /// Phase 2: direct binary write to storage, bypassing the backend.
    async fn transfer(
        &self,
        ticket: &UploadTicket,
        bytes: Bytes,
        progress: Option<ProgressFn>,
        cancel: CancellationToken,
    ) -> Result<(), UploadError> {
        let url = Url::parse(&ticket.upload_url)
            .map_err(|e| UploadError::Transfer(ApiError::Config(format!("bad upload URL: {e}"))))?;

        let raw = self
            .client
            .transport()
            .put_binary(url, &ticket.content_type, bytes, progress, cancel)
            .await
            .map_err(|e| match e {
                ApiError::Aborted => UploadError::Aborted,
                other => UploadError::Transfer(other),
            })?;

        if !raw.is_success() {
            return Err(UploadError::Transfer(ApiError::from_error_body(
                raw.status, &raw.body,
            )));
        }
        Ok(())
    }

    /// Phase 3: point the owning record at the stored object. Failing here
    /// leaves an orphaned object in storage, so the error names the URL the
    /// record should have received.
    async fn commit(&self, target: &CommitTarget, final_url: &str) -> Result<(), UploadError> {
        self.client
            .put_unit(&target.commit_path(), &target.commit_body(final_url))
            .await
            .map_err(|source| {
                warn!(final_url, error = %source, "commit failed after successful transfer");
                UploadError::CommitFailedAfterUpload {
                    final_url: final_url.to_string(),
                    source,
                }
            })
    }
}
