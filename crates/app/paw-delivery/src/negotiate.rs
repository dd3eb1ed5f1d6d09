use std::sync::Arc;

use paw_api::{ApiClient, ApiError, CharitySelector, RawResponse};
use tracing::{debug, info};

use crate::error::DownloadError;
use crate::filename::generate_filename;
use crate::sink::{ArtifactSink, SaveOutcome};
use crate::types::{
    BookRef, DownloadNegotiation, DownloadOptions, NegotiationBody, SavedArtifact,
};

const PDF_MEDIA_TYPE: &str = "application/pdf";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Drives a gated book download through whatever sub-flows the server
/// demands before it hands over the binary.
pub struct BookDownloader {
    client: Arc<ApiClient>,
    charity: Arc<dyn CharitySelector>,
}

impl BookDownloader {
    pub fn new(client: Arc<ApiClient>, charity: Arc<dyn CharitySelector>) -> Self {
        Self { client, charity }
    }

    fn download_path(book_id: &str) -> String {
        format!("/api/books/{book_id}/download-pdf")
    }

    /// One negotiation round: request the artifact and classify the answer.
    pub async fn negotiate(
        &self,
        book_id: &str,
        options: &DownloadOptions,
    ) -> Result<DownloadNegotiation, DownloadError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(session_id) = options.session_id.as_deref() {
            query.push(("session_id", session_id));
        }
        if let Some(charity_id) = options.charity_id.as_deref() {
            query.push(("charity_id", charity_id));
        }

        let raw = self
            .client
            .get_raw(&Self::download_path(book_id), &query)
            .await?;
        Ok(discriminate(raw))
    }

    /// Full download: negotiate, resolve a charity requirement in place,
    /// then persist the binary through `sink`.
    ///
    /// `PaymentRequired` is returned to the caller rather than resolved
    /// here — checkout is a full-page hand-off, and the caller retries the
    /// download once the user is back.
    pub async fn download(
        &self,
        book: &BookRef,
        options: DownloadOptions,
        sink: &dyn ArtifactSink,
    ) -> Result<SavedArtifact, DownloadError> {
        let mut options = options;
        let mut charity_asked = false;

        loop {
            match self.negotiate(&book.id, &options).await? {
                DownloadNegotiation::Binary(bytes) => {
                    let filename = generate_filename(&book.title, &book.id);
                    return match sink.save(&filename, &bytes).await? {
                        SaveOutcome::Saved(path) => {
                            info!(book_id = %book.id, %filename, "book downloaded");
                            Ok(SavedArtifact { filename, path })
                        }
                        SaveOutcome::Cancelled => {
                            debug!(book_id = %book.id, "save dismissed by user");
                            Err(DownloadError::Cancelled)
                        }
                    };
                }
                DownloadNegotiation::PaymentRequired {
                    checkout_url,
                    is_guest,
                } => {
                    debug!(book_id = %book.id, is_guest, "download gated on payment");
                    return Err(DownloadError::PaymentRequired {
                        checkout_url,
                        is_guest,
                    });
                }
                DownloadNegotiation::CharityRequired { message } => {
                    if charity_asked {
                        // The server rejected the charity we just sent.
                        return Err(DownloadError::Api(ApiError::Rejected(message)));
                    }
                    charity_asked = true;
                    match self.charity.choose(&message).await {
                        Some(charity_id) => {
                            debug!(book_id = %book.id, %charity_id, "charity chosen, retrying");
                            options.charity_id = Some(charity_id);
                        }
                        None => return Err(DownloadError::CharityDeclined),
                    }
                }
                DownloadNegotiation::Error { status, message } => {
                    return Err(DownloadError::Api(ApiError::Server { status, message }));
                }
            }
        }
    }
}

/// Classify a download response by its declared content type. Status alone
/// cannot discriminate: both the binary and the negotiation payload arrive
/// with 2xx.
fn discriminate(raw: RawResponse) -> DownloadNegotiation {
    let media_type = raw.media_type();

    if !raw.is_success() {
        let message = serde_json::from_slice::<NegotiationBody>(&raw.body)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| format!("HTTP {}", raw.status));
        return DownloadNegotiation::Error {
            status: raw.status,
            message,
        };
    }

    match media_type.as_deref() {
        Some(PDF_MEDIA_TYPE) => DownloadNegotiation::Binary(raw.body),
        Some(JSON_MEDIA_TYPE) => match serde_json::from_slice::<NegotiationBody>(&raw.body) {
            Ok(body) if body.requires_payment => DownloadNegotiation::PaymentRequired {
                checkout_url: body.checkout_url,
                is_guest: body.is_guest,
            },
            Ok(body) if body.charity_required => DownloadNegotiation::CharityRequired {
                message: body
                    .message
                    .unwrap_or_else(|| "choose a charity to continue".to_string()),
            },
            Ok(body) => DownloadNegotiation::Error {
                status: raw.status,
                message: body
                    .message
                    .unwrap_or_else(|| "unexpected negotiation payload".to_string()),
            },
            Err(e) => DownloadNegotiation::Error {
                status: raw.status,
                message: format!("malformed negotiation payload: {e}"),
            },
        },
        other => DownloadNegotiation::Error {
            status: raw.status,
            message: format!(
                "unexpected content type {}",
                other.unwrap_or("<none>")
            ),
        },
    }
}
