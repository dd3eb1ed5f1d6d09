//! Wire and result shapes for the download flow.

use std::path::PathBuf;

use bytes::Bytes;
use serde::Deserialize;

/// The book whose PDF is being fetched; the title drives the filename.
#[derive(Debug, Clone)]
pub struct BookRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Checkout session identifier for the guest post-purchase flow.
    pub session_id: Option<String>,
    /// Charity the user has already chosen, if any.
    pub charity_id: Option<String>,
}

/// The server's answer to a gated download request.
///
/// Discriminated purely by the response's declared content type — both the
/// binary and the metadata answers use 2xx, so status alone cannot tell
/// them apart.
#[derive(Debug)]
pub enum DownloadNegotiation {
    /// The artifact itself.
    Binary(Bytes),
    /// Payment stands between the user and the artifact.
    PaymentRequired {
        checkout_url: Option<String>,
        is_guest: bool,
    },
    /// A charity must be chosen before delivery.
    CharityRequired { message: String },
    /// Anything else the server had to say.
    Error { status: u16, message: String },
}

/// Negotiation payload as it appears on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NegotiationBody {
    #[serde(default)]
    pub requires_payment: bool,
    #[serde(default)]
    pub is_guest: bool,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub charity_required: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// A successfully persisted download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub filename: String,
    /// Where the sink put it; `None` for sinks that stream elsewhere.
    pub path: Option<PathBuf>,
}
