//! Payment-gated book PDF delivery.
//!
//! The download endpoint answers a credentialed request either with the
//! PDF itself or with a negotiation payload naming the precondition that
//! still stands (payment, charity choice). The variant is decided by the
//! response's declared content type — both shapes arrive with 2xx status —
//! and the negotiator drives the client through whichever sub-flow is
//! required before the request is retried.

mod error;
pub use error::DownloadError;

mod filename;
pub use filename::generate_filename;

mod negotiate;
pub use negotiate::BookDownloader;

mod sink;
pub use sink::{ArtifactSink, DirectorySink, SaveOutcome};

mod types;
pub use types::{BookRef, DownloadNegotiation, DownloadOptions, SavedArtifact};
