//! Direct-to-storage image uploads.
//!
//! Three phases, each independently failable: acquire a short-lived write
//! credential from the backend, stream the bytes straight to object
//! storage with progress reporting, then commit the resulting location to
//! the owning record. The awkward case — storage write succeeded but the
//! commit failed — is surfaced as its own error so the UI can warn
//! "uploaded but not saved" instead of pretending nothing happened.

mod error;
pub use error::UploadError;

mod pipeline;
pub use pipeline::UploadPipeline;

mod types;
pub use types::{CommitTarget, UploadSource, UploadTicket};

mod validate;
pub use validate::{MAX_UPLOAD_BYTES, validate};
