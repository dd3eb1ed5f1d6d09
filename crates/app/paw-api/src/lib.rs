//! HTTP client core for the Pawbook backend.
//!
//! This crate owns everything the flow crates share: the credentialed
//! [`ApiClient`], the uniform response envelope, the transport seam that
//! lets tests run without a network, the collaborator traits the host UI
//! provides (auth session, notifications, checkout redirect, charity
//! selection), and process-wide telemetry initialization.
//!
//! Nothing here knows about credits, books, or uploads; those flows live in
//! `paw-credits`, `paw-delivery`, and `paw-upload`.

pub mod telemetry;

mod auth;
pub use auth::{AuthSession, StaticSession, UserHandle};

mod client;
pub use client::ApiClient;

mod collab;
pub use collab::{CharitySelector, CheckoutRedirect, LoggingNotifier, NoticeLevel, Notifier};

mod config;
pub use config::ApiConfig;

mod envelope;
pub use envelope::ApiEnvelope;

mod error;
pub use error::ApiError;

mod messages;
pub use messages::UserFacing;

mod transport;
pub use transport::{ApiTransport, HttpTransport, ProgressFn, RawResponse};
