//! Error-to-message-key mapping.
//!
//! The host's i18n layer owns the actual strings; this layer only promises
//! stable keys. Cancellations map to no key at all — a user who aborted an
//! action does not get an error toast about it.

use crate::error::ApiError;

/// Implemented by every flow error enum so the host can route any failure
/// through one notification path.
pub trait UserFacing {
    /// Stable message key for the notification sink, or `None` when the
    /// condition should not be surfaced (user-initiated cancellation).
    fn notice_key(&self) -> Option<&'static str>;
}

impl UserFacing for ApiError {
    fn notice_key(&self) -> Option<&'static str> {
        match self {
            ApiError::Unauthenticated => Some("errors.unauthenticated"),
            ApiError::Network(_) => Some("errors.network"),
            ApiError::Server { .. } => Some("errors.server"),
            ApiError::Rejected(_) => Some("errors.rejected"),
            ApiError::Decode(_) => Some("errors.malformed_response"),
            ApiError::Aborted => None,
            ApiError::Config(_) => Some("errors.configuration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_gets_no_toast() {
        assert_eq!(ApiError::Aborted.notice_key(), None);
    }

    #[test]
    fn server_errors_get_a_key() {
        let err = ApiError::Server {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.notice_key(), Some("errors.server"));
    }
}
