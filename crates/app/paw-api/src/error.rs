use serde::Deserialize;

/// Transport-level failures shared by every flow crate.
///
/// Flow crates wrap this in their own error enums via `#[from]` and add the
/// variants specific to their domain.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The envelope arrived with `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The caller cancelled the request mid-flight.
    #[error("request aborted")]
    Aborted,

    #[error("configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: Option<String>,
}

impl ApiError {
    /// Build a `Server` error from a non-2xx response, preferring a message
    /// from a JSON error body and falling back to a status-coded string.
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self::Server { status, message }
    }

    /// User-initiated cancellation; callers suppress error toasts for these.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_message_is_preferred() {
        let err = ApiError::from_error_body(402, br#"{"message":"payment required"}"#);
        match err {
            ApiError::Server { status, message } => {
                assert_eq!(status, 402);
                assert_eq!(message, "payment required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_alias_field_is_accepted() {
        let err = ApiError::from_error_body(500, br#"{"error":"boom"}"#);
        assert_eq!(
            err.to_string(),
            "server returned 500: boom".to_string()
        );
    }

    #[test]
    fn non_json_body_falls_back_to_status() {
        let err = ApiError::from_error_body(503, b"<html>oops</html>");
        assert_eq!(err.to_string(), "server returned 503: HTTP 503");
    }
}
