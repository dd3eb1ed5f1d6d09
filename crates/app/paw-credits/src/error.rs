use paw_api::{ApiError, UserFacing};

#[derive(Debug, thiserror::Error)]
pub enum CreditError {
    /// Zero-credit purchases are a domain error, rejected before any
    /// network call.
    #[error("credit amount must be a positive number of credits")]
    InvalidAmount,

    /// The return URL carried no checkout session identifier.
    #[error("missing checkout session identifier")]
    MissingSession,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl UserFacing for CreditError {
    fn notice_key(&self) -> Option<&'static str> {
        match self {
            CreditError::InvalidAmount => Some("credits.invalid_amount"),
            CreditError::MissingSession => Some("credits.missing_session"),
            CreditError::Api(e) => e.notice_key(),
        }
    }
}
