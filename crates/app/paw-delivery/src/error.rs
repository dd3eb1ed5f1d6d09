use paw_api::{ApiError, UserFacing};

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The user dismissed the save surface. A deliberate abort — never
    /// silently fall back to another download path, never toast an error.
    #[error("download cancelled")]
    Cancelled,

    /// Expected control-flow branch, not a fault: the caller opens the
    /// purchase prompt and retries the download after the user returns.
    #[error("payment required before download")]
    PaymentRequired {
        checkout_url: Option<String>,
        is_guest: bool,
    },

    /// The user declined to choose a charity.
    #[error("charity selection declined")]
    CharityDeclined,

    #[error("could not persist artifact: {0}")]
    Persist(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl UserFacing for DownloadError {
    fn notice_key(&self) -> Option<&'static str> {
        match self {
            DownloadError::Cancelled | DownloadError::CharityDeclined => None,
            DownloadError::PaymentRequired { .. } => Some("download.payment_required"),
            DownloadError::Persist(_) => Some("download.persist_failed"),
            DownloadError::Api(e) => e.notice_key(),
        }
    }
}
