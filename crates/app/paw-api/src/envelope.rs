use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Uniform response envelope used by every backend endpoint except raw
/// binaries and the direct-storage PUT.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, translating `success: false` into
    /// [`ApiError::Rejected`] carrying the server's message.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "request failed".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Rejected("response envelope missing data".to_string()))
    }

    /// Like [`Self::into_result`] but for endpoints whose success carries no
    /// payload worth keeping (e.g. record commits).
    pub fn ok(self) -> Result<(), ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "request failed".to_string()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        amount: u64,
    }

    #[test]
    fn success_envelope_yields_data() {
        let env: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"success":true,"data":{"amount":250}}"#).unwrap();
        assert_eq!(env.into_result().unwrap(), Payload { amount: 250 });
    }

    #[test]
    fn failure_envelope_surfaces_message() {
        let env: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"success":false,"message":"balance unavailable"}"#).unwrap();
        match env.into_result() {
            Err(ApiError::Rejected(message)) => assert_eq!(message, "balance unavailable"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn success_without_data_is_ok_for_unit_calls() {
        let env: ApiEnvelope<Payload> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.ok().is_ok());
    }
}
