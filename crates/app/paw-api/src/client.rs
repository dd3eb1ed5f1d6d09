use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::AuthSession;
use crate::config::ApiConfig;
use crate::envelope::ApiEnvelope;
use crate::error::ApiError;
use crate::transport::{ApiTransport, HttpTransport, RawResponse};

/// Credentialed client for the Pawbook backend.
///
/// Joins paths against the configured base URL, attaches the bearer token
/// from the [`AuthSession`] collaborator, and decodes the uniform response
/// envelope. Binary endpoints go through [`Self::get_raw`], which leaves
/// status and content-type handling to the caller.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    auth: Arc<dyn AuthSession>,
    transport: Arc<dyn ApiTransport>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, auth: Arc<dyn AuthSession>) -> Result<Self, ApiError> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(config, auth, transport))
    }

    /// Swap the transport; used by tests and by hosts that tunnel requests.
    pub fn with_transport(
        config: ApiConfig,
        auth: Arc<dyn AuthSession>,
        transport: Arc<dyn ApiTransport>,
    ) -> Self {
        Self {
            config,
            auth,
            transport,
        }
    }

    pub fn auth(&self) -> &Arc<dyn AuthSession> {
        &self.auth
    }

    pub fn transport(&self) -> Arc<dyn ApiTransport> {
        Arc::clone(&self.transport)
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .config
            .base_url
            .join(path)
            .map_err(|e| ApiError::Config(format!("bad endpoint {path}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn bearer(&self) -> Result<String, ApiError> {
        self.auth
            .access_token()
            .await
            .ok_or(ApiError::Unauthenticated)
    }

    fn decode<T: DeserializeOwned>(raw: RawResponse) -> Result<T, ApiError> {
        if !raw.is_success() {
            return Err(ApiError::from_error_body(raw.status, &raw.body));
        }
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&raw.body)?;
        envelope.into_result()
    }

    /// GET an envelope-wrapped JSON payload.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let token = self.bearer().await?;
        debug!(path, "GET");
        let raw = self
            .transport
            .get(self.endpoint(path, &[])?, Some(&token))
            .await?;
        Self::decode(raw)
    }

    /// POST a JSON body, expecting an envelope-wrapped payload back.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let token = self.bearer().await?;
        debug!(path, "POST");
        let raw = self
            .transport
            .post_json(
                self.endpoint(path, &[])?,
                serde_json::to_value(body)?,
                Some(&token),
            )
            .await?;
        Self::decode(raw)
    }

    /// PUT a JSON body where success carries no payload worth keeping.
    pub async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let token = self.bearer().await?;
        debug!(path, "PUT");
        let raw = self
            .transport
            .put_json(
                self.endpoint(path, &[])?,
                serde_json::to_value(body)?,
                Some(&token),
            )
            .await?;
        if !raw.is_success() {
            return Err(ApiError::from_error_body(raw.status, &raw.body));
        }
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_slice(&raw.body)?;
        envelope.ok()
    }

    /// Credentialed GET with no envelope or status interpretation — the
    /// caller discriminates on content type (gated binary downloads).
    pub async fn get_raw(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RawResponse, ApiError> {
        let token = self.bearer().await?;
        debug!(path, "GET (raw)");
        self.transport
            .get(self.endpoint(path, query)?, Some(&token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use bytes::Bytes;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::auth::StaticSession;
    use crate::transport::ProgressFn;

    struct ScriptedTransport {
        responses: Mutex<Vec<RawResponse>>,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<RawResponse>) -> Self {
            Self {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn next(&self, url: &Url) -> Result<RawResponse, ApiError> {
            self.seen.lock().unwrap().push(url.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or(ApiError::Config("no scripted response".into()))
        }
    }

    #[async_trait]
    impl ApiTransport for ScriptedTransport {
        async fn get(&self, url: Url, _bearer: Option<&str>) -> Result<RawResponse, ApiError> {
            self.next(&url)
        }

        async fn post_json(
            &self,
            url: Url,
            _body: serde_json::Value,
            _bearer: Option<&str>,
        ) -> Result<RawResponse, ApiError> {
            self.next(&url)
        }

        async fn put_json(
            &self,
            url: Url,
            _body: serde_json::Value,
            _bearer: Option<&str>,
        ) -> Result<RawResponse, ApiError> {
            self.next(&url)
        }

        async fn put_binary(
            &self,
            url: Url,
            _content_type: &str,
            _body: Bytes,
            _progress: Option<ProgressFn>,
            _cancel: CancellationToken,
        ) -> Result<RawResponse, ApiError> {
            self.next(&url)
        }
    }

    fn json_response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            content_type: Some("application/json".into()),
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    fn client_with(responses: Vec<RawResponse>) -> (ApiClient, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new(responses));
        let client = ApiClient::with_transport(
            ApiConfig::default(),
            Arc::new(StaticSession::signed_in("u_1", "tok")),
            transport.clone(),
        );
        (client, transport)
    }

    #[tokio::test]
    async fn get_json_decodes_envelope() {
        let (client, _) = client_with(vec![json_response(
            200,
            r#"{"success":true,"data":{"amount":42}}"#,
        )]);
        #[derive(serde::Deserialize)]
        struct Balance {
            amount: u64,
        }
        let balance: Balance = client.get_json("/api/credits/balance").await.unwrap();
        assert_eq!(balance.amount, 42);
    }

    #[tokio::test]
    async fn signed_out_short_circuits_without_network() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let client = ApiClient::with_transport(
            ApiConfig::default(),
            Arc::new(StaticSession::anonymous()),
            transport.clone(),
        );
        let err = client
            .get_json::<serde_json::Value>("/api/credits/balance")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_2xx_maps_to_server_error() {
        let (client, _) = client_with(vec![json_response(400, r#"{"message":"too many"}"#)]);
        let err = client
            .get_json::<serde_json::Value>("/api/credits/balance")
            .await
            .unwrap_err();
        match err {
            ApiError::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "too many");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn query_pairs_are_appended() {
        let (client, transport) = client_with(vec![json_response(200, "{}")]);
        client
            .get_raw(
                "/api/books/bk_1/download-pdf",
                &[("session_id", "cs_9"), ("charity_id", "ch_2")],
            )
            .await
            .unwrap();
        let seen = transport.seen.lock().unwrap();
        assert!(seen[0].contains("session_id=cs_9"));
        assert!(seen[0].contains("charity_id=ch_2"));
    }
}
