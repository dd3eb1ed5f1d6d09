//! Transport seam between the client and reqwest.
//!
//! The flow crates never touch reqwest directly; they talk to
//! [`ApiTransport`], which the real [`HttpTransport`] implements and test
//! fakes replace. The transport reports HTTP outcomes as data
//! ([`RawResponse`]) and reserves `Err` for transport-level failures, so
//! callers can discriminate negotiation payloads by content type even on
//! non-2xx responses.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Fractional upload progress observer, called with values in `[0, 100]`.
///
/// May fire many times in non-decreasing order, may fire zero times, and a
/// final 100 is not guaranteed before completion.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// A fully-buffered HTTP response with its declared content type.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The media type without parameters, lowercased
    /// (`"application/json; charset=utf-8"` → `"application/json"`).
    pub fn media_type(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_lowercase())
    }
}

#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get(&self, url: Url, bearer: Option<&str>) -> Result<RawResponse, ApiError>;

    async fn post_json(
        &self,
        url: Url,
        body: serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<RawResponse, ApiError>;

    async fn put_json(
        &self,
        url: Url,
        body: serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<RawResponse, ApiError>;

    /// Direct binary write to an absolute URL (presigned storage target),
    /// bypassing the application backend. No credentials are attached; the
    /// URL itself is the authorization.
    async fn put_binary(
        &self,
        url: Url,
        content_type: &str,
        body: Bytes,
        progress: Option<ProgressFn>,
        cancel: CancellationToken,
    ) -> Result<RawResponse, ApiError>;
}

/// The production transport backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ApiError::Network)?;
        Ok(Self { http })
    }
}

async fn read_response(resp: reqwest::Response) -> Result<RawResponse, ApiError> {
    let status = resp.status().as_u16();
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = resp.bytes().await?;
    Ok(RawResponse {
        status,
        content_type,
        body,
    })
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get(&self, url: Url, bearer: Option<&str>) -> Result<RawResponse, ApiError> {
        let mut request = self.http.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        read_response(request.send().await?).await
    }

    async fn post_json(
        &self,
        url: Url,
        body: serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<RawResponse, ApiError> {
        let mut request = self.http.post(url).json(&body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        read_response(request.send().await?).await
    }

    async fn put_json(
        &self,
        url: Url,
        body: serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<RawResponse, ApiError> {
        let mut request = self.http.put(url).json(&body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        read_response(request.send().await?).await
    }

    async fn put_binary(
        &self,
        url: Url,
        content_type: &str,
        body: Bytes,
        progress: Option<ProgressFn>,
        cancel: CancellationToken,
    ) -> Result<RawResponse, ApiError> {
        let total = body.len();
        let mut sent = 0usize;
        let chunks: Vec<Bytes> = body
            .chunks(UPLOAD_CHUNK_BYTES)
            .map(Bytes::copy_from_slice)
            .collect();

        // Progress is observed as reqwest pulls chunks off this stream, so
        // percentages are non-decreasing by construction.
        let counted = chunks.into_iter().map(move |chunk| {
            sent += chunk.len();
            if let Some(observer) = &progress {
                let pct = if total == 0 {
                    100
                } else {
                    (sent * 100 / total) as u8
                };
                observer(pct);
            }
            Ok::<Bytes, std::io::Error>(chunk)
        });

        let request = self
            .http
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(reqwest::Body::wrap_stream(futures::stream::iter(counted)));

        tokio::select! {
            _ = cancel.cancelled() => Err(ApiError::Aborted),
            result = request.send() => read_response(result?).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_strips_parameters_and_case() {
        let resp = RawResponse {
            status: 200,
            content_type: Some("Application/JSON; charset=utf-8".into()),
            body: Bytes::new(),
        };
        assert_eq!(resp.media_type().as_deref(), Some("application/json"));
    }

    #[test]
    fn success_range_is_2xx_only() {
        for (status, ok) in [(199, false), (200, true), (299, true), (302, false)] {
            let resp = RawResponse {
                status,
                content_type: None,
                body: Bytes::new(),
            };
            assert_eq!(resp.is_success(), ok, "status {status}");
        }
    }
}
