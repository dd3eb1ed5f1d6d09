//! Client configuration.
//!
//! Defaults point at the production API; `PAWBOOK_API_URL` overrides the
//! base for staging and local development.

use std::time::Duration;

use url::Url;

use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "https://api.pawbook.app/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("pawbook-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Build a configuration from the environment, falling back to defaults
    /// for anything unset.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if `PAWBOOK_API_URL` is set but not a
    /// valid absolute URL.
    pub fn from_env() -> Result<Self, ApiError> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("PAWBOOK_API_URL") {
            config.base_url = Url::parse(&raw)
                .map_err(|e| ApiError::Config(format!("PAWBOOK_API_URL: {e}")))?;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.user_agent.starts_with("pawbook-client/"));
    }
}
