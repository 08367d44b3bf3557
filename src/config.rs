//! Transport configuration

use crate::{Error, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://api.mercadolibre.com";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "CHECKOUT_API_URL";

/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "CHECKOUT_TIMEOUT_SECS";

/// Configuration of the HTTP gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the payment API
    pub base_url: String,
    /// Request timeout
    pub timeout: Option<Duration>,
    /// User agent sent with every request
    pub user_agent: String,
}

impl ApiConfig {
    /// Create a new config pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            user_agent: format!("checkout-sdk/{}", crate::VERSION),
        }
    }

    /// Build a config from `CHECKOUT_API_URL` and `CHECKOUT_TIMEOUT_SECS`,
    /// falling back to the defaults for unset variables
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var(API_URL_ENV) {
            Ok(url) => Self::new(url),
            Err(_) => Self::default(),
        };

        if let Ok(secs) = env::var(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::config(format!("{TIMEOUT_ENV} must be a whole number of seconds, got {secs:?}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::config("API base URL cannot be empty"));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("Invalid API base URL {:?}: {}", self.base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::config(
                "API base URL must start with http:// or https://",
            ));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(Error::config("API base URL must name a host"));
        }

        Ok(())
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
