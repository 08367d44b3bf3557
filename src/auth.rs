//! Client-credentials authentication
//!
//! The [`Authentication`] collaborator talks to the token endpoint and hands
//! back a raw [`TokenResponse`]. Turning that into a usable [`TokenPair`] is
//! the client's job, via `TokenPair::try_from`.

use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::env;
use std::fmt;

/// Environment variable holding the client identifier
pub const CLIENT_ID_ENV: &str = "CHECKOUT_CLIENT_ID";

/// Environment variable holding the client secret
pub const CLIENT_SECRET_ENV: &str = "CHECKOUT_CLIENT_SECRET";

/// Application credentials used for the client-credentials exchange
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The application's client identifier
    pub client_id: String,
    /// The application's client secret
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read the credentials from `CHECKOUT_CLIENT_ID` and `CHECKOUT_CLIENT_SECRET`
    pub fn from_env() -> Result<Self> {
        let client_id = env::var(CLIENT_ID_ENV).map_err(|_| {
            Error::config(format!(
                "Missing client identifier: set the {CLIENT_ID_ENV} environment variable"
            ))
        })?;
        let client_secret = env::var(CLIENT_SECRET_ENV).map_err(|_| {
            Error::config(format!(
                "Missing client secret: set the {CLIENT_SECRET_ENV} environment variable"
            ))
        })?;

        Ok(Self::new(client_id, client_secret))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Raw response of the token endpoint.
///
/// Nothing here is guaranteed to be present; a rejected exchange typically
/// carries only `message` and an error code. Both the wire spelling
/// (`access_token`) and the camelCase spelling (`accessToken`) are accepted.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default, alias = "accessToken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, alias = "refreshToken", skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Human-readable reason for a rejection. A non-string value reads as `None`.
    #[serde(
        default,
        deserialize_with = "text_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    /// Every other field of the response (`expires_in`, `scope`, `error`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn text_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("message", &self.message)
            .field("extra", &self.extra)
            .finish()
    }
}

/// A validated access/refresh token pair
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    access_token: String,
    refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Credential sent with every authenticated call
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Credential used only to obtain a new pair
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

impl TryFrom<TokenResponse> for TokenPair {
    type Error = Error;

    /// Both tokens are mandatory. A missing (or null) token fails with
    /// [`Error::Access`] carrying the response's own `message`.
    fn try_from(response: TokenResponse) -> Result<Self> {
        match (response.access_token, response.refresh_token) {
            (Some(access_token), Some(refresh_token)) => Ok(Self {
                access_token,
                refresh_token,
            }),
            _ => Err(Error::access(response.message)),
        }
    }
}

/// Token endpoint collaborator
#[async_trait]
pub trait Authentication: Send + Sync {
    /// Exchange client credentials for a fresh token pair
    async fn exchange_client_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse>;

    /// Exchange a refresh token for a new token pair
    async fn refresh(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<TokenResponse>;
}
