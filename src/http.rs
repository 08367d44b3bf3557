//! HTTP gateway to the payment API
//!
//! [`HttpGateway`] is the default implementation of the [`Authentication`],
//! [`Checkout`] and [`Collection`] collaborators. Sandbox calls use the same
//! routes under the `/sandbox` prefix, and authenticated calls pass the
//! access token as the `access_token` query parameter.

use crate::auth::{Authentication, TokenResponse};
use crate::checkout::Checkout;
use crate::collection::Collection;
use crate::config::ApiConfig;
use crate::types::{Notification, Payment, Preference, SearchCriteria, SearchResults};
use crate::{Error, Result};
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

/// Route prefix selecting the sandbox environment
pub const SANDBOX_PREFIX: &str = "/sandbox";

/// Token endpoint
pub const TOKEN_PATH: &str = "/oauth/token";

const PREFERENCES_PATH: &str = "/checkout/preferences";
const COLLECTIONS_PATH: &str = "/collections";

/// Characters left as-is in an id interpolated into a path
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// reqwest-backed gateway implementing every collaborator
#[derive(Debug, Clone)]
pub struct HttpGateway {
    config: ApiConfig,
    client: Client,
}

impl HttpGateway {
    /// Create a gateway, building an HTTP client from `config`
    pub fn new(config: ApiConfig) -> Result<Self> {
        config.validate()?;

        let mut client_builder = Client::builder().user_agent(config.user_agent.clone());

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create a gateway around an existing HTTP client.
    ///
    /// The config's timeout and user agent are not applied to `client`.
    pub fn with_client(config: ApiConfig, client: Client) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, client })
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str, sandbox: bool) -> Result<Url> {
        let prefix = if sandbox { SANDBOX_PREFIX } else { "" };
        let url = format!(
            "{}{}{}",
            self.config.base_url.trim_end_matches('/'),
            prefix,
            path
        );
        Ok(Url::parse(&url)?)
    }

    fn authenticated(
        &self,
        method: Method,
        path: &str,
        access_token: &str,
        sandbox: bool,
    ) -> Result<RequestBuilder> {
        let url = self.url(path, sandbox)?;
        debug!(%method, path = url.path(), sandbox, "calling payment API");

        Ok(self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .query(&[("access_token", access_token)]))
    }

    async fn send<T>(&self, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Unknown Error: {}", e));
            warn!(status = status.as_u16(), "payment API returned an error");
            return Err(Error::api(status.as_u16(), body));
        }

        Ok(response.json::<T>().await?)
    }

    /// POST to the token endpoint. The body is decoded whatever the status:
    /// rejections carry the `message` the caller reports.
    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let url = self.url(TOKEN_PATH, false)?;
        debug!(path = url.path(), "requesting access token");

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<TokenResponse>(&body) {
            Ok(token_response) => {
                if !status.is_success() {
                    warn!(
                        status = status.as_u16(),
                        message = token_response.message.as_deref().unwrap_or_default(),
                        "token endpoint rejected the exchange"
                    );
                }
                Ok(token_response)
            }
            Err(_) if !status.is_success() => Err(Error::api(status.as_u16(), body)),
            Err(e) => Err(e.into()),
        }
    }
}

fn preference_path(preference_id: &str) -> String {
    format!(
        "{}/{}",
        PREFERENCES_PATH,
        utf8_percent_encode(preference_id, PATH_SEGMENT)
    )
}

fn collection_path(payment_id: &str) -> String {
    format!(
        "{}/{}",
        COLLECTIONS_PATH,
        utf8_percent_encode(payment_id, PATH_SEGMENT)
    )
}

fn notification_path(payment_id: &str) -> String {
    format!(
        "{}/notifications/{}",
        COLLECTIONS_PATH,
        utf8_percent_encode(payment_id, PATH_SEGMENT)
    )
}

#[async_trait]
impl Authentication for HttpGateway {
    async fn exchange_client_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse> {
        self.request_token(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .await
    }

    async fn refresh(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<TokenResponse> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
        ])
        .await
    }
}

#[async_trait]
impl Checkout for HttpGateway {
    async fn create_preference(
        &self,
        access_token: &str,
        data: &Value,
        sandbox: bool,
    ) -> Result<Preference> {
        let request = self
            .authenticated(Method::POST, PREFERENCES_PATH, access_token, sandbox)?
            .json(data);
        self.send(request).await
    }

    async fn update_preference(
        &self,
        access_token: &str,
        preference_id: &str,
        data: &Value,
        sandbox: bool,
    ) -> Result<Preference> {
        let path = preference_path(preference_id);
        let request = self
            .authenticated(Method::PUT, &path, access_token, sandbox)?
            .json(data);
        self.send(request).await
    }

    async fn get_preference(
        &self,
        access_token: &str,
        preference_id: &str,
        sandbox: bool,
    ) -> Result<Preference> {
        let path = preference_path(preference_id);
        let request = self.authenticated(Method::GET, &path, access_token, sandbox)?;
        self.send(request).await
    }
}

#[async_trait]
impl Collection for HttpGateway {
    async fn notification(
        &self,
        access_token: &str,
        payment_id: &str,
        sandbox: bool,
    ) -> Result<Notification> {
        let path = notification_path(payment_id);
        let request = self.authenticated(Method::GET, &path, access_token, sandbox)?;
        self.send(request).await
    }

    async fn search(
        &self,
        access_token: &str,
        criteria: &SearchCriteria,
        sandbox: bool,
    ) -> Result<SearchResults> {
        let path = format!("{}/search", COLLECTIONS_PATH);
        let request = self
            .authenticated(Method::GET, &path, access_token, sandbox)?
            .query(criteria.pairs());
        self.send(request).await
    }

    async fn cancel(&self, access_token: &str, payment_id: &str, sandbox: bool) -> Result<Payment> {
        let path = collection_path(payment_id);
        let request = self
            .authenticated(Method::PUT, &path, access_token, sandbox)?
            .json(&json!({ "status": "cancelled" }));
        self.send(request).await
    }

    async fn refund(&self, access_token: &str, payment_id: &str, sandbox: bool) -> Result<Payment> {
        let path = collection_path(payment_id);
        let request = self
            .authenticated(Method::PUT, &path, access_token, sandbox)?
            .json(&json!({ "status": "refunded" }));
        self.send(request).await
    }
}
