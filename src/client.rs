//! Payment API client

use crate::auth::{Authentication, Credentials, TokenPair, TokenResponse};
use crate::checkout::Checkout;
use crate::collection::Collection;
use crate::config::ApiConfig;
use crate::http::HttpGateway;
use crate::types::{Notification, Payment, Preference, SearchCriteria, SearchResults};
use crate::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Authenticated client for the payment API.
///
/// A `PaymentClient` only exists once the client-credentials exchange has
/// produced a valid [`TokenPair`]. Every call passes the current access token
/// to the matching collaborator and returns its result untouched.
///
/// The preference calls, `cancel_payment` and `refund_payment` always target
/// production, whatever the client's sandbox flag; only `notification` and
/// `search` honour it.
pub struct PaymentClient {
    tokens: TokenPair,
    sandbox: bool,
    authentication: Arc<dyn Authentication>,
    checkout: Arc<dyn Checkout>,
    collection: Arc<dyn Collection>,
}

impl fmt::Debug for PaymentClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentClient")
            .field("tokens", &self.tokens)
            .field("sandbox", &self.sandbox)
            .field("collaborators", &"<dyn>")
            .finish()
    }
}

impl PaymentClient {
    /// Authenticate against the default API endpoint
    pub async fn connect(credentials: Credentials, sandbox: bool) -> Result<Self> {
        Self::builder(credentials).sandbox(sandbox).connect().await
    }

    /// Start building a client with custom configuration or collaborators
    pub fn builder(credentials: Credentials) -> PaymentClientBuilder {
        PaymentClientBuilder::new(credentials)
    }

    /// Replace the held token pair using the current refresh token.
    ///
    /// On failure the previous pair stays in place.
    pub async fn refresh_access_token(&mut self, credentials: &Credentials) -> Result<()> {
        let response = self
            .authentication
            .refresh(
                &credentials.client_id,
                &credentials.client_secret,
                self.tokens.refresh_token(),
            )
            .await?;

        self.tokens = validate(response)?;
        debug!("access token refreshed");
        Ok(())
    }

    /// Create a checkout preference
    pub async fn create_preference(&self, data: &Value) -> Result<Preference> {
        self.checkout
            .create_preference(self.access_token(), data, false)
            .await
    }

    /// Update an existing checkout preference
    pub async fn update_preference(&self, preference_id: &str, data: &Value) -> Result<Preference> {
        self.checkout
            .update_preference(self.access_token(), preference_id, data, false)
            .await
    }

    pub async fn get_preference(&self, preference_id: &str) -> Result<Preference> {
        self.checkout
            .get_preference(self.access_token(), preference_id, false)
            .await
    }

    /// Fetch the payment a notification refers to
    pub async fn notification(&self, payment_id: &str) -> Result<Notification> {
        self.collection
            .notification(self.access_token(), payment_id, self.sandbox)
            .await
    }

    /// Search collections
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResults> {
        self.collection
            .search(self.access_token(), criteria, self.sandbox)
            .await
    }

    pub async fn cancel_payment(&self, payment_id: &str) -> Result<Payment> {
        self.collection
            .cancel(self.access_token(), payment_id, false)
            .await
    }

    pub async fn refund_payment(&self, payment_id: &str) -> Result<Payment> {
        self.collection
            .refund(self.access_token(), payment_id, false)
            .await
    }

    pub fn access_token(&self) -> &str {
        self.tokens.access_token()
    }

    pub fn refresh_token(&self) -> &str {
        self.tokens.refresh_token()
    }

    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    pub fn token_pair(&self) -> &TokenPair {
        &self.tokens
    }
}

fn validate(response: TokenResponse) -> Result<TokenPair> {
    TokenPair::try_from(response).inspect_err(|e| {
        warn!(error = %e, "authentication response did not contain a token pair");
    })
}

/// Builder for [`PaymentClient`]
///
/// Collaborators left unset are served by one [`HttpGateway`] built from the
/// configured [`ApiConfig`] (the default endpoint if none is given).
pub struct PaymentClientBuilder {
    credentials: Credentials,
    sandbox: bool,
    config: Option<ApiConfig>,
    authentication: Option<Arc<dyn Authentication>>,
    checkout: Option<Arc<dyn Checkout>>,
    collection: Option<Arc<dyn Collection>>,
}

impl PaymentClientBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            sandbox: false,
            config: None,
            authentication: None,
            checkout: None,
            collection: None,
        }
    }

    /// Select the sandbox environment for `notification` and `search`
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Configure the default HTTP gateway
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn authentication(mut self, authentication: Arc<dyn Authentication>) -> Self {
        self.authentication = Some(authentication);
        self
    }

    pub fn checkout(mut self, checkout: Arc<dyn Checkout>) -> Self {
        self.checkout = Some(checkout);
        self
    }

    pub fn collection(mut self, collection: Arc<dyn Collection>) -> Self {
        self.collection = Some(collection);
        self
    }

    /// Use one value for all three collaborators
    pub fn gateway<G>(self, gateway: Arc<G>) -> Self
    where
        G: Authentication + Checkout + Collection + 'static,
    {
        self.authentication(gateway.clone())
            .checkout(gateway.clone())
            .collection(gateway)
    }

    /// Perform the client-credentials exchange and return a ready client
    pub async fn connect(self) -> Result<PaymentClient> {
        let Self {
            credentials,
            sandbox,
            config,
            authentication,
            checkout,
            collection,
        } = self;

        let mut default_gateway: Option<Arc<HttpGateway>> = None;
        let mut gateway = || -> Result<Arc<HttpGateway>> {
            if let Some(gateway) = &default_gateway {
                return Ok(gateway.clone());
            }
            let gateway = Arc::new(HttpGateway::new(config.clone().unwrap_or_default())?);
            default_gateway = Some(gateway.clone());
            Ok(gateway)
        };

        let authentication: Arc<dyn Authentication> = match authentication {
            Some(authentication) => authentication,
            None => gateway()?,
        };
        let checkout: Arc<dyn Checkout> = match checkout {
            Some(checkout) => checkout,
            None => gateway()?,
        };
        let collection: Arc<dyn Collection> = match collection {
            Some(collection) => collection,
            None => gateway()?,
        };

        let response = authentication
            .exchange_client_credentials(&credentials.client_id, &credentials.client_secret)
            .await?;
        let tokens = validate(response)?;
        debug!(sandbox, "authenticated against payment API");

        Ok(PaymentClient {
            tokens,
            sandbox,
            authentication,
            checkout,
            collection,
        })
    }
}

impl fmt::Debug for PaymentClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentClientBuilder")
            .field("credentials", &self.credentials)
            .field("sandbox", &self.sandbox)
            .field("config", &self.config)
            .finish()
    }
}
