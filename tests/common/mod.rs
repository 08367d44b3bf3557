//! Shared test doubles

#![allow(dead_code)]

use async_trait::async_trait;
use checkout_sdk::{
    Authentication, Checkout, Collection, Error, Notification, Payment, Preference, Result,
    SearchCriteria, SearchResults, TokenResponse,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A collaborator call as seen by the fake
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Exchange {
        client_id: String,
        client_secret: String,
    },
    Refresh {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
    CreatePreference {
        access_token: String,
        data: Value,
        sandbox: bool,
    },
    UpdatePreference {
        access_token: String,
        preference_id: String,
        data: Value,
        sandbox: bool,
    },
    GetPreference {
        access_token: String,
        preference_id: String,
        sandbox: bool,
    },
    Notification {
        access_token: String,
        payment_id: String,
        sandbox: bool,
    },
    Search {
        access_token: String,
        criteria: SearchCriteria,
        sandbox: bool,
    },
    Cancel {
        access_token: String,
        payment_id: String,
        sandbox: bool,
    },
    Refund {
        access_token: String,
        payment_id: String,
        sandbox: bool,
    },
}

impl Call {
    /// Access token passed to an API call, `None` for token endpoint calls
    pub fn access_token(&self) -> Option<&str> {
        match self {
            Call::Exchange { .. } | Call::Refresh { .. } => None,
            Call::CreatePreference { access_token, .. }
            | Call::UpdatePreference { access_token, .. }
            | Call::GetPreference { access_token, .. }
            | Call::Notification { access_token, .. }
            | Call::Search { access_token, .. }
            | Call::Cancel { access_token, .. }
            | Call::Refund { access_token, .. } => Some(access_token),
        }
    }

    /// Sandbox flag passed to an API call, `None` for token endpoint calls
    pub fn sandbox(&self) -> Option<bool> {
        match self {
            Call::Exchange { .. } | Call::Refresh { .. } => None,
            Call::CreatePreference { sandbox, .. }
            | Call::UpdatePreference { sandbox, .. }
            | Call::GetPreference { sandbox, .. }
            | Call::Notification { sandbox, .. }
            | Call::Search { sandbox, .. }
            | Call::Cancel { sandbox, .. }
            | Call::Refund { sandbox, .. } => Some(*sandbox),
        }
    }
}

/// Scripted stand-in for all three collaborators.
///
/// Token endpoint calls pop the next scripted [`TokenResponse`]; every other
/// call returns the canned records below.
#[derive(Debug, Default)]
pub struct FakeApi {
    token_responses: Mutex<VecDeque<TokenResponse>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new(token_responses: impl IntoIterator<Item = TokenResponse>) -> Self {
        Self {
            token_responses: Mutex::new(token_responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Call {
        self.calls().last().cloned().expect("no call recorded")
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_token_response(&self) -> Result<TokenResponse> {
        self.token_responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::api(500, "no scripted token response"))
    }
}

pub fn token_response(access_token: &str, refresh_token: &str) -> TokenResponse {
    TokenResponse {
        access_token: Some(access_token.to_string()),
        refresh_token: Some(refresh_token.to_string()),
        ..Default::default()
    }
}

pub fn rejected_response(message: Option<&str>) -> TokenResponse {
    TokenResponse {
        message: message.map(str::to_string),
        ..Default::default()
    }
}

pub fn canned_preference() -> Preference {
    serde_json::from_value(json!({
        "id": "202809963-920c288b",
        "init_point": "https://www.example.com/checkout?pref_id=202809963-920c288b",
        "sandbox_init_point": "https://sandbox.example.com/checkout?pref_id=202809963-920c288b",
        "external_reference": "order-42"
    }))
    .unwrap()
}

pub fn canned_payment(status: &str) -> Payment {
    serde_json::from_value(json!({
        "id": 1001,
        "status": status,
        "transaction_amount": 10.5
    }))
    .unwrap()
}

pub fn canned_notification() -> Notification {
    Notification {
        collection: canned_payment("approved"),
        ..Default::default()
    }
}

pub fn canned_search_results() -> SearchResults {
    serde_json::from_value(json!({
        "paging": {"total": 1, "limit": 30, "offset": 0},
        "results": [{"collection": {"id": 1001, "status": "approved"}}]
    }))
    .unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[async_trait]
impl Authentication for FakeApi {
    async fn exchange_client_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse> {
        self.record(Call::Exchange {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        });
        self.next_token_response()
    }

    async fn refresh(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<TokenResponse> {
        self.record(Call::Refresh {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            refresh_token: refresh_token.to_string(),
        });
        self.next_token_response()
    }
}

#[async_trait]
impl Checkout for FakeApi {
    async fn create_preference(
        &self,
        access_token: &str,
        data: &Value,
        sandbox: bool,
    ) -> Result<Preference> {
        self.record(Call::CreatePreference {
            access_token: access_token.to_string(),
            data: data.clone(),
            sandbox,
        });
        Ok(canned_preference())
    }

    async fn update_preference(
        &self,
        access_token: &str,
        preference_id: &str,
        data: &Value,
        sandbox: bool,
    ) -> Result<Preference> {
        self.record(Call::UpdatePreference {
            access_token: access_token.to_string(),
            preference_id: preference_id.to_string(),
            data: data.clone(),
            sandbox,
        });
        Ok(canned_preference())
    }

    async fn get_preference(
        &self,
        access_token: &str,
        preference_id: &str,
        sandbox: bool,
    ) -> Result<Preference> {
        self.record(Call::GetPreference {
            access_token: access_token.to_string(),
            preference_id: preference_id.to_string(),
            sandbox,
        });
        Ok(canned_preference())
    }
}

#[async_trait]
impl Collection for FakeApi {
    async fn notification(
        &self,
        access_token: &str,
        payment_id: &str,
        sandbox: bool,
    ) -> Result<Notification> {
        self.record(Call::Notification {
            access_token: access_token.to_string(),
            payment_id: payment_id.to_string(),
            sandbox,
        });
        Ok(canned_notification())
    }

    async fn search(
        &self,
        access_token: &str,
        criteria: &SearchCriteria,
        sandbox: bool,
    ) -> Result<SearchResults> {
        self.record(Call::Search {
            access_token: access_token.to_string(),
            criteria: criteria.clone(),
            sandbox,
        });
        Ok(canned_search_results())
    }

    async fn cancel(&self, access_token: &str, payment_id: &str, sandbox: bool) -> Result<Payment> {
        self.record(Call::Cancel {
            access_token: access_token.to_string(),
            payment_id: payment_id.to_string(),
            sandbox,
        });
        Ok(canned_payment("cancelled"))
    }

    async fn refund(&self, access_token: &str, payment_id: &str, sandbox: bool) -> Result<Payment> {
        self.record(Call::Refund {
            access_token: access_token.to_string(),
            payment_id: payment_id.to_string(),
            sandbox,
        });
        Ok(canned_payment("refunded"))
    }
}
