//! Result records for the checkout and collections endpoints
//!
//! Every record keeps the fields it does not model in `extra`, so a value
//! decoded from the API carries the whole response body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A checkout preference: the remote description of a configured checkout flow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    /// Preference identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Checkout URL for production buyers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_point: Option<String>,
    /// Checkout URL for sandbox buyers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_init_point: Option<String>,
    /// Every other field of the response
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A payment record, called a collection by the remote API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PaymentId>,
    /// Payment status (e.g. "approved", "cancelled", "refunded")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Every other field of the response
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payment identifier as sent by the API: numeric on most routes, a string
/// on some. Serializes back in the form it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentId {
    Number(u64),
    Text(String),
}

impl From<u64> for PaymentId {
    fn from(id: u64) -> Self {
        PaymentId::Number(id)
    }
}

impl From<&str> for PaymentId {
    fn from(id: &str) -> Self {
        PaymentId::Text(id.to_string())
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentId::Number(id) => write!(f, "{id}"),
            PaymentId::Text(id) => f.write_str(id),
        }
    }
}

/// Payment notification, as returned by the notification lookup and as the
/// element type of search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub collection: Payment,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Paging block of a search response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
    #[serde(default)]
    pub results: Vec<Notification>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Filters for a collection search, sent as query parameters in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pairs: Vec<(String, String)>,
}

impl SearchCriteria {
    /// Create an empty criteria set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Restrict the search to a page of results
    pub fn with_paging(self, offset: u64, limit: u64) -> Self {
        self.with("offset", offset).with("limit", limit)
    }

    /// The filters as key/value pairs
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SearchCriteria
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |criteria, (key, value)| criteria.with(key, value))
    }
}
