//! # checkout-sdk - payment API client
//!
//! A Rust client for a hosted payment API: authenticate with client
//! credentials, then create and manage checkout preferences and look up,
//! search, cancel and refund payments.
//!
//! ```no_run
//! use checkout_sdk::{Credentials, PaymentClient};
//! use serde_json::json;
//!
//! # async fn run() -> checkout_sdk::Result<()> {
//! let credentials = Credentials::from_env()?;
//! let client = PaymentClient::connect(credentials, false).await?;
//!
//! let preference = client
//!     .create_preference(&json!({
//!         "items": [{"title": "Pen", "quantity": 1, "unit_price": 10.5, "currency_id": "ARS"}]
//!     }))
//!     .await?;
//! println!("checkout at {:?}", preference.init_point);
//! # Ok(())
//! # }
//! ```
//!
//! The remote endpoints are reached through three collaborator traits,
//! [`Authentication`], [`Checkout`] and [`Collection`]. [`HttpGateway`]
//! implements all of them; any of them can be swapped through
//! [`PaymentClient::builder`].

pub mod auth;
pub mod checkout;
pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

// Re-exports for convenience
pub use auth::{Authentication, Credentials, TokenPair, TokenResponse};
pub use checkout::Checkout;
pub use client::{PaymentClient, PaymentClientBuilder};
pub use collection::Collection;
pub use config::ApiConfig;
pub use error::{Error, Result};
pub use http::HttpGateway;
pub use types::*;

/// Current version of the checkout SDK
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
