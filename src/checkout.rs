//! Checkout preferences collaborator

use crate::types::Preference;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Remote checkout preference operations.
///
/// `data` is the preference body exactly as the API expects it; its format is
/// owned by the remote service.
#[async_trait]
pub trait Checkout: Send + Sync {
    async fn create_preference(
        &self,
        access_token: &str,
        data: &Value,
        sandbox: bool,
    ) -> Result<Preference>;

    async fn update_preference(
        &self,
        access_token: &str,
        preference_id: &str,
        data: &Value,
        sandbox: bool,
    ) -> Result<Preference>;

    async fn get_preference(
        &self,
        access_token: &str,
        preference_id: &str,
        sandbox: bool,
    ) -> Result<Preference>;
}
