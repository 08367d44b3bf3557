//! Collections (payments) collaborator

use crate::types::{Notification, Payment, SearchCriteria, SearchResults};
use crate::Result;
use async_trait::async_trait;

/// Remote operations on collections
#[async_trait]
pub trait Collection: Send + Sync {
    /// Look up the payment a notification refers to
    async fn notification(
        &self,
        access_token: &str,
        payment_id: &str,
        sandbox: bool,
    ) -> Result<Notification>;

    async fn search(
        &self,
        access_token: &str,
        criteria: &SearchCriteria,
        sandbox: bool,
    ) -> Result<SearchResults>;

    async fn cancel(
        &self,
        access_token: &str,
        payment_id: &str,
        sandbox: bool,
    ) -> Result<Payment>;

    async fn refund(
        &self,
        access_token: &str,
        payment_id: &str,
        sandbox: bool,
    ) -> Result<Payment>;
}
