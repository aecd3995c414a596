use super::course::Course;
use super::payment::PaymentMethod;
use super::purchase::TransactionId;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};

/// Read-only access to the course catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn courses(&self) -> Result<Vec<Course>>;
    async fn course(&self, id: &str) -> Result<Option<Course>>;
}

/// What the gateway hands back for an accepted charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub transaction_id: TransactionId,
    pub processed_at: DateTime<Local>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, course: &Course, method: PaymentMethod) -> Result<PaymentReceipt>;
}

pub type CatalogBox = Box<dyn CatalogProvider>;
pub type GatewayHandle = std::sync::Arc<dyn PaymentGateway>;
