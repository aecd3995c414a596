use crate::domain::course::Course;
use crate::domain::payment::PaymentMethod;
use crate::domain::ports::{PaymentGateway, PaymentReceipt};
use crate::domain::purchase::TransactionId;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Local;
use std::time::Duration;

/// Stand-in for a payment provider: waits a fixed delay, then accepts.
///
/// It never declines a charge.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, course: &Course, method: PaymentMethod) -> Result<PaymentReceipt> {
        tracing::debug!(
            course = %course.id,
            method = method.key(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating gateway call"
        );
        tokio::time::sleep(self.delay).await;

        let processed_at = Local::now();
        Ok(PaymentReceipt {
            transaction_id: TransactionId::generate(processed_at),
            processed_at,
        })
    }
}
