use crate::domain::course::Course;
use crate::domain::payment::{FormField, PaymentForm, PaymentMethod};
use crate::domain::ports::GatewayHandle;
use crate::domain::purchase::PurchaseDetails;
use crate::domain::user::User;
use crate::domain::validation::{self, ValidationError};
use crate::error::{CheckoutError, Result};
use chrono::{Local, NaiveDate};
use tokio::task::JoinHandle;

/// The payment page for one course.
///
/// Holds the form, the last validation error and, while a payment is in
/// flight, the task waiting on the gateway. Dropping the checkout aborts that
/// task, so a payment can never complete for a page that is gone.
pub struct Checkout {
    course: Course,
    user: User,
    form: PaymentForm,
    error: Option<ValidationError>,
    gateway: GatewayHandle,
    pending: Option<JoinHandle<Result<PurchaseDetails>>>,
}

impl Checkout {
    pub fn new(course: Course, user: User, gateway: GatewayHandle) -> Self {
        Self {
            course,
            user,
            form: PaymentForm::new(),
            error: None,
            gateway,
            pending: None,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    /// Message from the last rejected submit, if any.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.pending.is_some()
    }

    /// Switches tabs. Inputs typed for other methods are kept.
    pub fn select_method(&mut self, method: PaymentMethod) -> Result<()> {
        self.ensure_idle()?;
        self.form.method = method;
        Ok(())
    }

    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<()> {
        self.ensure_idle()?;
        self.form.set(field, value)?;
        tracing::debug!(?field, "payment form updated");
        Ok(())
    }

    /// Validates against today's date and starts the gateway call.
    pub fn submit(&mut self) -> Result<()> {
        self.submit_on(Local::now().date_naive())
    }

    /// Validates the active method and, if it passes, starts the gateway call.
    ///
    /// On a validation failure the error is recorded and nothing else changes.
    /// Must be called from within a tokio runtime.
    pub fn submit_on(&mut self, today: NaiveDate) -> Result<()> {
        self.ensure_idle()?;
        self.error = None;

        if let Err(e) = validation::validate(&self.form, today) {
            tracing::debug!(method = self.form.method.key(), error = %e, "payment rejected");
            self.error = Some(e);
            return Err(e.into());
        }

        let gateway = self.gateway.clone();
        let course = self.course.clone();
        let user = self.user.clone();
        let method = self.form.method;

        tracing::info!(course = %course.id, method = method.key(), "processing payment");
        self.pending = Some(tokio::spawn(async move {
            let receipt = gateway.charge(&course, method).await?;
            Ok(PurchaseDetails::new(
                course,
                user,
                method,
                receipt.transaction_id,
                receipt.processed_at,
            ))
        }));
        Ok(())
    }

    /// Waits for the in-flight payment.
    ///
    /// If this future is dropped before it finishes, the payment stays
    /// pending and is still owned by the checkout.
    pub async fn completion(&mut self) -> Result<PurchaseDetails> {
        let handle = self.pending.as_mut().ok_or(CheckoutError::NotProcessing)?;
        let outcome = handle.await;
        self.pending = None;

        match outcome {
            Ok(result) => {
                let purchase = result?;
                tracing::info!(
                    transaction = %purchase.transaction_id(),
                    amount = %purchase.amount(),
                    "payment confirmed"
                );
                Ok(purchase)
            }
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(CheckoutError::Cancelled.into()),
        }
    }

    /// Submits and waits in one step.
    pub async fn pay(&mut self) -> Result<PurchaseDetails> {
        self.submit()?;
        self.completion().await
    }

    /// Aborts the in-flight payment. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                tracing::info!(course = %self.course.id, "pending payment cancelled");
                true
            }
            None => false,
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.is_processing() {
            return Err(CheckoutError::AlreadyProcessing.into());
        }
        Ok(())
    }
}

impl Drop for Checkout {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::course::fixtures;
    use crate::domain::ports::{PaymentGateway, PaymentReceipt};
    use crate::domain::purchase::TransactionId;
    use crate::error::LearnHubError;
    use crate::infrastructure::simulated_gateway::SimulatedGateway;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Gateway that counts the charges it finished.
    struct CountingGateway {
        delay: Duration,
        completed: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PaymentGateway for CountingGateway {
        async fn charge(&self, _course: &Course, _method: PaymentMethod) -> Result<PaymentReceipt> {
            tokio::time::sleep(self.delay).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            let processed_at = Local::now();
            Ok(PaymentReceipt {
                transaction_id: TransactionId::generate(processed_at),
                processed_at,
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn checkout(gateway: GatewayHandle) -> Checkout {
        Checkout::new(
            fixtures::course("2", dec!(3499)),
            User::login("ana@example.com", "Ana").unwrap(),
            gateway,
        )
    }

    fn fill_card(checkout: &mut Checkout) {
        checkout.set_field(FormField::CardNumber, "4111111111111111").unwrap();
        checkout.set_field(FormField::CardName, "ana roe").unwrap();
        checkout.set_field(FormField::CardExpiry, "1230").unwrap();
        checkout.set_field(FormField::CardCvv, "123").unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_card_payment() {
        let mut checkout = checkout(Arc::new(SimulatedGateway::default()));
        fill_card(&mut checkout);

        checkout.submit_on(today()).unwrap();
        assert!(checkout.is_processing());

        let purchase = checkout.completion().await.unwrap();
        assert!(!checkout.is_processing());
        assert_eq!(purchase.amount().value(), dec!(3499));
        assert_eq!(purchase.payment_method().label(), "Credit/Debit Card");
        assert!(purchase.transaction_id().as_str().starts_with("TXN"));
        assert_eq!(purchase.user().name, "Ana");
    }

    #[tokio::test]
    async fn test_validation_failure_records_error_only() {
        let mut checkout = checkout(Arc::new(SimulatedGateway::new(Duration::ZERO)));
        checkout.set_field(FormField::CardNumber, "4111").unwrap();
        let before = checkout.form().clone();

        let result = checkout.submit_on(today());
        assert!(matches!(
            result,
            Err(LearnHubError::ValidationError(ValidationError::CardNumber))
        ));
        assert_eq!(checkout.error(), Some(&ValidationError::CardNumber));
        assert!(!checkout.is_processing());
        assert_eq!(checkout.form(), &before);
    }

    #[tokio::test]
    async fn test_error_cleared_on_next_submit() {
        let mut checkout = checkout(Arc::new(SimulatedGateway::new(Duration::ZERO)));
        checkout.select_method(PaymentMethod::Upi).unwrap();
        checkout.set_field(FormField::UpiId, "ana").unwrap();
        assert!(checkout.submit_on(today()).is_err());
        assert_eq!(checkout.error(), Some(&ValidationError::UpiId));

        checkout.set_field(FormField::UpiId, "ana@upi").unwrap();
        checkout.submit_on(today()).unwrap();
        assert_eq!(checkout.error(), None);

        let purchase = checkout.completion().await.unwrap();
        assert_eq!(purchase.payment_method(), PaymentMethod::Upi);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resubmit_while_processing_is_rejected() {
        let mut checkout = checkout(Arc::new(SimulatedGateway::default()));
        fill_card(&mut checkout);
        checkout.submit_on(today()).unwrap();

        assert!(matches!(
            checkout.submit_on(today()),
            Err(LearnHubError::CheckoutError(CheckoutError::AlreadyProcessing))
        ));
        assert!(matches!(
            checkout.select_method(PaymentMethod::Upi),
            Err(LearnHubError::CheckoutError(CheckoutError::AlreadyProcessing))
        ));
        assert!(checkout.completion().await.is_ok());
    }

    #[tokio::test]
    async fn test_completion_without_submit() {
        let mut checkout = checkout(Arc::new(SimulatedGateway::new(Duration::ZERO)));
        assert!(matches!(
            checkout.completion().await,
            Err(LearnHubError::CheckoutError(CheckoutError::NotProcessing))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_payment() {
        let completed = Arc::new(AtomicUsize::new(0));
        let gateway = Arc::new(CountingGateway {
            delay: Duration::from_secs(2),
            completed: completed.clone(),
        });
        let mut checkout = checkout(gateway);
        fill_card(&mut checkout);
        checkout.submit_on(today()).unwrap();

        assert!(checkout.cancel());
        assert!(!checkout.is_processing());
        assert!(!checkout.cancel());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_payment() {
        let completed = Arc::new(AtomicUsize::new(0));
        let gateway = Arc::new(CountingGateway {
            delay: Duration::from_secs(2),
            completed: completed.clone(),
        });
        let mut checkout = checkout(gateway);
        checkout.select_method(PaymentMethod::PhonePe).unwrap();
        checkout.set_field(FormField::MobileNumber, "9876543210").unwrap();
        checkout.submit_on(today()).unwrap();
        drop(checkout);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_payment_pending() {
        let mut checkout = checkout(Arc::new(SimulatedGateway::default()));
        fill_card(&mut checkout);
        checkout.submit_on(today()).unwrap();

        let timed_out =
            tokio::time::timeout(Duration::from_millis(500), checkout.completion()).await;
        assert!(timed_out.is_err());
        assert!(checkout.is_processing());

        assert!(checkout.completion().await.is_ok());
    }
}
