use crate::domain::course::{Course, Price};
use crate::domain::payment::PaymentMethod;
use crate::domain::user::User;
use chrono::{DateTime, Local};
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Identifier handed out by the gateway: `TXN`, epoch millis, random suffix.
///
/// Collisions are possible; nothing is persisted, so nothing relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TransactionId(String);

impl TransactionId {
    pub const PREFIX: &'static str = "TXN";

    pub fn generate(at: DateTime<Local>) -> Self {
        let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
        Self(format!("{}{}{}", Self::PREFIX, at.timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record of a completed checkout.
///
/// Fields are private: once created the record is never modified, and the
/// course and user are the ones that were on screen when payment was confirmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseDetails {
    course: Course,
    user: User,
    payment_method: PaymentMethod,
    transaction_id: TransactionId,
    purchase_date: DateTime<Local>,
    amount: Price,
}

impl PurchaseDetails {
    /// The amount charged is always the course price.
    pub fn new(
        course: Course,
        user: User,
        payment_method: PaymentMethod,
        transaction_id: TransactionId,
        purchase_date: DateTime<Local>,
    ) -> Self {
        let amount = course.price;
        Self {
            course,
            user,
            payment_method,
            transaction_id,
            purchase_date,
            amount,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn purchase_date(&self) -> DateTime<Local> {
        self.purchase_date
    }

    pub fn amount(&self) -> Price {
        self.amount
    }
}
