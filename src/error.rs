use crate::application::session::TransitionError;
use crate::domain::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LearnHubError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("{0}")]
    ValidationError(#[from] ValidationError),
    #[error("{0}")]
    TransitionError(#[from] TransitionError),
    #[error("Invalid price: {0}")]
    InvalidPrice(rust_decimal::Decimal),
    #[error("Course not found: {0}")]
    CourseNotFound(String),
    #[error("Invalid command: {0}")]
    CommandError(String),
    #[error("Invalid catalog: {0}")]
    CatalogError(String),
    #[error("Checkout error: {0}")]
    CheckoutError(#[from] CheckoutError),
}

/// Failures of the checkout lifecycle itself, as opposed to bad user input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("a payment is already being processed")]
    AlreadyProcessing,
    #[error("no payment is being processed")]
    NotProcessing,
    #[error("the pending payment was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, LearnHubError>;
