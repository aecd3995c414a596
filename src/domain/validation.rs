//! Format checks for the payment form.
//!
//! Each payment method has its own validator. Rules run in a fixed order and
//! the first failing one decides the message shown to the user.

use crate::domain::payment::{PaymentForm, PaymentMethod};
use chrono::{Datelike, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid card number. Please enter a valid 16-digit card number.")]
    CardNumber,
    #[error("Invalid or expired card. Please check the expiry date.")]
    CardExpiry,
    #[error("Invalid CVV. Please enter a 3-digit CVV.")]
    CardCvv,
    #[error("Please enter the cardholder name.")]
    CardholderName,
    #[error("Invalid UPI ID. Please enter a valid UPI ID.")]
    UpiId,
    #[error("Please select a bank.")]
    Bank,
    #[error("Invalid mobile number. Please enter a 10-digit number.")]
    MobileNumber,
    #[error("Please enter your email.")]
    MissingEmail,
    #[error("Please enter your name.")]
    MissingName,
}

/// True for exactly 16 ASCII digits once whitespace is removed.
pub fn is_valid_card_number(number: &str) -> bool {
    let cleaned: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    is_exact_digits(&cleaned, 16)
}

/// Accepts `MM/YY` for the current calendar month or later.
pub fn is_valid_expiry(expiry: &str, today: NaiveDate) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if !is_exact_digits(month, 2) || !is_exact_digits(year, 2) {
        return false;
    }
    let (Ok(month), Ok(year)) = (month.parse::<u32>(), year.parse::<i32>()) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }
    (2000 + year, month) >= (today.year(), today.month())
}

pub fn is_valid_cvv(cvv: &str) -> bool {
    is_exact_digits(cvv, 3)
}

pub fn is_valid_upi_id(upi_id: &str) -> bool {
    upi_id.contains('@')
}

pub fn is_valid_mobile_number(number: &str) -> bool {
    is_exact_digits(number, 10)
}

fn is_exact_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Validates the inputs of the active payment method only.
pub fn validate(form: &PaymentForm, today: NaiveDate) -> Result<(), ValidationError> {
    match form.method {
        PaymentMethod::Card => {
            if !is_valid_card_number(&form.card_number) {
                return Err(ValidationError::CardNumber);
            }
            if !is_valid_expiry(&form.card_expiry, today) {
                return Err(ValidationError::CardExpiry);
            }
            if !is_valid_cvv(&form.card_cvv) {
                return Err(ValidationError::CardCvv);
            }
            if form.card_name.trim().is_empty() {
                return Err(ValidationError::CardholderName);
            }
        }
        PaymentMethod::Upi => {
            if !is_valid_upi_id(&form.upi_id) {
                return Err(ValidationError::UpiId);
            }
        }
        PaymentMethod::NetBanking => {
            if form.bank.is_none() {
                return Err(ValidationError::Bank);
            }
        }
        PaymentMethod::Paytm | PaymentMethod::PhonePe => {
            if !is_valid_mobile_number(&form.mobile_number) {
                return Err(ValidationError::MobileNumber);
            }
        }
    }
    Ok(())
}
