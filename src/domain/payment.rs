use crate::error::LearnHubError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    NetBanking,
    Paytm,
    PhonePe,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Card,
        PaymentMethod::Upi,
        PaymentMethod::NetBanking,
        PaymentMethod::Paytm,
        PaymentMethod::PhonePe,
    ];

    /// Label recorded on the purchase and printed on the receipt.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::Paytm => "Paytm",
            PaymentMethod::PhonePe => "PhonePe",
        }
    }

    /// Short name used for tabs and script commands.
    pub fn key(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::NetBanking => "netbanking",
            PaymentMethod::Paytm => "paytm",
            PaymentMethod::PhonePe => "phonepe",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = LearnHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.key() == key)
            .ok_or_else(|| LearnHubError::CommandError(format!("unknown payment method '{s}'")))
    }
}

/// Banks offered on the net banking tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    Sbi,
    Hdfc,
    Icici,
    Axis,
    Kotak,
}

impl Bank {
    pub const ALL: [Bank; 5] = [Bank::Sbi, Bank::Hdfc, Bank::Icici, Bank::Axis, Bank::Kotak];

    pub fn key(&self) -> &'static str {
        match self {
            Bank::Sbi => "sbi",
            Bank::Hdfc => "hdfc",
            Bank::Icici => "icici",
            Bank::Axis => "axis",
            Bank::Kotak => "kotak",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Bank::Sbi => "State Bank of India",
            Bank::Hdfc => "HDFC Bank",
            Bank::Icici => "ICICI Bank",
            Bank::Axis => "Axis Bank",
            Bank::Kotak => "Kotak Mahindra Bank",
        }
    }
}

impl FromStr for Bank {
    type Err = LearnHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Bank::ALL
            .into_iter()
            .find(|bank| bank.key() == key)
            .ok_or_else(|| LearnHubError::CommandError(format!("unknown bank '{s}'")))
    }
}

/// Editable fields of the payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    CardNumber,
    CardName,
    CardExpiry,
    CardCvv,
    UpiId,
    Bank,
    MobileNumber,
}

impl FromStr for FormField {
    type Err = LearnHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card_number" => Ok(FormField::CardNumber),
            "card_name" => Ok(FormField::CardName),
            "card_expiry" => Ok(FormField::CardExpiry),
            "card_cvv" => Ok(FormField::CardCvv),
            "upi_id" => Ok(FormField::UpiId),
            "bank" => Ok(FormField::Bank),
            "mobile_number" => Ok(FormField::MobileNumber),
            other => Err(LearnHubError::CommandError(format!(
                "unknown form field '{other}'"
            ))),
        }
    }
}

/// Raw values typed into the payment form.
///
/// Every method keeps its own inputs, so switching tabs never loses what was
/// typed on another one. Paytm and PhonePe share the mobile number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    pub method: PaymentMethod,
    pub card_number: String,
    pub card_name: String,
    pub card_expiry: String,
    pub card_cvv: String,
    pub upi_id: String,
    pub bank: Option<Bank>,
    pub mobile_number: String,
}

impl PaymentForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a field value after applying the same input mask the form uses.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), LearnHubError> {
        match field {
            FormField::CardNumber => self.card_number = mask_card_number(value),
            FormField::CardName => self.card_name = value.to_uppercase(),
            FormField::CardExpiry => self.card_expiry = mask_expiry(value),
            FormField::CardCvv => self.card_cvv = digits_only(value, CARD_CVV_MAX),
            FormField::UpiId => self.upi_id = value.to_string(),
            FormField::Bank => {
                self.bank = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                }
            }
            FormField::MobileNumber => {
                self.mobile_number = digits_only(value, MOBILE_NUMBER_MAX)
            }
        }
        Ok(())
    }
}

/// Longest raw entry each masked input takes, counted before masking.
const CARD_NUMBER_MAX: usize = 19;
const CARD_EXPIRY_MAX: usize = 5;
const CARD_CVV_MAX: usize = 3;
const MOBILE_NUMBER_MAX: usize = 10;

/// Regroups the card number in blocks of four, as "1234 5678 9012 3456".
///
/// Only the first 19 characters typed are kept. Extra digits within that
/// limit survive, so an over-long number still fails validation.
pub fn mask_card_number(input: &str) -> String {
    let compact: Vec<char> = capped(input, CARD_NUMBER_MAX)
        .filter(|c| !c.is_whitespace())
        .collect();
    compact
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps digits and inserts the slash, so "1227" becomes "12/27".
pub fn mask_expiry(input: &str) -> String {
    let digits = digits_only(input, CARD_EXPIRY_MAX);
    if digits.len() >= 2 {
        let year: String = digits.chars().skip(2).take(2).collect();
        format!("{}/{}", &digits[..2], year)
    } else {
        digits
    }
}

fn capped(input: &str, max: usize) -> impl Iterator<Item = char> + '_ {
    input.chars().take(max)
}

fn digits_only(input: &str, max: usize) -> String {
    capped(input, max).filter(|c| c.is_ascii_digit()).collect()
}
