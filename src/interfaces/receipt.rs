use crate::domain::purchase::{PurchaseDetails, TransactionId};
use crate::error::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

const RULE: &str = "=====================================";

/// Date and time as shown on the success page and the receipt,
/// e.g. `10/18/2026, 3:04:05 PM`.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

pub fn receipt_file_name(transaction_id: &TransactionId) -> String {
    format!("LearnHub-Receipt-{transaction_id}.txt")
}

/// Renders the plain-text purchase receipt.
pub fn render_receipt(purchase: &PurchaseDetails) -> String {
    let course = purchase.course();
    let user = purchase.user();

    let lines = [
        "LEARNHUB - COURSE PURCHASE RECEIPT".to_string(),
        RULE.to_string(),
        String::new(),
        format!("Transaction ID: {}", purchase.transaction_id()),
        format!("Date: {}", format_timestamp(purchase.purchase_date())),
        String::new(),
        "CUSTOMER DETAILS".to_string(),
        format!("Name: {}", user.name),
        format!("Email: {}", user.email),
        String::new(),
        "COURSE DETAILS".to_string(),
        format!("Course: {}", course.title),
        format!("Instructor: {}", course.instructor),
        format!("Duration: {}", course.duration),
        format!("Level: {}", course.level),
        String::new(),
        "PAYMENT DETAILS".to_string(),
        format!("Payment Method: {}", purchase.payment_method().label()),
        format!("Amount Paid: {}", purchase.amount()),
        String::new(),
        "Thank you for your purchase!".to_string(),
        "Visit LearnHub to start learning.".to_string(),
        RULE.to_string(),
    ];

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Writes the receipt into `dir` and returns the path of the new file.
pub fn write_receipt(dir: &Path, purchase: &PurchaseDetails) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(receipt_file_name(purchase.transaction_id()));
    fs::write(&path, render_receipt(purchase))?;
    tracing::info!(path = %path.display(), "receipt written");
    Ok(path)
}
