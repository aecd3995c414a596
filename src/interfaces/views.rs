//! Text renderings of the four screens.
//!
//! Views only read from the [`SessionContext`]; they never change it.

use crate::application::app::SessionContext;
use crate::application::checkout::Checkout;
use crate::application::session::SessionState;
use crate::config::BasePath;
use crate::domain::course::Course;
use crate::domain::payment::{PaymentForm, PaymentMethod};
use crate::domain::purchase::PurchaseDetails;
use crate::domain::user::User;
use crate::interfaces::receipt::format_timestamp;
use std::fmt::Write;

pub fn render(ctx: &SessionContext) -> String {
    match ctx.state() {
        SessionState::Auth => render_auth(),
        SessionState::Courses { user } => {
            render_courses(user, ctx.courses(), &ctx.config().base_path)
        }
        SessionState::Payment { course, .. } => match ctx.checkout() {
            Some(checkout) => render_payment(checkout),
            None => render_order_summary(course),
        },
        SessionState::Success { purchase, .. } => render_success(purchase),
    }
}

fn render_auth() -> String {
    "== LearnHub ==\nSign in with your email and name to continue.\n".to_string()
}

fn render_courses(user: &User, courses: &[Course], base_path: &BasePath) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== LearnHub ==");
    let _ = writeln!(out, "Welcome back, {}!", user.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "Available Courses");
    for course in courses {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "[{}] {} ({}, ★ {})",
            course.id, course.title, course.level, course.rating
        );
        let _ = writeln!(out, "    {}", course.description);
        let _ = writeln!(
            out,
            "    {} | {} | {} students",
            course.instructor,
            course.duration,
            group_thousands(course.students)
        );
        let _ = writeln!(
            out,
            "    was ₹{}, now {}",
            course.list_price().normalize(),
            course.price
        );
        let _ = writeln!(out, "    {}", base_path.course_link(&course.id));
    }
    out
}

fn render_payment(checkout: &Checkout) -> String {
    let form = checkout.form();
    let course = checkout.course();
    let mut out = String::new();

    let _ = writeln!(out, "== Payment Details ==");
    let tabs: Vec<String> = PaymentMethod::ALL
        .iter()
        .map(|method| {
            if *method == form.method {
                format!("[{}]", method.key())
            } else {
                method.key().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" "));
    render_fields(&mut out, form);

    if let Some(error) = checkout.error() {
        let _ = writeln!(out, "! {error}");
    }
    if checkout.is_processing() {
        let _ = writeln!(out, "Processing...");
    } else {
        let _ = writeln!(out, "Pay {}", course.price);
    }
    let _ = writeln!(out);
    out.push_str(&render_order_summary(course));
    out
}

fn render_fields(out: &mut String, form: &PaymentForm) {
    match form.method {
        PaymentMethod::Card => {
            let _ = writeln!(out, "Card Number: {}", form.card_number);
            let _ = writeln!(out, "Cardholder Name: {}", form.card_name);
            let _ = writeln!(out, "Expiry Date: {}", form.card_expiry);
            let _ = writeln!(out, "CVV: {}", "*".repeat(form.card_cvv.len()));
        }
        PaymentMethod::Upi => {
            let _ = writeln!(out, "UPI ID: {}", form.upi_id);
        }
        PaymentMethod::NetBanking => {
            let bank = form.bank.map(|b| b.name()).unwrap_or("(none selected)");
            let _ = writeln!(out, "Bank: {bank}");
        }
        PaymentMethod::Paytm | PaymentMethod::PhonePe => {
            let _ = writeln!(out, "{} Mobile Number: {}", form.method, form.mobile_number);
        }
    }
}

fn render_order_summary(course: &Course) -> String {
    let summary = course.order_summary();
    let mut out = String::new();
    let _ = writeln!(out, "== Order Summary ==");
    let _ = writeln!(out, "Course: {}", course.title);
    let _ = writeln!(out, "Instructor: {}", course.instructor);
    let _ = writeln!(out, "Duration: {}", course.duration);
    let _ = writeln!(out, "Original Price: ₹{}", summary.list_price.normalize());
    let _ = writeln!(out, "Discount: -₹{}", summary.discount.normalize());
    let _ = writeln!(out, "Total Amount: {}", summary.total);
    out
}

fn render_success(purchase: &PurchaseDetails) -> String {
    let course = purchase.course();
    let mut out = String::new();
    let _ = writeln!(out, "== Payment Successful! ==");
    let _ = writeln!(out, "Congratulations! You've successfully enrolled in the course.");
    let _ = writeln!(out);
    let _ = writeln!(out, "Transaction ID: {}", purchase.transaction_id());
    let _ = writeln!(out, "Date & Time: {}", format_timestamp(purchase.purchase_date()));
    let _ = writeln!(out, "Payment Method: {}", purchase.payment_method());
    let _ = writeln!(out, "Amount Paid: {}", purchase.amount());
    let _ = writeln!(out);
    let _ = writeln!(out, "Course Name: {}", course.title);
    let _ = writeln!(out, "Instructor: {}", course.instructor);
    let _ = writeln!(out, "Duration: {}", course.duration);
    let _ = writeln!(out, "Level: {}", course.level);
    let _ = writeln!(out, "Rating: ★ {}", course.rating);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Check your email ({}) for course access details.",
        purchase.user().email
    );
    out
}

/// 15420 -> "15,420"
fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
