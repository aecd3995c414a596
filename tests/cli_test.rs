use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let receipts = tempfile::tempdir()?;
    let mut cmd = Command::new(cargo_bin!("learnhub"));
    cmd.arg("--gateway-delay-ms")
        .arg("0")
        .arg("--receipt-dir")
        .arg(receipts.path())
        .arg("run")
        .arg("tests/fixtures/purchase.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Welcome back, Ana Roe!"))
        .stdout(predicate::str::contains("Pay ₹3499"))
        .stdout(predicate::str::contains("Payment Successful!"))
        .stdout(predicate::str::contains("Amount Paid: ₹3499"))
        .stdout(predicate::str::contains("Payment Method: Credit/Debit Card"))
        .stdout(predicate::str::is_match("Transaction ID: TXN[0-9]+")?);

    Ok(())
}

#[test]
fn test_catalog_export() {
    let mut cmd = Command::new(cargo_bin!("learnhub"));
    cmd.arg("--base-url").arg("learnhub").arg("catalog");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,title,instructor,duration,level,price,list_price,rating,students,link",
        ))
        .stdout(predicate::str::contains(
            "1,Complete Web Development Bootcamp,Sarah Johnson,40 hours,Beginner,\
             2999,4499,4.8,15420,/learnhub/courses/1",
        ))
        .stdout(predicate::str::contains("6,Cloud Computing with AWS"));
}

#[test]
fn test_base_url_from_environment() {
    let mut cmd = Command::new(cargo_bin!("learnhub"));
    cmd.env("LEARNHUB_BASE_URL", "/apps/learnhub/").arg("catalog");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("/apps/learnhub/courses/3"));
}

#[test]
fn test_missing_script_fails() {
    let mut cmd = Command::new(cargo_bin!("learnhub"));
    cmd.arg("run").arg("tests/fixtures/does-not-exist.csv");

    cmd.assert().failure();
}

#[test]
fn test_duplicate_catalog_ids_fail() -> Result<(), Box<dyn std::error::Error>> {
    let entry = r#"{"id": "a", "title": "Async Rust", "description": "Futures", "price": 999,
        "instructor": "Ferris", "duration": "8 hours", "level": "Advanced",
        "image": "crab", "rating": 4.9, "students": 10}"#;
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "[{entry},{entry}]")?;

    let mut cmd = Command::new(cargo_bin!("learnhub"));
    cmd.arg("--catalog").arg(file.path()).arg("catalog");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid catalog: duplicate course id 'a'",
        ));
    Ok(())
}
