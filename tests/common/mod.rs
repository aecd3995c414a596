use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Writes a session script with the standard header followed by `rows`.
pub fn write_script<S: AsRef<str>>(rows: &[S]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "command, arg, value")?;
    for row in rows {
        writeln!(file, "{}", row.as_ref())?;
    }
    file.flush()?;
    Ok(file)
}

/// Rows that sign in and open the payment page for `course_id`.
#[allow(dead_code)]
pub fn login_and_select(course_id: &str) -> Vec<String> {
    vec![
        "login, ana@example.com, Ana Roe".to_string(),
        format!("select, {}", course_id),
    ]
}
