use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Deployment path prefix, always of the form `/` or `/segment/.../`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            Self("/".to_string())
        } else {
            Self(format!("/{trimmed}/"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Link to a course page under this prefix.
    pub fn course_link(&self, course_id: &str) -> String {
        format!("{}courses/{}", self.0, course_id)
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::new("/")
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runtime settings for a session.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_path: BasePath,
    /// Where downloaded receipts are written.
    pub receipt_dir: PathBuf,
    /// How long the simulated gateway takes to answer.
    pub gateway_delay: Duration,
    /// Optional JSON file replacing the built-in catalog.
    pub catalog: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: BasePath::default(),
            receipt_dir: PathBuf::from("."),
            gateway_delay: Duration::from_millis(2000),
            catalog: None,
        }
    }
}
