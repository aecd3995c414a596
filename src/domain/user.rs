use crate::domain::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// The signed-in user. Lives only as long as the session that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

impl User {
    /// Trivial login: both fields must be present, nothing else is checked.
    pub fn login(email: &str, name: &str) -> Result<Self, ValidationError> {
        let email = email.trim();
        let name = name.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        Ok(Self {
            email: email.to_string(),
            name: name.to_string(),
        })
    }
}
