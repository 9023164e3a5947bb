use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Contact email address of a trainer or member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if !validator::validate_email(s) {
            return Err(ValidationError::new(format!(
                "Invalid email address: {s}"
            )));
        }

        Ok(Self(s.to_owned()))
    }

    /// Contact details are optional: a blank address is stored as absent.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, ValidationError> {
        if s.trim().is_empty() {
            return Ok(None);
        }
        Self::parse(s).map(Some)
    }

    pub fn from_stored(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<String> for Email {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
