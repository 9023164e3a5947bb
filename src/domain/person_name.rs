use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Name of a trainer or the full name of a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        match name.chars().count() {
            x if x < 1 => {
                Err(ValidationError::new("Name cannot be empty".to_string()))
            }
            x if x > 255 => Err(ValidationError::new(
                "Max name length is 255 characters".to_string(),
            )),
            _ => Ok(Self(name.to_owned())),
        }
    }

    /// Wraps a name read back from the data store without re-checking it.
    pub fn from_stored(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<String> for PersonName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_person_names() {
    let valid_names = ["a".to_string(), "a".repeat(255), "Bob".to_string()];
    for valid_name in valid_names.iter() {
        let parsed = PersonName::parse(valid_name)
            .expect("Failed to parse valid name");

        assert_eq!(parsed.as_ref(), valid_name);
    }
}

#[test]
fn test_stored_names_are_kept_as_is() {
    let stored = PersonName::from_stored(" ".to_string());
    assert_eq!(stored.as_ref(), " ");
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    let parsed = PersonName::parse("  Alice ").unwrap();
    assert_eq!(parsed.as_ref(), "Alice");
}

#[test]
fn test_empty_person_names() {
    for empty_name in ["", "   "] {
        let result = PersonName::parse(empty_name);
        assert_eq!(
            result.unwrap_err().as_ref(),
            "Name cannot be empty",
            "Input: {empty_name:?}"
        );
    }
}

#[test]
fn test_long_person_names() {
    let result = PersonName::parse(&"a".repeat(256));
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max name length is 255 characters"
    );
}
