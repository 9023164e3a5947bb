use super::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassName(String);

impl ClassName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        match name.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Class name cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max class name length is 255 characters".to_string(),
            )),
            _ => Ok(Self(name.to_owned())),
        }
    }

    pub fn from_stored(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<String> for ClassName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_class_names() {
    let valid_names = ["Yoga".to_string(), "a".repeat(255)];
    for valid_name in valid_names.iter() {
        let parsed = ClassName::parse(valid_name)
            .expect("Failed to parse valid class name");

        assert_eq!(parsed.as_ref(), valid_name);
    }
}

#[test]
fn test_empty_class_names() {
    let result = ClassName::parse(" ");
    assert_eq!(result.unwrap_err().as_ref(), "Class name cannot be empty");
}

#[test]
fn test_long_class_names() {
    let result = ClassName::parse(&"a".repeat(256));
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max class name length is 255 characters"
    );
}
