use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValidationError;

lazy_static! {
    static ref PHONE_NUMBER_PATTERN: Regex =
        Regex::new(r"^[0-9+()\-. ]*[0-9][0-9+()\-. ]*$")
            .expect("phone number pattern is valid");
}

const MAX_PHONE_NUMBER_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.chars().count() > MAX_PHONE_NUMBER_LENGTH {
            return Err(ValidationError::new(format!(
                "Max phone number length is {MAX_PHONE_NUMBER_LENGTH} characters"
            )));
        }
        if !PHONE_NUMBER_PATTERN.is_match(s) {
            return Err(ValidationError::new(format!(
                "Invalid phone number: {s}"
            )));
        }
        Ok(Self(s.to_owned()))
    }

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

impl AsRef<String> for PhoneNumber {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_phone_numbers() {
    let valid_numbers = ["111", "+44 (0) 20-7946.0958", "0"];
    for valid_number in valid_numbers {
        let parsed = PhoneNumber::parse(valid_number).expect(valid_number);
        assert_eq!(parsed.as_ref(), valid_number);
    }
}

#[test]
fn test_invalid_phone_numbers() {
    for invalid_number in ["call me", "+-()", "12a4"] {
        let error =
            PhoneNumber::parse(invalid_number).expect_err(invalid_number);
        assert_eq!(
            error.as_ref(),
            &format!("Invalid phone number: {invalid_number}")
        );
    }
}

#[test]
fn test_long_phone_numbers() {
    let error = PhoneNumber::parse(&"1".repeat(33)).unwrap_err();
    assert_eq!(error.as_ref(), "Max phone number length is 32 characters");
}

#[test]
fn test_blank_phone_numbers_are_absent() {
    assert_eq!(PhoneNumber::parse_optional(" "), Ok(None));
}
