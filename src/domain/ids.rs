use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TrainerId(i32);

impl TrainerId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Parses an optional trainer selection as submitted by a form or query
    /// string. A blank value means "no trainer".
    pub fn parse_optional(id: &str) -> Result<Option<Self>, ValidationError> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(None);
        }
        id.parse::<i32>().map(|id| Some(Self(id))).map_err(|e| {
            ValidationError::new(format!("Invalid trainer ID: {e}"))
        })
    }
}

impl AsRef<i32> for TrainerId {
    fn as_ref(&self) -> &i32 {
        &self.0
    }
}

impl fmt::Display for TrainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MemberId(i32);

impl MemberId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }
}

impl AsRef<i32> for MemberId {
    fn as_ref(&self) -> &i32 {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GymClassId(i32);

impl GymClassId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }
}

impl AsRef<i32> for GymClassId {
    fn as_ref(&self) -> &i32 {
        &self.0
    }
}

impl fmt::Display for GymClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
