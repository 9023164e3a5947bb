mod gym_classes;
mod members;
mod trainers;

pub use gym_classes::*;
pub use members::*;
pub use trainers::*;

use serde::{Deserialize, Serialize};

use crate::domain::Member;

/// Member reference embedded in trainer and class details.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: i32,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            id: *member.id.as_ref(),
            full_name: member.full_name.as_ref().to_owned(),
        }
    }
}

fn location(resource: &str, id: impl std::fmt::Display) -> String {
    format!("/api/{resource}/{id}")
}
