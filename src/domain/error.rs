use color_eyre::eyre::Report;
use thiserror::Error;

use super::GymStoreError;

#[derive(Debug, Error)]
pub enum GymAPIError {
    #[error("Resource with ID not found: {0}")]
    IDNotFoundError(i32),
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrityError(String),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

impl From<GymStoreError> for GymAPIError {
    fn from(e: GymStoreError) -> Self {
        match e {
            GymStoreError::TrainerIDNotFound(id) => {
                Self::IDNotFoundError(*id.as_ref())
            }
            GymStoreError::MemberIDNotFound(id) => {
                Self::IDNotFoundError(*id.as_ref())
            }
            GymStoreError::GymClassIDNotFound(id) => {
                Self::IDNotFoundError(*id.as_ref())
            }
            GymStoreError::ReferentialIntegrityViolation(message) => {
                Self::ReferentialIntegrityError(message)
            }
            GymStoreError::UnexpectedError(report) => {
                Self::UnexpectedError(report)
            }
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
