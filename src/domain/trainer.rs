use super::{Email, PersonName, PhoneNumber, TrainerId, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub struct Trainer {
    pub id: TrainerId,
    pub name: PersonName,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
}

/// A validated trainer that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrainer {
    pub name: PersonName,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
}

impl NewTrainer {
    pub fn parse(
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: PersonName::parse(name)?,
            email: Email::parse_optional(email)?,
            phone: PhoneNumber::parse_optional(phone)?,
        })
    }

    pub fn with_id(self, id: TrainerId) -> Trainer {
        Trainer {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}
