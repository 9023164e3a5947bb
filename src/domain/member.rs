use super::{
    Email, EnrollmentSet, MemberId, PersonName, PhoneNumber, TrainerId,
    ValidationError,
};

/// A gym member. Related rows are referenced by id only; trainers and
/// classes are looked up through their own stores.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub full_name: PersonName,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub trainer_id: Option<TrainerId>,
    pub class_ids: EnrollmentSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub full_name: PersonName,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub trainer_id: Option<TrainerId>,
    pub class_ids: EnrollmentSet,
}

impl NewMember {
    pub fn parse(
        full_name: &str,
        email: &str,
        phone: &str,
        trainer_id: Option<i32>,
        class_ids: &[i32],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            full_name: PersonName::parse(full_name)?,
            email: Email::parse_optional(email)?,
            phone: PhoneNumber::parse_optional(phone)?,
            trainer_id: trainer_id.map(TrainerId::new),
            class_ids: EnrollmentSet::from(class_ids),
        })
    }

    pub fn with_id(self, id: MemberId) -> Member {
        Member {
            id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            trainer_id: self.trainer_id,
            class_ids: self.class_ids,
        }
    }
}
