use super::{
    ClassName, GymClass, GymClassId, Member, MemberId, NewMember, NewTrainer,
    Trainer, TrainerId,
};
use color_eyre::eyre::Report;
use thiserror::Error;

#[async_trait::async_trait]
pub trait TrainerStore {
    async fn list_trainers(
        &self,
        name_filter: Option<&str>,
    ) -> Result<Vec<Trainer>, GymStoreError>;
    async fn get_trainer(
        &self,
        id: &TrainerId,
    ) -> Result<Trainer, GymStoreError>;
    async fn add_trainer(
        &mut self,
        trainer: NewTrainer,
    ) -> Result<Trainer, GymStoreError>;
    async fn update_trainer(
        &mut self,
        trainer: &Trainer,
    ) -> Result<(), GymStoreError>;
    /// Members assigned to the trainer keep their rows; only their trainer
    /// reference is cleared.
    async fn delete_trainer(
        &mut self,
        id: &TrainerId,
    ) -> Result<(), GymStoreError>;
}

#[async_trait::async_trait]
pub trait MemberStore {
    async fn list_members(
        &self,
        name_filter: Option<&str>,
    ) -> Result<Vec<Member>, GymStoreError>;
    async fn list_members_for_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<Member>, GymStoreError>;
    async fn list_members_for_class(
        &self,
        class_id: &GymClassId,
    ) -> Result<Vec<Member>, GymStoreError>;
    async fn get_member(&self, id: &MemberId)
        -> Result<Member, GymStoreError>;
    async fn add_member(
        &mut self,
        member: NewMember,
    ) -> Result<Member, GymStoreError>;
    /// Replaces the scalar fields and the whole enrollment set atomically.
    async fn update_member(
        &mut self,
        member: &Member,
    ) -> Result<(), GymStoreError>;
    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<(), GymStoreError>;
}

#[async_trait::async_trait]
pub trait GymClassStore {
    async fn list_classes(&self) -> Result<Vec<GymClass>, GymStoreError>;
    async fn get_class(
        &self,
        id: &GymClassId,
    ) -> Result<GymClass, GymStoreError>;
    async fn add_class(
        &mut self,
        class_name: ClassName,
    ) -> Result<GymClass, GymStoreError>;
    async fn update_class(
        &mut self,
        gym_class: &GymClass,
    ) -> Result<(), GymStoreError>;
    async fn delete_class(
        &mut self,
        id: &GymClassId,
    ) -> Result<(), GymStoreError>;
}

pub const MISSING_TRAINER_MESSAGE: &str = "Referenced trainer does not exist";
pub const MISSING_GYM_CLASS_MESSAGE: &str =
    "Referenced gym class does not exist";

#[derive(Debug, Error)]
pub enum GymStoreError {
    #[error("Trainer not found: {0}")]
    TrainerIDNotFound(TrainerId),
    #[error("Member not found: {0}")]
    MemberIDNotFound(MemberId),
    #[error("Gym class not found: {0}")]
    GymClassIDNotFound(GymClassId),
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrityViolation(String),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for GymStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TrainerIDNotFound(a), Self::TrainerIDNotFound(b)) => a == b,
            (Self::MemberIDNotFound(a), Self::MemberIDNotFound(b)) => a == b,
            (Self::GymClassIDNotFound(a), Self::GymClassIDNotFound(b)) => {
                a == b
            }
            (
                Self::ReferentialIntegrityViolation(a),
                Self::ReferentialIntegrityViolation(b),
            ) => a == b,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}
