use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{
    ClassName, Email, EnrollmentSet, GymClass, GymClassId, GymClassStore,
    GymStoreError, Member, MemberId, MemberStore, NewMember, NewTrainer,
    PersonName, PhoneNumber, Trainer, TrainerId, TrainerStore,
    MISSING_GYM_CLASS_MESSAGE, MISSING_TRAINER_MESSAGE,
};

#[derive(Debug, Clone)]
struct MemberRow {
    full_name: PersonName,
    email: Option<Email>,
    phone: Option<PhoneNumber>,
    trainer_id: Option<TrainerId>,
}

/// In-memory store with the same relational rules as the Postgres schema.
///
/// One value implements all three store traits so that the cascades between
/// trainers, members, classes and enrollments see a single consistent state.
#[derive(Default)]
pub struct HashmapGymStore {
    trainers: BTreeMap<TrainerId, Trainer>,
    members: BTreeMap<MemberId, MemberRow>,
    classes: BTreeMap<GymClassId, GymClass>,
    enrollments: BTreeSet<(MemberId, GymClassId)>,
    last_trainer_id: i32,
    last_member_id: i32,
    last_class_id: i32,
}

fn matches_filter(name: &str, filter: Option<&str>) -> bool {
    match filter.map(str::trim).filter(|f| !f.is_empty()) {
        Some(filter) => name.to_lowercase().contains(&filter.to_lowercase()),
        None => true,
    }
}

impl HashmapGymStore {
    fn assemble_member(&self, id: &MemberId, row: &MemberRow) -> Member {
        let first = (*id, GymClassId::new(i32::MIN));
        let last = (*id, GymClassId::new(i32::MAX));
        let class_ids = self
            .enrollments
            .range(first..=last)
            .map(|(_, class_id)| *class_id)
            .collect();

        Member {
            id: *id,
            full_name: row.full_name.clone(),
            email: row.email.clone(),
            phone: row.phone.clone(),
            trainer_id: row.trainer_id,
            class_ids,
        }
    }

    fn collect_members<F>(&self, predicate: F) -> Vec<Member>
    where
        F: Fn(&MemberId, &MemberRow) -> bool,
    {
        self.members
            .iter()
            .filter(|(id, row)| predicate(id, row))
            .map(|(id, row)| self.assemble_member(id, row))
            .collect()
    }

    fn check_references(
        &self,
        trainer_id: &Option<TrainerId>,
        class_ids: &EnrollmentSet,
    ) -> Result<(), GymStoreError> {
        if let Some(trainer_id) = trainer_id {
            if !self.trainers.contains_key(trainer_id) {
                return Err(GymStoreError::ReferentialIntegrityViolation(
                    MISSING_TRAINER_MESSAGE.to_owned(),
                ));
            }
        }
        if class_ids.iter().any(|id| !self.classes.contains_key(id)) {
            return Err(GymStoreError::ReferentialIntegrityViolation(
                MISSING_GYM_CLASS_MESSAGE.to_owned(),
            ));
        }
        Ok(())
    }

    fn replace_enrollments(
        &mut self,
        member_id: &MemberId,
        class_ids: &EnrollmentSet,
    ) {
        self.enrollments.retain(|(id, _)| id != member_id);
        self.enrollments
            .extend(class_ids.iter().map(|class_id| (*member_id, *class_id)));
    }
}

#[async_trait::async_trait]
impl TrainerStore for HashmapGymStore {
    async fn list_trainers(
        &self,
        name_filter: Option<&str>,
    ) -> Result<Vec<Trainer>, GymStoreError> {
        Ok(self
            .trainers
            .values()
            .filter(|t| matches_filter(t.name.as_ref(), name_filter))
            .cloned()
            .collect())
    }

    async fn get_trainer(
        &self,
        id: &TrainerId,
    ) -> Result<Trainer, GymStoreError> {
        self.trainers
            .get(id)
            .cloned()
            .ok_or(GymStoreError::TrainerIDNotFound(*id))
    }

    async fn add_trainer(
        &mut self,
        trainer: NewTrainer,
    ) -> Result<Trainer, GymStoreError> {
        self.last_trainer_id += 1;
        let trainer = trainer.with_id(TrainerId::new(self.last_trainer_id));
        self.trainers.insert(trainer.id, trainer.clone());
        Ok(trainer)
    }

    async fn update_trainer(
        &mut self,
        trainer: &Trainer,
    ) -> Result<(), GymStoreError> {
        match self.trainers.get_mut(&trainer.id) {
            Some(existing) => {
                *existing = trainer.clone();
                Ok(())
            }
            None => Err(GymStoreError::TrainerIDNotFound(trainer.id)),
        }
    }

    async fn delete_trainer(
        &mut self,
        id: &TrainerId,
    ) -> Result<(), GymStoreError> {
        self.trainers
            .remove(id)
            .ok_or(GymStoreError::TrainerIDNotFound(*id))?;

        for row in self.members.values_mut() {
            if row.trainer_id.as_ref() == Some(id) {
                row.trainer_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MemberStore for HashmapGymStore {
    async fn list_members(
        &self,
        name_filter: Option<&str>,
    ) -> Result<Vec<Member>, GymStoreError> {
        Ok(self.collect_members(|_, row| {
            matches_filter(row.full_name.as_ref(), name_filter)
        }))
    }

    async fn list_members_for_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<Member>, GymStoreError> {
        Ok(self.collect_members(|_, row| {
            row.trainer_id.as_ref() == Some(trainer_id)
        }))
    }

    async fn list_members_for_class(
        &self,
        class_id: &GymClassId,
    ) -> Result<Vec<Member>, GymStoreError> {
        Ok(self.collect_members(|id, _| {
            self.enrollments.contains(&(*id, *class_id))
        }))
    }

    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, GymStoreError> {
        self.members
            .get(id)
            .map(|row| self.assemble_member(id, row))
            .ok_or(GymStoreError::MemberIDNotFound(*id))
    }

    async fn add_member(
        &mut self,
        member: NewMember,
    ) -> Result<Member, GymStoreError> {
        self.check_references(&member.trainer_id, &member.class_ids)?;

        self.last_member_id += 1;
        let member = member.with_id(MemberId::new(self.last_member_id));
        self.members.insert(
            member.id,
            MemberRow {
                full_name: member.full_name.clone(),
                email: member.email.clone(),
                phone: member.phone.clone(),
                trainer_id: member.trainer_id,
            },
        );
        self.replace_enrollments(&member.id, &member.class_ids);
        Ok(member)
    }

    async fn update_member(
        &mut self,
        member: &Member,
    ) -> Result<(), GymStoreError> {
        if !self.members.contains_key(&member.id) {
            return Err(GymStoreError::MemberIDNotFound(member.id));
        }
        self.check_references(&member.trainer_id, &member.class_ids)?;

        self.members.insert(
            member.id,
            MemberRow {
                full_name: member.full_name.clone(),
                email: member.email.clone(),
                phone: member.phone.clone(),
                trainer_id: member.trainer_id,
            },
        );
        self.replace_enrollments(&member.id, &member.class_ids);
        Ok(())
    }

    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<(), GymStoreError> {
        self.members
            .remove(id)
            .ok_or(GymStoreError::MemberIDNotFound(*id))?;
        self.enrollments.retain(|(member_id, _)| member_id != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl GymClassStore for HashmapGymStore {
    async fn list_classes(&self) -> Result<Vec<GymClass>, GymStoreError> {
        Ok(self.classes.values().cloned().collect())
    }

    async fn get_class(
        &self,
        id: &GymClassId,
    ) -> Result<GymClass, GymStoreError> {
        self.classes
            .get(id)
            .cloned()
            .ok_or(GymStoreError::GymClassIDNotFound(*id))
    }

    async fn add_class(
        &mut self,
        class_name: ClassName,
    ) -> Result<GymClass, GymStoreError> {
        self.last_class_id += 1;
        let gym_class =
            GymClass::new(GymClassId::new(self.last_class_id), class_name);
        self.classes.insert(gym_class.id, gym_class.clone());
        Ok(gym_class)
    }

    async fn update_class(
        &mut self,
        gym_class: &GymClass,
    ) -> Result<(), GymStoreError> {
        match self.classes.get_mut(&gym_class.id) {
            Some(existing) => {
                *existing = gym_class.clone();
                Ok(())
            }
            None => Err(GymStoreError::GymClassIDNotFound(gym_class.id)),
        }
    }

    async fn delete_class(
        &mut self,
        id: &GymClassId,
    ) -> Result<(), GymStoreError> {
        self.classes
            .remove(id)
            .ok_or(GymStoreError::GymClassIDNotFound(*id))?;
        self.enrollments.retain(|(_, class_id)| class_id != id);
        Ok(())
    }
}
