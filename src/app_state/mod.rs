use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{GymClassStore, MemberStore, TrainerStore};
use crate::services::data_stores::{
    HashmapGymStore, PostgresGymClassStore, PostgresMemberStore,
    PostgresTrainerStore,
};

pub type TrainerStoreType = Arc<RwLock<dyn TrainerStore + Send + Sync>>;
pub type MemberStoreType = Arc<RwLock<dyn MemberStore + Send + Sync>>;
pub type GymClassStoreType = Arc<RwLock<dyn GymClassStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub trainer_store: TrainerStoreType,
    pub member_store: MemberStoreType,
    pub gym_class_store: GymClassStoreType,
}

impl AppState {
    pub fn new(
        trainer_store: TrainerStoreType,
        member_store: MemberStoreType,
        gym_class_store: GymClassStoreType,
    ) -> Self {
        Self {
            trainer_store,
            member_store,
            gym_class_store,
        }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self::new(
            Arc::new(RwLock::new(PostgresTrainerStore::new(pool.clone()))),
            Arc::new(RwLock::new(PostgresMemberStore::new(pool.clone()))),
            Arc::new(RwLock::new(PostgresGymClassStore::new(pool))),
        )
    }

    /// All three stores share one in-memory state so that cascades between
    /// trainers, members and classes are visible through every store.
    pub fn in_memory() -> Self {
        let store = Arc::new(RwLock::new(HashmapGymStore::default()));
        Self::new(store.clone(), store.clone(), store)
    }
}
