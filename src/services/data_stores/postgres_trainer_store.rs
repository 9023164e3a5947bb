use color_eyre::eyre::eyre;
use sqlx::PgPool;

use super::{blank_filter_to_none, map_write_error, stored_contact};
use crate::domain::{
    Email, GymStoreError, NewTrainer, PersonName, PhoneNumber, Trainer,
    TrainerId, TrainerStore,
};

pub struct PostgresTrainerStore {
    pool: PgPool,
}

impl PostgresTrainerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TrainerRow {
    id: i32,
    name: String,
    email: Option<String>,
    phone: Option<String>,
}

impl From<TrainerRow> for Trainer {
    fn from(row: TrainerRow) -> Self {
        Trainer {
            id: TrainerId::new(row.id),
            name: PersonName::from_stored(row.name),
            email: stored_contact(row.email, Email::from_stored),
            phone: stored_contact(row.phone, PhoneNumber::from_stored),
        }
    }
}

#[async_trait::async_trait]
impl TrainerStore for PostgresTrainerStore {
    #[tracing::instrument(name = "Listing trainers from PostgreSQL", skip_all)]
    async fn list_trainers(
        &self,
        name_filter: Option<&str>,
    ) -> Result<Vec<Trainer>, GymStoreError> {
        let rows = sqlx::query_as::<_, TrainerRow>(
            r#"
                SELECT id, name, email, phone
                FROM trainers
                WHERE $1::text IS NULL
                   OR POSITION(LOWER($1::text) IN LOWER(name)) > 0
                ORDER BY id
            "#,
        )
        .bind(blank_filter_to_none(name_filter))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GymStoreError::UnexpectedError(eyre!(e)))?;

        Ok(rows.into_iter().map(Trainer::from).collect())
    }

    #[tracing::instrument(name = "Getting trainer from PostgreSQL", skip_all)]
    async fn get_trainer(
        &self,
        id: &TrainerId,
    ) -> Result<Trainer, GymStoreError> {
        sqlx::query_as::<_, TrainerRow>(
            r#"
                SELECT id, name, email, phone
                FROM trainers
                WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => GymStoreError::TrainerIDNotFound(*id),
            e => GymStoreError::UnexpectedError(eyre!(e)),
        })
        .map(Trainer::from)
    }

    #[tracing::instrument(name = "Adding trainer to PostgreSQL", skip_all)]
    async fn add_trainer(
        &mut self,
        trainer: NewTrainer,
    ) -> Result<Trainer, GymStoreError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO trainers (name, email, phone) VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(trainer.name.as_ref())
        .bind(trainer.email.as_ref().map(|e| e.as_ref()))
        .bind(trainer.phone.as_ref().map(|p| p.as_ref()))
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(trainer.with_id(TrainerId::new(id)))
    }

    #[tracing::instrument(name = "Updating trainer in PostgreSQL", skip_all)]
    async fn update_trainer(
        &mut self,
        trainer: &Trainer,
    ) -> Result<(), GymStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE trainers SET name = $2, email = $3, phone = $4
            WHERE id = $1
            "#,
        )
        .bind(trainer.id.as_ref())
        .bind(trainer.name.as_ref())
        .bind(trainer.email.as_ref().map(|e| e.as_ref()))
        .bind(trainer.phone.as_ref().map(|p| p.as_ref()))
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(GymStoreError::TrainerIDNotFound(trainer.id));
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting trainer from PostgreSQL", skip_all)]
    async fn delete_trainer(
        &mut self,
        id: &TrainerId,
    ) -> Result<(), GymStoreError> {
        // members.trainer_id is ON DELETE SET NULL
        let result = sqlx::query(
            r#"
               DELETE FROM trainers WHERE id = $1
               "#,
        )
        .bind(id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(GymStoreError::TrainerIDNotFound(*id));
        }

        Ok(())
    }
}
