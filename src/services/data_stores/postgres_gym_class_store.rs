use color_eyre::eyre::eyre;
use sqlx::PgPool;

use super::map_write_error;
use crate::domain::{
    ClassName, GymClass, GymClassId, GymClassStore, GymStoreError,
};

pub struct PostgresGymClassStore {
    pool: PgPool,
}

impl PostgresGymClassStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct GymClassRow {
    id: i32,
    class_name: String,
}

impl From<GymClassRow> for GymClass {
    fn from(row: GymClassRow) -> Self {
        GymClass::new(
            GymClassId::new(row.id),
            ClassName::from_stored(row.class_name),
        )
    }
}

#[async_trait::async_trait]
impl GymClassStore for PostgresGymClassStore {
    #[tracing::instrument(name = "Listing gym classes from PostgreSQL", skip_all)]
    async fn list_classes(&self) -> Result<Vec<GymClass>, GymStoreError> {
        let rows = sqlx::query_as::<_, GymClassRow>(
            r#"
                SELECT id, class_name
                FROM gym_classes
                ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GymStoreError::UnexpectedError(eyre!(e)))?;

        Ok(rows.into_iter().map(GymClass::from).collect())
    }

    #[tracing::instrument(name = "Getting gym class from PostgreSQL", skip_all)]
    async fn get_class(
        &self,
        id: &GymClassId,
    ) -> Result<GymClass, GymStoreError> {
        sqlx::query_as::<_, GymClassRow>(
            r#"
                SELECT id, class_name
                FROM gym_classes
                WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => GymStoreError::GymClassIDNotFound(*id),
            e => GymStoreError::UnexpectedError(eyre!(e)),
        })
        .map(GymClass::from)
    }

    #[tracing::instrument(name = "Adding gym class to PostgreSQL", skip_all)]
    async fn add_class(
        &mut self,
        class_name: ClassName,
    ) -> Result<GymClass, GymStoreError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO gym_classes (class_name) VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(class_name.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(GymClass::new(GymClassId::new(id), class_name))
    }

    #[tracing::instrument(name = "Updating gym class in PostgreSQL", skip_all)]
    async fn update_class(
        &mut self,
        gym_class: &GymClass,
    ) -> Result<(), GymStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE gym_classes SET class_name = $2
            WHERE id = $1
            "#,
        )
        .bind(gym_class.id.as_ref())
        .bind(gym_class.class_name.as_ref())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(GymStoreError::GymClassIDNotFound(gym_class.id));
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting gym class from PostgreSQL", skip_all)]
    async fn delete_class(
        &mut self,
        id: &GymClassId,
    ) -> Result<(), GymStoreError> {
        // enrollments.class_id is ON DELETE CASCADE
        let result = sqlx::query(
            r#"
               DELETE FROM gym_classes WHERE id = $1
               "#,
        )
        .bind(id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(GymStoreError::GymClassIDNotFound(*id));
        }

        Ok(())
    }
}
