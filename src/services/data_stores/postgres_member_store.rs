use color_eyre::eyre::eyre;
use sqlx::{PgPool, Postgres, Transaction};

use super::{blank_filter_to_none, map_write_error, stored_contact};
use crate::domain::{
    Email, EnrollmentSet, GymClassId, GymStoreError, Member, MemberId,
    MemberStore, NewMember, PersonName, PhoneNumber, TrainerId,
};

pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Members with their enrolled class ids aggregated into an array. Callers
/// append a WHERE clause on `m` followed by `GROUP_MEMBERS`.
const SELECT_MEMBERS: &str = r#"
    SELECT m.id, m.full_name, m.email, m.phone, m.trainer_id,
           COALESCE(
               ARRAY_AGG(e.class_id ORDER BY e.class_id)
                   FILTER (WHERE e.class_id IS NOT NULL),
               '{}'
           ) AS class_ids
    FROM members m
    LEFT JOIN enrollments e ON e.member_id = m.id
"#;

const GROUP_MEMBERS: &str = r#"
    GROUP BY m.id
    ORDER BY m.id
"#;

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i32,
    full_name: String,
    email: Option<String>,
    phone: Option<String>,
    trainer_id: Option<i32>,
    class_ids: Vec<i32>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: MemberId::new(row.id),
            full_name: PersonName::from_stored(row.full_name),
            email: stored_contact(row.email, Email::from_stored),
            phone: stored_contact(row.phone, PhoneNumber::from_stored),
            trainer_id: row.trainer_id.map(TrainerId::new),
            class_ids: EnrollmentSet::from(&row.class_ids[..]),
        }
    }
}

fn into_members(rows: Vec<MemberRow>) -> Vec<Member> {
    rows.into_iter().map(Member::from).collect()
}

/// Writes one enrollment row per class id. Runs inside the caller's
/// transaction so that a failed insert rolls back the member write too.
async fn insert_enrollments(
    tx: &mut Transaction<'_, Postgres>,
    member_id: &MemberId,
    class_ids: &EnrollmentSet,
) -> Result<(), GymStoreError> {
    if class_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO enrollments (member_id, class_id)
        SELECT $1, UNNEST($2::int4[])
        "#,
    )
    .bind(member_id.as_ref())
    .bind(class_ids.to_raw_ids())
    .execute(&mut **tx)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

#[async_trait::async_trait]
impl MemberStore for PostgresMemberStore {
    #[tracing::instrument(name = "Listing members from PostgreSQL", skip_all)]
    async fn list_members(
        &self,
        name_filter: Option<&str>,
    ) -> Result<Vec<Member>, GymStoreError> {
        let sql = format!(
            "{SELECT_MEMBERS}
             WHERE $1::text IS NULL
                OR POSITION(LOWER($1::text) IN LOWER(m.full_name)) > 0
             {GROUP_MEMBERS}"
        );
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(blank_filter_to_none(name_filter))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GymStoreError::UnexpectedError(eyre!(e)))?;

        Ok(into_members(rows))
    }

    #[tracing::instrument(
        name = "Listing members for trainer from PostgreSQL",
        skip_all
    )]
    async fn list_members_for_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<Member>, GymStoreError> {
        let sql =
            format!("{SELECT_MEMBERS} WHERE m.trainer_id = $1 {GROUP_MEMBERS}");
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(trainer_id.as_ref())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GymStoreError::UnexpectedError(eyre!(e)))?;

        Ok(into_members(rows))
    }

    #[tracing::instrument(
        name = "Listing members for class from PostgreSQL",
        skip_all
    )]
    async fn list_members_for_class(
        &self,
        class_id: &GymClassId,
    ) -> Result<Vec<Member>, GymStoreError> {
        let sql = format!(
            "{SELECT_MEMBERS}
             WHERE m.id IN (SELECT member_id FROM enrollments WHERE class_id = $1)
             {GROUP_MEMBERS}"
        );
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(class_id.as_ref())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GymStoreError::UnexpectedError(eyre!(e)))?;

        Ok(into_members(rows))
    }

    #[tracing::instrument(name = "Getting member from PostgreSQL", skip_all)]
    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, GymStoreError> {
        let sql = format!("{SELECT_MEMBERS} WHERE m.id = $1 {GROUP_MEMBERS}");
        sqlx::query_as::<_, MemberRow>(&sql)
            .bind(id.as_ref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => GymStoreError::MemberIDNotFound(*id),
                e => GymStoreError::UnexpectedError(eyre!(e)),
            })
            .map(Member::from)
    }

    #[tracing::instrument(name = "Adding member to PostgreSQL", skip_all)]
    async fn add_member(
        &mut self,
        member: NewMember,
    ) -> Result<Member, GymStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| GymStoreError::UnexpectedError(eyre!(e)))?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO members (full_name, email, phone, trainer_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(member.full_name.as_ref())
        .bind(member.email.as_ref().map(|e| e.as_ref()))
        .bind(member.phone.as_ref().map(|p| p.as_ref()))
        .bind(member.trainer_id.as_ref().map(|t| *t.as_ref()))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        let member = member.with_id(MemberId::new(id));
        insert_enrollments(&mut tx, &member.id, &member.class_ids).await?;

        tx.commit()
            .await
            .map_err(|e| GymStoreError::UnexpectedError(eyre!(e)))?;

        Ok(member)
    }

    #[tracing::instrument(name = "Updating member in PostgreSQL", skip_all)]
    async fn update_member(
        &mut self,
        member: &Member,
    ) -> Result<(), GymStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| GymStoreError::UnexpectedError(eyre!(e)))?;

        let result = sqlx::query(
            r#"
            UPDATE members
            SET full_name = $2, email = $3, phone = $4, trainer_id = $5
            WHERE id = $1
            "#,
        )
        .bind(member.id.as_ref())
        .bind(member.full_name.as_ref())
        .bind(member.email.as_ref().map(|e| e.as_ref()))
        .bind(member.phone.as_ref().map(|p| p.as_ref()))
        .bind(member.trainer_id.as_ref().map(|t| *t.as_ref()))
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(GymStoreError::MemberIDNotFound(member.id));
        }

        sqlx::query(
            r#"
            DELETE FROM enrollments WHERE member_id = $1
            "#,
        )
        .bind(member.id.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(|e| GymStoreError::UnexpectedError(eyre!(e)))?;

        insert_enrollments(&mut tx, &member.id, &member.class_ids).await?;

        tx.commit()
            .await
            .map_err(|e| GymStoreError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }

    #[tracing::instrument(name = "Deleting member from PostgreSQL", skip_all)]
    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<(), GymStoreError> {
        // enrollments.member_id is ON DELETE CASCADE
        let result = sqlx::query(
            r#"
               DELETE FROM members WHERE id = $1
               "#,
        )
        .bind(id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| GymStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(GymStoreError::MemberIDNotFound(*id));
        }

        Ok(())
    }
}
