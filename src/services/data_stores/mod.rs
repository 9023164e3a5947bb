mod hashmap_gym_store;
mod postgres_gym_class_store;
mod postgres_member_store;
mod postgres_trainer_store;

pub use hashmap_gym_store::*;
pub use postgres_gym_class_store::*;
pub use postgres_member_store::*;
pub use postgres_trainer_store::*;

use color_eyre::eyre::eyre;

use crate::domain::{
    GymStoreError, MISSING_GYM_CLASS_MESSAGE, MISSING_TRAINER_MESSAGE,
};

/// Maps a failed INSERT/UPDATE/DELETE to a store error. Foreign key
/// violations are reported by the constraint names in the migrations.
fn map_write_error(e: sqlx::Error) -> GymStoreError {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            let message = match db_err.constraint() {
                Some("members_trainer_fk") => MISSING_TRAINER_MESSAGE,
                Some("enrollments_class_fk") => MISSING_GYM_CLASS_MESSAGE,
                _ => db_err.message(),
            };
            GymStoreError::ReferentialIntegrityViolation(message.to_owned())
        }
        e => GymStoreError::UnexpectedError(eyre!(e)),
    }
}

fn blank_filter_to_none(filter: Option<&str>) -> Option<&str> {
    filter.map(str::trim).filter(|f| !f.is_empty())
}

/// Stored rows are trusted as written. Blank contact columns read as absent.
fn stored_contact<T>(
    value: Option<String>,
    wrap: fn(String) -> T,
) -> Option<T> {
    value.filter(|v| !v.trim().is_empty()).map(wrap)
}
