use chrono::{DateTime, Utc};
use sphere_core::model::{UserId, UserRole};
use sqlx::Row;

use crate::repository::{StorageError, StoredCredentials};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn parse_role(s: &str) -> Result<UserRole, StorageError> {
    UserRole::ALL
        .into_iter()
        .find(|role| role.as_str() == s)
        .ok_or_else(|| StorageError::Serialization(format!("invalid role: {s}")))
}

pub(crate) fn map_credentials_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<StoredCredentials, StorageError> {
    let token: String = row.try_get("token").map_err(ser)?;
    if token.is_empty() {
        return Err(StorageError::Serialization("empty token".into()));
    }
    let role: String = row.try_get("role").map_err(ser)?;
    let saved_at: DateTime<Utc> = row.try_get("saved_at").map_err(ser)?;

    Ok(StoredCredentials {
        token,
        user_id: UserId::new(row.try_get::<String, _>("user_id").map_err(ser)?),
        name: row.try_get("name").map_err(ser)?,
        email: row.try_get("email").map_err(ser)?,
        role: parse_role(&role)?,
        saved_at,
    })
}
