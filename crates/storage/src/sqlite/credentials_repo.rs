use async_trait::async_trait;

use crate::repository::{CredentialStore, StorageError, StoredCredentials};

use super::SqliteRepository;
use super::mapping::map_credentials_row;

#[async_trait]
impl CredentialStore for SqliteRepository {
    async fn load_credentials(&self) -> Result<Option<StoredCredentials>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT token, user_id, name, email, role, saved_at
            FROM auth_credentials
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.as_ref().map(map_credentials_row).transpose()
    }

    async fn save_credentials(&self, credentials: &StoredCredentials) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO auth_credentials (id, token, user_id, name, email, role, saved_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                user_id = excluded.user_id,
                name = excluded.name,
                email = excluded.email,
                role = excluded.role,
                saved_at = excluded.saved_at
            ",
        )
        .bind(1_i64)
        .bind(&credentials.token)
        .bind(credentials.user_id.as_str())
        .bind(&credentials.name)
        .bind(&credentials.email)
        .bind(credentials.role.as_str())
        .bind(credentials.saved_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear_credentials(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM auth_credentials WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
