use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sphere_core::model::{AuthUser, UserId, UserRole};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of a signed-in session.
///
/// Mirrors `AuthUser` plus the bearer token so the client can restore a
/// session across launches without another login round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub token: String,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub saved_at: DateTime<Utc>,
}

impl StoredCredentials {
    #[must_use]
    pub fn new(token: impl Into<String>, user: &AuthUser, saved_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            user_id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            saved_at,
        }
    }

    #[must_use]
    pub fn user(&self) -> AuthUser {
        AuthUser {
            id: self.user_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Persisted client storage for the bearer token and signed-in user.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the saved session, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_credentials(&self) -> Result<Option<StoredCredentials>, StorageError>;

    /// Replace the saved session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the credentials cannot be stored.
    async fn save_credentials(&self, credentials: &StoredCredentials) -> Result<(), StorageError>;

    /// Remove any saved session. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear_credentials(&self) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: Arc<Mutex<Option<StoredCredentials>>>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a saved session already present.
    #[must_use]
    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self {
            credentials: Arc::new(Mutex::new(Some(credentials))),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load_credentials(&self) -> Result<Option<StoredCredentials>, StorageError> {
        let guard = self
            .credentials
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_credentials(&self, credentials: &StoredCredentials) -> Result<(), StorageError> {
        let mut guard = self
            .credentials
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(credentials.clone());
        Ok(())
    }

    async fn clear_credentials(&self) -> Result<(), StorageError> {
        let mut guard = self
            .credentials
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub credentials: Arc<dyn CredentialStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let credentials: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
        Self { credentials }
    }
}
