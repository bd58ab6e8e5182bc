#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    CredentialStore, InMemoryCredentialStore, Storage, StorageError, StoredCredentials,
};
