use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CategoryId, TagId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("name is too long: {len} characters (max {max})")]
    NameTooLong { len: usize, max: usize },
}

pub const MAX_NAME_LEN: usize = 80;

fn validate_name(raw: &str) -> Result<String, CatalogError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CatalogError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id", alias = "id")]
    pub id: TagId,
    #[serde(default)]
    pub name: String,
}

/// Validated body for creating or renaming a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDraft {
    name: String,
    description: String,
}

impl CategoryDraft {
    /// # Errors
    ///
    /// Returns `CatalogError` if the name is blank or too long.
    pub fn new(name: &str, description: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            name: validate_name(name)?,
            description: description.trim().to_string(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Validated body for creating a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagDraft {
    name: String,
}

impl TagDraft {
    /// Tags are stored lowercase.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the name is blank or too long.
    pub fn new(name: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            name: validate_name(name)?.to_lowercase(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A `{_id, name}` reference the server may send populated or as a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "NamedRefRecord")]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NamedRefRecord {
    Id(String),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(default, alias = "title")]
        name: String,
    },
}

impl From<NamedRefRecord> for NamedRef {
    fn from(record: NamedRefRecord) -> Self {
        match record {
            NamedRefRecord::Id(id) => Self {
                id,
                name: String::new(),
            },
            NamedRefRecord::Populated { id, name } => Self { id, name },
        }
    }
}
