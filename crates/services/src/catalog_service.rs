use sphere_core::model::{Category, CategoryDraft, CategoryId, Tag, TagDraft, TagId};

use crate::api::ApiClient;
use crate::error::ApiError;

/// `/categories` and `/tags` endpoints.
#[derive(Clone)]
pub struct CatalogService {
    client: ApiClient,
}

impl CatalogService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client.get("/categories").await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ApiError> {
        self.client.post("/categories", draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn update_category(
        &self,
        id: &CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Category, ApiError> {
        self.client.put(&format!("/categories/{id}"), draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), ApiError> {
        self.client.delete(&format!("/categories/{id}")).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.client.get("/tags").await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn create_tag(&self, draft: &TagDraft) -> Result<Tag, ApiError> {
        self.client.post("/tags", draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn delete_tag(&self, id: &TagId) -> Result<(), ApiError> {
        self.client.delete(&format!("/tags/{id}")).await
    }
}
