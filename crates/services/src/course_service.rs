use serde::Serialize;

use sphere_core::model::{CategoryId, Course, CourseDraft, CourseFilter, CourseId, Page, PageRequest};

use crate::api::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
struct CourseQuery<'a> {
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a CategoryId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishBody {
    is_published: bool,
}

/// `/courses` endpoints.
#[derive(Clone)]
pub struct CourseService {
    client: ApiClient,
}

impl CourseService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn list(
        &self,
        page: PageRequest,
        filter: &CourseFilter,
    ) -> Result<Page<Course>, ApiError> {
        let query = CourseQuery {
            page: page.page,
            limit: page.limit,
            search: filter.search.as_deref(),
            category: filter.category.as_ref(),
        };
        self.client.get_query("/courses", &query).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn get(&self, id: &CourseId) -> Result<Course, ApiError> {
        self.client.get(&format!("/courses/{id}")).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn create(&self, draft: &CourseDraft) -> Result<Course, ApiError> {
        self.client.post("/courses", draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn update(&self, id: &CourseId, draft: &CourseDraft) -> Result<Course, ApiError> {
        self.client.put(&format!("/courses/{id}"), draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn delete(&self, id: &CourseId) -> Result<(), ApiError> {
        self.client.delete(&format!("/courses/{id}")).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn set_published(&self, id: &CourseId, published: bool) -> Result<Course, ApiError> {
        self.client
            .patch(
                &format!("/courses/{id}/publish"),
                &PublishBody {
                    is_published: published,
                },
            )
            .await
    }
}
