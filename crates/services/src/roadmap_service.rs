use async_trait::async_trait;

use sphere_core::model::{EnrolledRoadmap, Roadmap, RoadmapId, RoadmapProgress, Topic, TopicId};

use crate::api::ApiClient;
use crate::error::ApiError;

/// Enrolled roadmaps feed the quiz setup form.
#[async_trait]
pub trait RoadmapApi: Send + Sync {
    async fn enrolled_roadmaps(&self) -> Result<Vec<Roadmap>, ApiError>;
}

/// `/roadmaps` and `/topics` endpoints.
#[derive(Clone)]
pub struct RoadmapService {
    client: ApiClient,
}

impl RoadmapService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn list(&self) -> Result<Vec<Roadmap>, ApiError> {
        self.client.get("/roadmaps").await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn my_enrolled(&self) -> Result<Vec<EnrolledRoadmap>, ApiError> {
        self.client.get("/roadmaps/my-enrolled").await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn enroll(&self, id: &RoadmapId) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> = self
            .client
            .post(&format!("/roadmaps/{id}/enroll"), &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn progress(&self) -> Result<Vec<RoadmapProgress>, ApiError> {
        self.client.get("/roadmaps/progress").await
    }

    /// Topic detail, including its parent roadmap reference.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn topic(&self, id: &TopicId) -> Result<Topic, ApiError> {
        self.client.get(&format!("/topics/{id}")).await
    }
}

#[async_trait]
impl RoadmapApi for RoadmapService {
    async fn enrolled_roadmaps(&self) -> Result<Vec<Roadmap>, ApiError> {
        let enrolled = self.my_enrolled().await?;
        Ok(enrolled.into_iter().map(|entry| entry.roadmap).collect())
    }
}
