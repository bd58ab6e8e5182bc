use sphere_core::model::{
    ActivityHeatmap, CareerReadiness, LearningStyle, PredictiveCompletion, RiskAssessment,
};

use crate::api::ApiClient;
use crate::error::ApiError;

/// `/career` analytics for the signed-in learner.
#[derive(Clone)]
pub struct CareerService {
    client: ApiClient,
}

impl CareerService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn readiness(&self) -> Result<CareerReadiness, ApiError> {
        self.client.get("/career/readiness").await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn risk(&self) -> Result<RiskAssessment, ApiError> {
        self.client.get("/career/risk").await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn learning_style(&self) -> Result<LearningStyle, ApiError> {
        self.client.get("/career/learning-style").await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn predictive_completion(&self) -> Result<PredictiveCompletion, ApiError> {
        self.client.get("/career/predictive-completion").await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn heatmap(&self) -> Result<ActivityHeatmap, ApiError> {
        self.client.get("/career/heatmap").await
    }
}
