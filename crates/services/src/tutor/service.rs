use async_trait::async_trait;

use sphere_core::model::TopicId;

use crate::api::ApiClient;
use crate::error::ApiError;

use super::wire::{
    EvaluateRequest, EvaluationResponse, GenerateTestRequest, GeneratedTest, HelperAnswer,
    HelperRequest,
};

/// Question generation and grading used by the quiz workflow.
#[async_trait]
pub trait TutorApi: Send + Sync {
    async fn generate_test(&self, request: &GenerateTestRequest)
    -> Result<GeneratedTest, ApiError>;

    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluationResponse, ApiError>;
}

/// `/ai` endpoints over the shared `ApiClient`.
#[derive(Clone)]
pub struct TutorService {
    client: ApiClient,
}

impl TutorService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Ask the free-form study helper a question, optionally scoped to a topic.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn ask_helper(
        &self,
        question: &str,
        topic_id: Option<TopicId>,
    ) -> Result<String, ApiError> {
        let request = HelperRequest {
            question: question.trim().to_string(),
            topic_id,
        };
        let answer: HelperAnswer = self.client.post("/ai/helper/ask", &request).await?;
        Ok(answer.answer)
    }
}

#[async_trait]
impl TutorApi for TutorService {
    async fn generate_test(
        &self,
        request: &GenerateTestRequest,
    ) -> Result<GeneratedTest, ApiError> {
        self.client.post("/ai/tutor/generate-test", request).await
    }

    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluationResponse, ApiError> {
        self.client.post("/ai/tutor/evaluate", request).await
    }
}
