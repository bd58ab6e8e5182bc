//! Shared error types for the services crate.

use reqwest::StatusCode;
use thiserror::Error;

use sphere_core::model::{
    CatalogError, CompanyError, CourseError, QuizResultError, RoadmapId, TopicId,
};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

use crate::quiz::QuizPhase;

/// Errors emitted by `ApiClient` and every service built on it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not signed in or session expired")]
    Unauthorized,
    #[error("request failed with status {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("response carried no data")]
    MissingData,
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Text suitable for a toast notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".into(),
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Status { status, .. } if status.is_server_error() => {
                "The server is having trouble. Please try again.".into()
            }
            ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND => {
                "That item no longer exists.".into()
            }
            ApiError::Status { .. } => "The request could not be completed.".into(),
            ApiError::Rejected(message) => message.clone(),
            ApiError::MissingData | ApiError::Decode(_) => {
                "The server sent an unexpected response.".into()
            }
            ApiError::Http(_) => "Network error. Check your connection and try again.".into(),
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Errors emitted by `AuthSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("auth state lock poisoned")]
    Poisoned,
    #[error("email and password are required")]
    MissingCredentials,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by domain services that validate input before sending.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Company(#[from] CompanyError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ServiceError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Errors emitted by the quiz state machine and workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("select a topic before starting the quiz")]
    NoTopicSelected,
    #[error("roadmap {0} is not among the enrolled roadmaps")]
    UnknownRoadmap(RoadmapId),
    #[error("topic {topic} is not part of roadmap {roadmap:?}")]
    TopicNotInRoadmap {
        topic: TopicId,
        roadmap: Option<RoadmapId>,
    },
    #[error("question count must be between {min} and {max}, got {got}")]
    InvalidQuestionCount { got: u32, min: u32, max: u32 },
    #[error("operation not allowed while in {actual:?}")]
    WrongPhase { actual: QuizPhase },
    #[error("a quiz is already being prepared")]
    StartInFlight,
    #[error("no quiz start was requested")]
    StartNotRequested,
    #[error("the generator returned no usable questions")]
    NoQuestions,
    #[error("question {index} is out of range ({len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },
    #[error("option {option} is out of range for question {question} ({len} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        len: usize,
    },
    #[error("answers are locked after submission")]
    Submitted,
    #[error("submission is no longer current")]
    StaleSubmission,
    #[error(transparent)]
    InvalidResult(#[from] QuizResultError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl QuizError {
    /// Validation errors are reported inline; everything else is a notification.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, QuizError::Api(_) | QuizError::InvalidResult(_))
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            QuizError::Api(err) => err.user_message(),
            QuizError::InvalidResult(_) => "The evaluator sent an invalid score.".into(),
            other => other.to_string(),
        }
    }
}

/// Errors emitted while assembling `AppServices`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    SqliteInit(#[from] SqliteInitError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
