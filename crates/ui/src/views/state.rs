use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use dioxus::prelude::*;
use services::{ApiError, AuthError, QuizError, ServiceError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    SessionExpired,
    /// Input problem reported next to the form; no request was made.
    Invalid(String),
    /// Request failure carrying a user-facing message.
    Request(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.".into(),
            ViewError::SessionExpired => "Your session has expired. Please sign in again.".into(),
            ViewError::Invalid(message) | ViewError::Request(message) => message.clone(),
        }
    }
}

impl From<ApiError> for ViewError {
    fn from(err: ApiError) -> Self {
        if err.is_unauthorized() {
            ViewError::SessionExpired
        } else {
            ViewError::Request(err.user_message())
        }
    }
}

impl From<ServiceError> for ViewError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Api(err) => err.into(),
            other => ViewError::Invalid(other.user_message()),
        }
    }
}

impl From<QuizError> for ViewError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::Api(err) => err.into(),
            other if other.is_validation() => ViewError::Invalid(other.user_message()),
            other => ViewError::Request(other.user_message()),
        }
    }
}

impl From<AuthError> for ViewError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Api(err) => err.into(),
            AuthError::MissingCredentials => ViewError::Invalid(err.to_string()),
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Cleared when the owning component unmounts; late responses check it before
/// touching state.
#[derive(Clone, Debug)]
pub struct MountGuard(Arc<AtomicBool>);

impl MountGuard {
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub fn use_mount_guard() -> MountGuard {
    let guard = use_hook(|| MountGuard(Arc::new(AtomicBool::new(true))));
    let on_drop = guard.clone();
    use_drop(move || on_drop.0.store(false, Ordering::Release));
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_server_message() {
        assert_eq!(
            ViewError::from(ApiError::Rejected("Course not found".into())),
            ViewError::Request("Course not found".into())
        );
        assert_eq!(
            ViewError::from(ApiError::Unauthorized),
            ViewError::SessionExpired
        );
    }

    #[test]
    fn quiz_validation_is_inline() {
        let err = ViewError::from(QuizError::NoTopicSelected);
        assert!(matches!(err, ViewError::Invalid(_)));
        assert_eq!(err.message(), "select a topic before starting the quiz");
    }
}
