#![forbid(unsafe_code)]

pub mod admin_service;
pub mod api;
pub mod app_services;
pub mod auth;
pub mod career_service;
pub mod catalog_service;
pub mod config;
pub mod course_service;
pub mod error;
pub mod quiz;
pub mod roadmap_service;
pub mod tutor;

pub use sphere_core::Clock;

pub use admin_service::AdminService;
pub use api::ApiClient;
pub use app_services::AppServices;
pub use auth::{AuthService, AuthSession, AuthStatus};
pub use career_service::CareerService;
pub use catalog_service::CatalogService;
pub use config::ApiConfig;
pub use course_service::CourseService;
pub use error::{ApiError, AppServicesError, AuthError, QuizError, ServiceError};
pub use quiz::{
    QuestionReview, QuizLoopService, QuizPhase, QuizSession, QuizSetup, StartRequest, Submission,
    SubmitOutcome, SubmitReason, TickOutcome,
};
pub use roadmap_service::{RoadmapApi, RoadmapService};
pub use tutor::{TutorApi, TutorService};
