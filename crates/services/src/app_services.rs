use std::sync::Arc;

use log::info;
use sphere_core::model::AuthUser;
use storage::repository::Storage;

use crate::Clock;
use crate::admin_service::AdminService;
use crate::api::ApiClient;
use crate::auth::{AuthService, AuthSession};
use crate::career_service::CareerService;
use crate::catalog_service::CatalogService;
use crate::config::ApiConfig;
use crate::course_service::CourseService;
use crate::error::AppServicesError;
use crate::quiz::QuizLoopService;
use crate::roadmap_service::{RoadmapApi, RoadmapService};
use crate::tutor::{TutorApi, TutorService};

/// Assembles app-facing services around one shared `ApiClient`.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<AuthSession>,
    auth: Arc<AuthService>,
    roadmaps: Arc<RoadmapService>,
    tutor: Arc<TutorService>,
    quiz_loop: Arc<QuizLoopService>,
    courses: Arc<CourseService>,
    catalog: Arc<CatalogService>,
    admin: Arc<AdminService>,
    career: Arc<CareerService>,
}

impl AppServices {
    /// Build services backed by `SQLite` credential storage and restore any
    /// saved session.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage or the HTTP client cannot be
    /// initialized.
    pub async fn new_sqlite(
        db_url: &str,
        config: ApiConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let services = Self::new(config, &storage, clock)?;
        if let Some(user) = services.session.restore().await? {
            info!("resuming as {}", user.display_name());
        }
        Ok(services)
    }

    /// # Errors
    ///
    /// Returns `AppServicesError::Api` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig, storage: &Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let session = Arc::new(AuthSession::new(clock, Arc::clone(&storage.credentials)));
        let client = ApiClient::new(config, Arc::clone(&session))?;

        let roadmaps = Arc::new(RoadmapService::new(client.clone()));
        let tutor = Arc::new(TutorService::new(client.clone()));
        let tutor_api: Arc<dyn TutorApi> = Arc::clone(&tutor) as Arc<dyn TutorApi>;
        let roadmap_api: Arc<dyn RoadmapApi> = Arc::clone(&roadmaps) as Arc<dyn RoadmapApi>;
        let quiz_loop = Arc::new(QuizLoopService::new(tutor_api, roadmap_api));

        Ok(Self {
            auth: Arc::new(AuthService::new(client.clone())),
            courses: Arc::new(CourseService::new(client.clone())),
            catalog: Arc::new(CatalogService::new(client.clone())),
            admin: Arc::new(AdminService::new(client.clone())),
            career: Arc::new(CareerService::new(client)),
            session,
            roadmaps,
            tutor,
            quiz_loop,
        })
    }

    #[must_use]
    pub fn session(&self) -> Arc<AuthSession> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.session.user()
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn roadmaps(&self) -> Arc<RoadmapService> {
        Arc::clone(&self.roadmaps)
    }

    #[must_use]
    pub fn tutor(&self) -> Arc<TutorService> {
        Arc::clone(&self.tutor)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        Arc::clone(&self.courses)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn admin(&self) -> Arc<AdminService> {
        Arc::clone(&self.admin)
    }

    #[must_use]
    pub fn career(&self) -> Arc<CareerService> {
        Arc::clone(&self.career)
    }
}
