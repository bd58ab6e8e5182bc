use std::sync::Arc;

use services::{
    AdminService, AuthService, AuthSession, CareerService, CatalogService, CourseService,
    QuizLoopService, RoadmapService, TutorService,
};

pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<AuthSession>;
    fn auth(&self) -> Arc<AuthService>;
    fn roadmaps(&self) -> Arc<RoadmapService>;
    fn tutor(&self) -> Arc<TutorService>;
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn courses(&self) -> Arc<CourseService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn admin(&self) -> Arc<AdminService>;
    fn career(&self) -> Arc<CareerService>;
}

#[derive(Clone)]
pub struct AppContext {
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

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            auth: app.auth(),
            roadmaps: app.roadmaps(),
            tutor: app.tutor(),
            quiz_loop: app.quiz_loop(),
            courses: app.courses(),
            catalog: app.catalog(),
            admin: app.admin(),
            career: app.career(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<AuthSession> {
        Arc::clone(&self.session)
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
