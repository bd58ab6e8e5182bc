mod career;
mod catalog;
mod company;
mod course;
mod ids;
mod page;
mod question;
mod quiz;
mod roadmap;
mod user;

pub use ids::{
    CategoryId, CompanyId, CourseId, ParseIdError, RecruiterId, RoadmapId, TagId, TopicId, UserId,
};

pub use career::{
    ActivityHeatmap, AdminStats, CareerReadiness, HeatmapDay, LearningStyle, PredictiveCompletion,
    RiskAssessment, RiskLevel,
};
pub use catalog::{CatalogError, Category, CategoryDraft, NamedRef, Tag, TagDraft};
pub use company::{Company, CompanyDraft, CompanyError, Recruiter, RecruiterDraft};
pub use course::{Course, CourseDraft, CourseError, CourseFilter, CourseLevel};
pub use page::{Page, PageRequest};
pub use question::{
    CorrectAnswerSource, Question, QuestionError, QuestionOption, resolve_correct_index,
};
pub use quiz::{
    Difficulty, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT, QUESTION_COUNT_CHOICES, QuizResult,
    QuizResultError, SECONDS_PER_QUESTION, countdown_for,
};
pub use roadmap::{EnrolledRoadmap, Roadmap, RoadmapProgress, Topic};
pub use user::{AuthUser, UserRole};
