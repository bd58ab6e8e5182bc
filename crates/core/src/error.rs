use thiserror::Error;

use crate::model::{
    CatalogError, CompanyError, CourseError, QuestionError, QuizResultError,
};

/// Domain validation failures across all models.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    QuizResult(#[from] QuizResultError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Company(#[from] CompanyError),
}
