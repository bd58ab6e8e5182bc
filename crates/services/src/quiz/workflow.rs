use std::sync::Arc;

use log::{info, warn};
use sphere_core::model::{Question, QuizResult, Roadmap};

use crate::error::QuizError;
use crate::roadmap_service::RoadmapApi;
use crate::tutor::{GenerateTestRequest, TutorApi};

use super::session::{QuizSession, StartRequest, Submission, SubmitReason};

/// What happened to a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmitOutcome {
    /// Another submission already holds the claim.
    AlreadySubmitted,
    Graded(QuizResult),
    /// The session moved on before the grade arrived; it was discarded.
    Stale,
}

/// Orchestrates quiz generation and grading around a `QuizSession`.
///
/// The `generate` and `evaluate` halves never touch the session, so callers that
/// keep the session behind a UI signal can release it across the await.
#[derive(Clone)]
pub struct QuizLoopService {
    tutor: Arc<dyn TutorApi>,
    roadmaps: Arc<dyn RoadmapApi>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(tutor: Arc<dyn TutorApi>, roadmaps: Arc<dyn RoadmapApi>) -> Self {
        Self { tutor, roadmaps }
    }

    /// # Errors
    ///
    /// Returns `QuizError::Api` if the roadmap list cannot be fetched.
    pub async fn fetch_roadmaps(&self) -> Result<Vec<Roadmap>, QuizError> {
        Ok(self.roadmaps.enrolled_roadmaps().await?)
    }

    /// Request and normalize questions for a claimed start.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Api` for request failures and `QuizError::NoQuestions`
    /// when nothing usable came back.
    pub async fn generate(&self, request: &StartRequest) -> Result<Vec<Question>, QuizError> {
        let body = GenerateTestRequest {
            topic_id: request.topic_id.clone(),
            question_count: request.question_count,
            difficulty: request.difficulty,
        };
        let generated = self.tutor.generate_test(&body).await?;
        let questions = generated.into_questions()?;
        info!(
            "generated {} question(s) for topic {}",
            questions.len(),
            request.topic_id
        );
        Ok(questions)
    }

    /// Grade a claimed submission on the server.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Api` for request failures and
    /// `QuizError::InvalidResult` for inconsistent scores.
    pub async fn evaluate(&self, submission: &Submission) -> Result<QuizResult, QuizError> {
        let response = self.tutor.evaluate(&submission.request).await?;
        response.into_result(submission.question_count())
    }

    /// Run the full start path: validate, generate, enter the quiz.
    ///
    /// # Errors
    ///
    /// Returns validation errors before any request is made; on request failure
    /// the session stays in setup.
    pub async fn start(&self, session: &mut QuizSession) -> Result<(), QuizError> {
        let request = session.begin_start()?;
        self.finish_start(session, &request).await
    }

    /// Start again with the previous topic, difficulty, and count.
    ///
    /// # Errors
    ///
    /// Same as `start`.
    pub async fn retry(&self, session: &mut QuizSession) -> Result<(), QuizError> {
        let request = session.retry_same_topic()?;
        self.finish_start(session, &request).await
    }

    /// Run the full submit path. A failed evaluation leaves the quiz open.
    ///
    /// # Errors
    ///
    /// Returns the evaluation error after rolling the submission back.
    pub async fn submit(
        &self,
        session: &mut QuizSession,
        reason: SubmitReason,
    ) -> Result<SubmitOutcome, QuizError> {
        let Some(submission) = session.begin_submission(reason) else {
            return Ok(SubmitOutcome::AlreadySubmitted);
        };
        let graded = self.evaluate(&submission).await;
        self.settle_submission(session, &submission, graded)
    }

    /// Apply a generation outcome to the session that claimed the start. On
    /// failure the claim is released and the session stays in setup.
    ///
    /// # Errors
    ///
    /// Returns the generation error, or `QuizError::NoQuestions`.
    pub fn enter_quiz(
        &self,
        session: &mut QuizSession,
        generated: Result<Vec<Question>, QuizError>,
    ) -> Result<(), QuizError> {
        match generated.and_then(|questions| session.begin_quiz(questions)) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!("question generation failed: {err}");
                session.abort_start();
                Err(err)
            }
        }
    }

    /// Apply an evaluation outcome to the session that claimed `submission`.
    /// A failed evaluation reopens the quiz with its answers intact.
    ///
    /// # Errors
    ///
    /// Returns the evaluation error after rolling the submission back.
    pub fn settle_submission(
        &self,
        session: &mut QuizSession,
        submission: &Submission,
        graded: Result<QuizResult, QuizError>,
    ) -> Result<SubmitOutcome, QuizError> {
        match graded {
            Ok(result) => match session.complete_submission(submission.attempt, result) {
                Ok(()) => Ok(SubmitOutcome::Graded(result)),
                Err(stale) => {
                    warn!("dropping stale evaluation: {stale}");
                    Ok(SubmitOutcome::Stale)
                }
            },
            Err(err) => {
                warn!("evaluation failed: {err}");
                if let Err(stale) = session.fail_submission(submission.attempt) {
                    warn!("could not reopen quiz: {stale}");
                }
                Err(err)
            }
        }
    }

    async fn finish_start(
        &self,
        session: &mut QuizSession,
        request: &StartRequest,
    ) -> Result<(), QuizError> {
        let generated = self.generate(request).await;
        self.enter_quiz(session, generated)
    }
}
