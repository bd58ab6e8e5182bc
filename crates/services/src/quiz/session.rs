use std::collections::BTreeMap;

use sphere_core::model::{
    Difficulty, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT, Question, QuizResult, Roadmap, RoadmapId,
    Topic, TopicId, countdown_for,
};
use sphere_core::time::format_countdown;

use crate::error::QuizError;
use crate::tutor::{EvaluateRequest, EvaluatedQuestion};

//
// ─── PHASES / SETUP ────────────────────────────────────────────────────────────
//

/// Linear quiz lifecycle; "New Quiz" is the only way back to `Setup`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuizPhase {
    #[default]
    Setup,
    Quiz,
    Results,
}

/// Selections collected by the setup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSetup {
    pub roadmap_id: Option<RoadmapId>,
    pub topic_id: Option<TopicId>,
    pub difficulty: Difficulty,
    pub question_count: u32,
}

impl Default for QuizSetup {
    fn default() -> Self {
        Self {
            roadmap_id: None,
            topic_id: None,
            difficulty: Difficulty::default(),
            question_count: 5,
        }
    }
}

/// Snapshot of the setup taken when a start is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    pub topic_id: TopicId,
    pub difficulty: Difficulty,
    pub question_count: u32,
}

//
// ─── SUBMISSION ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReason {
    Manual,
    TimerExpired,
}

/// A claimed submission. Only the holder may complete or fail it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub attempt: u64,
    pub reason: SubmitReason,
    pub request: EvaluateRequest,
}

impl Submission {
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.request.questions.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum SubmissionState {
    #[default]
    Open,
    InFlight(u64),
    Done,
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not counting: outside the quiz or a submission is underway.
    Idle,
    Running(u32),
    Expired,
}

/// Read-only per-question review shown on the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    pub index: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub correct_index: usize,
    pub explanation: Option<String>,
}

impl QuestionReview {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.selected == Some(self.correct_index)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Client-local state of the AI tutor quiz.
///
/// Network calls happen outside; this type only validates and applies
/// transitions, so it can live inside a UI signal.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    phase: QuizPhase,
    roadmaps: Vec<Roadmap>,
    setup: QuizSetup,
    pending_start: Option<StartRequest>,
    // The request that entered the current quiz; retry replays it.
    started: Option<StartRequest>,
    questions: Vec<Question>,
    answers: BTreeMap<usize, usize>,
    current: usize,
    remaining_seconds: u32,
    submission: SubmissionState,
    attempts: u64,
    result: Option<QuizResult>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn setup(&self) -> &QuizSetup {
        &self.setup
    }

    #[must_use]
    pub fn roadmaps(&self) -> &[Roadmap] {
        &self.roadmaps
    }

    #[must_use]
    pub fn selected_roadmap(&self) -> Option<&Roadmap> {
        let id = self.setup.roadmap_id.as_ref()?;
        self.roadmaps.iter().find(|roadmap| roadmap.id() == id)
    }

    /// Topics offered by the setup form: those of the selected roadmap.
    #[must_use]
    pub fn available_topics(&self) -> &[Topic] {
        self.selected_roadmap().map_or(&[], Roadmap::topics)
    }

    #[must_use]
    pub fn is_start_pending(&self) -> bool {
        self.pending_start.is_some()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionState::InFlight(_))
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Cursor into `questions`; only meaningful in the quiz and results phases.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn answer(&self, question_index: usize) -> Option<usize> {
        self.answers.get(&question_index).copied()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    #[must_use]
    pub fn countdown_label(&self) -> String {
        format_countdown(self.remaining_seconds)
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    // ── setup ──

    /// Replace the enrolled roadmap list, dropping selections that vanished.
    pub fn set_roadmaps(&mut self, roadmaps: Vec<Roadmap>) {
        self.roadmaps = roadmaps;
        if self.selected_roadmap().is_none() {
            self.setup.roadmap_id = None;
            self.setup.topic_id = None;
        } else {
            self.drop_incompatible_topic();
        }
    }

    /// Select a roadmap; a topic that does not belong to it is cleared.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` outside setup, `QuizError::StartInFlight`
    /// while a start is pending, and `QuizError::UnknownRoadmap` for ids that are
    /// not enrolled.
    pub fn select_roadmap(&mut self, id: Option<RoadmapId>) -> Result<(), QuizError> {
        self.require_editable_setup()?;
        if let Some(id) = &id {
            if !self.roadmaps.iter().any(|roadmap| roadmap.id() == id) {
                return Err(QuizError::UnknownRoadmap(id.clone()));
            }
        }
        self.setup.roadmap_id = id;
        self.drop_incompatible_topic();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::TopicNotInRoadmap` unless the topic belongs to the
    /// selected roadmap.
    pub fn select_topic(&mut self, id: Option<TopicId>) -> Result<(), QuizError> {
        self.require_editable_setup()?;
        if let Some(topic) = &id {
            let allowed = self
                .selected_roadmap()
                .is_some_and(|roadmap| roadmap.contains_topic(topic));
            if !allowed {
                return Err(QuizError::TopicNotInRoadmap {
                    topic: topic.clone(),
                    roadmap: self.setup.roadmap_id.clone(),
                });
            }
        }
        self.setup.topic_id = id;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` outside setup.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), QuizError> {
        self.require_editable_setup()?;
        self.setup.difficulty = difficulty;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::InvalidQuestionCount` outside the allowed range.
    pub fn set_question_count(&mut self, count: u32) -> Result<(), QuizError> {
        self.require_editable_setup()?;
        if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&count) {
            return Err(QuizError::InvalidQuestionCount {
                got: count,
                min: MIN_QUESTION_COUNT,
                max: MAX_QUESTION_COUNT,
            });
        }
        self.setup.question_count = count;
        Ok(())
    }

    // ── start ──

    /// Validate the setup and claim the start.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoTopicSelected` without a topic and
    /// `QuizError::StartInFlight` if a start is already pending.
    pub fn begin_start(&mut self) -> Result<StartRequest, QuizError> {
        self.require_phase(QuizPhase::Setup)?;
        if self.pending_start.is_some() {
            return Err(QuizError::StartInFlight);
        }
        let topic_id = self
            .setup
            .topic_id
            .clone()
            .ok_or(QuizError::NoTopicSelected)?;
        let request = StartRequest {
            topic_id,
            difficulty: self.setup.difficulty,
            question_count: self.setup.question_count,
        };
        self.pending_start = Some(request.clone());
        Ok(request)
    }

    /// Release a pending start after generation failed; the phase stays `Setup`.
    pub fn abort_start(&mut self) {
        self.pending_start = None;
    }

    /// Enter the quiz with freshly generated questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StartNotRequested` without a pending start and
    /// `QuizError::NoQuestions` for an empty set.
    pub fn begin_quiz(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        self.require_phase(QuizPhase::Setup)?;
        let request = self
            .pending_start
            .take()
            .ok_or(QuizError::StartNotRequested)?;
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        self.remaining_seconds = countdown_for(request.question_count);
        self.started = Some(request);
        self.questions = questions;
        self.answers.clear();
        self.current = 0;
        self.submission = SubmissionState::Open;
        self.result = None;
        self.phase = QuizPhase::Quiz;
        Ok(())
    }

    // ── quiz ──

    /// Record an answer. Re-selecting the same option is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` outside the quiz, after submission, or for
    /// out-of-range indices.
    pub fn select_answer(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        self.require_phase(QuizPhase::Quiz)?;
        if self.submission != SubmissionState::Open {
            return Err(QuizError::Submitted);
        }
        let len = self.questions.len();
        let target = self
            .questions
            .get(question)
            .ok_or(QuizError::QuestionOutOfRange { index: question, len })?;
        let options = target.options().len();
        if option >= options {
            return Err(QuizError::OptionOutOfRange {
                question,
                option,
                len: options,
            });
        }
        self.answers.insert(question, option);
        Ok(())
    }

    /// Advance the cursor; `false` at the last question.
    pub fn go_next(&mut self) -> bool {
        if self.phase != QuizPhase::Quiz || self.current + 1 >= self.questions.len() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move the cursor back; `false` at the first question.
    pub fn go_previous(&mut self) -> bool {
        if self.phase != QuizPhase::Quiz || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// # Errors
    ///
    /// Returns `QuizError::QuestionOutOfRange` without moving the cursor.
    pub fn jump_to(&mut self, index: usize) -> Result<(), QuizError> {
        self.require_phase(QuizPhase::Quiz)?;
        if index >= self.questions.len() {
            return Err(QuizError::QuestionOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Count down one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != QuizPhase::Quiz || self.submission != SubmissionState::Open {
            return TickOutcome::Idle;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining_seconds)
        }
    }

    /// Claim the submission. Returns `None` if one is in flight or done.
    pub fn begin_submission(&mut self, reason: SubmitReason) -> Option<Submission> {
        if self.phase != QuizPhase::Quiz || self.submission != SubmissionState::Open {
            return None;
        }
        let topic_id = self.started.as_ref()?.topic_id.clone();
        self.attempts += 1;
        let attempt = self.attempts;
        self.submission = SubmissionState::InFlight(attempt);

        let answers = (0..self.questions.len())
            .map(|index| self.answers.get(&index).copied())
            .collect();
        let request = EvaluateRequest {
            topic_id,
            questions: self.questions.iter().map(EvaluatedQuestion::from).collect(),
            answers,
        };
        Some(Submission {
            attempt,
            reason,
            request,
        })
    }

    /// Apply the server grade and move to results.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleSubmission` unless `attempt` is in flight.
    pub fn complete_submission(&mut self, attempt: u64, result: QuizResult) -> Result<(), QuizError> {
        self.require_in_flight(attempt)?;
        self.submission = SubmissionState::Done;
        self.result = Some(result);
        self.phase = QuizPhase::Results;
        Ok(())
    }

    /// Reopen the quiz after a failed evaluation; answers are untouched.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleSubmission` unless `attempt` is in flight.
    pub fn fail_submission(&mut self, attempt: u64) -> Result<(), QuizError> {
        self.require_in_flight(attempt)?;
        self.submission = SubmissionState::Open;
        Ok(())
    }

    // ── results ──

    #[must_use]
    pub fn review(&self) -> Vec<QuestionReview> {
        if self.phase != QuizPhase::Results {
            return Vec::new();
        }
        self.questions
            .iter()
            .enumerate()
            .map(|(index, question)| QuestionReview {
                index,
                prompt: question.prompt().to_string(),
                options: question.options().to_vec(),
                selected: self.answer(index),
                correct_index: question.correct_index(),
                explanation: question.explanation().map(str::to_string),
            })
            .collect()
    }

    /// Start again with the topic, difficulty, and count the finished quiz
    /// was generated with.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongPhase` outside results.
    pub fn retry_same_topic(&mut self) -> Result<StartRequest, QuizError> {
        self.require_phase(QuizPhase::Results)?;
        let request = self
            .started
            .clone()
            .ok_or(QuizError::StartNotRequested)?;
        self.clear_quiz();
        self.setup.topic_id = Some(request.topic_id.clone());
        self.setup.difficulty = request.difficulty;
        self.setup.question_count = request.question_count;
        self.pending_start = Some(request.clone());
        Ok(request)
    }

    /// Hard reset to an empty setup. The fetched roadmaps are kept.
    pub fn new_quiz(&mut self) {
        self.clear_quiz();
        self.setup = QuizSetup::default();
        self.pending_start = None;
    }

    fn clear_quiz(&mut self) {
        self.phase = QuizPhase::Setup;
        self.started = None;
        self.questions.clear();
        self.answers.clear();
        self.current = 0;
        self.remaining_seconds = 0;
        self.submission = SubmissionState::Open;
        self.result = None;
    }

    fn drop_incompatible_topic(&mut self) {
        let keep = match (&self.setup.topic_id, self.selected_roadmap()) {
            (Some(topic), Some(roadmap)) => roadmap.contains_topic(topic),
            (Some(_), None) => false,
            (None, _) => true,
        };
        if !keep {
            self.setup.topic_id = None;
        }
    }

    /// Setup fields are frozen while a start is being generated.
    fn require_editable_setup(&self) -> Result<(), QuizError> {
        self.require_phase(QuizPhase::Setup)?;
        if self.pending_start.is_some() {
            return Err(QuizError::StartInFlight);
        }
        Ok(())
    }

    fn require_phase(&self, expected: QuizPhase) -> Result<(), QuizError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(QuizError::WrongPhase { actual: self.phase })
        }
    }

    fn require_in_flight(&self, attempt: u64) -> Result<(), QuizError> {
        if self.submission == SubmissionState::InFlight(attempt) {
            Ok(())
        } else {
            Err(QuizError::StaleSubmission)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: &str) -> Topic {
        Topic::new(TopicId::new(id), id.to_uppercase(), None)
    }

    fn roadmaps() -> Vec<Roadmap> {
        vec![
            Roadmap::new(
                RoadmapId::new("r1"),
                "Backend",
                "Engineer",
                vec![topic("t1"), topic("t2")],
            ),
            Roadmap::new(RoadmapId::new("r2"), "Data", "Analyst", vec![topic("t3")]),
        ]
    }

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("Q{i}"),
                    vec!["a".into(), "b".into(), "c".into()],
                    i % 3,
                    None,
                )
                .unwrap()
            })
            .collect()
    }

    fn in_quiz(count: u32, generated: usize) -> QuizSession {
        let mut session = QuizSession::new();
        session.set_roadmaps(roadmaps());
        session.select_roadmap(Some(RoadmapId::new("r1"))).unwrap();
        session.select_topic(Some(TopicId::new("t1"))).unwrap();
        session.set_question_count(count).unwrap();
        session.begin_start().unwrap();
        session.begin_quiz(questions(generated)).unwrap();
        session
    }

    #[test]
    fn start_enters_quiz_with_countdown() {
        let session = in_quiz(5, 5);
        assert_eq!(session.phase(), QuizPhase::Quiz);
        assert_eq!(session.questions().len(), 5);
        assert_eq!(session.remaining_seconds(), 300);
        assert_eq!(session.countdown_label(), "5:00");
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn countdown_uses_requested_count() {
        let session = in_quiz(10, 7);
        assert_eq!(session.remaining_seconds(), 600);
    }

    #[test]
    fn start_without_topic_is_rejected() {
        let mut session = QuizSession::new();
        session.set_roadmaps(roadmaps());
        assert!(matches!(
            session.begin_start(),
            Err(QuizError::NoTopicSelected)
        ));
        assert!(!session.is_start_pending());
    }

    #[test]
    fn second_start_while_pending_is_rejected() {
        let mut session = QuizSession::new();
        session.set_roadmaps(roadmaps());
        session.select_roadmap(Some(RoadmapId::new("r1"))).unwrap();
        session.select_topic(Some(TopicId::new("t2"))).unwrap();
        session.begin_start().unwrap();
        assert!(matches!(session.begin_start(), Err(QuizError::StartInFlight)));

        session.abort_start();
        assert_eq!(session.phase(), QuizPhase::Setup);
        assert!(session.begin_start().is_ok());
    }

    #[test]
    fn begin_quiz_requires_pending_start_and_questions() {
        let mut session = QuizSession::new();
        assert!(matches!(
            session.begin_quiz(questions(1)),
            Err(QuizError::StartNotRequested)
        ));

        session.set_roadmaps(roadmaps());
        session.select_roadmap(Some(RoadmapId::new("r1"))).unwrap();
        session.select_topic(Some(TopicId::new("t1"))).unwrap();
        session.begin_start().unwrap();
        assert!(matches!(
            session.begin_quiz(Vec::new()),
            Err(QuizError::NoQuestions)
        ));
        assert_eq!(session.phase(), QuizPhase::Setup);
    }

    #[test]
    fn changing_roadmap_clears_incompatible_topic() {
        let mut session = QuizSession::new();
        session.set_roadmaps(roadmaps());
        session.select_roadmap(Some(RoadmapId::new("r1"))).unwrap();
        session.select_topic(Some(TopicId::new("t1"))).unwrap();

        session.select_roadmap(Some(RoadmapId::new("r1"))).unwrap();
        assert_eq!(session.setup().topic_id, Some(TopicId::new("t1")));

        session.select_roadmap(Some(RoadmapId::new("r2"))).unwrap();
        assert_eq!(session.setup().topic_id, None);
        assert_eq!(session.available_topics().len(), 1);
    }

    #[test]
    fn topic_must_belong_to_selected_roadmap() {
        let mut session = QuizSession::new();
        session.set_roadmaps(roadmaps());
        assert!(session.select_topic(Some(TopicId::new("t1"))).is_err());

        session.select_roadmap(Some(RoadmapId::new("r2"))).unwrap();
        let err = session.select_topic(Some(TopicId::new("t1"))).unwrap_err();
        assert!(matches!(err, QuizError::TopicNotInRoadmap { .. }));
        assert!(
            session
                .select_roadmap(Some(RoadmapId::new("missing")))
                .is_err()
        );
    }

    #[test]
    fn refreshed_roadmaps_drop_vanished_selection() {
        let mut session = QuizSession::new();
        session.set_roadmaps(roadmaps());
        session.select_roadmap(Some(RoadmapId::new("r2"))).unwrap();
        session.select_topic(Some(TopicId::new("t3"))).unwrap();

        session.set_roadmaps(roadmaps().into_iter().take(1).collect());
        assert_eq!(session.setup().roadmap_id, None);
        assert_eq!(session.setup().topic_id, None);
    }

    #[test]
    fn question_count_is_bounded() {
        let mut session = QuizSession::new();
        assert!(session.set_question_count(0).is_err());
        assert!(session.set_question_count(51).is_err());
        session.set_question_count(20).unwrap();
        assert_eq!(session.setup().question_count, 20);
    }

    #[test]
    fn select_answer_is_idempotent_and_keeps_cursor() {
        let mut session = in_quiz(5, 5);
        session.select_answer(2, 1).unwrap();
        session.select_answer(2, 1).unwrap();
        assert_eq!(session.answered_count(), 1);
        assert_eq!(session.answer(2), Some(1));
        assert_eq!(session.current_index(), 0);

        session.select_answer(2, 0).unwrap();
        assert_eq!(session.answer(2), Some(0));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn select_answer_rejects_out_of_range() {
        let mut session = in_quiz(5, 5);
        assert!(matches!(
            session.select_answer(5, 0),
            Err(QuizError::QuestionOutOfRange { index: 5, len: 5 })
        ));
        assert!(matches!(
            session.select_answer(0, 3),
            Err(QuizError::OptionOutOfRange { .. })
        ));
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut session = in_quiz(3, 3);
        assert!(!session.go_previous());
        assert!(session.go_next());
        assert!(session.go_next());
        assert!(!session.go_next());
        assert_eq!(session.current_index(), 2);

        assert!(session.jump_to(3).is_err());
        assert_eq!(session.current_index(), 2);
        session.jump_to(0).unwrap();
        assert_eq!(session.current_index(), 0);
        assert!(session.current_question().is_some());
    }

    #[test]
    fn tick_counts_down_to_expiry() {
        let mut session = in_quiz(1, 1);
        for expected in (1..60).rev() {
            assert_eq!(session.tick(), TickOutcome::Running(expected));
        }
        assert_eq!(session.tick(), TickOutcome::Expired);
        assert_eq!(session.remaining_seconds(), 0);
    }

    #[test]
    fn submission_is_claimed_once() {
        let mut session = in_quiz(5, 5);
        session.select_answer(0, 1).unwrap();
        session.select_answer(3, 2).unwrap();

        let first = session.begin_submission(SubmitReason::TimerExpired).unwrap();
        assert!(session.begin_submission(SubmitReason::Manual).is_none());
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert!(matches!(session.select_answer(1, 0), Err(QuizError::Submitted)));

        assert_eq!(
            first.request.answers,
            vec![Some(1), None, None, Some(2), None]
        );
        assert_eq!(first.question_count(), 5);
    }

    #[test]
    fn failed_submission_reopens_quiz() {
        let mut session = in_quiz(5, 5);
        session.select_answer(1, 1).unwrap();
        let submission = session.begin_submission(SubmitReason::Manual).unwrap();
        session.fail_submission(submission.attempt).unwrap();

        assert_eq!(session.phase(), QuizPhase::Quiz);
        assert_eq!(session.questions().len(), 5);
        assert_eq!(session.answer(1), Some(1));
        assert!(!session.is_submitting());

        let again = session.begin_submission(SubmitReason::Manual).unwrap();
        assert!(again.attempt > submission.attempt);
        assert!(matches!(
            session.complete_submission(submission.attempt, QuizResult::from_counts(1, 5).unwrap()),
            Err(QuizError::StaleSubmission)
        ));
    }

    #[test]
    fn completed_submission_shows_review() {
        let mut session = in_quiz(3, 3);
        session.select_answer(0, 0).unwrap();
        session.select_answer(1, 0).unwrap();
        let submission = session.begin_submission(SubmitReason::Manual).unwrap();
        session
            .complete_submission(submission.attempt, QuizResult::from_counts(1, 3).unwrap())
            .unwrap();

        assert_eq!(session.phase(), QuizPhase::Results);
        let review = session.review();
        assert_eq!(review.len(), 3);
        assert!(review[0].is_correct());
        assert!(!review[1].is_correct());
        assert_eq!(review[2].selected, None);
        assert!(session.begin_submission(SubmitReason::Manual).is_none());
    }

    #[test]
    fn new_quiz_resets_everything_but_roadmaps() {
        let mut session = in_quiz(5, 5);
        session.select_answer(0, 0).unwrap();
        let submission = session.begin_submission(SubmitReason::Manual).unwrap();
        session
            .complete_submission(submission.attempt, QuizResult::from_counts(1, 5).unwrap())
            .unwrap();

        session.new_quiz();
        assert_eq!(session.phase(), QuizPhase::Setup);
        assert!(session.questions().is_empty());
        assert_eq!(session.answered_count(), 0);
        assert!(session.result().is_none());
        assert_eq!(session.setup(), &QuizSetup::default());
        assert_eq!(session.roadmaps().len(), 2);
    }

    #[test]
    fn retry_reuses_previous_setup() {
        let mut session = in_quiz(10, 10);
        let submission = session.begin_submission(SubmitReason::Manual).unwrap();
        session
            .complete_submission(submission.attempt, QuizResult::from_counts(0, 10).unwrap())
            .unwrap();

        let request = session.retry_same_topic().unwrap();
        assert_eq!(request.topic_id, TopicId::new("t1"));
        assert_eq!(request.question_count, 10);
        assert_eq!(session.phase(), QuizPhase::Setup);
        assert!(session.result().is_none());
        assert!(session.is_start_pending());
    }

    #[test]
    fn setup_is_frozen_while_start_is_pending() {
        let mut session = QuizSession::new();
        session.set_roadmaps(roadmaps());
        session.select_roadmap(Some(RoadmapId::new("r1"))).unwrap();
        session.select_topic(Some(TopicId::new("t1"))).unwrap();
        session.set_difficulty(Difficulty::Hard).unwrap();
        session.begin_start().unwrap();

        assert!(matches!(
            session.select_topic(Some(TopicId::new("t2"))),
            Err(QuizError::StartInFlight)
        ));
        assert!(matches!(
            session.select_roadmap(None),
            Err(QuizError::StartInFlight)
        ));
        assert!(matches!(
            session.set_difficulty(Difficulty::Easy),
            Err(QuizError::StartInFlight)
        ));
        assert!(matches!(
            session.set_question_count(20),
            Err(QuizError::StartInFlight)
        ));
        assert_eq!(session.setup().topic_id, Some(TopicId::new("t1")));

        session.abort_start();
        assert!(session.select_topic(Some(TopicId::new("t2"))).is_ok());
    }

    #[test]
    fn retry_replays_the_request_that_started_the_quiz() {
        let mut session = QuizSession::new();
        session.set_roadmaps(roadmaps());
        session.select_roadmap(Some(RoadmapId::new("r1"))).unwrap();
        session.select_topic(Some(TopicId::new("t1"))).unwrap();
        session.set_difficulty(Difficulty::Hard).unwrap();
        session.set_question_count(5).unwrap();
        let started = session.begin_start().unwrap();
        let _ = session.select_topic(Some(TopicId::new("t2")));
        session.begin_quiz(questions(5)).unwrap();
        let submission = session.begin_submission(SubmitReason::Manual).unwrap();
        assert_eq!(submission.request.topic_id, TopicId::new("t1"));
        session
            .complete_submission(submission.attempt, QuizResult::from_counts(2, 5).unwrap())
            .unwrap();

        let retry = session.retry_same_topic().unwrap();

        assert_eq!(retry, started);
        assert_eq!(retry.difficulty, Difficulty::Hard);
        assert_eq!(session.setup().topic_id, Some(TopicId::new("t1")));
        session.begin_quiz(questions(5)).unwrap();
        assert_eq!(session.remaining_seconds(), 300);
    }
}
