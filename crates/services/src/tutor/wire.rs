//! Request and response bodies for the AI tutor endpoints.

use log::warn;
use serde::{Deserialize, Serialize};

use sphere_core::model::{
    CorrectAnswerSource, Difficulty, Question, QuestionOption, QuizResult, TopicId,
};

use crate::error::QuizError;

//
// ─── GENERATION ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestRequest {
    pub topic_id: TopicId,
    pub question_count: u32,
    pub difficulty: Difficulty,
}

/// Generated questions, accepted wrapped in `{ questions }` or as a bare list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "GeneratedTestRecord")]
pub struct GeneratedTest {
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GeneratedTestRecord {
    Wrapped {
        #[serde(default)]
        questions: Vec<GeneratedQuestion>,
    },
    Bare(Vec<GeneratedQuestion>),
}

impl From<GeneratedTestRecord> for GeneratedTest {
    fn from(record: GeneratedTestRecord) -> Self {
        let questions = match record {
            GeneratedTestRecord::Wrapped { questions } | GeneratedTestRecord::Bare(questions) => {
                questions
            }
        };
        Self { questions }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    #[serde(default, alias = "question")]
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<GeneratedOption>,
    #[serde(default)]
    pub correct_answer: Option<CorrectAnswer>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// An option sent either as plain text or as `{ text, isCorrect }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GeneratedOption {
    Text(String),
    Flagged(QuestionOption),
}

impl From<GeneratedOption> for QuestionOption {
    fn from(option: GeneratedOption) -> Self {
        match option {
            GeneratedOption::Text(text) => QuestionOption::new(text, false),
            GeneratedOption::Flagged(option) => option,
        }
    }
}

/// The separate correct-answer field: option text or a zero-based index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Index(usize),
    Text(String),
}

impl GeneratedQuestion {
    /// Normalize into a `Question`; `None` when the prompt or options are missing.
    #[must_use]
    pub fn into_question(self) -> Option<Question> {
        let options: Vec<QuestionOption> = self.options.into_iter().map(Into::into).collect();
        let expected = match self.correct_answer {
            Some(CorrectAnswer::Index(index)) => options.get(index).map(|o| o.text.clone()),
            Some(CorrectAnswer::Text(text)) => Some(text),
            None => None,
        };
        Question::from_generated(
            self.question_text,
            &options,
            expected.as_deref(),
            self.explanation,
        )
        .ok()
    }
}

impl GeneratedTest {
    /// Normalize every usable question, dropping malformed ones.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` if nothing usable remains.
    pub fn into_questions(self) -> Result<Vec<Question>, QuizError> {
        let received = self.questions.len();
        let questions: Vec<Question> = self
            .questions
            .into_iter()
            .filter_map(GeneratedQuestion::into_question)
            .collect();

        if questions.len() < received {
            warn!(
                "dropped {} malformed generated question(s)",
                received - questions.len()
            );
        }
        for (index, question) in questions.iter().enumerate() {
            if question.source() == CorrectAnswerSource::Defaulted {
                warn!("question {index} has no resolvable correct option; using the first");
            }
        }

        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(questions)
    }
}

//
// ─── EVALUATION ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedQuestion {
    pub question_text: String,
    pub options: Vec<QuestionOption>,
    pub correct_answer: String,
}

impl From<&Question> for EvaluatedQuestion {
    fn from(question: &Question) -> Self {
        Self {
            question_text: question.prompt().to_string(),
            options: question.flagged_options(),
            correct_answer: question.correct_option().to_string(),
        }
    }
}

/// Graded submission; `answers[i]` is the chosen option for question `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub topic_id: TopicId,
    pub questions: Vec<EvaluatedQuestion>,
    pub answers: Vec<Option<usize>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    #[serde(default, alias = "percentage")]
    pub score: Option<f64>,
    #[serde(default, alias = "correctCount")]
    pub correct: Option<u32>,
    #[serde(default, alias = "totalQuestions")]
    pub total: Option<u32>,
}

impl EvaluationResponse {
    /// Convert into a `QuizResult`, filling a missing total from the submission
    /// and a missing correct count from the score.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidResult` if the counts are inconsistent.
    pub fn into_result(self, submitted: usize) -> Result<QuizResult, QuizError> {
        let total = self
            .total
            .unwrap_or_else(|| u32::try_from(submitted).unwrap_or(u32::MAX));
        let result = match (self.score, self.correct) {
            (Some(score), Some(correct)) => QuizResult::new(score, correct, total)?,
            (Some(score), None) => QuizResult::from_percentage(score, total),
            (None, correct) => QuizResult::from_counts(correct.unwrap_or(0), total)?,
        };
        Ok(result)
    }
}

//
// ─── HELPER ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelperRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HelperAnswer {
    #[serde(default, alias = "response")]
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_wrapped_and_bare_question_lists() {
        let wrapped: GeneratedTest =
            serde_json::from_str(r#"{"questions":[{"questionText":"Q","options":["a"]}]}"#)
                .unwrap();
        let bare: GeneratedTest =
            serde_json::from_str(r#"[{"question":"Q","options":["a"]}]"#).unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn correct_answer_index_resolves_to_option() {
        let test: GeneratedTest = serde_json::from_str(
            r#"{"questions":[{"questionText":"Q","options":["a","b","c"],"correctAnswer":2}]}"#,
        )
        .unwrap();
        let questions = test.into_questions().unwrap();
        assert_eq!(questions[0].correct_index(), 2);
        assert_eq!(questions[0].source(), CorrectAnswerSource::MatchedText);
    }

    #[test]
    fn mixes_flagged_and_text_options() {
        let test: GeneratedTest = serde_json::from_str(
            r#"{"questions":[{"questionText":"Q","options":[{"text":"a"},{"text":"b","isCorrect":true}]}]}"#,
        )
        .unwrap();
        let questions = test.into_questions().unwrap();
        assert_eq!(questions[0].correct_option(), "b");
    }

    #[test]
    fn drops_questions_without_options() {
        let test: GeneratedTest = serde_json::from_str(
            r#"{"questions":[{"questionText":"Q1","options":[]},{"questionText":"Q2","options":["x"]}]}"#,
        )
        .unwrap();
        let questions = test.into_questions().unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt(), "Q2");
    }

    #[test]
    fn empty_generation_is_an_error() {
        let err = GeneratedTest::default().into_questions().unwrap_err();
        assert!(matches!(err, QuizError::NoQuestions));
    }

    #[test]
    fn evaluation_defaults_total_and_score() {
        let response: EvaluationResponse = serde_json::from_str(r#"{"correct":3}"#).unwrap();
        let result = response.into_result(5).unwrap();
        assert_eq!(result.total(), 5);
        assert_eq!(result.rounded_percentage(), 60);
    }

    #[test]
    fn evaluation_with_only_score_derives_correct() {
        let response: EvaluationResponse = serde_json::from_str(r#"{"percentage":80}"#).unwrap();
        let result = response.into_result(5).unwrap();
        assert_eq!(result.correct(), 4);
        assert_eq!(result.total(), 5);
        assert_eq!(result.rounded_percentage(), 80);
    }

    #[test]
    fn evaluation_rejects_inconsistent_counts() {
        let response = EvaluationResponse {
            score: Some(100.0),
            correct: Some(6),
            total: Some(5),
        };
        assert!(matches!(
            response.into_result(5),
            Err(QuizError::InvalidResult(_))
        ));
    }

    #[test]
    fn evaluate_request_serializes_unanswered_as_null() {
        let question = Question::new("Q", vec!["a".into(), "b".into()], 1, None).unwrap();
        let request = EvaluateRequest {
            topic_id: TopicId::new("t1"),
            questions: vec![EvaluatedQuestion::from(&question)],
            answers: vec![Some(0), None],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["topicId"], "t1");
        assert_eq!(json["answers"], serde_json::json!([0, null]));
        assert_eq!(json["questions"][0]["correctAnswer"], "b");
        assert_eq!(json["questions"][0]["options"][1]["isCorrect"], true);
    }
}
