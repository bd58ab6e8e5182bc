use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyPrompt,
    #[error("question has no options")]
    NoOptions,
    #[error("correct index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

/// How the correct option of a generated question was resolved.
///
/// Generated questions should flag the correct option. When none is flagged the
/// option whose text matches the separate correct-answer field wins, and when that
/// fails too the first option is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectAnswerSource {
    Flagged,
    MatchedText,
    Defaulted,
}

/// One candidate answer as delivered by the question generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl QuestionOption {
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

/// Resolve the correct option index for a generated question.
///
/// Returns `None` only when there are no options at all.
#[must_use]
pub fn resolve_correct_index(
    options: &[QuestionOption],
    correct_answer: Option<&str>,
) -> Option<(usize, CorrectAnswerSource)> {
    if options.is_empty() {
        return None;
    }

    if let Some(index) = options.iter().position(|option| option.is_correct) {
        return Some((index, CorrectAnswerSource::Flagged));
    }

    if let Some(expected) = correct_answer.map(str::trim).filter(|s| !s.is_empty()) {
        let exact = options.iter().position(|option| option.text == expected);
        let loose = || {
            options
                .iter()
                .position(|option| option.text.trim().eq_ignore_ascii_case(expected))
        };
        if let Some(index) = exact.or_else(loose) {
            return Some((index, CorrectAnswerSource::MatchedText));
        }
    }

    Some((0, CorrectAnswerSource::Defaulted))
}

/// A normalized multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: Option<String>,
    source: CorrectAnswerSource,
}

impl Question {
    /// Build a question with an explicit correct index.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank, there are no options,
    /// or the correct index is out of range.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                len: options.len(),
            });
        }
        Ok(Self {
            prompt,
            options,
            correct_index,
            explanation: explanation.filter(|text| !text.trim().is_empty()),
            source: CorrectAnswerSource::Flagged,
        })
    }

    /// Normalize a generated question, resolving the correct option.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank or there are no options.
    pub fn from_generated(
        prompt: impl Into<String>,
        options: &[QuestionOption],
        correct_answer: Option<&str>,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let (correct_index, source) =
            resolve_correct_index(options, correct_answer).ok_or(QuestionError::NoOptions)?;
        let texts = options.iter().map(|option| option.text.clone()).collect();
        let mut question = Self::new(prompt, texts, correct_index, explanation)?;
        question.source = source;
        Ok(question)
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn source(&self) -> CorrectAnswerSource {
        self.source
    }

    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_index
    }

    /// Options re-flagged for the wire, with the correct one marked.
    #[must_use]
    pub fn flagged_options(&self) -> Vec<QuestionOption> {
        self.options
            .iter()
            .enumerate()
            .map(|(index, text)| QuestionOption::new(text.clone(), index == self.correct_index))
            .collect()
    }
}
