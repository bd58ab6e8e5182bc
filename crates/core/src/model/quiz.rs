use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seconds granted per requested question.
pub const SECONDS_PER_QUESTION: u32 = 60;

/// Question counts offered by the setup form.
pub const QUESTION_COUNT_CHOICES: [u32; 4] = [5, 10, 15, 20];

pub const MIN_QUESTION_COUNT: u32 = 1;
pub const MAX_QUESTION_COUNT: u32 = 50;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("correct count ({correct}) exceeds total ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

/// Difficulty requested from the question generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Initial countdown for a quiz of `question_count` questions.
#[must_use]
pub fn countdown_for(question_count: u32) -> u32 {
    question_count.saturating_mul(SECONDS_PER_QUESTION)
}

/// Server-computed grade for a submitted quiz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResult {
    percentage: f64,
    correct: u32,
    total: u32,
}

impl QuizResult {
    /// # Errors
    ///
    /// Returns `QuizResultError::CorrectExceedsTotal` if `correct > total`.
    pub fn new(percentage: f64, correct: u32, total: u32) -> Result<Self, QuizResultError> {
        if correct > total {
            return Err(QuizResultError::CorrectExceedsTotal { correct, total });
        }
        Ok(Self {
            percentage: percentage.clamp(0.0, 100.0),
            correct,
            total,
        })
    }

    /// Build a result when the evaluator omitted the score.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError::CorrectExceedsTotal` if `correct > total`.
    pub fn from_counts(correct: u32, total: u32) -> Result<Self, QuizResultError> {
        let percentage = if total == 0 {
            0.0
        } else {
            f64::from(correct) * 100.0 / f64::from(total)
        };
        Self::new(percentage, correct, total)
    }

    /// Build a result when the evaluator sent only a percentage; the correct
    /// count is the nearest whole number of questions.
    #[must_use]
    pub fn from_percentage(percentage: f64, total: u32) -> Self {
        let percentage = percentage.clamp(0.0, 100.0);
        // bounded by total after the clamp
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let correct = (percentage * f64::from(total) / 100.0).round() as u32;
        Self {
            percentage,
            correct: correct.min(total),
            total,
        }
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Rounded percentage for display.
    #[must_use]
    pub fn rounded_percentage(&self) -> u32 {
        // clamped to 0..=100 in the constructor
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = self.percentage.round() as u32;
        rounded
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.percentage >= 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_only_result_derives_correct_count() {
        let result = QuizResult::from_percentage(80.0, 5);
        assert_eq!(result.correct(), 4);
        assert_eq!(result.total(), 5);
        assert!(result.passed());
        assert_eq!(QuizResult::from_percentage(150.0, 3).correct(), 3);
        assert_eq!(QuizResult::from_percentage(50.0, 0).correct(), 0);
    }

    #[test]
    fn countdown_is_sixty_seconds_per_question() {
        assert_eq!(countdown_for(5), 300);
        assert_eq!(countdown_for(0), 0);
        assert_eq!(countdown_for(u32::MAX), u32::MAX);
    }

    #[test]
    fn difficulty_round_trips_through_text() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::parse(difficulty.as_str()), Some(difficulty));
        }
        assert_eq!(Difficulty::parse(" HARD "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("extreme"), None);
    }

    #[test]
    fn result_rejects_more_correct_than_total() {
        let err = QuizResult::new(50.0, 6, 5).unwrap_err();
        assert_eq!(err, QuizResultError::CorrectExceedsTotal { correct: 6, total: 5 });
    }

    #[test]
    fn result_from_counts_computes_percentage() {
        let result = QuizResult::from_counts(2, 5).unwrap();
        assert!((result.percentage() - 40.0).abs() < f64::EPSILON);
        assert_eq!(result.rounded_percentage(), 40);
        assert!(!result.passed());

        let empty = QuizResult::from_counts(0, 0).unwrap();
        assert_eq!(empty.rounded_percentage(), 0);
    }
}
