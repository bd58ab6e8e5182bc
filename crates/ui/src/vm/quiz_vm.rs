use services::{QuestionReview, QuizSession};
use sphere_core::model::{QuizResult, RoadmapId, TopicId};

/// Seconds left at which the countdown turns urgent.
const URGENT_SECONDS: u32 = 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOptionVm<Id> {
    pub id: Id,
    pub label: String,
}

#[must_use]
pub fn map_roadmap_options(session: &QuizSession) -> Vec<SelectOptionVm<RoadmapId>> {
    session
        .roadmaps()
        .iter()
        .map(|roadmap| SelectOptionVm {
            id: roadmap.id().clone(),
            label: roadmap.title().to_string(),
        })
        .collect()
}

#[must_use]
pub fn map_topic_options(session: &QuizSession) -> Vec<SelectOptionVm<TopicId>> {
    session
        .available_topics()
        .iter()
        .map(|topic| SelectOptionVm {
            id: topic.id().clone(),
            label: topic.display_title().to_string(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizProgressVm {
    pub answered_label: String,
    pub countdown: String,
    pub urgent: bool,
}

#[must_use]
pub fn map_progress(session: &QuizSession) -> QuizProgressVm {
    QuizProgressVm {
        answered_label: format!(
            "{} of {} answered",
            session.answered_count(),
            session.questions().len()
        ),
        countdown: session.countdown_label(),
        urgent: session.remaining_seconds() <= URGENT_SECONDS,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub index: usize,
    pub heading: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub is_first: bool,
    pub is_last: bool,
}

#[must_use]
pub fn map_current_question(session: &QuizSession) -> Option<QuestionVm> {
    let question = session.current_question()?;
    let index = session.current_index();
    let total = session.questions().len();
    let selected = session.answer(index);
    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(option, text)| OptionVm {
            index: option,
            letter: option_letter(option),
            text: text.clone(),
            selected: selected == Some(option),
        })
        .collect();
    Some(QuestionVm {
        index,
        heading: format!("Question {} of {total}", index + 1),
        prompt: question.prompt().to_string(),
        options,
        is_first: index == 0,
        is_last: index + 1 == total,
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigatorItemVm {
    pub index: usize,
    pub label: String,
    pub answered: bool,
    pub current: bool,
}

#[must_use]
pub fn map_navigator(session: &QuizSession) -> Vec<NavigatorItemVm> {
    (0..session.questions().len())
        .map(|index| NavigatorItemVm {
            index,
            label: (index + 1).to_string(),
            answered: session.answer(index).is_some(),
            current: index == session.current_index(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub percentage_label: String,
    pub summary: String,
    pub headline: &'static str,
    pub passed: bool,
}

impl From<&QuizResult> for ResultVm {
    fn from(result: &QuizResult) -> Self {
        let passed = result.passed();
        Self {
            percentage_label: format!("{}%", result.rounded_percentage()),
            summary: format!("{} of {} correct", result.correct(), result.total()),
            headline: if passed { "Well done!" } else { "Keep practicing" },
            passed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItemVm {
    pub number: usize,
    pub prompt: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

impl From<&QuestionReview> for ReviewItemVm {
    fn from(review: &QuestionReview) -> Self {
        let text = |index: usize| review.options.get(index).cloned().unwrap_or_default();
        Self {
            number: review.index + 1,
            prompt: review.prompt.clone(),
            your_answer: review
                .selected
                .map_or_else(|| "Not answered".to_string(), text),
            correct_answer: text(review.correct_index),
            is_correct: review.is_correct(),
            explanation: review.explanation.clone(),
        }
    }
}

#[must_use]
pub fn map_review(session: &QuizSession) -> Vec<ReviewItemVm> {
    session.review().iter().map(ReviewItemVm::from).collect()
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}
