use dioxus::prelude::*;
use services::QuizSession;

use crate::vm::{ResultVm, ReviewItemVm, map_review};

#[component]
pub(super) fn ResultsPanel(
    session: Signal<QuizSession>,
    on_retry: EventHandler<()>,
    on_new: EventHandler<()>,
) -> Element {
    let (result, review) = {
        let session = session.read();
        (session.result().map(ResultVm::from), map_review(&session))
    };
    let Some(result) = result else {
        return rsx! {};
    };
    let score_class = if result.passed {
        "result-score result-score--pass"
    } else {
        "result-score result-score--fail"
    };

    rsx! {
        section { class: "card quiz-results",
            h3 { "{result.headline}" }
            p { class: score_class, "{result.percentage_label}" }
            p { class: "result-summary", "{result.summary}" }
            div { class: "result-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_retry.call(()),
                    "Retry Same Topic"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_new.call(()),
                    "New Quiz"
                }
            }
        }
        section { class: "quiz-review",
            h3 { "Review" }
            ol {
                for item in review {
                    ReviewItem { key: "{item.number}", item }
                }
            }
        }
    }
}

#[component]
fn ReviewItem(item: ReviewItemVm) -> Element {
    let class = if item.is_correct {
        "review-item review-item--correct"
    } else {
        "review-item review-item--wrong"
    };
    rsx! {
        li { class,
            p { class: "review-prompt", "{item.prompt}" }
            p { "Your answer: {item.your_answer}" }
            if !item.is_correct {
                p { "Correct answer: {item.correct_answer}" }
            }
            if let Some(explanation) = item.explanation.clone() {
                p { class: "review-explanation", "{explanation}" }
            }
        }
    }
}
