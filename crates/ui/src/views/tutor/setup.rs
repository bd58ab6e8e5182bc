use dioxus::prelude::*;
use services::QuizSession;
use sphere_core::model::{Difficulty, QUESTION_COUNT_CHOICES, RoadmapId, TopicId};

use crate::views::{EmptyPanel, ViewError};
use crate::vm::{map_roadmap_options, map_topic_options};

#[component]
pub(super) fn SetupPanel(
    session: Signal<QuizSession>,
    error: Signal<Option<ViewError>>,
    on_start: EventHandler<()>,
) -> Element {
    let mut session = session;
    let (roadmap_options, topic_options, setup, pending) = {
        let session = session.read();
        (
            map_roadmap_options(&session),
            map_topic_options(&session),
            session.setup().clone(),
            session.is_start_pending(),
        )
    };

    if roadmap_options.is_empty() {
        return rsx! {
            EmptyPanel {
                message: "Enroll in a roadmap to generate practice tests.".to_string(),
            }
        };
    }

    let selected_roadmap = setup
        .roadmap_id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let selected_topic = setup
        .topic_id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let has_roadmap = setup.roadmap_id.is_some();

    // Every setter only fails on stale input; surface it inline.
    let report = move |result: Result<(), services::QuizError>| {
        let mut error = error;
        match result {
            Ok(()) => error.set(None),
            Err(err) => error.set(Some(err.into())),
        }
    };

    rsx! {
        form {
            class: "card tutor-setup",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_start.call(());
            },
            h3 { "Generate a practice test" }

            label { class: "field",
                span { "Roadmap" }
                select {
                    value: "{selected_roadmap}",
                    disabled: pending,
                    onchange: move |evt: FormEvent| {
                        let id = evt.value().parse::<RoadmapId>().ok();
                        report(session.write().select_roadmap(id));
                    },
                    option { value: "", "Select a roadmap" }
                    for opt in roadmap_options {
                        option {
                            key: "{opt.id}",
                            value: "{opt.id}",
                            selected: opt.id.as_str() == selected_roadmap,
                            "{opt.label}"
                        }
                    }
                }
            }

            label { class: "field",
                span { "Topic" }
                select {
                    value: "{selected_topic}",
                    disabled: !has_roadmap || pending,
                    onchange: move |evt: FormEvent| {
                        let id = evt.value().parse::<TopicId>().ok();
                        report(session.write().select_topic(id));
                    },
                    option { value: "", "Select a topic" }
                    for opt in topic_options {
                        option {
                            key: "{opt.id}",
                            value: "{opt.id}",
                            selected: opt.id.as_str() == selected_topic,
                            "{opt.label}"
                        }
                    }
                }
            }

            div { class: "field-row",
                label { class: "field",
                    span { "Difficulty" }
                    select {
                        value: "{setup.difficulty.as_str()}",
                        disabled: pending,
                        onchange: move |evt: FormEvent| {
                            if let Some(difficulty) = Difficulty::parse(&evt.value()) {
                                report(session.write().set_difficulty(difficulty));
                            }
                        },
                        for difficulty in Difficulty::ALL {
                            option {
                                key: "{difficulty.as_str()}",
                                value: "{difficulty.as_str()}",
                                selected: difficulty == setup.difficulty,
                                "{difficulty.label()}"
                            }
                        }
                    }
                }
                label { class: "field",
                    span { "Questions" }
                    select {
                        value: "{setup.question_count}",
                        disabled: pending,
                        onchange: move |evt: FormEvent| {
                            if let Ok(count) = evt.value().parse::<u32>() {
                                report(session.write().set_question_count(count));
                            }
                        },
                        for count in QUESTION_COUNT_CHOICES {
                            option {
                                key: "{count}",
                                value: "{count}",
                                selected: count == setup.question_count,
                                "{count}"
                            }
                        }
                    }
                }
            }

            if let Some(err) = error() {
                p { class: "field-error", role: "alert", "{err.message()}" }
            }

            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: pending,
                if pending { "Generating questions..." } else { "Start Quiz" }
            }
        }
    }
}
