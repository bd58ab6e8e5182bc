use dioxus::prelude::*;
use log::debug;
use services::QuizSession;

use crate::vm::{OptionVm, map_current_question, map_navigator, map_progress};

#[component]
pub(super) fn QuizPanel(session: Signal<QuizSession>, on_submit: EventHandler<()>) -> Element {
    let mut session = session;
    let (question, navigator, progress, submitting) = {
        let session = session.read();
        (
            map_current_question(&session),
            map_navigator(&session),
            map_progress(&session),
            session.is_submitting(),
        )
    };
    let Some(question) = question else {
        return rsx! {};
    };
    let question_index = question.index;
    let option_count = question.options.len();

    let mut select = move |option: usize| {
        if let Err(err) = session.write().select_answer(question_index, option) {
            debug!("ignored answer selection: {err}");
        }
    };

    let on_key = move |evt: KeyboardEvent| match evt.key() {
        Key::ArrowRight => {
            session.write().go_next();
        }
        Key::ArrowLeft => {
            session.write().go_previous();
        }
        Key::Character(text) => {
            let picked = text
                .parse::<usize>()
                .ok()
                .and_then(|digit| digit.checked_sub(1))
                .filter(|option| *option < option_count);
            if let Some(option) = picked {
                select(option);
            }
        }
        _ => {}
    };

    let timer_class = if progress.urgent {
        "quiz-timer quiz-timer--urgent"
    } else {
        "quiz-timer"
    };

    rsx! {
        div { class: "quiz", tabindex: "0", onkeydown: on_key,
            header { class: "quiz-header",
                span { class: "quiz-progress", "{progress.answered_label}" }
                span { class: timer_class, role: "timer", "{progress.countdown}" }
            }

            section { class: "card quiz-question",
                h3 { "{question.heading}" }
                p { class: "quiz-prompt", "{question.prompt}" }
                ul { class: "quiz-options",
                    for opt in question.options.clone() {
                        QuizOption {
                            key: "{opt.index}",
                            option: opt,
                            disabled: submitting,
                            on_select: move |index| select(index),
                        }
                    }
                }
                div { class: "quiz-nav",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: question.is_first,
                        onclick: move |_| {
                            session.write().go_previous();
                        },
                        "Previous"
                    }
                    if question.is_last {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: submitting,
                            onclick: move |_| on_submit.call(()),
                            if submitting { "Submitting..." } else { "Submit Quiz" }
                        }
                    } else {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                session.write().go_next();
                            },
                            "Next"
                        }
                    }
                }
            }

            nav { class: "quiz-navigator", aria_label: "Questions",
                for item in navigator {
                    button {
                        key: "{item.index}",
                        r#type: "button",
                        class: navigator_class(item.answered, item.current),
                        onclick: move |_| {
                            if let Err(err) = session.write().jump_to(item.index) {
                                debug!("ignored jump: {err}");
                            }
                        },
                        "{item.label}"
                    }
                }
                button {
                    class: "btn btn-primary quiz-submit",
                    r#type: "button",
                    disabled: submitting,
                    onclick: move |_| on_submit.call(()),
                    "Submit"
                }
            }
        }
    }
}

#[component]
fn QuizOption(option: OptionVm, disabled: bool, on_select: EventHandler<usize>) -> Element {
    let class = if option.selected {
        "quiz-option quiz-option--selected"
    } else {
        "quiz-option"
    };
    rsx! {
        li {
            button {
                class,
                r#type: "button",
                disabled,
                aria_pressed: option.selected,
                onclick: move |_| on_select.call(option.index),
                span { class: "quiz-option__letter", "{option.letter}" }
                span { "{option.text}" }
            }
        }
    }
}

fn navigator_class(answered: bool, current: bool) -> &'static str {
    match (answered, current) {
        (_, true) => "nav-dot nav-dot--current",
        (true, false) => "nav-dot nav-dot--answered",
        (false, false) => "nav-dot",
    }
}
