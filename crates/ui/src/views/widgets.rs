use dioxus::prelude::*;

use crate::views::ViewError;

#[component]
pub fn LoadingPanel(label: String) -> Element {
    rsx! {
        p { class: "panel panel--loading", "{label}" }
    }
}

/// Error message with a Retry button that restarts the failed load.
#[component]
pub fn ErrorPanel(error: ViewError, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "panel panel--error", role: "alert",
            p { "{error.message()}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}

#[component]
pub fn EmptyPanel(message: String) -> Element {
    rsx! {
        p { class: "panel panel--empty", "{message}" }
    }
}
