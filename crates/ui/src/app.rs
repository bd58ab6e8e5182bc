use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;
use crate::views::{ToastHost, use_toaster_provider};

#[component]
pub fn App() -> Element {
    use_toaster_provider();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "LearnSphere" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
            ToastHost {}
        }
    }
}
