use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, use_mount_guard, use_toaster};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoginMode {
    SignIn,
    Register,
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let toaster = use_toaster();
    let guard = use_mount_guard();

    let mut mode = use_signal(|| LoginMode::SignIn);
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut pending = use_signal(|| false);

    // A 401 here means bad credentials, not an expired session.
    let session = ctx.session();
    use_hook(move || session.set_public_route(true));

    let auth = ctx.auth();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if pending() {
            return;
        }
        pending.set(true);
        error.set(None);
        let auth = auth.clone();
        let guard = guard.clone();
        spawn(async move {
            let result = match mode() {
                LoginMode::SignIn => auth.login(&email(), &password()).await,
                LoginMode::Register => auth.register(&name(), &email(), &password()).await,
            };
            if !guard.is_mounted() {
                return;
            }
            pending.set(false);
            match result {
                Ok(user) => {
                    toaster.success(format!("Welcome, {}", user.display_name()));
                    let _ = navigator.replace(Route::Dashboard {});
                }
                Err(err) => {
                    let err = ViewError::from(err);
                    match err {
                        ViewError::Invalid(_) => error.set(Some(err)),
                        other => toaster.error(&other),
                    }
                }
            }
        });
    };

    let (title, submit_label, switch_label) = match mode() {
        LoginMode::SignIn => ("Sign in", "Sign in", "Create an account"),
        LoginMode::Register => ("Create account", "Register", "I already have an account"),
    };

    rsx! {
        div { class: "login",
            form { class: "card login-card", onsubmit: on_submit,
                h1 { "LearnSphere" }
                h2 { "{title}" }
                if mode() == LoginMode::Register {
                    label { class: "field",
                        span { "Name" }
                        input {
                            r#type: "text",
                            value: "{name}",
                            oninput: move |evt| name.set(evt.value()),
                        }
                    }
                }
                label { class: "field",
                    span { "Email" }
                    input {
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Password" }
                    input {
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let Some(err) = error() {
                    p { class: "field-error", "{err.message()}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: pending(),
                    if pending() { "Please wait..." } else { "{submit_label}" }
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| {
                        error.set(None);
                        mode.set(match mode() {
                            LoginMode::SignIn => LoginMode::Register,
                            LoginMode::Register => LoginMode::SignIn,
                        });
                    },
                    "{switch_label}"
                }
            }
        }
    }
}
