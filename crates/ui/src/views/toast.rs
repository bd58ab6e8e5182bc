use std::time::Duration;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::views::ViewError;

pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Global transient notifications. Each toast dismisses itself after `TOAST_TTL`.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toaster {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, err: &ViewError) {
        self.push(ToastKind::Error, err.message());
    }

    pub fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|toast| toast.id != id);
    }

    #[must_use]
    pub fn items(&self) -> Vec<Toast> {
        self.items.read().clone()
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut next_id = self.next_id;
        let mut items = self.items;
        let id = next_id();
        next_id.set(id + 1);
        items.write().push(Toast { id, kind, message });

        // Owned by the root scope so a toast outlives the view that raised it.
        let toaster = *self;
        let _ = spawn_forever(async move {
            tokio::time::sleep(TOAST_TTL).await;
            toaster.dismiss(id);
        });
    }
}

/// Install the toaster at the app root.
pub fn use_toaster_provider() -> Toaster {
    use_context_provider(|| Toaster {
        items: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    })
}

#[must_use]
pub fn use_toaster() -> Toaster {
    use_context::<Toaster>()
}

#[component]
pub fn ToastHost() -> Element {
    let toaster = use_toaster();
    let toasts = toaster.items();

    rsx! {
        div { class: "toast-host", role: "status",
            for toast in toasts {
                div { key: "{toast.id}", class: toast.kind.class(),
                    span { "{toast.message}" }
                    button {
                        class: "toast-close",
                        r#type: "button",
                        onclick: move |_| toaster.dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}
