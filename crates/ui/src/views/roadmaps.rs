use dioxus::prelude::*;
use sphere_core::model::RoadmapId;

use crate::context::AppContext;
use crate::views::{
    EmptyPanel, ErrorPanel, LoadingPanel, ViewError, ViewState, use_mount_guard, use_toaster,
    view_state_from_resource,
};
use crate::vm::{RoadmapCardVm, map_roadmap_cards};

#[component]
pub fn RoadmapsView() -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let guard = use_mount_guard();
    let mut enrolling = use_signal(|| None::<RoadmapId>);

    let roadmaps = ctx.roadmaps();
    let mut resource = use_resource(move || {
        let roadmaps = roadmaps.clone();
        async move {
            // Cards are derived only once all three lists have settled.
            let (list, enrolled, progress) =
                tokio::join!(roadmaps.list(), roadmaps.my_enrolled(), roadmaps.progress());
            Ok::<_, ViewError>(map_roadmap_cards(&list?, &enrolled?, &progress?))
        }
    });
    let state = view_state_from_resource(&resource);

    let roadmaps = ctx.roadmaps();
    let on_enroll = use_callback(move |id: RoadmapId| {
        if enrolling().is_some() {
            return;
        }
        enrolling.set(Some(id.clone()));
        let roadmaps = roadmaps.clone();
        let guard = guard.clone();
        spawn(async move {
            let mut resource = resource;
            let result = roadmaps.enroll(&id).await;
            if !guard.is_mounted() {
                return;
            }
            enrolling.set(None);
            match result {
                Ok(()) => {
                    toaster.success("Enrolled. The roadmap is now available in the AI Tutor.");
                    resource.restart();
                }
                Err(err) => toaster.error(&ViewError::from(err)),
            }
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Roadmaps" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingPanel { label: "Loading roadmaps...".to_string() }
                },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        EmptyPanel { message: "No roadmaps have been published yet.".to_string() }
                    } else {
                        div { class: "card-grid",
                            for card in cards {
                                RoadmapCard {
                                    key: "{card.id}",
                                    busy: enrolling.read().as_ref() == Some(&card.id),
                                    card,
                                    on_enroll,
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn RoadmapCard(card: RoadmapCardVm, busy: bool, on_enroll: EventHandler<RoadmapId>) -> Element {
    let id = card.id.clone();
    rsx! {
        article { class: "card roadmap-card",
            h3 { "{card.title}" }
            if !card.role.is_empty() {
                p { class: "roadmap-role", "{card.role}" }
            }
            p { class: "roadmap-topics", "{card.topics_label}" }
            if let Some(progress) = card.progress_label.clone() {
                div { class: "progress",
                    span { class: "progress__fill", style: "{card.progress_style}" }
                }
                p { class: "progress-label", "{progress}" }
            } else {
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_enroll.call(id.clone()),
                    if busy { "Enrolling..." } else { "Enroll" }
                }
            }
        }
    }
}
