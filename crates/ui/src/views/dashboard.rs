use dioxus::prelude::*;
use services::ApiError;

use crate::context::AppContext;
use crate::views::{ErrorPanel, LoadingPanel, ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    CompletionVm, HeatmapVm, LearningStyleVm, ReadinessVm, RiskVm, StatTileVm, map_admin_stats,
};

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    greeting: String,
    readiness: Option<ReadinessVm>,
    risk: Option<RiskVm>,
    style: Option<LearningStyleVm>,
    completion: Option<CompletionVm>,
    heatmap: Option<HeatmapVm>,
    stats: Option<Vec<StatTileVm>>,
}

/// A widget whose endpoint failed renders as unavailable; an expired session
/// fails the whole page.
fn widget<T, V>(result: Result<T, ApiError>, map: impl FnOnce(T) -> V) -> Result<Option<V>, ViewError> {
    match result {
        Ok(value) => Ok(Some(map(value))),
        Err(err) if err.is_unauthorized() => Err(ViewError::SessionExpired),
        Err(err) => {
            log::warn!("dashboard widget unavailable: {err}");
            Ok(None)
        }
    }
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();

    let mut resource = use_resource(move || {
        let career = ctx.career();
        let admin = ctx.admin();
        let user = ctx.session().user();
        async move {
            let (readiness, risk, style, completion, heatmap) = tokio::join!(
                career.readiness(),
                career.risk(),
                career.learning_style(),
                career.predictive_completion(),
                career.heatmap(),
            );
            let is_admin = user.as_ref().is_some_and(|user| user.role.is_admin());
            let stats = if is_admin {
                widget(admin.stats().await, |stats| map_admin_stats(&stats))?
            } else {
                None
            };
            Ok::<_, ViewError>(DashboardData {
                greeting: user.map_or_else(
                    || "Welcome back".to_string(),
                    |user| format!("Welcome back, {}", user.display_name()),
                ),
                readiness: widget(readiness, |value| ReadinessVm::from(&value))?,
                risk: widget(risk, |value| RiskVm::from(&value))?,
                style: widget(style, |value| LearningStyleVm::from(&value))?,
                completion: widget(completion, |value| CompletionVm::from(&value))?,
                heatmap: widget(heatmap, |value| HeatmapVm::from(&value))?,
                stats,
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page dashboard",
            h2 { "Dashboard" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingPanel { label: "Loading your progress...".to_string() }
                },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(data) => rsx! {
                    p { class: "dashboard-greeting", "{data.greeting}" }
                    if let Some(stats) = data.stats {
                        div { class: "stat-grid",
                            for tile in stats {
                                div { key: "{tile.label}", class: "card stat-tile",
                                    span { class: "stat-value", "{tile.value}" }
                                    span { class: "stat-label", "{tile.label}" }
                                }
                            }
                        }
                    }
                    div { class: "widget-grid",
                        Widget { title: "Career readiness",
                            if let Some(readiness) = data.readiness {
                                p { class: "widget-figure", "{readiness.score_label}" }
                                TagList { title: "Strengths", items: readiness.strengths }
                                TagList { title: "Skill gaps", items: readiness.gaps }
                            } else {
                                Unavailable {}
                            }
                        }
                        Widget { title: "Dropout risk",
                            if let Some(risk) = data.risk {
                                span { class: risk.class, "{risk.label}" }
                                TagList { title: "Factors", items: risk.factors }
                            } else {
                                Unavailable {}
                            }
                        }
                        Widget { title: "Learning style",
                            if let Some(style) = data.style {
                                p { class: "widget-figure", "{style.dominant}" }
                                for bar in style.bars {
                                    div { key: "{bar.name}", class: "style-bar",
                                        span { class: "style-bar__name", "{bar.name}" }
                                        span { class: "style-bar__track",
                                            span { class: "style-bar__fill", style: "{bar.width_style}" }
                                        }
                                        span { "{bar.share_label}" }
                                    }
                                }
                            } else {
                                Unavailable {}
                            }
                        }
                        Widget { title: "Predicted completion",
                            if let Some(completion) = data.completion {
                                p { class: "widget-figure", "{completion.probability_label}" }
                                p { "Projected: {completion.projected_label}" }
                                p { "{completion.on_track_label}" }
                            } else {
                                Unavailable {}
                            }
                        }
                    }
                    Widget { title: "Activity",
                        if let Some(heatmap) = data.heatmap {
                            p { "{heatmap.total_label}" }
                            div { class: "heatmap",
                                for (i, cell) in heatmap.cells.into_iter().enumerate() {
                                    span { key: "{i}", class: "{cell.class}", title: "{cell.title}" }
                                }
                            }
                        } else {
                            Unavailable {}
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn Widget(title: &'static str, children: Element) -> Element {
    rsx! {
        section { class: "card widget",
            h3 { "{title}" }
            {children}
        }
    }
}

#[component]
fn TagList(title: &'static str, items: Vec<String>) -> Element {
    if items.is_empty() {
        return rsx! {};
    }
    rsx! {
        h4 { "{title}" }
        ul { class: "tag-list",
            for item in items {
                li { key: "{item}", "{item}" }
            }
        }
    }
}

#[component]
fn Unavailable() -> Element {
    rsx! {
        p { class: "widget-unavailable", "Not available right now." }
    }
}
