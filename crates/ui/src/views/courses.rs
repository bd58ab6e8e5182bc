use dioxus::prelude::*;
use services::ServiceError;
use sphere_core::model::{CategoryId, CourseDraft, CourseFilter, CourseId, PageRequest};

use crate::context::AppContext;
use crate::views::{
    EmptyPanel, ErrorPanel, LoadingPanel, ViewError, ViewState, use_mount_guard, use_toaster,
    view_state_from_resource,
};
use crate::vm::{CourseRowVm, PaginationVm, map_course_rows, map_pagination};

#[derive(Clone, Debug, PartialEq)]
struct CoursesData {
    rows: Vec<CourseRowVm>,
    pagination: PaginationVm,
}

#[derive(Clone, Debug, PartialEq)]
enum CourseAction {
    TogglePublish(CourseId, bool),
    Delete(CourseId),
}

#[component]
pub fn CoursesView() -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let guard = use_mount_guard();

    let mut page = use_signal(PageRequest::first);
    let mut search = use_signal(String::new);
    let mut query = use_signal(String::new);
    let mut category = use_signal(|| None::<CategoryId>);

    let courses = ctx.courses();
    let mut resource = use_resource(move || {
        let courses = courses.clone();
        let request = page();
        let filter = CourseFilter {
            category: category(),
            ..CourseFilter::search(&query())
        };
        async move {
            let listing = courses.list(request, &filter).await?;
            Ok::<_, ViewError>(CoursesData {
                rows: map_course_rows(&listing.items),
                pagination: map_pagination(&listing),
            })
        }
    });
    let catalog = ctx.catalog();
    let categories = use_resource(move || {
        let catalog = catalog.clone();
        async move { catalog.categories().await }
    });
    let category_options = categories
        .value()
        .read()
        .as_ref()
        .and_then(|result| result.as_ref().ok())
        .cloned()
        .unwrap_or_default();

    let state = view_state_from_resource(&resource);

    let courses = ctx.courses();
    let on_action = use_callback(move |action: CourseAction| {
        let courses = courses.clone();
        let guard = guard.clone();
        spawn(async move {
            let mut resource = resource;
            let (result, done) = match &action {
                CourseAction::TogglePublish(id, publish) => (
                    courses.set_published(id, *publish).await.map(|_| ()),
                    if *publish { "Course published" } else { "Course unpublished" },
                ),
                CourseAction::Delete(id) => (courses.delete(id).await, "Course deleted"),
            };
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(()) => {
                    toaster.success(done);
                    resource.restart();
                }
                Err(err) => toaster.error(&ViewError::from(err)),
            }
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Courses" }
            form {
                class: "toolbar",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    page.set(PageRequest::first());
                    query.set(search());
                },
                input {
                    r#type: "search",
                    placeholder: "Search courses",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
                select {
                    onchange: move |evt: FormEvent| {
                        page.set(PageRequest::first());
                        category.set(evt.value().parse::<CategoryId>().ok());
                    },
                    option { value: "", "All categories" }
                    for item in category_options {
                        option { key: "{item.id}", value: "{item.id}", "{item.name}" }
                    }
                }
                button { class: "btn btn-secondary", r#type: "submit", "Search" }
            }

            NewCourseForm { on_created: move |()| resource.restart() }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingPanel { label: "Loading courses...".to_string() }
                },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(data) => rsx! {
                    if data.rows.is_empty() {
                        EmptyPanel { message: "No courses match your search.".to_string() }
                    } else {
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Title" }
                                    th { "Category" }
                                    th { "Level" }
                                    th { "Instructor" }
                                    th { "Learners" }
                                    th { "Price" }
                                    th { "Status" }
                                    th {}
                                }
                            }
                            tbody {
                                for row in data.rows {
                                    CourseRow { key: "{row.id}", row, on_action }
                                }
                            }
                        }
                    }
                    div { class: "pagination",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: !data.pagination.has_previous,
                            onclick: move |_| page.set(page().previous()),
                            "Previous"
                        }
                        span { "{data.pagination.label}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: !data.pagination.has_next,
                            onclick: move |_| page.set(page().next()),
                            "Next"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn CourseRow(row: CourseRowVm, on_action: EventHandler<CourseAction>) -> Element {
    let toggle_id = row.id.clone();
    let delete_id = row.id.clone();
    let publish = !row.published;
    let badge = if row.published { "badge badge--ok" } else { "badge" };
    rsx! {
        tr {
            td { "{row.title}" }
            td { "{row.category}" }
            td { "{row.level}" }
            td { "{row.instructor}" }
            td { "{row.enrolled_label}" }
            td { "{row.price_label}" }
            td {
                span { class: badge, "{row.status_label}" }
            }
            td { class: "row-actions",
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_action.call(CourseAction::TogglePublish(toggle_id.clone(), publish)),
                    if publish { "Publish" } else { "Unpublish" }
                }
                button {
                    class: "btn btn-link btn-danger",
                    r#type: "button",
                    onclick: move |_| on_action.call(CourseAction::Delete(delete_id.clone())),
                    "Delete"
                }
            }
        }
    }
}

#[component]
fn NewCourseForm(on_created: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let guard = use_mount_guard();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);

    let courses = ctx.courses();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = match CourseDraft::new(&title(), &description()) {
            Ok(draft) => draft,
            Err(err) => {
                error.set(Some(ServiceError::from(err).into()));
                return;
            }
        };
        error.set(None);
        let courses = courses.clone();
        let guard = guard.clone();
        spawn(async move {
            let result = courses.create(&draft).await;
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(course) => {
                    toaster.success(format!("Created \"{}\"", course.title));
                    title.set(String::new());
                    description.set(String::new());
                    on_created.call(());
                }
                Err(err) => toaster.error(&ViewError::from(err)),
            }
        });
    };

    rsx! {
        form { class: "card inline-form", onsubmit: on_submit,
            input {
                r#type: "text",
                placeholder: "New course title",
                value: "{title}",
                oninput: move |evt| title.set(evt.value()),
            }
            input {
                r#type: "text",
                placeholder: "Short description",
                value: "{description}",
                oninput: move |evt| description.set(evt.value()),
            }
            button { class: "btn btn-primary", r#type: "submit", "Create course" }
            if let Some(err) = error() {
                p { class: "field-error", "{err.message()}" }
            }
        }
    }
}
