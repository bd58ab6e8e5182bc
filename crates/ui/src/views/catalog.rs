use dioxus::prelude::*;
use services::ServiceError;
use sphere_core::model::{Category, CategoryDraft, CategoryId, Tag, TagDraft, TagId};

use crate::context::AppContext;
use crate::views::{
    EmptyPanel, ErrorPanel, LoadingPanel, ViewError, ViewState, use_mount_guard, use_toaster,
    view_state_from_resource,
};

//
// ─── CATEGORIES ────────────────────────────────────────────────────────────────
//

#[component]
pub fn CategoriesView() -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let guard = use_mount_guard();
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);

    let catalog = ctx.catalog();
    let mut resource = use_resource(move || {
        let catalog = catalog.clone();
        async move { Ok::<_, ViewError>(catalog.categories().await?) }
    });
    let state = view_state_from_resource(&resource);

    let catalog = ctx.catalog();
    let create_guard = guard.clone();
    let on_create = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = match CategoryDraft::new(&name(), &description()) {
            Ok(draft) => draft,
            Err(err) => {
                error.set(Some(ServiceError::from(err).into()));
                return;
            }
        };
        error.set(None);
        let catalog = catalog.clone();
        let guard = create_guard.clone();
        spawn(async move {
            let mut resource = resource;
            let result = catalog.create_category(&draft).await;
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(category) => {
                    toaster.success(format!("Added category \"{}\"", category.name));
                    name.set(String::new());
                    description.set(String::new());
                    resource.restart();
                }
                Err(err) => toaster.error(&ViewError::from(err)),
            }
        });
    };

    let catalog = ctx.catalog();
    let on_delete = use_callback(move |id: CategoryId| {
        let catalog = catalog.clone();
        let guard = guard.clone();
        spawn(async move {
            let mut resource = resource;
            let result = catalog.delete_category(&id).await;
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(()) => {
                    toaster.success("Category deleted");
                    resource.restart();
                }
                Err(err) => toaster.error(&ViewError::from(err)),
            }
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Categories" }
            form { class: "card inline-form", onsubmit: on_create,
                input {
                    r#type: "text",
                    placeholder: "Category name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                input {
                    r#type: "text",
                    placeholder: "Description",
                    value: "{description}",
                    oninput: move |evt| description.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Add" }
                if let Some(err) = error() {
                    p { class: "field-error", "{err.message()}" }
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingPanel { label: "Loading categories...".to_string() }
                },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(items) => rsx! {
                    if items.is_empty() {
                        EmptyPanel { message: "No categories yet.".to_string() }
                    } else {
                        ul { class: "list",
                            for item in items {
                                CategoryItem { key: "{item.id}", item, on_delete }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn CategoryItem(item: Category, on_delete: EventHandler<CategoryId>) -> Element {
    let id = item.id.clone();
    rsx! {
        li { class: "list-item",
            div {
                strong { "{item.name}" }
                if !item.description.is_empty() {
                    p { class: "muted", "{item.description}" }
                }
            }
            button {
                class: "btn btn-link btn-danger",
                r#type: "button",
                onclick: move |_| on_delete.call(id.clone()),
                "Delete"
            }
        }
    }
}

//
// ─── TAGS ──────────────────────────────────────────────────────────────────────
//

#[component]
pub fn TagsView() -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let guard = use_mount_guard();
    let mut name = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);

    let catalog = ctx.catalog();
    let mut resource = use_resource(move || {
        let catalog = catalog.clone();
        async move { Ok::<_, ViewError>(catalog.tags().await?) }
    });
    let state = view_state_from_resource(&resource);

    let catalog = ctx.catalog();
    let create_guard = guard.clone();
    let on_create = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = match TagDraft::new(&name()) {
            Ok(draft) => draft,
            Err(err) => {
                error.set(Some(ServiceError::from(err).into()));
                return;
            }
        };
        error.set(None);
        let catalog = catalog.clone();
        let guard = create_guard.clone();
        spawn(async move {
            let mut resource = resource;
            let result = catalog.create_tag(&draft).await;
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(tag) => {
                    toaster.success(format!("Added tag \"{}\"", tag.name));
                    name.set(String::new());
                    resource.restart();
                }
                Err(err) => toaster.error(&ViewError::from(err)),
            }
        });
    };

    let catalog = ctx.catalog();
    let on_delete = use_callback(move |id: TagId| {
        let catalog = catalog.clone();
        let guard = guard.clone();
        spawn(async move {
            let mut resource = resource;
            let result = catalog.delete_tag(&id).await;
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(()) => {
                    toaster.success("Tag deleted");
                    resource.restart();
                }
                Err(err) => toaster.error(&ViewError::from(err)),
            }
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Tags" }
            form { class: "card inline-form", onsubmit: on_create,
                input {
                    r#type: "text",
                    placeholder: "Tag name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Add" }
                if let Some(err) = error() {
                    p { class: "field-error", "{err.message()}" }
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingPanel { label: "Loading tags...".to_string() }
                },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(items) => rsx! {
                    if items.is_empty() {
                        EmptyPanel { message: "No tags yet.".to_string() }
                    } else {
                        ul { class: "chip-list",
                            for item in items {
                                TagChip { key: "{item.id}", item, on_delete }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn TagChip(item: Tag, on_delete: EventHandler<TagId>) -> Element {
    let id = item.id.clone();
    rsx! {
        li { class: "chip",
            span { "{item.name}" }
            button {
                class: "chip-remove",
                r#type: "button",
                aria_label: "Remove tag",
                onclick: move |_| on_delete.call(id.clone()),
                "×"
            }
        }
    }
}
