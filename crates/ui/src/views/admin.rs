use dioxus::prelude::*;
use services::ServiceError;
use sphere_core::model::{
    CompanyDraft, CompanyId, PageRequest, RecruiterDraft, RecruiterId, UserId, UserRole,
};

use crate::context::AppContext;
use crate::views::{
    EmptyPanel, ErrorPanel, LoadingPanel, ViewError, ViewState, use_mount_guard, use_toaster,
    view_state_from_resource,
};
use crate::vm::{
    CompanyRowVm, PaginationVm, RecruiterRowVm, UserRowVm, map_pagination, map_user_rows,
};

//
// ─── USERS ─────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq)]
struct UsersData {
    rows: Vec<UserRowVm>,
    pagination: PaginationVm,
}

#[derive(Clone, Debug, PartialEq)]
enum UserAction {
    SetRole(UserId, UserRole),
    Delete(UserId),
}

#[component]
pub fn UsersView() -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let guard = use_mount_guard();
    let mut page = use_signal(PageRequest::first);
    let mut role_filter = use_signal(|| None::<UserRole>);

    let admin = ctx.admin();
    let session = ctx.session();
    let mut resource = use_resource(move || {
        let admin = admin.clone();
        let current = session.user().map(|user| user.id);
        let request = page();
        let role = role_filter();
        async move {
            let listing = admin.users(request, role).await?;
            Ok::<_, ViewError>(UsersData {
                rows: map_user_rows(&listing.items, current.as_ref()),
                pagination: map_pagination(&listing),
            })
        }
    });
    let state = view_state_from_resource(&resource);

    let admin = ctx.admin();
    let on_action = use_callback(move |action: UserAction| {
        let admin = admin.clone();
        let guard = guard.clone();
        spawn(async move {
            let mut resource = resource;
            let (result, done) = match &action {
                UserAction::SetRole(id, role) => (
                    admin.set_user_role(id, *role).await.map(|_| ()),
                    "Role updated",
                ),
                UserAction::Delete(id) => (admin.delete_user(id).await, "User deleted"),
            };
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(()) => toaster.success(done),
                Err(err) => toaster.error(&ViewError::from(err)),
            }
            // Reload either way so a rejected role change snaps back.
            resource.restart();
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Users" }
            div { class: "toolbar",
                select {
                    onchange: move |evt: FormEvent| {
                        let value = evt.value();
                        page.set(PageRequest::first());
                        role_filter.set((!value.is_empty()).then(|| UserRole::parse_lenient(&value)));
                    },
                    option { value: "", "All roles" }
                    for role in UserRole::ALL {
                        option { key: "{role}", value: "{role}", "{role}" }
                    }
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingPanel { label: "Loading users...".to_string() }
                },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(data) => rsx! {
                    if data.rows.is_empty() {
                        EmptyPanel { message: "No users found.".to_string() }
                    } else {
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Name" }
                                    th { "Email" }
                                    th { "Role" }
                                    th {}
                                }
                            }
                            tbody {
                                for row in data.rows {
                                    UserRow { key: "{row.id}", row, on_action }
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
fn UserRow(row: UserRowVm, on_action: EventHandler<UserAction>) -> Element {
    let role_id = row.id.clone();
    let delete_id = row.id.clone();
    let current = row.role;
    rsx! {
        tr {
            td { "{row.name}" }
            td { "{row.email}" }
            td {
                select {
                    disabled: row.is_self,
                    onchange: move |evt: FormEvent| {
                        let role = UserRole::parse_lenient(&evt.value());
                        if role != current {
                            on_action.call(UserAction::SetRole(role_id.clone(), role));
                        }
                    },
                    for role in UserRole::ALL {
                        option {
                            key: "{role}",
                            value: "{role}",
                            selected: role == current,
                            "{role}"
                        }
                    }
                }
            }
            td { class: "row-actions",
                button {
                    class: "btn btn-link btn-danger",
                    r#type: "button",
                    disabled: row.is_self,
                    onclick: move |_| on_action.call(UserAction::Delete(delete_id.clone())),
                    "Delete"
                }
            }
        }
    }
}

//
// ─── COMPANIES ─────────────────────────────────────────────────────────────────
//

#[component]
pub fn CompaniesView() -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let guard = use_mount_guard();
    let mut expanded = use_signal(|| None::<CompanyId>);

    let admin = ctx.admin();
    let mut resource = use_resource(move || {
        let admin = admin.clone();
        async move {
            let companies = admin.companies().await?;
            Ok::<_, ViewError>(companies.iter().map(CompanyRowVm::from).collect::<Vec<_>>())
        }
    });
    let state = view_state_from_resource(&resource);

    let admin = ctx.admin();
    let on_delete = use_callback(move |id: CompanyId| {
        let admin = admin.clone();
        let guard = guard.clone();
        spawn(async move {
            let mut resource = resource;
            let mut expanded = expanded;
            let result = admin.delete_company(&id).await;
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(()) => {
                    toaster.success("Company deleted");
                    if expanded.read().as_ref() == Some(&id) {
                        expanded.set(None);
                    }
                    resource.restart();
                }
                Err(err) => toaster.error(&ViewError::from(err)),
            }
        });
    });
    let on_toggle = use_callback(move |id: CompanyId| {
        let next = if expanded.read().as_ref() == Some(&id) {
            None
        } else {
            Some(id)
        };
        expanded.set(next);
    });

    rsx! {
        div { class: "page",
            h2 { "Companies" }
            NewCompanyForm { on_created: move |()| resource.restart() }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingPanel { label: "Loading companies...".to_string() }
                },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        EmptyPanel { message: "No partner companies yet.".to_string() }
                    } else {
                        ul { class: "list",
                            for row in rows {
                                CompanyItem {
                                    key: "{row.id}",
                                    open: expanded.read().as_ref() == Some(&row.id),
                                    row,
                                    on_toggle,
                                    on_delete,
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
fn CompanyItem(
    row: CompanyRowVm,
    open: bool,
    on_toggle: EventHandler<CompanyId>,
    on_delete: EventHandler<CompanyId>,
) -> Element {
    let toggle_id = row.id.clone();
    let delete_id = row.id.clone();
    rsx! {
        li { class: "list-item list-item--stacked",
            div { class: "list-item__head",
                div {
                    strong { "{row.name}" }
                    span { class: "muted", " · {row.industry} · {row.recruiters_label}" }
                    if let Some(website) = row.website.clone() {
                        p { class: "muted", "{website}" }
                    }
                }
                div { class: "row-actions",
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| on_toggle.call(toggle_id.clone()),
                        if open { "Hide recruiters" } else { "Recruiters" }
                    }
                    button {
                        class: "btn btn-link btn-danger",
                        r#type: "button",
                        onclick: move |_| on_delete.call(delete_id.clone()),
                        "Delete"
                    }
                }
            }
            if open {
                RecruiterPanel { key: "{row.id}", company: row.id.clone() }
            }
        }
    }
}

#[component]
fn NewCompanyForm(on_created: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let guard = use_mount_guard();
    let mut name = use_signal(String::new);
    let mut industry = use_signal(String::new);
    let mut website = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);

    let admin = ctx.admin();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = match CompanyDraft::new(&name(), &industry(), &website(), "") {
            Ok(draft) => draft,
            Err(err) => {
                error.set(Some(ServiceError::from(err).into()));
                return;
            }
        };
        error.set(None);
        let admin = admin.clone();
        let guard = guard.clone();
        spawn(async move {
            let result = admin.create_company(&draft).await;
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(company) => {
                    toaster.success(format!("Added {}", company.name));
                    name.set(String::new());
                    industry.set(String::new());
                    website.set(String::new());
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
                placeholder: "Company name",
                value: "{name}",
                oninput: move |evt| name.set(evt.value()),
            }
            input {
                r#type: "text",
                placeholder: "Industry",
                value: "{industry}",
                oninput: move |evt| industry.set(evt.value()),
            }
            input {
                r#type: "url",
                placeholder: "https://",
                value: "{website}",
                oninput: move |evt| website.set(evt.value()),
            }
            button { class: "btn btn-primary", r#type: "submit", "Add company" }
            if let Some(err) = error() {
                p { class: "field-error", "{err.message()}" }
            }
        }
    }
}

/// Recruiters of one company. Keyed by company so switching remounts it.
#[component]
fn RecruiterPanel(company: CompanyId) -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let guard = use_mount_guard();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);

    let admin = ctx.admin();
    let company_id = company.clone();
    let mut resource = use_resource(move || {
        let admin = admin.clone();
        let company_id = company_id.clone();
        async move {
            let recruiters = admin.recruiters(&company_id).await?;
            Ok::<_, ViewError>(
                recruiters
                    .iter()
                    .map(RecruiterRowVm::from)
                    .collect::<Vec<_>>(),
            )
        }
    });
    let state = view_state_from_resource(&resource);

    let admin = ctx.admin();
    let add_guard = guard.clone();
    let on_add = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = match RecruiterDraft::new(&name(), &email()) {
            Ok(draft) => draft,
            Err(err) => {
                error.set(Some(ServiceError::from(err).into()));
                return;
            }
        };
        error.set(None);
        let admin = admin.clone();
        let guard = add_guard.clone();
        let company = company.clone();
        spawn(async move {
            let mut resource = resource;
            let result = admin.add_recruiter(&company, &draft).await;
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(recruiter) => {
                    toaster.success(format!("Added recruiter {}", recruiter.name));
                    name.set(String::new());
                    email.set(String::new());
                    resource.restart();
                }
                Err(err) => toaster.error(&ViewError::from(err)),
            }
        });
    };

    let admin = ctx.admin();
    let on_remove = use_callback(move |id: RecruiterId| {
        let admin = admin.clone();
        let guard = guard.clone();
        spawn(async move {
            let mut resource = resource;
            let result = admin.remove_recruiter(&id).await;
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(()) => {
                    toaster.success("Recruiter removed");
                    resource.restart();
                }
                Err(err) => toaster.error(&ViewError::from(err)),
            }
        });
    });

    rsx! {
        div { class: "recruiters",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingPanel { label: "Loading recruiters...".to_string() }
                },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        EmptyPanel { message: "No recruiters yet.".to_string() }
                    } else {
                        ul { class: "list list--compact",
                            for row in rows {
                                li { key: "{row.id}", class: "list-item",
                                    span { "{row.name} · {row.email}" }
                                    button {
                                        class: "btn btn-link btn-danger",
                                        r#type: "button",
                                        onclick: {
                                            let id = row.id.clone();
                                            move |_| on_remove.call(id.clone())
                                        },
                                        "Remove"
                                    }
                                }
                            }
                        }
                    }
                },
            }
            form { class: "inline-form", onsubmit: on_add,
                input {
                    r#type: "text",
                    placeholder: "Recruiter name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                button { class: "btn btn-secondary", r#type: "submit", "Add recruiter" }
                if let Some(err) = error() {
                    p { class: "field-error", "{err.message()}" }
                }
            }
        }
    }
}
