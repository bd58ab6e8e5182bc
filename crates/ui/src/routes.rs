use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use services::AuthStatus;

use crate::context::AppContext;
use crate::views::{
    CategoriesView, CompaniesView, CoursesView, DashboardView, LoginView, RoadmapsView, TagsView,
    TutorView, UsersView, ViewError, use_toaster,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login", LoginView)] Login {},
    #[layout(AuthGate)]
        #[layout(Layout)]
            #[route("/", DashboardView)] Dashboard {},
            #[route("/roadmaps", RoadmapsView)] Roadmaps {},
            #[route("/tutor", TutorView)] Tutor {},
            #[route("/courses", CoursesView)] Courses {},
            #[route("/categories", CategoriesView)] Categories {},
            #[route("/tags", TagsView)] Tags {},
            #[route("/admin/users", UsersView)] Users {},
            #[route("/admin/companies", CompaniesView)] Companies {},
}

/// Renders its children only while signed in; any other status sends the
/// user to the login page.
#[component]
fn AuthGate() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let toaster = use_toaster();
    let session = ctx.session();
    let mut status = use_signal(|| session.status());

    use_hook(move || {
        session.set_public_route(false);
        let mut changes = session.subscribe();
        spawn(async move {
            while changes.changed().await.is_ok() {
                let next = changes.borrow_and_update().clone();
                status.set(next);
            }
        });
    });

    use_effect(move || {
        let current = status.read().clone();
        match current {
            AuthStatus::SignedIn(_) => {}
            AuthStatus::Expired => {
                toaster.error(&ViewError::SessionExpired);
                let _ = navigator.replace(Route::Login {});
            }
            AuthStatus::SignedOut => {
                let _ = navigator.replace(Route::Login {});
            }
        }
    });

    if !status.read().is_signed_in() {
        return rsx! {};
    }
    rsx! {
        Outlet::<Route> {}
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let user = ctx.session().user();
    let role = user.as_ref().map(|user| user.role).unwrap_or_default();
    let name = user
        .as_ref()
        .map(|user| user.display_name().to_string())
        .unwrap_or_default();

    let auth = ctx.auth();
    let on_sign_out = move |_| {
        let auth = auth.clone();
        spawn(async move {
            if let Err(err) = auth.logout().await {
                toaster.error(&ViewError::from(err));
            }
        });
    };

    rsx! {
        nav { class: "sidebar",
            h1 { "LearnSphere" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Roadmaps {}, "Roadmaps" } }
                li { Link { to: Route::Tutor {}, "AI Tutor" } }
                if role.can_manage_catalog() {
                    li { class: "sidebar-section", "Catalog" }
                    li { Link { to: Route::Courses {}, "Courses" } }
                    li { Link { to: Route::Categories {}, "Categories" } }
                    li { Link { to: Route::Tags {}, "Tags" } }
                }
                if role.is_admin() {
                    li { class: "sidebar-section", "Admin" }
                    li { Link { to: Route::Users {}, "Users" } }
                    li { Link { to: Route::Companies {}, "Companies" } }
                }
            }
            div { class: "sidebar-footer",
                span { class: "sidebar-user", "{name}" }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: on_sign_out,
                    "Sign out"
                }
            }
        }
    }
}
