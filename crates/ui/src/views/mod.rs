mod admin;
mod catalog;
mod courses;
mod dashboard;
mod login;
mod roadmaps;
mod state;
mod toast;
mod tutor;
mod widgets;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::{CompaniesView, UsersView};
pub use catalog::{CategoriesView, TagsView};
pub use courses::CoursesView;
pub use dashboard::DashboardView;
pub use login::LoginView;
pub use roadmaps::RoadmapsView;
pub use state::{
    MountGuard, ViewError, ViewState, use_mount_guard, view_state_from_resource,
};
pub use toast::{TOAST_TTL, Toast, ToastHost, ToastKind, Toaster, use_toaster, use_toaster_provider};
pub use tutor::TutorView;
pub use widgets::{EmptyPanel, ErrorPanel, LoadingPanel};
