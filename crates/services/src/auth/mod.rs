mod service;
mod session;

pub use service::AuthService;
pub use session::{AuthSession, AuthStatus};
