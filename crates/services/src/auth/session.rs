use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};

use log::{debug, error, info, warn};
use sphere_core::Clock;
use sphere_core::model::AuthUser;
use storage::repository::{CredentialStore, StoredCredentials};
use tokio::sync::watch;

use crate::error::AuthError;

/// Observable sign-in state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    SignedOut,
    SignedIn(AuthUser),
    /// The server rejected the token; the client must route to login.
    Expired,
}

impl AuthStatus {
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthStatus::SignedIn(_))
    }

    #[must_use]
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            AuthStatus::SignedIn(user) => Some(user),
            AuthStatus::SignedOut | AuthStatus::Expired => None,
        }
    }
}

/// Explicit auth context shared by the HTTP client and the UI.
///
/// Holds the bearer token in memory, mirrors it to a `CredentialStore`, and owns
/// the single teardown path taken when the server answers `401`.
pub struct AuthSession {
    clock: Clock,
    store: Arc<dyn CredentialStore>,
    current: RwLock<Option<StoredCredentials>>,
    // Armed while a live session exists; swapped off by the first teardown.
    teardown_armed: AtomicBool,
    on_public_route: AtomicBool,
    status: watch::Sender<AuthStatus>,
}

impl AuthSession {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn CredentialStore>) -> Self {
        let (status, _) = watch::channel(AuthStatus::SignedOut);
        Self {
            clock,
            store,
            current: RwLock::new(None),
            teardown_armed: AtomicBool::new(false),
            on_public_route: AtomicBool::new(false),
            status,
        }
    }

    /// Load a previously saved session from storage.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if storage cannot be read.
    pub async fn restore(&self) -> Result<Option<AuthUser>, AuthError> {
        let Some(credentials) = self.store.load_credentials().await? else {
            return Ok(None);
        };
        let user = credentials.user();
        self.install(credentials)?;
        info!("restored session for {}", user.email);
        Ok(Some(user))
    }

    /// Persist and activate a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if storage cannot be written.
    pub async fn sign_in(&self, token: &str, user: AuthUser) -> Result<(), AuthError> {
        let credentials = StoredCredentials::new(token, &user, self.clock.now());
        self.store.save_credentials(&credentials).await?;
        self.install(credentials)?;
        info!("signed in as {}", user.email);
        Ok(())
    }

    /// Explicit user-initiated sign out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if storage cannot be cleared.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.teardown_armed.store(false, Ordering::Release);
        self.clear_memory()?;
        self.status.send_replace(AuthStatus::SignedOut);
        self.store.clear_credentials().await?;
        info!("signed out");
        Ok(())
    }

    /// Tear the session down after a `401` for a request sent with `sent_token`.
    ///
    /// Returns `true` only for the call that performed the teardown. Later calls,
    /// calls made while a public route is showing, and rejections of a token that
    /// is no longer current are no-ops.
    pub async fn handle_unauthorized(&self, sent_token: Option<&str>) -> bool {
        if self.on_public_route.load(Ordering::Acquire) {
            return false;
        }
        if self.token().as_deref() != sent_token {
            debug!("ignoring 401 for a token that is no longer current");
            return false;
        }
        if !self.teardown_armed.swap(false, Ordering::AcqRel) {
            return false;
        }

        warn!("server rejected the session token; signing out");
        if self.clear_memory().is_err() {
            error!("auth state lock poisoned during teardown");
        }
        self.status.send_replace(AuthStatus::Expired);
        if let Err(err) = self.store.clear_credentials().await {
            error!("failed to clear persisted credentials: {err}");
        }
        true
    }

    /// The UI reports whether the visible route is a public auth page.
    pub fn set_public_route(&self, public: bool) {
        self.on_public_route.store(public, Ordering::Release);
    }

    #[must_use]
    pub fn is_public_route(&self) -> bool {
        self.on_public_route.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|creds| creds.token.clone()))
    }

    #[must_use]
    pub fn user(&self) -> Option<AuthUser> {
        self.current
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(StoredCredentials::user))
    }

    #[must_use]
    pub fn status(&self) -> AuthStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    fn install(&self, credentials: StoredCredentials) -> Result<(), AuthError> {
        let user = credentials.user();
        {
            let mut guard = self.current.write().map_err(|_| AuthError::Poisoned)?;
            *guard = Some(credentials);
        }
        self.teardown_armed.store(true, Ordering::Release);
        self.status.send_replace(AuthStatus::SignedIn(user));
        Ok(())
    }

    fn clear_memory(&self) -> Result<(), AuthError> {
        let mut guard = self.current.write().map_err(|_| AuthError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sphere_core::model::{UserId, UserRole};
    use sphere_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryCredentialStore;

    fn user() -> AuthUser {
        AuthUser {
            id: UserId::new("u1"),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: UserRole::Student,
        }
    }

    #[tokio::test]
    async fn sign_in_persists_and_exposes_token() {
        let store = InMemoryCredentialStore::new();
        let session = AuthSession::new(fixed_clock(), Arc::new(store.clone()));
        session.sign_in("jwt", user()).await.unwrap();

        assert_eq!(session.token().as_deref(), Some("jwt"));
        assert!(session.status().is_signed_in());
        let saved = store.load_credentials().await.unwrap().unwrap();
        assert_eq!(saved.saved_at, fixed_now());
    }

    #[tokio::test]
    async fn restore_reads_saved_session() {
        let store = InMemoryCredentialStore::with_credentials(StoredCredentials::new(
            "saved",
            &user(),
            fixed_now(),
        ));
        let session = AuthSession::new(fixed_clock(), Arc::new(store));
        let restored = session.restore().await.unwrap();
        assert_eq!(restored, Some(user()));
        assert_eq!(session.token().as_deref(), Some("saved"));
    }

    #[tokio::test]
    async fn unauthorized_tears_down_exactly_once() {
        let store = InMemoryCredentialStore::new();
        let session = AuthSession::new(fixed_clock(), Arc::new(store.clone()));
        session.sign_in("jwt", user()).await.unwrap();
        let mut rx = session.subscribe();

        assert!(session.handle_unauthorized(Some("jwt")).await);
        assert!(!session.handle_unauthorized(Some("jwt")).await);

        assert!(session.token().is_none());
        assert!(store.load_credentials().await.unwrap().is_none());
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), AuthStatus::Expired);
    }

    #[tokio::test]
    async fn unauthorized_on_public_route_keeps_session() {
        let session = AuthSession::new(fixed_clock(), Arc::new(InMemoryCredentialStore::new()));
        session.sign_in("jwt", user()).await.unwrap();
        session.set_public_route(true);

        assert!(!session.handle_unauthorized(Some("jwt")).await);
        assert_eq!(session.token().as_deref(), Some("jwt"));

        session.set_public_route(false);
        assert!(session.handle_unauthorized(Some("jwt")).await);
    }

    #[tokio::test]
    async fn sign_in_rearms_teardown() {
        let session = AuthSession::new(fixed_clock(), Arc::new(InMemoryCredentialStore::new()));
        session.sign_in("a", user()).await.unwrap();
        assert!(session.handle_unauthorized(Some("a")).await);
        session.sign_in("b", user()).await.unwrap();
        assert!(session.handle_unauthorized(Some("b")).await);
    }

    #[tokio::test]
    async fn rejected_old_token_leaves_new_session() {
        let store = InMemoryCredentialStore::new();
        let session = AuthSession::new(fixed_clock(), Arc::new(store.clone()));
        session.sign_in("old", user()).await.unwrap();
        assert!(session.handle_unauthorized(Some("old")).await);
        session.sign_in("fresh", user()).await.unwrap();

        assert!(!session.handle_unauthorized(Some("old")).await);
        assert!(!session.handle_unauthorized(None).await);

        assert_eq!(session.token().as_deref(), Some("fresh"));
        assert!(session.status().is_signed_in());
        assert!(store.load_credentials().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn sign_out_disarms_teardown() {
        let session = AuthSession::new(fixed_clock(), Arc::new(InMemoryCredentialStore::new()));
        session.sign_in("a", user()).await.unwrap();
        session.sign_out().await.unwrap();
        assert_eq!(session.status(), AuthStatus::SignedOut);
        assert!(!session.handle_unauthorized(None).await);
    }
}
