use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sphere_core::model::AuthUser;

use crate::api::ApiClient;
use crate::error::AuthError;

use super::session::AuthSession;

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenGrant {
    token: String,
    user: AuthUser,
}

/// `/auth` endpoints. Successful logins are installed into the `AuthSession`.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<AuthSession> {
        self.client.auth()
    }

    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` for blank input, otherwise API or
    /// storage failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let grant: TokenGrant = self
            .client
            .post("/auth/login", &LoginBody { email, password })
            .await?;
        self.install(grant).await
    }

    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` for blank input, otherwise API or
    /// storage failures.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let grant: TokenGrant = self
            .client
            .post(
                "/auth/register",
                &RegisterBody {
                    name,
                    email,
                    password,
                },
            )
            .await?;
        self.install(grant).await
    }

    /// Fetch the profile behind the current token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` for request failures.
    pub async fn me(&self) -> Result<AuthUser, AuthError> {
        Ok(self.client.get("/auth/me").await?)
    }

    /// # Errors
    ///
    /// Returns `AuthError` if stored credentials cannot be cleared.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session().sign_out().await
    }

    async fn install(&self, grant: TokenGrant) -> Result<AuthUser, AuthError> {
        self.session()
            .sign_in(&grant.token, grant.user.clone())
            .await?;
        Ok(grant.user)
    }
}
