use std::sync::Arc;

use log::debug;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::AuthSession;
use crate::config::ApiConfig;
use crate::error::ApiError;

use super::envelope::{decode_envelope, envelope_message};

/// Single point of HTTP communication with the backend.
///
/// Every request carries the bearer token from the injected `AuthSession`. A
/// `401` hands control to `AuthSession::handle_unauthorized`; nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
    auth: Arc<AuthSession>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig, auth: Arc<AuthSession>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config,
            auth,
        })
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<AuthSession> {
        &self.auth
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport, status, or decoding failures.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (builder, token) = self.request(Method::GET, path);
        self.send(builder, token).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport, status, or decoding failures.
    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (builder, token) = self.request(Method::GET, path);
        self.send(builder.query(query), token).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport, status, or decoding failures.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (builder, token) = self.request(Method::POST, path);
        self.send(builder.json(body), token).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport, status, or decoding failures.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (builder, token) = self.request(Method::PUT, path);
        self.send(builder.json(body), token).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport, status, or decoding failures.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (builder, token) = self.request(Method::PATCH, path);
        self.send(builder.json(body), token).await
    }

    /// Delete a resource, discarding any payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or status failures.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let (builder, token) = self.request(Method::DELETE, path);
        let _: Option<serde_json::Value> = self.send(builder, token).await?;
        Ok(())
    }

    /// The builder plus the token it carries, so a `401` can be matched to the
    /// session that sent it.
    fn request(&self, method: Method, path: &str) -> (RequestBuilder, Option<String>) {
        let url = self.config.url(path);
        debug!("{method} {url}");
        let builder = self.client.request(method, url);
        let token = self.auth.token();
        let builder = match &token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        (builder, token)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        token: Option<String>,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            self.auth.handle_unauthorized(token.as_deref()).await;
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            debug!("request failed with {status}");
            return Err(ApiError::Status {
                status,
                message: envelope_message(&body),
            });
        }

        decode_envelope(&body)
    }
}
