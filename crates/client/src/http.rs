//! REST client for the ordering backend.

use reqwest::{Client, RequestBuilder, Response};
use saffron::auth::{AuthSession, Role};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error};

use crate::{
    config::ClientConfig,
    errors::{ApiError, error_for_status},
};

/// HTTP client carrying the current bearer token.
///
/// Every call is a single request: no retries, no de-duplication and no cancellation beyond the
/// configured timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: Client,
    token: Option<String>,
    role: Option<Role>,
}

impl ApiClient {
    /// Create an anonymous client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            config,
            http,
            token: None,
            role: None,
        })
    }

    /// Attach the session's token and role to subsequent requests.
    #[must_use]
    pub fn with_session(mut self, session: &AuthSession) -> Self {
        self.set_session(session);
        self
    }

    /// Replace the credentials used for subsequent requests.
    pub fn set_session(&mut self, session: &AuthSession) {
        self.token = session.token().map(str::to_string);
        self.role = session.role();
    }

    /// Drop credentials.
    pub fn clear_session(&mut self) {
        self.token = None;
        self.role = None;
    }

    /// Connection settings
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures and non-2xx responses.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.http.get(self.config.url(path))).await?;

        Ok(response.json().await?)
    }

    /// `POST path` with a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures and non-2xx responses.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.http.post(self.config.url(path)).json(body))
            .await?;

        Ok(response.json().await?)
    }

    /// `POST path` with a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures and non-2xx responses.
    pub async fn post_empty<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(self.http.post(self.config.url(path)).json(body))
            .await?;

        Ok(())
    }

    /// `PUT path` with a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures and non-2xx responses.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.http.put(self.config.url(path)).json(body))
            .await?;

        Ok(response.json().await?)
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures and non-2xx responses.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.http.delete(self.config.url(path))).await?;

        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.inspect_err(|err| {
            error!("request failed: {err}");
        })?;

        let status = response.status();

        debug!(url = %response.url(), %status, "api response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = error_for_status(status, &body, self.role);

        error!(%status, "api error: {err}");

        Err(err)
    }
}
