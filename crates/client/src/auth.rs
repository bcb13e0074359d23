//! Authentication endpoints and login flows.

use async_trait::async_trait;
use mockall::automock;
use saffron::{
    auth::{
        AuthStore, User,
        validation::{
            FieldErrors, validate_email, validate_otp, validate_password, validate_phone,
            validate_required,
        },
    },
    storage::StateStorage,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{errors::ApiError, http::ApiClient};

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed-in user
    pub user: User,

    /// Bearer token
    pub token: String,
}

/// Customer sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Full name
    pub name: String,

    /// Phone number
    pub phone: String,

    /// Optional email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Authentication endpoints.
#[automock]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Send a one-time code to a customer's phone.
    async fn request_otp(&self, phone: &str) -> Result<(), ApiError>;

    /// Exchange a phone number and one-time code for a customer session.
    async fn verify_otp(&self, phone: &str, otp: &str) -> Result<AuthResponse, ApiError>;

    /// Staff and admin email/password login.
    async fn staff_login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;

    /// Create a customer account.
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn request_otp(&self, phone: &str) -> Result<(), ApiError> {
        self.post_empty("/auth/otp/request", &serde_json::json!({ "phone": phone }))
            .await
    }

    async fn verify_otp(&self, phone: &str, otp: &str) -> Result<AuthResponse, ApiError> {
        self.post(
            "/auth/otp/verify",
            &serde_json::json!({ "phone": phone, "otp": otp }),
        )
        .await
    }

    async fn staff_login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.post(
            "/auth/staff/login",
            &serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.post_empty("/auth/register", registration).await
    }
}

/// Errors that can occur during a login flow.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Inputs failed validation; no request was sent.
    #[error(transparent)]
    Validation(#[from] FieldErrors),

    /// The backend refused the phone/code or email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The backend rejected the attempt or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Drives login attempts against [`AuthApi`] and records the outcome in an [`AuthStore`].
#[derive(Debug)]
pub struct LoginFlow<A> {
    api: A,
}

impl<A: AuthApi> LoginFlow<A> {
    /// Wrap an auth API.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Ask for a one-time code.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Validation`] for a malformed phone number, otherwise any API error.
    pub async fn request_otp(&self, phone: &str) -> Result<String, LoginError> {
        let mut errors = FieldErrors::new();

        let Some(phone) = errors.check("phone", validate_phone(phone)) else {
            return Err(errors.into());
        };

        self.api.request_otp(&phone).await?;

        debug!("otp requested");

        Ok(phone)
    }

    /// Verify a one-time code and sign the customer in.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Validation`] before any request for malformed input and
    /// [`LoginError::InvalidCredentials`] when the backend answers 401. API failures are also
    /// recorded as the store's error; an existing session is kept.
    pub async fn verify_otp<S: StateStorage>(
        &self,
        store: &mut AuthStore<S>,
        phone: &str,
        otp: &str,
    ) -> Result<(), LoginError> {
        let mut errors = FieldErrors::new();
        let phone = errors.check("phone", validate_phone(phone));
        let otp = errors.check("otp", validate_otp(otp));

        let (Some(phone), Some(otp)) = (phone, otp) else {
            return Err(errors.into());
        };

        store.start_attempt();

        let result = self.api.verify_otp(&phone, &otp).await;

        record(store, result)
    }

    /// Staff or admin email/password login.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Validation`] before any request for malformed input and
    /// [`LoginError::InvalidCredentials`] when the backend answers 401. API failures are also
    /// recorded as the store's error; an existing session is kept.
    pub async fn staff_login<S: StateStorage>(
        &self,
        store: &mut AuthStore<S>,
        email: &str,
        password: &str,
    ) -> Result<(), LoginError> {
        let mut errors = FieldErrors::new();
        let email = errors.check("email", validate_email(email));
        let password = errors.check("password", validate_password(password));

        let (Some(email), Some(password)) = (email, password) else {
            return Err(errors.into());
        };

        store.start_attempt();

        let result = self.api.staff_login(&email, password).await;

        record(store, result)
    }

    /// Create a customer account. The customer then signs in with an OTP.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Validation`] before any request for malformed input, otherwise any
    /// API error.
    pub async fn register(&self, registration: &Registration) -> Result<(), LoginError> {
        let mut errors = FieldErrors::new();
        let name = errors.check("name", validate_required("name", &registration.name));
        let phone = errors.check("phone", validate_phone(&registration.phone));
        let email = match registration.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => errors.check("email", validate_email(email)),
            _ => None,
        };

        let (Some(name), Some(phone)) = (name, phone) else {
            return Err(errors.into());
        };

        errors.into_result()?;

        self.api
            .register(&Registration {
                name: name.to_string(),
                phone,
                email,
            })
            .await?;

        Ok(())
    }

    /// Sign out. The session is dropped locally; the backend keeps no session state to revoke.
    pub fn logout<S: StateStorage>(&self, store: &mut AuthStore<S>) {
        store.sign_out();

        info!("signed out");
    }
}

fn record<S: StateStorage>(
    store: &mut AuthStore<S>,
    result: Result<AuthResponse, ApiError>,
) -> Result<(), LoginError> {
    match result {
        Ok(AuthResponse { user, token }) => {
            info!(user = %user.id, role = %user.role, "login succeeded");

            store.sign_in(user, token);

            Ok(())
        }
        Err(ApiError::Unauthorized { .. }) => {
            let error = LoginError::InvalidCredentials;

            warn!("login rejected");

            store.fail(error.to_string());

            Err(error)
        }
        Err(err) => {
            store.fail(err.to_string());

            Err(err.into())
        }
    }
}
