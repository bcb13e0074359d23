//! Auth Session

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ids::TypedId;

/// User id
pub type UserId = TypedId<User>;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Signs in with phone + OTP and places orders.
    Customer,

    /// Back-office staff.
    Staff,

    /// Back-office administrator.
    Admin,
}

impl Role {
    /// Whether this role works in the back office.
    #[must_use]
    pub const fn is_back_office(self) -> bool {
        matches!(self, Self::Staff | Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Customer => "CUSTOMER",
            Self::Staff => "STAFF",
            Self::Admin => "ADMIN",
        })
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Account role
    pub role: Role,

    /// Email address (staff and admins)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number (customers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Persisted session: who is signed in and with which bearer token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    user: Option<User>,
    token: Option<String>,
}

impl AuthSession {
    /// A signed-in session.
    #[must_use]
    pub fn new(user: User, token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
        }
    }

    /// Signed-in user
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Bearer token
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Role of the signed-in user
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    /// True iff both a user and a token are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

/// Session plus the transient state of an in-flight login attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    session: AuthSession,
    error: Option<String>,
    loading: bool,
}

impl AuthState {
    /// Wrap a rehydrated session.
    #[must_use]
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    /// Begin a login attempt: clears the previous error.
    pub fn start_attempt(&mut self) {
        self.error = None;
        self.loading = true;
    }

    /// Record a successful login.
    pub fn sign_in(&mut self, user: User, token: impl Into<String>) {
        debug!(user = %user.id, role = %user.role, "signed in");

        self.session = AuthSession::new(user, token);
        self.error = None;
        self.loading = false;
    }

    /// Record a failed login. The existing session, if any, is kept.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Drop the session.
    pub fn sign_out(&mut self) {
        self.session = AuthSession::default();
        self.error = None;
        self.loading = false;
    }

    /// Dismiss the current error (e.g. when the login form unmounts).
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Current session
    #[must_use]
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Last login error
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a login attempt is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
