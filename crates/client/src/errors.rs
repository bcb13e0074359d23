//! API errors.

use reqwest::StatusCode;
use saffron::{auth::Role, routes::Route, routes::sign_in_route_for};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the bearer token; the caller should be sent to `sign_in`.
    #[error("session expired, sign in again at {sign_in}")]
    Unauthorized {
        /// Login page for the caller's audience
        sign_in: Route,
    },

    /// The caller is signed in but not allowed to do this.
    #[error("you do not have permission to do that")]
    Forbidden,

    /// The resource does not exist.
    #[error("not found")]
    NotFound,

    /// Any other non-2xx response.
    #[error("unexpected response ({status}): {message}")]
    UnexpectedResponse {
        /// HTTP status
        status: u16,

        /// Backend `message`, or the raw body when there is none
        message: String,
    },
}

impl ApiError {
    /// Where the caller should be redirected, if anywhere.
    #[must_use]
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Self::Unauthorized { sign_in } => Some(sign_in.clone()),
            Self::Forbidden => Some(Route::Unauthorized),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a non-success response onto an [`ApiError`].
///
/// A 401 sends customers and anonymous callers to the customer sign-in page and back-office
/// callers to the staff login page.
#[must_use]
pub fn error_for_status(status: StatusCode, body: &str, role: Option<Role>) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized {
            sign_in: sign_in_route_for(role),
        },
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        _ => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .map_or_else(|_err| body.trim().to_string(), |parsed| parsed.message);

            ApiError::UnexpectedResponse {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_target_follows_role() {
        let customer = error_for_status(StatusCode::UNAUTHORIZED, "", Some(Role::Customer));
        let staff = error_for_status(StatusCode::UNAUTHORIZED, "", Some(Role::Staff));
        let anonymous = error_for_status(StatusCode::UNAUTHORIZED, "", None);

        assert_eq!(customer.redirect(), Some(Route::SignIn));
        assert_eq!(staff.redirect(), Some(Route::StaffLogin));
        assert_eq!(anonymous.redirect(), Some(Route::SignIn));
    }

    #[test]
    fn forbidden_redirects_to_unauthorized_page() {
        let error = error_for_status(StatusCode::FORBIDDEN, "", Some(Role::Staff));

        assert!(
            matches!(error, ApiError::Forbidden),
            "expected Forbidden, got {error:?}"
        );
        assert_eq!(error.redirect(), Some(Route::Unauthorized));
    }

    #[test]
    fn backend_message_is_extracted() {
        let error = error_for_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message": "Item is sold out"}"#,
            None,
        );

        assert!(
            matches!(
                &error,
                ApiError::UnexpectedResponse { status: 422, message } if message == "Item is sold out"
            ),
            "expected UnexpectedResponse, got {error:?}"
        );
        assert_eq!(error.redirect(), None);
    }

    #[test]
    fn raw_body_is_kept_without_message() {
        let error = error_for_status(StatusCode::BAD_GATEWAY, "upstream down\n", None);

        assert!(
            matches!(
                &error,
                ApiError::UnexpectedResponse { status: 502, message } if message == "upstream down"
            ),
            "expected UnexpectedResponse, got {error:?}"
        );
    }
}
