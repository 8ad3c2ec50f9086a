use crate::config::ADMIN_USERNAME;
use crate::server::router::LoongesState;
use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use subtle::ConstantTimeEq;

const BASIC_CHALLENGE: &str = r#"Basic realm="Login Required""#;

/// HTTP Basic gate for the message inbox.
///
/// Passes iff the username is [`ADMIN_USERNAME`] and the password matches
/// `admin.password`. Stateless: every request is checked on its own.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<LoongesState> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &LoongesState,
    ) -> Result<Self, Self::Rejection> {
        let Some(Authorization(basic)) = parts.headers.typed_get::<Authorization<Basic>>() else {
            return Err(AuthError::MissingCredentials);
        };

        let user_ok = basic.username().as_bytes().ct_eq(ADMIN_USERNAME.as_bytes());
        let pass_ok = basic
            .password()
            .as_bytes()
            .ct_eq(state.admin_password.as_bytes());

        if (user_ok & pass_ok).into() {
            Ok(RequireAdmin)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingCredentials,
    InvalidCredentials,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let reason = match self {
            AuthError::MissingCredentials => "Missing credentials",
            AuthError::InvalidCredentials => "Invalid credentials",
        };
        (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE))],
            format!(
                "{reason}. Could not verify your access level for that URL; \
                 log in with proper credentials."
            ),
        )
            .into_response()
    }
}
