//! Basic authentication extractors.
//!
//! Every request carries its own credentials; there are no sessions. The
//! extractors verify the `Authorization` header against the user store and
//! hand the handler a [`CurrentUser`].

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose};

use crate::db::PgUserStore;
use crate::error::set_sentry_user;
use crate::models::CurrentUser;
use crate::services::access::{AccessService, DEFAULT_ROLE, Sha256Hasher};
use crate::state::AppState;

/// Extractor that requires valid Basic credentials.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

/// Extractor that additionally requires a non-default role.
///
/// Any role other than the default "user" counts as administrative, which
/// matches how the console client gates its management commands.
pub struct RequireAdmin(pub CurrentUser);

/// Error returned when authentication fails.
pub enum AuthRejection {
    /// No usable `Authorization` header was sent.
    MissingCredentials,
    /// The supplied credentials do not authenticate.
    InvalidCredentials,
    /// The authenticated user lacks the required role.
    Forbidden,
    /// Credential verification failed on the server side.
    ServiceFailure,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let challenge = [(header::WWW_AUTHENTICATE, "Basic realm=\"stockroom\"")];
        match self {
            Self::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, challenge, "Authentication required").into_response()
            }
            Self::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, challenge, "Invalid credentials").into_response()
            }
            Self::Forbidden => {
                (StatusCode::FORBIDDEN, "Insufficient role for this resource").into_response()
            }
            Self::ServiceFailure => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthRejection::MissingCredentials)?;
        let (username, password) =
            decode_basic(header).ok_or(AuthRejection::MissingCredentials)?;

        let access = AccessService::new(PgUserStore::new(state.pool().clone()), Sha256Hasher);
        let authenticated = access
            .check_user_credentials(&username, &password)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Credential check failed");
                AuthRejection::ServiceFailure
            })?;
        if !authenticated {
            return Err(AuthRejection::InvalidCredentials);
        }

        let role = access.user_role(&username).await.map_err(|e| {
            tracing::error!(error = %e, "Role lookup failed");
            AuthRejection::ServiceFailure
        })?;

        set_sentry_user(&username);
        Ok(Self(CurrentUser { username, role }))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(user) = RequireUser::from_request_parts(parts, state).await?;
        if user.role == DEFAULT_ROLE {
            return Err(AuthRejection::Forbidden);
        }
        Ok(Self(user))
    }
}

/// Decode a `Basic <base64>` header value into a username/password pair.
///
/// The password may contain colons; only the first colon separates the two
/// parts.
pub(crate) fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, password) = text.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(credentials: &str) -> String {
        format!("Basic {}", general_purpose::STANDARD.encode(credentials))
    }

    #[test]
    fn decodes_a_valid_header() {
        assert_eq!(
            decode_basic(&basic("alice:secret")),
            Some(("alice".to_owned(), "secret".to_owned()))
        );
    }

    #[test]
    fn splits_on_the_first_colon_only() {
        assert_eq!(
            decode_basic(&basic("alice:sec:ret")),
            Some(("alice".to_owned(), "sec:ret".to_owned()))
        );
    }

    #[test]
    fn allows_an_empty_password() {
        assert_eq!(
            decode_basic(&basic("alice:")),
            Some(("alice".to_owned(), String::new()))
        );
    }

    #[test]
    fn rejects_malformed_headers() {
        assert_eq!(decode_basic("Bearer abc"), None);
        assert_eq!(decode_basic("Basic !!!not-base64!!!"), None);
        assert_eq!(decode_basic(&basic("no-colon-here")), None);
    }
}
