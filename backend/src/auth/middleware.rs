//! Session cookie handling and the authorization gate
//!
//! Provides the `CurrentUser` extractor used by protected routes. A request
//! without an authenticated session is redirected to the login page with an
//! `error` flash, after making sure the visitor has a session to carry it.

use crate::error::{ApiError, ApiResult};
use crate::repositories::UserRecord;
use crate::sessions::FLASH_ERROR;
use crate::state::AppState;
use anyhow::anyhow;
use axum::{
    extract::FromRef,
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Redirect, Response},
};
use tracing::error;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "portal_session";

/// Raw session token from the request cookie, if any
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(extract_session_token(&parts.headers)))
    }
}

/// Authenticated identity resolved from the request's session
///
/// Extraction fails with a redirect to `/login` when the session is missing,
/// expired, or bound to a user that no longer exists.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: UserRecord,
    pub token: String,
}

/// Pre-built response produced when the gate denies a request
pub struct AuthRedirect(Response);

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        self.0
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let token = extract_session_token(&parts.headers);

        if let Some(token) = token.as_deref() {
            match state.sessions.current(&state.db, token).await {
                Ok(Some(user)) => {
                    return Ok(CurrentUser {
                        user,
                        token: token.to_string(),
                    });
                }
                Ok(None) => {}
                Err(err) => {
                    error!("Failed to resolve session: {:?}", err);
                    return Err(AuthRedirect(ApiError::Internal(err).into_response()));
                }
            }
        }

        // Deny: flash the login prompt, then send the visitor to the entry point
        let response = flash_redirect(
            &state,
            token.as_deref(),
            FLASH_ERROR,
            "Please log in first",
            "/login",
        )
        .await
        .unwrap_or_else(|err| err.into_response());

        Err(AuthRedirect(response))
    }
}

/// Push a flash message onto the visitor's session and redirect.
///
/// Mints an anonymous session (and sets its cookie) when the visitor does
/// not have a live one.
pub async fn flash_redirect(
    state: &AppState,
    token: Option<&str>,
    category: &str,
    text: &str,
    location: &str,
) -> ApiResult<Response> {
    let (token, minted) = state
        .sessions
        .ensure(token)
        .await
        .map_err(ApiError::Internal)?;
    state
        .sessions
        .push_flash(&token, category, text)
        .await
        .map_err(ApiError::Internal)?;

    let mut response = Redirect::to(location).into_response();
    if minted {
        let cookie = session_cookie(&token, &state.config.session)
            .map_err(|e| ApiError::Internal(anyhow!("invalid session cookie: {e}")))?;
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    Ok(response)
}

/// Build the `HttpOnly` cookie carrying the session token.
pub fn session_cookie(
    token: &str,
    config: &crate::config::SessionConfig,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.ttl_secs;
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    // Only mark cookies secure when the portal is served over HTTPS.
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE {
            return Some(val.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;

    #[test]
    fn test_extract_session_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("other=1; portal_session=abc123"),
        );
        assert_eq!(extract_session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_session_token_missing() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("other=1"));
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionConfig {
            ttl_secs: 3600,
            cookie_secure: false,
        };
        let cookie = session_cookie("tok", &config).unwrap();
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with("portal_session=tok"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Max-Age=3600"));
        assert!(!value.contains("Secure"));

        let config = SessionConfig {
            ttl_secs: 3600,
            cookie_secure: true,
        };
        let cookie = session_cookie("tok", &config).unwrap();
        assert!(cookie.to_str().unwrap().contains("Secure"));
    }
}
