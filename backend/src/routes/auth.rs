//! Authentication routes
//!
//! Registration, login, and logout handlers plus the pages that serve them.
//!
//! Failure results stay deliberately uniform: an unknown email and a wrong
//! password produce the same redirect and flash, and registration failures
//! re-render the form without ever echoing a password.

use crate::auth::{flash_redirect, session_cookie, SessionToken};
use crate::error::{ApiError, ApiResult, AuthError, RegisterError};
use crate::routes::{render_flash, views};
use crate::services::UserService;
use crate::sessions::{FLASH_ERROR, FLASH_SUCCESS_MSG};
use crate::state::AppState;
use anyhow::anyhow;
use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use member_portal_shared::types::{LoginForm, RegisterForm};
use secrecy::ExposeSecret;
use tracing::{error, info};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

/// GET /register
async fn register_page(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> ApiResult<Html<String>> {
    let flash = render_flash(&state, token.as_deref()).await?;
    Ok(views::register_page(&[], "", "", &flash))
}

/// GET /login
async fn login_page(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> ApiResult<Html<String>> {
    let flash = render_flash(&state, token.as_deref()).await?;
    Ok(views::login_page(&flash))
}

/// POST /register
///
/// On success the visitor is sent to the login page with a success flash.
/// Failures re-render the form with the error list and the submitted name
/// and email preserved.
async fn register(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Form(form): Form<RegisterForm>,
) -> ApiResult<Response> {
    match UserService::register(&state.db, &form).await {
        Ok(user) => {
            info!(email = %user.email, "user registered");
            flash_redirect(
                &state,
                token.as_deref(),
                FLASH_SUCCESS_MSG,
                "You are now registered and can log in",
                "/login",
            )
            .await
        }
        Err(RegisterError::Invalid(errors)) => {
            Ok(views::register_page(&errors, &form.name, &form.email, &[]).into_response())
        }
        Err(RegisterError::EmailTaken) => Ok(views::register_page(
            &["Email already registered".to_string()],
            &form.name,
            &form.email,
            &[],
        )
        .into_response()),
        Err(RegisterError::Store(err)) => {
            error!("Registration failed: {:?}", err);
            Ok(views::register_page(
                &["Server error".to_string()],
                &form.name,
                &form.email,
                &[],
            )
            .into_response())
        }
    }
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Form(form): Form<LoginForm>,
) -> ApiResult<Response> {
    match state
        .auth
        .authenticate(&state.db, &form.email, form.password.expose_secret())
        .await
    {
        Ok(user) => {
            let session_token = state
                .sessions
                .establish(token.as_deref(), user.id)
                .await
                .map_err(ApiError::Internal)?;
            let cookie = session_cookie(&session_token, &state.config.session)
                .map_err(|e| ApiError::Internal(anyhow!("invalid session cookie: {e}")))?;

            let mut response = Redirect::to("/dashboard").into_response();
            response.headers_mut().insert(SET_COOKIE, cookie);
            Ok(response)
        }
        Err(AuthError::InvalidCredentials) => {
            flash_redirect(
                &state,
                token.as_deref(),
                FLASH_ERROR,
                "Invalid email or password",
                "/login",
            )
            .await
        }
        Err(AuthError::Store(err)) => Err(ApiError::Internal(err)),
    }
}

/// GET /logout
///
/// Terminates the session (failures become a generic 500, never a crash)
/// and confirms on the login page via a fresh anonymous session.
async fn logout(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> ApiResult<Response> {
    if let Some(token) = token.as_deref() {
        state
            .sessions
            .terminate(token)
            .await
            .map_err(ApiError::Internal)?;
    }
    flash_redirect(&state, None, FLASH_SUCCESS_MSG, "You are logged out", "/login").await
}
