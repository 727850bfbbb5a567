//! Route definitions for the Member Portal
//!
//! This module organizes all routes and applies middleware.

use crate::error::{ApiError, ApiResult};
use crate::sessions::{FLASH_ERROR, FLASH_ERROR_MSG, FLASH_SUCCESS_MSG};
use crate::state::AppState;
use axum::{response::Redirect, routing::get, Router};
use member_portal_shared::types::FlashMessage;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod dashboard;
mod health;
pub(crate) mod views;

#[cfg(test)]
mod auth_tests;

pub use auth::auth_routes;
pub use dashboard::dashboard_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .merge(auth::auth_routes())
        .merge(dashboard::dashboard_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The landing URL forwards straight to the login page
async fn home() -> Redirect {
    Redirect::to("/login")
}

/// Drain every pending flash message for the page being rendered.
///
/// Each drain is read-once, so reloading the page shows nothing.
pub(crate) async fn render_flash(
    state: &AppState,
    token: Option<&str>,
) -> ApiResult<Vec<FlashMessage>> {
    let Some(token) = token else {
        return Ok(Vec::new());
    };
    let mut flash = Vec::new();
    for category in [FLASH_SUCCESS_MSG, FLASH_ERROR_MSG, FLASH_ERROR] {
        for text in state
            .sessions
            .drain_flash(token, category)
            .await
            .map_err(ApiError::Internal)?
        {
            flash.push(FlashMessage::new(category, &text));
        }
    }
    Ok(flash)
}
