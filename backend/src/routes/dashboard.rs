//! Dashboard routes (session-protected)

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::routes::{render_flash, views};
use crate::state::AppState;
use axum::{extract::State, response::Html, routing::get, Router};

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// GET /dashboard
///
/// The `CurrentUser` extractor is the authorization gate; unauthenticated
/// requests never reach this handler.
async fn dashboard(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Html<String>> {
    let flash = render_flash(&state, Some(&current.token)).await?;
    Ok(views::dashboard_page(
        &current.user.name,
        &current.user.email,
        &flash,
    ))
}
