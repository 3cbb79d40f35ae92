pub mod health;
pub mod intent_lens;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /intent-lens                                     analyze annotations (POST)
/// /intent-lens/images                              list reference images
/// /intent-lens/images/{name}/regions               regions of one image
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Annotation-intent analysis and region catalog browsing.
        .nest("/intent-lens", intent_lens::router())
}
