//! Route definitions for annotation-intent analysis.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::intent_lens;
use crate::state::AppState;

/// Intent Lens routes mounted at `/intent-lens`.
///
/// ```text
/// POST /                          -> analyze_annotations
/// GET  /images                    -> list_images
/// GET  /images/{name}/regions     -> get_image_regions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(intent_lens::analyze_annotations))
        .route("/images", get(intent_lens::list_images))
        .route("/images/{name}/regions", get(intent_lens::get_image_regions))
}
