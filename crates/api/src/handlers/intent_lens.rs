//! Handlers for annotation-intent analysis and region catalog browsing.
//!
//! The analysis endpoint wraps [`intent_lens_core::batch::analyze_batch`] in
//! the agent envelope (output plus trace events) the chat client renders.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use intent_lens_core::annotation::Annotation;
use intent_lens_core::batch::{self, BatchResult, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use intent_lens_core::geometry::Size;
use intent_lens_core::resolver::MatchMethod;

use crate::error::{AppError, AppResult};
use crate::response::{AgentFailure, AgentResponse, DataResponse};
use crate::state::AppState;
use crate::trace::{TraceEvent, TraceStatus, INTENT_LENS_AGENT};

/// Message of the error trace event when analysis fails.
const ANALYSIS_FAILED: &str = "Failed to analyze annotations";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /intent-lens`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Reference image the annotations were drawn on. Unknown or empty names
    /// use the catalog's default image.
    #[serde(default)]
    pub image_name: String,
    pub canvas_width: Option<f64>,
    pub canvas_height: Option<f64>,
}

impl AnalyzeRequest {
    /// Canvas size, with missing or zero dimensions replaced by the defaults.
    pub fn canvas(&self) -> Size {
        Size::new(
            dimension_or(self.canvas_width, DEFAULT_CANVAS_WIDTH),
            dimension_or(self.canvas_height, DEFAULT_CANVAS_HEIGHT),
        )
    }
}

fn dimension_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 => v,
        _ => default,
    }
}

/// One entry of `GET /intent-lens/images`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub region_count: usize,
    pub is_default: bool,
}

// ---------------------------------------------------------------------------
// POST /intent-lens
// ---------------------------------------------------------------------------

/// Resolve each annotation to the image region it refers to and classify the
/// batch as minor or significant.
///
/// Oversized batches are refused before the agent starts. Once started, a
/// failure is reported as an [`AgentFailure`] whose traces end with an
/// `error` event.
pub async fn analyze_annotations(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> AppResult<Response> {
    let count = body.annotations.len();
    if count > state.config.max_annotations {
        return Err(AppError::BadRequest(format!(
            "{count} annotations submitted, maximum is {}",
            state.config.max_annotations
        )));
    }

    let mut traces = vec![TraceEvent::now(
        INTENT_LENS_AGENT,
        TraceStatus::Started,
        format!("Analyzing {count} annotation(s) on {}...", body.image_name),
    )];

    if count == 0 {
        traces.push(TraceEvent::now(
            INTENT_LENS_AGENT,
            TraceStatus::Completed,
            "No annotations to analyze",
        ));
        return Ok(Json(AgentResponse::success(BatchResult::empty(), traces)).into_response());
    }

    if !state.catalog.contains(&body.image_name) {
        tracing::debug!(
            image = %body.image_name,
            fallback = %state.catalog.default_image(),
            "Unknown image, using default regions"
        );
    }

    let result = match batch::analyze_batch(
        &body.annotations,
        &state.catalog,
        &body.image_name,
        body.canvas(),
    ) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(image = %body.image_name, error = %e, "Annotation analysis failed");
            traces.push(TraceEvent::now(
                INTENT_LENS_AGENT,
                TraceStatus::Error,
                ANALYSIS_FAILED,
            ));
            return Ok(AgentFailure::new(&AppError::from(e), traces).into_response());
        }
    };

    for (index, intent) in result.intents.iter().enumerate() {
        if intent.matched_by == MatchMethod::NearestCenter {
            tracing::debug!(
                index,
                region = %intent.region,
                "No region overlaps annotation, resolved by nearest center"
            );
        }
    }

    let regions: Vec<&str> = result.intents.iter().map(|i| i.region.as_str()).collect();
    tracing::info!(
        image = %body.image_name,
        annotations = count,
        ?regions,
        is_minor = result.is_minor_overall,
        "Annotations analyzed"
    );

    let labels: Vec<&str> = result.intents.iter().map(|i| i.label.as_str()).collect();
    let completed = TraceEvent::now(
        INTENT_LENS_AGENT,
        TraceStatus::Completed,
        result.overall_summary.clone(),
    )
    .with_data(json!({
        "regions": labels,
        "isMinor": result.is_minor_overall,
    }));
    traces.push(completed);

    Ok(Json(AgentResponse::success(result, traces)).into_response())
}

// ---------------------------------------------------------------------------
// GET /intent-lens/images
// ---------------------------------------------------------------------------

/// List the reference images in the region catalog, sorted by name.
pub async fn list_images(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let default_image = state.catalog.default_image();
    let images: Vec<ImageSummary> = state
        .catalog
        .images()
        .map(|(name, set)| ImageSummary {
            name: name.to_string(),
            width: set.width(),
            height: set.height(),
            region_count: set.regions().len(),
            is_default: name == default_image,
        })
        .collect();

    Ok(Json(DataResponse { data: images }))
}

// ---------------------------------------------------------------------------
// GET /intent-lens/images/{name}/regions
// ---------------------------------------------------------------------------

/// Regions of one reference image. Unlike analysis, an unknown name is a 404.
pub async fn get_image_regions(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let regions = state.catalog.get(&name)?.clone();
    Ok(Json(DataResponse { data: regions }))
}
