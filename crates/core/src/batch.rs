//! Batch analysis: resolves and classifies every annotation drawn on one
//! image and folds the results into an overall verdict.

use serde::Serialize;

use crate::annotation::Annotation;
use crate::catalog::RegionCatalog;
use crate::classifier::{classify, IntentResult};
use crate::error::CoreError;
use crate::geometry::Size;
use crate::region::ImageRegionSet;
use crate::resolver::resolve;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Canvas width assumed when the caller does not supply one.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Canvas height assumed when the caller does not supply one.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Summary returned for a batch with no annotations.
pub const EMPTY_BATCH_SUMMARY: &str = "No annotations provided";

/// Default maximum number of annotations analyzed in one batch.
pub const MAX_ANNOTATIONS_PER_BATCH: usize = 50;

// ---------------------------------------------------------------------------
// BatchResult
// ---------------------------------------------------------------------------

/// Aggregate result for one batch of annotations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// One entry per annotation, in input order.
    pub intents: Vec<IntentResult>,
    pub overall_summary: String,
    /// True iff every intent is a minor change.
    pub is_minor_overall: bool,
}

impl BatchResult {
    /// The fixed result for an empty batch.
    pub fn empty() -> Self {
        Self {
            intents: Vec::new(),
            overall_summary: EMPTY_BATCH_SUMMARY.to_string(),
            is_minor_overall: true,
        }
    }

    /// Distinct region labels, in order of first reference.
    pub fn distinct_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for intent in &self.intents {
            if !labels.contains(&intent.label.as_str()) {
                labels.push(&intent.label);
            }
        }
        labels
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Resolve and classify a single annotation against `regions`.
///
/// `canvas` is the size of the surface the annotation was drawn on.
pub fn analyze_annotation(
    annotation: &Annotation,
    regions: &ImageRegionSet,
    canvas: Size,
) -> Result<IntentResult, CoreError> {
    let bbox = annotation.to_image_bbox(regions.size(), canvas)?;
    let resolution = resolve(&bbox, regions);
    let classification = classify(annotation, resolution.region);
    Ok(IntentResult::new(resolution, classification))
}

/// Analyze every annotation drawn on `image_name`.
///
/// Unknown image names use the catalog's default image. An empty batch
/// returns [`BatchResult::empty`] before any other check. Any malformed
/// annotation fails the whole batch; the error names its index.
pub fn analyze_batch(
    annotations: &[Annotation],
    catalog: &RegionCatalog,
    image_name: &str,
    canvas: Size,
) -> Result<BatchResult, CoreError> {
    if annotations.is_empty() {
        return Ok(BatchResult::empty());
    }

    canvas.validate("canvas")?;
    let regions = catalog.lookup(image_name);

    let intents = annotations
        .iter()
        .enumerate()
        .map(|(i, annotation)| {
            analyze_annotation(annotation, regions, canvas).map_err(|e| at_index(i, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // A single significant change makes the whole batch significant.
    let is_minor_overall = intents.iter().all(|i| i.is_minor_change);

    let mut result = BatchResult {
        intents,
        overall_summary: String::new(),
        is_minor_overall,
    };
    result.overall_summary = overall_summary(&result.distinct_labels(), is_minor_overall);
    Ok(result)
}

fn overall_summary(labels: &[&str], is_minor_overall: bool) -> String {
    let regions = join_labels(labels);
    if is_minor_overall {
        format!("Client feedback on {regions}. Minor adjustments only.")
    } else {
        format!("Client feedback on {regions}. Contains changes to key elements.")
    }
}

fn at_index(index: usize, err: CoreError) -> CoreError {
    match err {
        CoreError::Validation(msg) => CoreError::Validation(format!("annotations[{index}]: {msg}")),
        other => other,
    }
}

/// Join labels as an English list without an Oxford comma:
/// `"A"`, `"A and B"`, `"A, B and C"`. An empty slice yields `""`.
pub fn join_labels(labels: &[&str]) -> String {
    match labels {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
