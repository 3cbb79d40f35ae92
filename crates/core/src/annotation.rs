//! Client annotation shapes and their projection into image space.
//!
//! Annotations arrive in canvas-pixel coordinates (the size at which the
//! client drew over the image) and are converted into an axis-aligned
//! [`BoundingBox`] in source-image pixels before region matching.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geometry::{BoundingBox, ScaleFactors, Size};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Nominal width of a text marker, in canvas pixels.
pub const TEXT_MARKER_WIDTH: f64 = 100.0;

/// Nominal height of a text marker, in canvas pixels.
pub const TEXT_MARKER_HEIGHT: f64 = 30.0;

/// Minimum number of points (coordinate pairs) in a polyline.
pub const MIN_POLYLINE_POINTS: usize = 2;

// ---------------------------------------------------------------------------
// Annotation
// ---------------------------------------------------------------------------

/// A single client mark drawn over a reference image.
///
/// `x`/`y` is the anchor point in canvas pixels: the top-left corner for
/// rectangles and text markers, the center for circles. Polylines carry
/// their geometry in `points`, flattened as `[x0, y0, x1, y1, ...]`.
///
/// Deserializes from objects tagged by `type`; the short tags `rect` and
/// `line` are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Annotation {
    #[serde(alias = "rect")]
    Rectangle {
        x: f64,
        y: f64,
        #[serde(default)]
        width: f64,
        #[serde(default)]
        height: f64,
    },
    Circle {
        x: f64,
        y: f64,
        #[serde(default)]
        radius: f64,
    },
    #[serde(alias = "line")]
    Polyline { x: f64, y: f64, points: Vec<f64> },
    Text {
        x: f64,
        y: f64,
        #[serde(default)]
        text: String,
    },
}

/// The annotation type tag without its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Rectangle,
    Circle,
    Polyline,
    Text,
}

impl AnnotationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Polyline => "polyline",
            Self::Text => "text",
        }
    }
}

impl Annotation {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Rectangle { .. } => AnnotationKind::Rectangle,
            Self::Circle { .. } => AnnotationKind::Circle,
            Self::Polyline { .. } => AnnotationKind::Polyline,
            Self::Text { .. } => AnnotationKind::Text,
        }
    }

    /// Anchor point in canvas pixels.
    pub fn anchor(&self) -> (f64, f64) {
        match *self {
            Self::Rectangle { x, y, .. }
            | Self::Circle { x, y, .. }
            | Self::Polyline { x, y, .. }
            | Self::Text { x, y, .. } => (x, y),
        }
    }

    /// Check the basic shape contract.
    ///
    /// Every coordinate must be finite. A polyline needs at least
    /// [`MIN_POLYLINE_POINTS`] points and an even number of values. Zero
    /// extents (width, height, radius, coincident points) are accepted.
    pub fn validate(&self) -> Result<(), CoreError> {
        let (x, y) = self.anchor();
        ensure_finite(self.kind(), &[x, y])?;

        match self {
            Self::Rectangle { width, height, .. } => ensure_finite(self.kind(), &[*width, *height]),
            Self::Circle { radius, .. } => ensure_finite(self.kind(), &[*radius]),
            Self::Polyline { points, .. } => {
                if points.len() % 2 != 0 {
                    return Err(CoreError::Validation(format!(
                        "polyline points must be [x, y] pairs, got {} values",
                        points.len()
                    )));
                }
                if points.len() < MIN_POLYLINE_POINTS * 2 {
                    return Err(CoreError::Validation(format!(
                        "polyline needs at least {MIN_POLYLINE_POINTS} points, got {}",
                        points.len() / 2
                    )));
                }
                ensure_finite(self.kind(), points)
            }
            Self::Text { .. } => Ok(()),
        }
    }

    /// Project the annotation into an image-space bounding box.
    ///
    /// Canvas coordinates are scaled by `image / canvas` independently on
    /// each axis. Circles use the larger of the two factors for the radius so
    /// the box encloses the scaled ellipse; this over-approximates when the
    /// canvas and image aspect ratios differ. Text markers have no extent of
    /// their own and get a fixed [`TEXT_MARKER_WIDTH`] x
    /// [`TEXT_MARKER_HEIGHT`] box. The result is always normalized and may be
    /// zero-area.
    pub fn to_image_bbox(&self, image: Size, canvas: Size) -> Result<BoundingBox, CoreError> {
        self.validate()?;
        let scale = ScaleFactors::between(image, canvas)?;

        let bbox = match self {
            Self::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                let (x1, y1) = scale.apply(*x, *y);
                let (x2, y2) = scale.apply(x + width, y + height);
                BoundingBox::from_corners(x1, y1, x2, y2)
            }
            Self::Circle { x, y, radius } => {
                let (cx, cy) = scale.apply(*x, *y);
                let r = radius * scale.max();
                BoundingBox::from_corners(cx - r, cy - r, cx + r, cy + r)
            }
            Self::Polyline { points, .. } => envelope(points, &scale),
            Self::Text { x, y, .. } => {
                let (x1, y1) = scale.apply(*x, *y);
                let (x2, y2) = scale.apply(x + TEXT_MARKER_WIDTH, y + TEXT_MARKER_HEIGHT);
                BoundingBox::from_corners(x1, y1, x2, y2)
            }
        };

        Ok(bbox)
    }
}

/// Min/max envelope of scaled `[x, y]` pairs. Expects a validated list.
fn envelope(points: &[f64], scale: &ScaleFactors) -> BoundingBox {
    let init = BoundingBox::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    points.chunks_exact(2).fold(init, |acc, pair| {
        let (px, py) = scale.apply(pair[0], pair[1]);
        BoundingBox::new(acc.x1.min(px), acc.y1.min(py), acc.x2.max(px), acc.y2.max(py))
    })
}

fn ensure_finite(kind: AnnotationKind, values: &[f64]) -> Result<(), CoreError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{} annotation contains a non-finite coordinate",
            kind.as_str()
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
