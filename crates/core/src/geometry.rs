//! Bounding-box geometry and canvas-to-image scaling.
//!
//! Regions and annotation extents share the same [`BoundingBox`]
//! representation so overlap and distance tests treat them uniformly.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Bounding box
// ---------------------------------------------------------------------------

/// Axis-aligned rectangle `(x1, y1, x2, y2)` in pixel coordinates, origin
/// top-left.
///
/// Serialized as a four-element array. Boxes produced by
/// [`BoundingBox::from_corners`] are always normalized (`x1 <= x2`,
/// `y1 <= y2`); boxes built with [`BoundingBox::new`] are taken verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    /// Build a box from its coordinates as given.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a normalized box from two opposite corners in any order.
    ///
    /// A rectangle dragged up-left has a negative extent; taking min/max
    /// here keeps downstream overlap tests valid.
    pub fn from_corners(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self {
            x1: ax.min(bx),
            y1: ay.min(by),
            x2: ax.max(bx),
            y2: ay.max(by),
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Center point `(cx, cy)`.
    pub fn center(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Euclidean distance between the centers of two boxes.
    pub fn center_distance(&self, other: &BoundingBox) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (ax - bx).hypot(ay - by)
    }

    /// Whether the two boxes overlap on both axes.
    ///
    /// Uses strict inequality: boxes that only share an edge or a corner do
    /// not overlap. A zero-area box strictly inside another still overlaps.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 < other.y2 && self.y2 > other.y1
    }

    /// Whether the box has positive width and height.
    pub fn is_proper(&self) -> bool {
        self.x1 < self.x2 && self.y1 < self.y2
    }

    /// Whether the box has zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

// ---------------------------------------------------------------------------
// Sizes and scaling
// ---------------------------------------------------------------------------

/// Width and height of a canvas or image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Validate that both dimensions are finite and strictly positive.
    ///
    /// `what` names the size in the error message (e.g. `"canvas"`).
    pub fn validate(&self, what: &str) -> Result<(), CoreError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(CoreError::Validation(format!(
                "{what} dimensions must be finite and positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Independent per-axis factors mapping canvas pixels to image pixels.
///
/// No aspect-ratio correction is applied: callers are expected to display
/// the image at its own aspect ratio, and any distortion is accepted as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    /// Compute `image / canvas` on each axis.
    pub fn between(image: Size, canvas: Size) -> Result<Self, CoreError> {
        image.validate("image")?;
        canvas.validate("canvas")?;
        Ok(Self {
            x: image.width / canvas.width,
            y: image.height / canvas.height,
        })
    }

    /// The larger of the two factors.
    pub fn max(&self) -> f64 {
        self.x.max(self.y)
    }

    /// Scale a canvas point into image space.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.x, y * self.y)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
