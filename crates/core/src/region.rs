//! Semantic image regions and their importance tiers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geometry::{BoundingBox, Size};

// ---------------------------------------------------------------------------
// Importance
// ---------------------------------------------------------------------------

/// How consequential a change to a region is.
///
/// Totally ordered: `Low < Medium < High < Critical`. The derived `Ord`
/// follows declaration order, so the variants must stay in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
    Critical,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A named, bounding-boxed area of a reference image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Identifier, unique within one image.
    pub name: String,
    /// Human-readable description used in generated text.
    pub label: String,
    /// Extent in image pixels.
    pub bbox: BoundingBox,
    pub importance: Importance,
}

impl Region {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        bbox: BoundingBox,
        importance: Importance,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            bbox,
            importance,
        }
    }
}

// ---------------------------------------------------------------------------
// ImageRegionSet
// ---------------------------------------------------------------------------

/// The regions of one reference image, in declaration order.
///
/// Declaration order is significant: it breaks ties between regions of the
/// same importance and between equidistant nearest-center candidates.
/// Regions may overlap or nest. A set always holds at least one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawImageRegionSet")]
pub struct ImageRegionSet {
    width: u32,
    height: u32,
    regions: Vec<Region>,
}

#[derive(Deserialize)]
struct RawImageRegionSet {
    width: u32,
    height: u32,
    regions: Vec<Region>,
}

impl TryFrom<RawImageRegionSet> for ImageRegionSet {
    type Error = CoreError;

    fn try_from(raw: RawImageRegionSet) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height, raw.regions)
    }
}

impl ImageRegionSet {
    /// Build a validated region set.
    ///
    /// Rejects zero dimensions, an empty region list, duplicate region names,
    /// and boxes that are not finite with `x1 < x2` and `y1 < y2`.
    pub fn new(width: u32, height: u32, regions: Vec<Region>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::Validation(format!(
                "image dimensions must be positive, got {width}x{height}"
            )));
        }
        if regions.is_empty() {
            return Err(CoreError::Validation(
                "an image must define at least one region".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for region in &regions {
            if !seen.insert(region.name.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate region name '{}'",
                    region.name
                )));
            }
            if !region.bbox.is_finite() || !region.bbox.is_proper() {
                return Err(CoreError::Validation(format!(
                    "region '{}' has an invalid bbox {:?}; expected x1 < x2 and y1 < y2",
                    region.name,
                    <[f64; 4]>::from(region.bbox)
                )));
            }
        }

        Ok(Self::new_unchecked(width, height, regions))
    }

    /// Build a set from data already known to be valid.
    pub(crate) fn new_unchecked(width: u32, height: u32, regions: Vec<Region>) -> Self {
        Self {
            width,
            height,
            regions,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Regions in declaration order. Never empty.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The first declared region.
    pub fn first(&self) -> &Region {
        // Non-empty by construction.
        &self.regions[0]
    }

    /// Find a region by name.
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Region names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn region(name: &str, bbox: [f64; 4], importance: Importance) -> Region {
        Region::new(name, name, bbox.into(), importance)
    }

    #[test]
    fn importance_total_order() {
        assert!(Importance::Critical > Importance::High);
        assert!(Importance::High > Importance::Medium);
        assert!(Importance::Medium > Importance::Low);
        let mut tiers = vec![Importance::Low, Importance::Critical, Importance::Medium, Importance::High];
        tiers.sort_by(|a, b| b.cmp(a));
        assert_eq!(
            tiers,
            vec![Importance::Critical, Importance::High, Importance::Medium, Importance::Low]
        );
    }

    #[test]
    fn importance_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Importance::Critical).unwrap(), json!("critical"));
        let parsed: Importance = serde_json::from_value(json!("medium")).unwrap();
        assert_eq!(parsed, Importance::Medium);
        assert_eq!(parsed.as_str(), "medium");
    }

    #[test]
    fn valid_set_accepted() {
        let set = ImageRegionSet::new(
            100,
            100,
            vec![
                region("a", [0.0, 0.0, 50.0, 50.0], Importance::High),
                region("b", [10.0, 10.0, 20.0, 20.0], Importance::Low),
            ],
        )
        .unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(set.first().name, "a");
        assert_eq!(set.region("b").unwrap().importance, Importance::Low);
        assert!(set.region("missing").is_none());
    }

    #[test]
    fn empty_set_rejected() {
        assert_matches!(ImageRegionSet::new(100, 100, vec![]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn zero_dimensions_rejected() {
        let regions = vec![region("a", [0.0, 0.0, 1.0, 1.0], Importance::Low)];
        assert!(ImageRegionSet::new(0, 100, regions).is_err());
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = ImageRegionSet::new(
            100,
            100,
            vec![
                region("a", [0.0, 0.0, 1.0, 1.0], Importance::Low),
                region("a", [2.0, 2.0, 3.0, 3.0], Importance::Low),
            ],
        )
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("duplicate"));
    }

    #[test]
    fn unnormalized_bbox_rejected() {
        let err = ImageRegionSet::new(
            100,
            100,
            vec![region("a", [50.0, 0.0, 10.0, 10.0], Importance::Low)],
        )
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("invalid bbox"));
    }

    #[test]
    fn deserialization_validates() {
        let ok = json!({
            "width": 10, "height": 10,
            "regions": [{"name": "a", "label": "A", "bbox": [0, 0, 5, 5], "importance": "high"}]
        });
        let set: ImageRegionSet = serde_json::from_value(ok).unwrap();
        assert_eq!(set.first().bbox, BoundingBox::new(0.0, 0.0, 5.0, 5.0));

        let empty = json!({"width": 10, "height": 10, "regions": []});
        assert!(serde_json::from_value::<ImageRegionSet>(empty).is_err());
    }
}
