//! Region catalog: static per-image region datasets keyed by image name.
//!
//! The catalog is an immutable value passed to the analysis functions, so
//! callers and tests can swap in their own datasets. [`RegionCatalog::builtin`]
//! carries the reference images shipped with the application.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geometry::BoundingBox;
use crate::region::{ImageRegionSet, Importance, Region};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Image used when a lookup names an image the catalog does not know.
pub const DEFAULT_IMAGE: &str = "v2_with_bench.jpg";

/// Reference image before the bench was added.
pub const NO_BENCH_IMAGE: &str = "v1_no_bench.png";

// ---------------------------------------------------------------------------
// RegionCatalog
// ---------------------------------------------------------------------------

/// Immutable mapping from image name to its [`ImageRegionSet`], with a
/// designated default image that is guaranteed to be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRegionCatalog", rename_all = "camelCase")]
pub struct RegionCatalog {
    default_image: String,
    images: BTreeMap<String, ImageRegionSet>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRegionCatalog {
    default_image: String,
    images: BTreeMap<String, ImageRegionSet>,
}

impl TryFrom<RawRegionCatalog> for RegionCatalog {
    type Error = CoreError;

    fn try_from(raw: RawRegionCatalog) -> Result<Self, Self::Error> {
        Self::new(raw.default_image, raw.images)
    }
}

impl RegionCatalog {
    /// Build a catalog. The default image must be one of `images`.
    pub fn new(
        default_image: impl Into<String>,
        images: impl IntoIterator<Item = (String, ImageRegionSet)>,
    ) -> Result<Self, CoreError> {
        let default_image = default_image.into();
        let mut map = BTreeMap::new();
        for (name, set) in images {
            if name.trim().is_empty() {
                return Err(CoreError::Validation(
                    "image name must not be empty".to_string(),
                ));
            }
            if map.insert(name.clone(), set).is_some() {
                return Err(CoreError::Validation(format!(
                    "duplicate image '{name}' in region catalog"
                )));
            }
        }
        if !map.contains_key(&default_image) {
            return Err(CoreError::Validation(format!(
                "default image '{default_image}' is not defined in the region catalog"
            )));
        }
        Ok(Self {
            default_image,
            images: map,
        })
    }

    /// Parse and validate a catalog from its JSON form:
    ///
    /// ```json
    /// { "defaultImage": "a.jpg",
    ///   "images": { "a.jpg": { "width": 1024, "height": 768, "regions": [
    ///       { "name": "sky", "label": "sky", "bbox": [0, 0, 1024, 120], "importance": "low" } ] } } }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("invalid region catalog: {e}")))
    }

    /// The reference images bundled with the application.
    pub fn builtin() -> Self {
        let images = BTreeMap::from([
            (DEFAULT_IMAGE.to_string(), with_bench()),
            (NO_BENCH_IMAGE.to_string(), without_bench()),
        ]);
        Self {
            default_image: DEFAULT_IMAGE.to_string(),
            images,
        }
    }

    pub fn default_image(&self) -> &str {
        &self.default_image
    }

    /// Region set of the default image.
    pub fn default_set(&self) -> &ImageRegionSet {
        // Presence of the default image is checked at construction.
        &self.images[&self.default_image]
    }

    pub fn contains(&self, image_name: &str) -> bool {
        self.images.contains_key(image_name)
    }

    /// Region set for `image_name`, falling back to the default image when
    /// the name is unknown. Never fails.
    pub fn lookup(&self, image_name: &str) -> &ImageRegionSet {
        self.images
            .get(image_name)
            .unwrap_or_else(|| self.default_set())
    }

    /// Region set for `image_name`, without fallback.
    pub fn get(&self, image_name: &str) -> Result<&ImageRegionSet, CoreError> {
        self.images.get(image_name).ok_or_else(|| CoreError::NotFound {
            entity: "Image",
            key: image_name.to_string(),
        })
    }

    /// All images with their region sets, sorted by name.
    pub fn images(&self) -> impl Iterator<Item = (&str, &ImageRegionSet)> {
        self.images.iter().map(|(name, set)| (name.as_str(), set))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Built-in datasets
// ---------------------------------------------------------------------------

fn region(name: &str, label: &str, [x1, y1, x2, y2]: [f64; 4], importance: Importance) -> Region {
    Region::new(name, label, BoundingBox::new(x1, y1, x2, y2), importance)
}

/// Storefront with people on the bench. Declaration order breaks ties.
fn with_bench() -> ImageRegionSet {
    use Importance::*;
    ImageRegionSet::new_unchecked(
        1024,
        768,
        vec![
            region("awning", "storefront awning with signage", [280.0, 150.0, 750.0, 280.0], High),
            region("signage", "Eye Clinic of San Jose sign", [320.0, 180.0, 720.0, 250.0], Critical),
            region("bench_people", "people sitting on bench", [30.0, 380.0, 220.0, 580.0], Critical),
            region("entrance", "main entrance doors", [450.0, 280.0, 650.0, 520.0], High),
            region("windows_upper", "upper floor windows", [280.0, 50.0, 700.0, 150.0], Medium),
            region("planters", "decorative planters and greenery", [200.0, 400.0, 450.0, 550.0], Low),
            region("trees_left", "trees on left side", [0.0, 100.0, 150.0, 450.0], Low),
            region("trees_right", "trees on right side", [850.0, 100.0, 1024.0, 450.0], Low),
            region("sky", "sky and clouds", [0.0, 0.0, 1024.0, 120.0], Low),
            region("sidewalk", "sidewalk and pavement", [0.0, 550.0, 1024.0, 768.0], Low),
            region("street_lamp", "street lamp", [750.0, 200.0, 820.0, 500.0], Low),
        ],
    )
}

/// The same storefront before the bench scene was composited in.
fn without_bench() -> ImageRegionSet {
    use Importance::*;
    ImageRegionSet::new_unchecked(
        1024,
        768,
        vec![
            region("awning", "storefront awning with signage", [280.0, 150.0, 750.0, 280.0], High),
            region("signage", "Eye Clinic of San Jose sign", [320.0, 180.0, 720.0, 250.0], Critical),
            region("bench_empty", "empty bench area", [30.0, 380.0, 220.0, 580.0], Critical),
            region("entrance", "main entrance doors", [450.0, 280.0, 650.0, 520.0], High),
            region("windows_upper", "upper floor windows", [280.0, 50.0, 700.0, 150.0], Medium),
            region("planters", "decorative planters and greenery", [200.0, 400.0, 450.0, 550.0], Low),
            region("sky", "sky and clouds", [0.0, 0.0, 1024.0, 120.0], Low),
            region("sidewalk", "sidewalk and pavement", [0.0, 550.0, 1024.0, 768.0], Low),
        ],
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
