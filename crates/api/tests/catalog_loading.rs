//! Tests for loading the region catalog from configuration.

mod common;

use std::io::Write;

use assert_matches::assert_matches;
use intent_lens_api::error::AppError;
use intent_lens_api::state::load_catalog;
use intent_lens_core::catalog::{RegionCatalog, DEFAULT_IMAGE};
use intent_lens_core::error::CoreError;

#[test]
fn no_path_loads_builtin_catalog() {
    let config = common::test_config();
    let catalog = load_catalog(&config).unwrap();
    assert_eq!(catalog, RegionCatalog::builtin());
    assert_eq!(catalog.default_image(), DEFAULT_IMAGE);
}

#[test]
fn catalog_file_replaces_builtin() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "defaultImage": "mock.png",
            "images": {{
                "mock.png": {{
                    "width": 640, "height": 480,
                    "regions": [
                        {{"name": "logo", "label": "company logo", "bbox": [10, 10, 110, 60], "importance": "critical"}}
                    ]
                }}
            }}
        }}"#
    )
    .unwrap();

    let mut config = common::test_config();
    config.region_catalog_path = Some(file.path().to_string_lossy().into_owned());

    let catalog = load_catalog(&config).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.default_image(), "mock.png");
    assert_eq!(catalog.lookup("v2_with_bench.jpg").first().name, "logo");
}

#[test]
fn invalid_catalog_file_is_a_validation_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"defaultImage": "a.png", "images": {{}}}}"#).unwrap();

    let mut config = common::test_config();
    config.region_catalog_path = Some(file.path().to_string_lossy().into_owned());

    let err = load_catalog(&config).unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Validation(_)));
}

#[test]
fn missing_catalog_file_is_an_internal_error() {
    let mut config = common::test_config();
    config.region_catalog_path = Some("/definitely/not/here/catalog.json".to_string());

    let err = load_catalog(&config).unwrap_err();
    assert_matches!(err, AppError::InternalError(msg) if msg.contains("failed to read region catalog"));
}
