//! End-to-end pipeline tests against generated GeoTIFF fixtures.
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use gdal::raster::Buffer;
use gdal::spatial_ref::SpatialRef;
use gdal::{DriverManager, Metadata};

use geocroissant::{Error, Generator, GeneratorConfig};

/// Write a small UTM zone 10N GeoTIFF with `bands` bands, nodata 0, and
/// pixel values 1..=6 per band
fn write_fixture_tiff(path: &Path, bands: usize, author: Option<&str>) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = driver
        .create_with_band_type::<u16, _>(path, 8, 8, bands)
        .unwrap();

    ds.set_geo_transform(&[499_980.0, 30.0, 0.0, 4_100_040.0, 0.0, -30.0])
        .unwrap();
    let srs = SpatialRef::from_epsg(32610).unwrap();
    ds.set_projection(&srs.to_wkt().unwrap()).unwrap();
    if let Some(author) = author {
        ds.set_metadata_item("AUTHOR", author, "").unwrap();
    }

    for index in 1..=bands {
        let mut band = ds.rasterband(index).unwrap();
        band.set_no_data_value(Some(0.0)).unwrap();
        // Leave a few nodata (zero) pixels in every band
        let data: Vec<u16> = (0..64u16).map(|v| v % 7).collect();
        let mut buf = Buffer::new((8, 8), data);
        band.write((0, 0), (8, 8), &mut buf).unwrap();
    }
}

fn burn_scars_root(dir: &Path) -> std::path::PathBuf {
    let root = dir.join("burn_scars_test");
    write_fixture_tiff(
        &root.join("train/images/HLS.S30.T10TEK.2021045.v2.0_merged.tif"),
        6,
        Some("Jane Doe"),
    );
    write_fixture_tiff(
        &root.join("train/masks/HLS.S30.T10TEK.2021045.v2.0.mask.tif"),
        1,
        None,
    );
    root
}

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[test]
fn burn_scars_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = burn_scars_root(dir.path());

    let generator = Generator::new(GeneratorConfig::default());
    let result = generator.generate_with_date(&root, fixed_date()).unwrap();
    assert_eq!(result.files_extracted, 2);
    assert_eq!(result.files_failed, 0);

    let doc = &result.document;
    assert_eq!(doc["@type"], "sc:Dataset");
    assert_eq!(doc["name"], "burn_scars_test");
    assert_eq!(doc["datePublished"], "2025-06-01");

    // Day 45 of 2021 is February 14
    assert_eq!(doc["temporalCoverage"], "2021-02-14");

    let keywords: Vec<&str> = doc["keywords"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        keywords,
        vec!["burn_scars_test", "HLS_S30", "burn scars", "fire", "remote sensing"]
    );

    assert_eq!(doc["creator"]["@type"], "Person");
    assert_eq!(doc["creator"]["name"], "Jane Doe");

    assert_eq!(doc["geocr:coordinateReferenceSystem"], "EPSG:32610");
    assert!(doc["spatialCoverage"]["geo"]["box"].is_string());
    assert_eq!(doc["geocr:spatialResolution"]["value"], 30.0);
    assert_eq!(doc["geocr:spatialResolution"]["unitText"], "m");

    // Band names come from the HLS spectral table
    let names: Vec<&str> = doc["geocr:bandConfiguration"]["geocr:bandNameList"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Blue", "Green", "Red", "NIR", "SWIR1", "SWIR2"]);

    let fields = doc["recordSet"][0]["field"].as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["source"]["transform"]["regex"], r".*_merged\.tif$");
    assert_eq!(fields[1]["source"]["transform"]["regex"], r".*\.mask\.tif$");

    // Metadata cache was written alongside the dataset
    let cache_path = root.join("metadata_cache.json");
    let cache: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&cache_path).unwrap()).unwrap();
    let image_entry = cache
        .as_object()
        .unwrap()
        .values()
        .find(|v| v["count"] == 6)
        .expect("image entry in cache");
    // Statistics skip the zero nodata pixels: valid samples are 1..=6
    let stats = &image_entry["bands"][0]["statistics"];
    assert_eq!(stats["min"], 1.0);
    assert_eq!(stats["max"], 6.0);
}

#[test]
fn runs_are_byte_identical_for_a_fixed_date() {
    let dir = tempfile::tempdir().unwrap();
    let root = burn_scars_root(dir.path());
    let generator = Generator::new(GeneratorConfig::default());

    let a = generator.generate_with_date(&root, fixed_date()).unwrap();
    let b = generator.generate_with_date(&root, fixed_date()).unwrap();
    assert_eq!(
        serde_json::to_string(&a.document).unwrap(),
        serde_json::to_string(&b.document).unwrap()
    );
}

#[test]
fn empty_directory_is_a_discovery_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Generator::default().generate(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Discovery { .. }));
}

#[test]
fn unreadable_files_are_skipped_with_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("mixed");
    write_fixture_tiff(&root.join("train/images/scene.2021045.ok.tif"), 1, None);
    fs::write(root.join("train/images/broken.tif"), b"not a tiff").unwrap();

    let result = Generator::default()
        .generate_with_date(&root, fixed_date())
        .unwrap();
    assert_eq!(result.files_extracted, 1);
    assert_eq!(result.files_failed, 1);
}

#[test]
fn all_failures_raise_no_sample_available() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("all_bad");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.tif"), b"junk").unwrap();
    fs::write(root.join("b.tif"), b"junk").unwrap();

    let err = Generator::default()
        .generate_with_date(&root, fixed_date())
        .unwrap_err();
    assert!(matches!(err, Error::NoSampleAvailable { failed: 2 }));
}

#[test]
fn statistics_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nostats");
    write_fixture_tiff(&root.join("scene.2021045.x.tif"), 1, None);

    let mut config = GeneratorConfig::default();
    config.extraction.compute_statistics = false;
    config.output.save_metadata_cache = false;

    let result = Generator::new(config)
        .generate_with_date(&root, fixed_date())
        .unwrap();
    assert_eq!(result.files_extracted, 1);
    assert!(!root.join("metadata_cache.json").exists());
}
