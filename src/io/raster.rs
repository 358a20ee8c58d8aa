//! Per-file raster metadata extraction via GDAL.
//!
//! One [`RasterMetadata`] record is produced per GeoTIFF: raster shape,
//! pixel types, georeferencing, WGS84 bounds, tags, and per-band
//! attributes with optional full-plane statistics. Extraction failures are
//! scoped: a band whose pixels cannot be read gets an error annotation, a
//! file that cannot be opened yields a [`RasterError`] the caller may
//! recover from.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use gdal::raster::RasterBand;
use gdal::{Dataset, Metadata, errors::GdalError as GdalCrateError};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::io::crs;
use crate::types::CrsUnit;

/// Errors encountered while extracting metadata from a single raster
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalCrateError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No raster bands found in {0:?}")]
    NoBands(PathBuf),
    #[error("Band plane shape mismatch: expected {0}x{1}")]
    ShapeMismatch(usize, usize),
}

/// WGS84 bounding box of a raster, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

/// Summary statistics over the valid (non-nodata) samples of one band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

/// Attributes of a single raster band (1-based index)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandMetadata {
    pub index: usize,
    pub dtype: String,
    pub nodata: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present only when at least one valid sample exists; never zero-filled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<BandStatistics>,
    /// Per-band statistics failure, recorded instead of failing the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics_error: Option<String>,
}

/// Metadata extracted from one raster file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterMetadata {
    pub file_path: String,
    pub file_name: String,
    pub file_size_bytes: u64,
    pub width: usize,
    pub height: usize,
    pub count: usize,
    /// Pixel type of the first band
    pub dtype: String,
    pub driver: String,
    pub nodata: Option<f64>,
    /// Affine geotransform ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub transform: [f64; 6],
    /// Native bounds [west, south, east, north] in CRS units
    pub bounds: [f64; 4],
    pub crs: Option<String>,
    pub crs_wkt: Option<String>,
    pub crs_epsg: Option<String>,
    pub crs_units: Option<CrsUnit>,
    /// Pixel resolution (x, y), absolute values in CRS units
    pub resolution: (f64, f64),
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_bounds: Option<GeoBounds>,
    pub bands: Vec<BandMetadata>,
    pub tags: BTreeMap<String, String>,
    pub colorinterp: Vec<String>,
    /// Per-band block size (width, height)
    pub block_shapes: Vec<(usize, usize)>,
    pub compression: Option<String>,
    pub interleaving: Option<String>,
}

/// Extractor for GDAL-supported raster datasets (GeoTIFF and friends)
pub struct RasterMetadataExtractor {
    compute_statistics: bool,
}

impl RasterMetadataExtractor {
    pub fn new(compute_statistics: bool) -> Self {
        Self { compute_statistics }
    }

    /// Extract the full metadata record for one raster file
    pub fn extract(&self, path: &Path) -> Result<RasterMetadata, RasterError> {
        let file_size_bytes = std::fs::metadata(path)?.len();
        let dataset = Dataset::open(path)?;

        let (width, height) = dataset.raster_size();
        let count = dataset.raster_count() as usize;
        if count == 0 {
            return Err(RasterError::NoBands(path.to_path_buf()));
        }

        let geotransform = match dataset.geo_transform() {
            Ok(gt) => gt,
            Err(_) => [0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        };
        let bounds = native_bounds(&geotransform, width, height);
        let resolution = (geotransform[1].abs(), geotransform[5].abs());

        let projection = dataset.projection();
        let spatial_ref = if projection.is_empty() {
            None
        } else {
            dataset.spatial_ref().ok()
        };

        let (crs_string, crs_wkt, crs_epsg, crs_units, geo_bounds) = match &spatial_ref {
            Some(srs) => {
                let wkt = srs.to_wkt().unwrap_or_else(|_| projection.clone());
                let epsg = crs::epsg_identifier(srs, &wkt);
                // Prefer the compact authority form when one exists
                let crs_string = match (srs.auth_name(), srs.auth_code()) {
                    (Some(name), Ok(code)) if name == "EPSG" => format!("EPSG:{}", code),
                    _ => wkt.clone(),
                };
                let geo_bounds = Some(wgs84_bounds(srs, &bounds)?);
                (
                    Some(crs_string),
                    Some(wkt),
                    epsg,
                    Some(crs::unit_of(srs)),
                    geo_bounds,
                )
            }
            None => (None, None, None, None, None),
        };

        let first_band = dataset.rasterband(1)?;
        let dtype = format!("{:?}", first_band.band_type());
        let nodata = first_band.no_data_value();

        let mut bands = Vec::with_capacity(count);
        let mut colorinterp = Vec::with_capacity(count);
        let mut block_shapes = Vec::with_capacity(count);
        for index in 1..=count {
            let band = dataset.rasterband(index)?;
            colorinterp.push(band.color_interpretation().name());
            block_shapes.push(band.block_size());
            bands.push(self.band_metadata(&band, index, (width, height)));
        }

        let mut tags = BTreeMap::new();
        if let Some(entries) = dataset.metadata_domain("") {
            for entry in entries {
                if let Some((key, val)) = entry.split_once('=') {
                    tags.insert(key.to_string(), val.to_string());
                }
            }
        }

        Ok(RasterMetadata {
            file_path: path.display().to_string(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_size_bytes,
            width,
            height,
            count,
            dtype,
            driver: dataset.driver().short_name(),
            nodata,
            transform: geotransform,
            bounds,
            crs: crs_string,
            crs_wkt,
            crs_epsg,
            crs_units,
            resolution,
            geo_bounds,
            bands,
            tags,
            colorinterp,
            block_shapes,
            compression: dataset.metadata_item("COMPRESSION", "IMAGE_STRUCTURE"),
            interleaving: dataset.metadata_item("INTERLEAVE", "IMAGE_STRUCTURE"),
        })
    }

    fn band_metadata(
        &self,
        band: &RasterBand,
        index: usize,
        size: (usize, usize),
    ) -> BandMetadata {
        let nodata = band.no_data_value();
        let description = band
            .description()
            .ok()
            .filter(|d| !d.is_empty());

        let mut meta = BandMetadata {
            index,
            dtype: format!("{:?}", band.band_type()),
            nodata,
            name: description.clone(),
            description,
            statistics: None,
            statistics_error: None,
        };

        if self.compute_statistics {
            match band_statistics(band, size, nodata) {
                Ok(stats) => meta.statistics = stats,
                Err(e) => meta.statistics_error = Some(e.to_string()),
            }
        }

        meta
    }
}

/// Native-CRS bounds [west, south, east, north] from the geotransform corners
fn native_bounds(gt: &[f64; 6], width: usize, height: usize) -> [f64; 4] {
    let x0 = gt[0];
    let y0 = gt[3];
    let x1 = gt[0] + width as f64 * gt[1];
    let y1 = gt[3] + height as f64 * gt[5];
    [x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)]
}

/// Reproject native bounds to WGS84 by transforming all four corners and
/// taking the envelope
fn wgs84_bounds(srs: &SpatialRef, bounds: &[f64; 4]) -> Result<GeoBounds, RasterError> {
    let [west, south, east, north] = *bounds;

    let mut target = SpatialRef::from_epsg(4326)?;
    // Traditional GIS axis order so outputs are (lon, lat)
    target.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

    let transform = CoordTransform::new(srs, &target)?;
    let mut xs = [west, east, east, west];
    let mut ys = [south, south, north, north];
    let mut zs = [0.0; 4];
    transform.transform_coords(&mut xs, &mut ys, &mut zs)?;

    Ok(GeoBounds {
        west: xs.iter().cloned().fold(f64::INFINITY, f64::min),
        south: ys.iter().cloned().fold(f64::INFINITY, f64::min),
        east: xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        north: ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    })
}

/// Read the full band plane and reduce the valid samples.
/// Returns `Ok(None)` when every sample equals the nodata value.
fn band_statistics(
    band: &RasterBand,
    size: (usize, usize),
    nodata: Option<f64>,
) -> Result<Option<BandStatistics>, RasterError> {
    let buf = band.read_as::<f64>((0, 0), size, size, None)?;
    let plane = Array2::from_shape_vec((size.1, size.0), buf.data().to_vec())
        .map_err(|_| RasterError::ShapeMismatch(size.0, size.1))?;

    let mut n = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in plane.iter() {
        if let Some(nd) = nodata {
            if v == nd {
                continue;
            }
        }
        n += 1;
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    if n == 0 {
        return Ok(None);
    }

    let mean = sum / n as f64;
    let mut sq_dev = 0.0;
    for &v in plane.iter() {
        if let Some(nd) = nodata {
            if v == nd {
                continue;
            }
        }
        sq_dev += (v - mean) * (v - mean);
    }
    let std = (sq_dev / n as f64).sqrt();

    Ok(Some(BandStatistics { min, max, mean, std }))
}
