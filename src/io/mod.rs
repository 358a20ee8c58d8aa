//! I/O layer for reading GDAL-backed rasters and writing JSON outputs.
//! Provides the `raster` metadata extractor, `crs` identifier inference,
//! the `cache` metadata store, and the `json` pretty writer.
pub mod raster;
pub use raster::{
    BandMetadata, BandStatistics, GeoBounds, RasterError, RasterMetadata, RasterMetadataExtractor,
};

pub mod crs;

pub mod cache;
pub use cache::MetadataStore;

pub mod json;
