//! In-memory metadata collection and its optional on-disk cache.
//!
//! The store is keyed by file path and preserves insertion (discovery)
//! order, so the cache file serializes identically across runs over an
//! unchanged directory.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::info;

use crate::error::Result;
use crate::io::raster::RasterMetadata;

#[derive(Debug, Default)]
pub struct MetadataStore {
    entries: Vec<(PathBuf, RasterMetadata)>,
    index: HashMap<PathBuf, usize>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: PathBuf, metadata: RasterMetadata) {
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push((path, metadata));
    }

    pub fn get(&self, path: &Path) -> Option<&RasterMetadata> {
        self.index.get(path).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the collection to `path` as a pretty-printed JSON mapping
    /// from file path to metadata record, in insertion order.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut map = Map::with_capacity(self.entries.len());
        for (file, metadata) in &self.entries {
            map.insert(
                file.display().to_string(),
                serde_json::to_value(metadata)?,
            );
        }
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(path, json)?;
        info!("Metadata cache saved to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata(name: &str) -> RasterMetadata {
        RasterMetadata {
            file_path: format!("/data/{}", name),
            file_name: name.to_string(),
            file_size_bytes: 1024,
            width: 4,
            height: 4,
            count: 1,
            dtype: "UInt16".to_string(),
            driver: "GTiff".to_string(),
            nodata: None,
            transform: [0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            bounds: [0.0, 0.0, 4.0, 4.0],
            crs: None,
            crs_wkt: None,
            crs_epsg: None,
            crs_units: None,
            resolution: (1.0, 1.0),
            geo_bounds: None,
            bands: Vec::new(),
            tags: Default::default(),
            colorinterp: Vec::new(),
            block_shapes: Vec::new(),
            compression: None,
            interleaving: None,
        }
    }

    #[test]
    fn store_preserves_insertion_order() {
        let mut store = MetadataStore::new();
        store.insert(PathBuf::from("/data/b.tif"), sample_metadata("b.tif"));
        store.insert(PathBuf::from("/data/a.tif"), sample_metadata("a.tif"));

        assert_eq!(store.len(), 2);
        assert!(store.contains(Path::new("/data/b.tif")));
        assert_eq!(
            store.get(Path::new("/data/a.tif")).unwrap().file_name,
            "a.tif"
        );
        assert_eq!(store.entries[0].1.file_name, "b.tif");
    }
}
