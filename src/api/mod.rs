//! High-level, ergonomic library API: generate a GeoCroissant document for
//! a directory of GeoTIFFs, optionally serializing it to disk. Prefer
//! these entrypoints over the low-level core/io modules when embedding the
//! generator.
use std::path::Path;

use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::{info, warn};

use crate::core::config::GeneratorConfig;
use crate::core::document::DocumentAssembler;
use crate::core::scan::{FileInventory, scan_directory};
use crate::core::sensor::Sensor;
use crate::error::{Error, Result};
use crate::io::cache::MetadataStore;
use crate::io::json::write_pretty;
use crate::io::raster::RasterMetadataExtractor;

/// Result of one generator run
#[derive(Debug)]
pub struct GeneratedDocument {
    /// The assembled GeoCroissant JSON-LD document
    pub document: Value,
    /// Files whose metadata extraction succeeded
    pub files_extracted: usize,
    /// Files skipped after a per-file extraction failure
    pub files_failed: usize,
}

/// GeoCroissant metadata generator
pub struct Generator {
    config: GeneratorConfig,
    extractor: RasterMetadataExtractor,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let extractor = RasterMetadataExtractor::new(config.extraction.compute_statistics);
        Self { config, extractor }
    }

    /// Generate the document for `root`, stamped with today's local date
    pub fn generate(&self, root: &Path) -> Result<GeneratedDocument> {
        self.generate_with_date(root, Local::now().date_naive())
    }

    /// Generate the document for `root` with an explicit "current date".
    /// Output is fully deterministic for a fixed `today` and unchanged
    /// directory.
    pub fn generate_with_date(&self, root: &Path, today: NaiveDate) -> Result<GeneratedDocument> {
        info!("Scanning directory: {:?}", root);
        let inventory = scan_directory(root)?;
        let splits: Vec<String> = inventory.splits().map(|s| s.to_string()).collect();
        info!("Found {} files in splits: {:?}", inventory.len(), splits);

        let (store, files_failed) = self.extract_all(&inventory);

        if self.config.output.save_metadata_cache {
            store.save(&root.join("metadata_cache.json"))?;
        }

        if store.is_empty() {
            return Err(Error::NoSampleAvailable { failed: files_failed });
        }

        // Representative sample: first file in enumeration order whose
        // extraction succeeded
        let sample = inventory
            .all_files()
            .find_map(|p| store.get(p))
            .ok_or(Error::NoSampleAvailable { failed: files_failed })?;
        let sensor = Sensor::classify(&sample.file_name);

        let mut assembler = DocumentAssembler::new(root, &self.config, today);
        assembler.add_temporal_coverage(&inventory);
        assembler.add_temporal_resolution(&inventory);
        assembler.add_keywords(sensor);
        assembler.add_creator(sample);
        assembler.add_geospatial_properties(sample);
        assembler.add_sampling_strategy(&sample.file_name);
        assembler.add_band_configuration(&inventory, &store, sensor);
        assembler.add_distribution();
        assembler.add_record_sets(&inventory, &store, sensor);

        Ok(GeneratedDocument {
            document: assembler.finish(),
            files_extracted: store.len(),
            files_failed,
        })
    }

    /// Generate and serialize the document to `output`
    pub fn generate_to_path(&self, root: &Path, output: &Path) -> Result<GeneratedDocument> {
        self.generate_to_path_with_date(root, output, Local::now().date_naive())
    }

    /// Date-injectable variant of [`Generator::generate_to_path`]
    pub fn generate_to_path_with_date(
        &self,
        root: &Path,
        output: &Path,
        today: NaiveDate,
    ) -> Result<GeneratedDocument> {
        let result = self.generate_with_date(root, today)?;
        write_pretty(&result.document, output, self.config.output.indent)?;
        info!("GeoCroissant metadata saved to {:?}", output);
        Ok(result)
    }

    /// Extract metadata for every discovered file in enumeration order.
    /// Per-file failures are logged and skipped; the run only aborts later
    /// when nothing at all was extracted.
    fn extract_all(&self, inventory: &FileInventory) -> (MetadataStore, usize) {
        info!("Extracting metadata from {} files...", inventory.len());
        let mut store = MetadataStore::new();
        let mut failed = 0usize;
        for path in inventory.all_files() {
            match self.extractor.extract(path) {
                Ok(metadata) => store.insert(path.to_path_buf(), metadata),
                Err(e) => {
                    warn!("Could not extract metadata from {:?}: {}", path, e);
                    failed += 1;
                }
            }
        }
        (store, failed)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
