//! GeoCroissant JSON-LD document assembly.
//!
//! The assembler owns a single accumulating JSON object and exposes the
//! enrichment steps in a fixed order; key order in the output is insertion
//! order (serde_json is built with `preserve_order`). The base header
//! carries the full static JSON-LD context; every later step appends its
//! keys after the header's.
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use serde_json::{Map, Value, json};

use crate::core::config::GeneratorConfig;
use crate::core::sensor::{Sensor, spectral_band};
use crate::core::scan::FileInventory;
use crate::core::temporal;
use crate::io::cache::MetadataStore;
use crate::io::raster::{BandMetadata, RasterMetadata};
use crate::types::FileRole;

/// Fixed JSON-LD context shared by every generated document
static JSONLD_CONTEXT: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "@language": "en",
        "@vocab": "https://schema.org/",
        "citeAs": "cr:citeAs",
        "column": "cr:column",
        "conformsTo": "dct:conformsTo",
        "cr": "http://mlcommons.org/croissant/",
        "geocr": "http://mlcommons.org/croissant/geocr/",
        "rai": "http://mlcommons.org/croissant/RAI/",
        "dct": "http://purl.org/dc/terms/",
        "sc": "https://schema.org/",
        "data": {"@id": "cr:data", "@type": "@json"},
        "examples": {"@id": "cr:examples", "@type": "@json"},
        "dataBiases": "cr:dataBiases",
        "dataCollection": "cr:dataCollection",
        "dataType": {"@id": "cr:dataType", "@type": "@vocab"},
        "extract": "cr:extract",
        "field": "cr:field",
        "fileProperty": "cr:fileProperty",
        "fileObject": "cr:fileObject",
        "fileSet": "cr:fileSet",
        "format": "cr:format",
        "includes": "cr:includes",
        "isLiveDataset": "cr:isLiveDataset",
        "jsonPath": "cr:jsonPath",
        "key": "cr:key",
        "md5": "cr:md5",
        "parentField": "cr:parentField",
        "path": "cr:path",
        "personalSensitiveInformation": "cr:personalSensitiveInformation",
        "recordSet": "cr:recordSet",
        "references": "cr:references",
        "regex": "cr:regex",
        "repeated": "cr:repeated",
        "replace": "cr:replace",
        "samplingRate": "cr:samplingRate",
        "separator": "cr:separator",
        "source": "cr:source",
        "subField": "cr:subField",
        "transform": "cr:transform"
    })
});

/// Builder for the GeoCroissant document. Construction writes the base
/// header; each `add_*` step appends its keys in call order.
pub struct DocumentAssembler {
    doc: Map<String, Value>,
    root: PathBuf,
    dataset_name: String,
}

impl DocumentAssembler {
    pub fn new(root: &Path, config: &GeneratorConfig, today: NaiveDate) -> Self {
        let dataset_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        let root_url = format!("file://{}", root.display());
        let date = today.format("%Y-%m-%d").to_string();

        let mut doc = Map::new();
        doc.insert("@context".into(), JSONLD_CONTEXT.clone());
        doc.insert("@type".into(), json!("sc:Dataset"));
        doc.insert("name".into(), json!(dataset_name));
        doc.insert(
            "description".into(),
            json!(format!(
                "Geospatial dataset extracted from {} directory",
                dataset_name
            )),
        );
        doc.insert("url".into(), json!(root_url));
        doc.insert(
            "citeAs".into(),
            json!(format!(
                "@dataset{{{name}, title={{{name} geospatial dataset}}, year={{{year}}}, url={{{url}}}}}",
                name = dataset_name,
                year = today.year(),
                url = root_url
            )),
        );
        doc.insert("datePublished".into(), json!(date));
        doc.insert("version".into(), json!(config.dataset.version));
        doc.insert("license".into(), json!(config.dataset.license));
        doc.insert("conformsTo".into(), json!(config.dataset.conforms_to));
        doc.insert("distribution".into(), json!([]));
        doc.insert("recordSet".into(), json!([]));

        Self {
            doc,
            root: root.to_path_buf(),
            dataset_name,
        }
    }

    /// Step 2a: earliest/latest acquisition interval across all files
    pub fn add_temporal_coverage(&mut self, inventory: &FileInventory) {
        if let Some(coverage) = temporal::temporal_coverage(inventory.all_files()) {
            self.doc.insert("temporalCoverage".into(), json!(coverage));
        }
    }

    /// Step 2b: sampling cadence across all files
    pub fn add_temporal_resolution(&mut self, inventory: &FileInventory) {
        if let Some(resolution) = temporal::temporal_resolution(inventory.all_files()) {
            self.doc
                .insert("geocr:temporalResolution".into(), json!(resolution));
        }
    }

    /// Step 3: dataset name, detected sensor, and burn-scar enrichment
    pub fn add_keywords(&mut self, sensor: Option<Sensor>) {
        let mut keywords = vec![self.dataset_name.clone()];
        if let Some(sensor) = sensor {
            keywords.push(sensor.label().to_string());
        }
        if self.dataset_name.to_lowercase().contains("burn") {
            keywords.extend(
                ["burn scars", "fire", "remote sensing"]
                    .iter()
                    .map(|s| s.to_string()),
            );
        }
        self.doc.insert("keywords".into(), json!(keywords));
    }

    /// Step 4: creator from the representative file's tags; AUTHOR wins
    /// over ORGANIZATION
    pub fn add_creator(&mut self, sample: &RasterMetadata) {
        if let Some(author) = sample.tags.get("AUTHOR") {
            self.doc.insert(
                "creator".into(),
                json!({"@type": "Person", "name": author}),
            );
        } else if let Some(org) = sample.tags.get("ORGANIZATION") {
            self.doc.insert(
                "creator".into(),
                json!({"@type": "Organization", "name": org}),
            );
        }
    }

    /// Step 5: CRS identifier, WGS84 coverage box, and spatial resolution
    /// from the representative file
    pub fn add_geospatial_properties(&mut self, sample: &RasterMetadata) {
        if let Some(epsg) = &sample.crs_epsg {
            self.doc
                .insert("geocr:coordinateReferenceSystem".into(), json!(epsg));
        }

        if let Some(bounds) = &sample.geo_bounds {
            self.doc.insert(
                "spatialCoverage".into(),
                json!({
                    "@type": "Place",
                    "geo": {
                        "@type": "GeoShape",
                        "box": format!(
                            "{} {} {} {}",
                            bounds.south, bounds.west, bounds.north, bounds.east
                        )
                    }
                }),
            );
        }

        if let Some(units) = sample.crs_units {
            self.doc.insert(
                "geocr:spatialResolution".into(),
                json!({
                    "@type": "QuantitativeValue",
                    "value": sample.resolution.0.abs(),
                    "unitText": if units == crate::types::CrsUnit::Meters { "m" } else { "degrees" }
                }),
            );
        }
    }

    /// Step 6: windowing strategy from the representative file's name
    pub fn add_sampling_strategy(&mut self, filename: &str) {
        if let Some(strategy) = temporal::sampling_strategy(filename) {
            self.doc.insert("geocr:samplingStrategy".into(), json!(strategy));
        }
    }

    /// Step 7: dataset-level band configuration and spectral metadata,
    /// taken from the first image file in enumeration order.
    ///
    /// This is a single representative sample; it does not verify that all
    /// image files share the same band composition.
    pub fn add_band_configuration(
        &mut self,
        inventory: &FileInventory,
        store: &MetadataStore,
        sensor: Option<Sensor>,
    ) {
        let image_meta = inventory
            .first_of_role(FileRole::Images)
            .and_then(|p| store.get(p));
        let Some(image_meta) = image_meta else { return };
        if image_meta.bands.is_empty() {
            return;
        }

        let mut band_names = Vec::with_capacity(image_meta.bands.len());
        let mut spectral_bands = Vec::new();

        for band in &image_meta.bands {
            let band_name = resolve_band_name(band, sensor);
            if let Some(sensor) = sensor {
                if let Some(info) = spectral_band(sensor, band.index - 1) {
                    spectral_bands.push(json!({
                        "@type": "geocr:SpectralBand",
                        "name": band_name.clone(),
                        "geocr:centerWavelength": {
                            "@type": "QuantitativeValue",
                            "value": info.wavelength,
                            "unitText": info.unit
                        },
                        "geocr:bandwidth": {
                            "@type": "QuantitativeValue",
                            "value": info.bandwidth,
                            "unitText": info.unit
                        }
                    }));
                }
            }
            band_names.push(band_name);
        }

        self.doc.insert(
            "geocr:bandConfiguration".into(),
            json!({
                "@type": "geocr:BandConfiguration",
                "geocr:totalBands": band_names.len(),
                "geocr:bandNameList": band_names
            }),
        );

        if !spectral_bands.is_empty() {
            self.doc
                .insert("geocr:spectralBandMetadata".into(), json!(spectral_bands));
        }
    }

    /// Step 8: root file object plus the TIFF file set
    pub fn add_distribution(&mut self) {
        let file_object = json!({
            "@type": "cr:FileObject",
            "@id": "data_repo",
            "name": "data_repo",
            "description": "Directory containing the dataset files",
            "contentUrl": self.root.display().to_string(),
            "encodingFormat": "local_directory",
            // Directory checksums are not computed
            "md5": "placeholder_hash_for_directory"
        });
        let file_set = json!({
            "@type": "cr:FileSet",
            "@id": format!("tiff-files-for-{}", self.dataset_name),
            "name": format!("tiff-files-for-{}", self.dataset_name),
            "description": "Local TIFF files organized in training/validation splits.",
            "containedIn": {"@id": "data_repo"},
            "encodingFormat": "image/tiff",
            "includes": "**/*.tif*"
        });

        if let Some(Value::Array(distribution)) = self.doc.get_mut("distribution") {
            distribution.push(file_object);
            distribution.push(file_set);
        }
    }

    /// Step 9: one record set with an image field and a mask field, each
    /// omitted when no representative file of that role exists.
    ///
    /// The extraction regexes are descriptive metadata chosen from the
    /// observed filenames; role assignment from the directory scan stays
    /// authoritative for which files belong to which field.
    pub fn add_record_sets(
        &mut self,
        inventory: &FileInventory,
        store: &MetadataStore,
        sensor: Option<Sensor>,
    ) {
        let image_regex = select_image_regex(inventory);
        let mask_regex = select_mask_regex(inventory);

        let mut recordset = Map::new();
        recordset.insert("@type".into(), json!("cr:RecordSet"));
        recordset.insert("@id".into(), json!(self.dataset_name));
        recordset.insert("name".into(), json!(self.dataset_name));
        recordset.insert(
            "description".into(),
            json!(format!(
                "{} dataset with satellite imagery and mask annotations.",
                self.dataset_name
            )),
        );
        let mut fields = Vec::new();
        if let Some(field) = self.image_field(inventory, store, sensor, &image_regex) {
            fields.push(field);
        }
        if let Some(field) = self.mask_field(inventory, store, &mask_regex) {
            fields.push(field);
        }
        recordset.insert("field".into(), json!(fields));

        if let Some(Value::Array(record_sets)) = self.doc.get_mut("recordSet") {
            record_sets.push(Value::Object(recordset));
        }
    }

    fn image_field(
        &self,
        inventory: &FileInventory,
        store: &MetadataStore,
        sensor: Option<Sensor>,
        image_regex: &str,
    ) -> Option<Value> {
        let image_meta = inventory
            .first_of_role(FileRole::Images)
            .and_then(|p| store.get(p))?;

        let mut field = self.field_skeleton(
            "image",
            "Satellite imagery with multiple spectral bands converted to reflectance.",
            image_regex,
        );

        if !image_meta.bands.is_empty() {
            let band_names: Vec<String> = image_meta
                .bands
                .iter()
                .map(|b| resolve_band_name(b, sensor))
                .collect();
            field.insert(
                "geocr:bandConfiguration".into(),
                json!({
                    "@type": "geocr:BandConfiguration",
                    "geocr:totalBands": image_meta.count,
                    "geocr:bandNameList": band_names
                }),
            );
        }

        Some(Value::Object(field))
    }

    fn mask_field(
        &self,
        inventory: &FileInventory,
        store: &MetadataStore,
        mask_regex: &str,
    ) -> Option<Value> {
        let mask_meta = inventory
            .first_of_role(FileRole::Masks)
            .and_then(|p| store.get(p))?;

        let mut field = self.field_skeleton(
            "mask",
            "Mask annotations with values representing different classes.",
            mask_regex,
        );

        if mask_meta.count > 0 {
            field.insert(
                "geocr:bandConfiguration".into(),
                json!({
                    "@type": "geocr:BandConfiguration",
                    "geocr:totalBands": mask_meta.count,
                    "geocr:bandNameList": vec!["mask"; mask_meta.count]
                }),
            );
        }

        Some(Value::Object(field))
    }

    fn field_skeleton(&self, kind: &str, description: &str, regex: &str) -> Map<String, Value> {
        let mut field = Map::new();
        field.insert("@type".into(), json!("cr:Field"));
        field.insert("@id".into(), json!(format!("{}/{}", self.dataset_name, kind)));
        field.insert("name".into(), json!(format!("{}/{}", self.dataset_name, kind)));
        field.insert("description".into(), json!(description));
        field.insert("dataType".into(), json!("sc:ImageObject"));
        field.insert(
            "source".into(),
            json!({
                "fileSet": {"@id": format!("tiff-files-for-{}", self.dataset_name)},
                "extract": {"fileProperty": "fullpath"},
                "transform": {"regex": regex}
            }),
        );
        field
    }

    /// Consume the builder, yielding the finished document
    pub fn finish(self) -> Value {
        Value::Object(self.doc)
    }
}

/// Band display name, in resolution order: explicit band name/description,
/// then the spectral table when a sensor was detected, then `Band <n>`
fn resolve_band_name(band: &BandMetadata, sensor: Option<Sensor>) -> String {
    if let Some(name) = band.name.as_ref().or(band.description.as_ref()) {
        return name.clone();
    }
    if let Some(sensor) = sensor {
        if let Some(info) = spectral_band(sensor, band.index - 1) {
            return info.name.to_string();
        }
    }
    format!("Band {}", band.index)
}

/// Image extraction regex, chosen from the observed image filenames
fn select_image_regex(inventory: &FileInventory) -> String {
    let has_merged = inventory
        .files_of_role(FileRole::Images)
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .any(|name| name.contains("_merged"));
    if has_merged {
        r".*_merged\.tif$".to_string()
    } else {
        r".*(?<!mask)\.tif$".to_string()
    }
}

/// Mask extraction regex, chosen from the observed mask filenames
fn select_mask_regex(inventory: &FileInventory) -> String {
    let has_mask_token = inventory
        .files_of_role(FileRole::Masks)
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .any(|name| name.contains(".mask."));
    if has_mask_token {
        r".*\.mask\.tif$".to_string()
    } else {
        r".*mask.*\.tif$".to_string()
    }
}
