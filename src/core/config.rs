//! Generator configuration: dataset attribution, extraction toggles, and
//! output options, with defaults matching the published GeoCroissant
//! conformance URIs. Loadable from a YAML file.
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CROISSANT_SPEC_URI: &str = "http://mlcommons.org/croissant/1.1";
pub const GEOCROISSANT_SPEC_URI: &str = "http://mlcommons.org/croissant/geo/1.0";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config YAML {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

/// Dataset-level attribution emitted into the document header
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub version: String,
    pub license: String,
    #[serde(rename = "conformsTo")]
    pub conforms_to: Vec<String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            license: "Unknown".to_string(),
            conforms_to: vec![
                CROISSANT_SPEC_URI.to_string(),
                GEOCROISSANT_SPEC_URI.to_string(),
            ],
        }
    }
}

/// Extraction toggles. `extract_spectral_metadata` and `detect_sensor` are
/// accepted for forward compatibility but not yet consulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub compute_statistics: bool,
    pub extract_spectral_metadata: bool,
    pub detect_sensor: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            compute_statistics: true,
            extract_spectral_metadata: true,
            detect_sensor: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub save_metadata_cache: bool,
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_metadata_cache: true,
            indent: 2,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub dataset: DatasetConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

impl GeneratorConfig {
    /// Load configuration from a YAML file; missing sections fall back to
    /// their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_uris() {
        let config = GeneratorConfig::default();
        assert_eq!(config.dataset.version, "1.0");
        assert_eq!(config.dataset.license, "Unknown");
        assert_eq!(
            config.dataset.conforms_to,
            vec![CROISSANT_SPEC_URI.to_string(), GEOCROISSANT_SPEC_URI.to_string()]
        );
        assert!(config.extraction.compute_statistics);
        assert!(config.output.save_metadata_cache);
        assert_eq!(config.output.indent, 2);
    }

    #[test]
    fn partial_yaml_keeps_section_defaults() {
        let yaml = "dataset:\n  license: CC-BY-4.0\noutput:\n  indent: 4\n";
        let config: GeneratorConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.dataset.license, "CC-BY-4.0");
        assert_eq!(config.dataset.version, "1.0");
        assert_eq!(config.output.indent, 4);
        assert!(config.extraction.compute_statistics);
    }
}
