//! Static sensor registries: filename classification and spectral band
//! tables.
//!
//! Classification is an ordered, first-match rule list over the upper-cased
//! filename. The spectral table is currently populated for the HLS
//! (Harmonized Landsat Sentinel-2) family only; other sensors are an
//! extension point.
use serde::{Deserialize, Serialize};

/// Known acquisition sensor families
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Sensor {
    HlsS30,
    HlsL30,
    Landsat89,
    Landsat7,
    Sentinel2,
    Modis,
}

impl Sensor {
    /// Classify a filename against the ordered sensor rules, first match
    /// wins. Case of the filename does not affect the outcome.
    pub fn classify(filename: &str) -> Option<Sensor> {
        let upper = filename.to_uppercase();
        if upper.contains("HLS.S30") {
            return Some(Sensor::HlsS30);
        }
        if upper.contains("HLS.L30") {
            return Some(Sensor::HlsL30);
        }
        if upper.contains("LC08") || upper.contains("LC09") {
            return Some(Sensor::Landsat89);
        }
        if upper.contains("LE07") {
            return Some(Sensor::Landsat7);
        }
        if upper.contains("S2") && (upper.contains("L1C") || upper.contains("L2A")) {
            return Some(Sensor::Sentinel2);
        }
        if upper.contains("MOD") || upper.contains("MYD") {
            return Some(Sensor::Modis);
        }
        None
    }

    /// Canonical identifier used in keywords and catalogs
    pub fn label(&self) -> &'static str {
        match self {
            Sensor::HlsS30 => "HLS_S30",
            Sensor::HlsL30 => "HLS_L30",
            Sensor::Landsat89 => "Landsat_8-9",
            Sensor::Landsat7 => "Landsat_7",
            Sensor::Sentinel2 => "Sentinel2",
            Sensor::Modis => "MODIS",
        }
    }

    pub fn is_hls(&self) -> bool {
        matches!(self, Sensor::HlsS30 | Sensor::HlsL30)
    }
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Spectral descriptor of one sensor band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpectralBand {
    pub name: &'static str,
    /// Center wavelength
    pub wavelength: u32,
    pub bandwidth: u32,
    pub unit: &'static str,
}

/// HLS band specification (both S30 and L30 products share it)
pub const HLS_BANDS: [SpectralBand; 6] = [
    SpectralBand { name: "Blue", wavelength: 490, bandwidth: 65, unit: "nm" },
    SpectralBand { name: "Green", wavelength: 560, bandwidth: 60, unit: "nm" },
    SpectralBand { name: "Red", wavelength: 665, bandwidth: 30, unit: "nm" },
    SpectralBand { name: "NIR", wavelength: 865, bandwidth: 30, unit: "nm" },
    SpectralBand { name: "SWIR1", wavelength: 1610, bandwidth: 90, unit: "nm" },
    SpectralBand { name: "SWIR2", wavelength: 2200, bandwidth: 180, unit: "nm" },
];

/// Look up the spectral descriptor for `(sensor, band_idx)` (0-based).
/// Only the HLS family has a populated table; everything else is absent.
pub fn spectral_band(sensor: Sensor, band_idx: usize) -> Option<&'static SpectralBand> {
    if sensor.is_hls() {
        HLS_BANDS.get(band_idx)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_order_and_case() {
        assert_eq!(
            Sensor::classify("HLS.S30.T10TEK.2021045.v2.0_merged.tif"),
            Some(Sensor::HlsS30)
        );
        assert_eq!(
            Sensor::classify("hls.l30.t10tek.2021045.tif"),
            Some(Sensor::HlsL30)
        );
        assert_eq!(Sensor::classify("LC08_L2SP_044034.tif"), Some(Sensor::Landsat89));
        assert_eq!(Sensor::classify("LC09_L2SP_044034.tif"), Some(Sensor::Landsat89));
        assert_eq!(Sensor::classify("LE07_L1TP.tif"), Some(Sensor::Landsat7));
        assert_eq!(Sensor::classify("S2A_MSIL2A_20210214.tif"), Some(Sensor::Sentinel2));
        // S2 without a processing level token is not Sentinel-2
        assert_eq!(Sensor::classify("S2A_20210214.tif"), None);
        assert_eq!(Sensor::classify("MOD13Q1.A2021049.tif"), Some(Sensor::Modis));
        assert_eq!(Sensor::classify("random_scene.tif"), None);
    }

    #[test]
    fn hls_spectral_table_bounds() {
        let red = spectral_band(Sensor::HlsS30, 2).unwrap();
        assert_eq!(red.name, "Red");
        assert_eq!(red.wavelength, 665);
        assert!(spectral_band(Sensor::HlsS30, 6).is_none());
        assert!(spectral_band(Sensor::Landsat89, 0).is_none());
    }
}
