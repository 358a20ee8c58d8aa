//! CRS identifier and unit inference.
//!
//! GDAL gives us a direct EPSG code only when the CRS carries an EPSG
//! authority node. Plenty of real-world GeoTIFFs don't, so we fall back to
//! parsing the WKT text with an ordered set of UTM heuristics. If nothing
//! matches, the identifier stays absent; it is never guessed.
use std::sync::LazyLock;

use gdal::spatial_ref::SpatialRef;
use regex::Regex;

use crate::types::CrsUnit;

// "UTM Zone 10, Northern Hemisphere" (PROJCS name form)
static UTM_ZONE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)UTM Zone (\d+)[,\s]+(Northern|Southern)").unwrap()
});

// "UTM Zone 23S" (compact suffix form)
static UTM_ZONE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"UTM [Zz]one (\d+)([NS])").unwrap());

static CENTRAL_MERIDIAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"central_meridian["\s,]+(-?\d+\.?\d*)"#).unwrap());

static FALSE_NORTHING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"false_northing["\s,]+(\d+\.?\d*)"#).unwrap());

fn utm_epsg(zone: u32, north: bool) -> String {
    let code = if north { 32600 + zone } else { 32700 + zone };
    format!("EPSG:{}", code)
}

/// Derive an `EPSG:<code>` identifier for a CRS.
///
/// Prefers the authority code exposed by the CRS object itself, then falls
/// back to [`infer_epsg_from_wkt`] on the WKT text.
pub fn epsg_identifier(srs: &SpatialRef, wkt: &str) -> Option<String> {
    if let (Some(name), Ok(code)) = (srs.auth_name(), srs.auth_code()) {
        if name == "EPSG" {
            return Some(format!("EPSG:{}", code));
        }
    }
    infer_epsg_from_wkt(wkt)
}

/// Infer a UTM EPSG code from WKT text, first match wins:
///
/// 1. `UTM Zone <N>, <Northern|Southern> ...` in the PROJCS name;
/// 2. `UTM Zone <N><N|S>` compact form;
/// 3. a `Transverse_Mercator` projection, deriving the zone from the
///    `central_meridian` and the hemisphere from a positive
///    `false_northing`.
pub fn infer_epsg_from_wkt(wkt: &str) -> Option<String> {
    if let Some(caps) = UTM_ZONE_WORD.captures(wkt) {
        let zone: u32 = caps[1].parse().ok()?;
        let north = caps[2].to_uppercase().starts_with('N');
        return Some(utm_epsg(zone, north));
    }

    if let Some(caps) = UTM_ZONE_SUFFIX.captures(wkt) {
        let zone: u32 = caps[1].parse().ok()?;
        let north = &caps[2] == "N";
        return Some(utm_epsg(zone, north));
    }

    if wkt.contains("Transverse_Mercator") {
        if let Some(caps) = CENTRAL_MERIDIAN.captures(wkt) {
            let central_meridian: f64 = caps[1].parse().ok()?;
            let zone = ((central_meridian + 180.0) / 6.0).floor() as u32 + 1;
            let north = match FALSE_NORTHING.captures(wkt) {
                Some(fn_caps) => fn_caps[1].parse::<f64>().map(|v| v <= 0.0).unwrap_or(true),
                None => true,
            };
            return Some(utm_epsg(zone, north));
        }
    }

    None
}

/// Linear unit of a CRS: projected systems measure in meters, everything
/// else reports degrees.
pub fn unit_of(srs: &SpatialRef) -> CrsUnit {
    if srs.is_projected() {
        CrsUnit::Meters
    } else {
        CrsUnit::Degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utm_zone_name_with_hemisphere_word() {
        let wkt = r#"PROJCS["UTM Zone 10, Northern Hemisphere",GEOGCS["WGS 84"]]"#;
        assert_eq!(infer_epsg_from_wkt(wkt), Some("EPSG:32610".to_string()));

        let wkt = r#"PROJCS["utm zone 33, southern hemisphere",GEOGCS["WGS 84"]]"#;
        assert_eq!(infer_epsg_from_wkt(wkt), Some("EPSG:32733".to_string()));
    }

    #[test]
    fn utm_zone_name_with_suffix() {
        let wkt = r#"PROJCS["WGS 84 / UTM Zone 23S",GEOGCS["WGS 84"]]"#;
        assert_eq!(infer_epsg_from_wkt(wkt), Some("EPSG:32723".to_string()));
    }

    #[test]
    fn transverse_mercator_central_meridian() {
        // zone = floor((-117 + 180) / 6) + 1 = 11, no false_northing -> north
        let wkt = r#"PROJCS["unnamed",PROJECTION["Transverse_Mercator"],PARAMETER["central_meridian",-117.0],PARAMETER["scale_factor",0.9996]]"#;
        assert_eq!(infer_epsg_from_wkt(wkt), Some("EPSG:32611".to_string()));
    }

    #[test]
    fn transverse_mercator_false_northing_selects_south() {
        let wkt = r#"PROJCS["unnamed",PROJECTION["Transverse_Mercator"],PARAMETER["central_meridian",-51.0],PARAMETER["false_northing",10000000]]"#;
        // zone = floor(129 / 6) + 1 = 22, positive false_northing -> south
        assert_eq!(infer_epsg_from_wkt(wkt), Some("EPSG:32722".to_string()));
    }

    #[test]
    fn unrelated_wkt_yields_nothing() {
        let wkt = r#"GEOGCS["WGS 84",DATUM["WGS_1984"]]"#;
        assert_eq!(infer_epsg_from_wkt(wkt), None);
    }
}
