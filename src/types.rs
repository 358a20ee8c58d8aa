//! Shared types and enums used across the generator.
//! Includes dataset partitions (`Split`), row-level roles (`FileRole`),
//! CRS units (`CrsUnit`), and temporal cadence (`TemporalUnit`,
//! `TemporalResolution`).
use serde::{Deserialize, Serialize};

/// Dataset partition a file belongs to, derived from its path segments.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Training,
    Validation,
    Test,
    Unknown,
}

impl Split {
    /// Classify a single path segment against the ordered split rules.
    /// Segments are compared whole, case-insensitively; returns `None`
    /// when the segment names no split.
    pub fn from_path_segment(segment: &str) -> Option<Split> {
        let lower = segment.to_lowercase();
        match lower.as_str() {
            "training" | "train" => Some(Split::Training),
            "validation" | "val" | "valid" => Some(Split::Validation),
            "test" | "testing" => Some(Split::Test),
            _ => None,
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Split::Training => "training",
            Split::Validation => "validation",
            Split::Test => "test",
            Split::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Row-level role of a raster file, derived from its filename alone.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Images,
    Masks,
}

impl FileRole {
    /// Total classification: a filename containing "mask" or "label"
    /// (case-insensitive) is a mask, everything else is an image.
    pub fn from_filename(filename: &str) -> FileRole {
        let lower = filename.to_lowercase();
        if lower.contains("mask") || lower.contains("label") {
            FileRole::Masks
        } else {
            FileRole::Images
        }
    }
}

impl std::fmt::Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FileRole::Images => "images",
            FileRole::Masks => "masks",
        };
        write!(f, "{}", s)
    }
}

/// Linear unit of a coordinate reference system: projected systems measure
/// in meters, geographic systems in degrees.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrsUnit {
    Meters,
    Degrees,
}

impl std::fmt::Display for CrsUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CrsUnit::Meters => "meters",
            CrsUnit::Degrees => "degrees",
        };
        write!(f, "{}", s)
    }
}

/// Unit bucket for the dataset sampling cadence.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalUnit {
    Day,
    Days,
    Week,
    Weeks,
    Month,
    Months,
}

impl std::fmt::Display for TemporalUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TemporalUnit::Day => "day",
            TemporalUnit::Days => "days",
            TemporalUnit::Week => "week",
            TemporalUnit::Weeks => "weeks",
            TemporalUnit::Month => "month",
            TemporalUnit::Months => "months",
        };
        write!(f, "{}", s)
    }
}

/// Typical time spacing between successive acquisitions.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TemporalResolution {
    pub value: i64,
    pub unit: TemporalUnit,
}
