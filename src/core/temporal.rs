//! Temporal semantics derived from filenames: acquisition dates, coverage
//! intervals, sampling cadence, and windowing strategy.
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::types::{TemporalResolution, TemporalUnit};

// HLS-style acquisition token: ".YYYYDOY." (year + day of year)
static YEAR_DOY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(\d{4})(\d{3})\.").unwrap());

// Generic calendar date: YYYY-MM-DD, YYYY_MM_DD, YYYYMMDD
static YEAR_MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})[-_]?(\d{2})[-_]?(\d{2})").unwrap());

static SUBSET_SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)x(\d+)").unwrap());

/// Extract an acquisition date from a filename.
///
/// Patterns are tried in order, first success wins: the year+day-of-year
/// token, then a generic `YYYY[-_]?MM[-_]?DD`. Values that don't form a real
/// calendar date (day-of-year 400, month 13) fall through to the next
/// pattern or to `None`.
pub fn extract_date(filename: &str) -> Option<NaiveDate> {
    if let Some(caps) = YEAR_DOY.captures(filename) {
        let year: i32 = caps[1].parse().ok()?;
        let doy: u32 = caps[2].parse().ok()?;
        if let Some(date) = NaiveDate::from_yo_opt(year, doy) {
            return Some(date);
        }
    }

    if let Some(caps) = YEAR_MONTH_DAY.captures(filename) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    None
}

/// All extractable acquisition dates across `files`, sorted ascending
fn collect_dates<'a>(files: impl IntoIterator<Item = &'a Path>) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = files
        .into_iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .filter_map(extract_date)
        .collect();
    dates.sort();
    dates
}

/// Dataset temporal coverage: a single ISO date, or `earliest/latest` when
/// more than one acquisition date exists
pub fn temporal_coverage<'a>(files: impl IntoIterator<Item = &'a Path>) -> Option<String> {
    let dates = collect_dates(files);
    match dates.as_slice() {
        [] => None,
        [only] => Some(only.format("%Y-%m-%d").to_string()),
        [first, .., last] => Some(format!(
            "{}/{}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        )),
    }
}

/// Dataset sampling cadence from the lower-median of positive day deltas
/// between consecutive acquisition dates.
///
/// Requires at least two distinct dates; same-day observations contribute
/// zero deltas and are discarded.
pub fn temporal_resolution<'a>(
    files: impl IntoIterator<Item = &'a Path>,
) -> Option<TemporalResolution> {
    let dates = collect_dates(files);
    if dates.len() < 2 {
        return None;
    }

    let mut deltas: Vec<i64> = dates
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days())
        .filter(|&d| d > 0)
        .collect();
    if deltas.is_empty() {
        return None;
    }
    deltas.sort();

    // Lower median: truncating index, not interpolated for even counts
    let median = deltas[deltas.len() / 2];
    Some(bucket_cadence(median))
}

fn bucket_cadence(median_days: i64) -> TemporalResolution {
    if median_days < 2 {
        return TemporalResolution { value: median_days, unit: TemporalUnit::Day };
    }
    // Whole-week cadences (7, 14, 21, ...) are reported in weeks; any other
    // spacing under two months stays in days, so a 16-day revisit is
    // "16 days", not "2 weeks".
    if median_days % 7 == 0 && median_days < 60 {
        let weeks = median_days / 7;
        return if weeks == 1 {
            TemporalResolution { value: 1, unit: TemporalUnit::Week }
        } else {
            TemporalResolution { value: weeks, unit: TemporalUnit::Weeks }
        };
    }
    if median_days < 60 {
        return TemporalResolution { value: median_days, unit: TemporalUnit::Days };
    }
    let months = (median_days as f64 / 30.44).round() as i64;
    if months == 1 {
        TemporalResolution { value: 1, unit: TemporalUnit::Month }
    } else {
        TemporalResolution { value: months, unit: TemporalUnit::Months }
    }
}

/// Detect a sampling/windowing strategy from a filename, first match wins
pub fn sampling_strategy(filename: &str) -> Option<String> {
    let lower = filename.to_lowercase();

    if lower.contains("subsetted") {
        if let Some(caps) = SUBSET_SIZE.captures(filename) {
            return Some(format!(
                "Subsetted to {}x{} pixel windows",
                &caps[1], &caps[2]
            ));
        }
    }
    if lower.contains("window") {
        return Some("Windowed sampling".to_string());
    }
    if lower.contains("tile") {
        return Some("Tiled sampling".to_string());
    }

    None
}
