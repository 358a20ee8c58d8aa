#![doc = r#"
GEOCROISSANT — a GeoCroissant metadata generator for GeoTIFF datasets.

This crate turns a directory tree of geospatial raster files into a single
GeoCroissant JSON-LD document (the MLCommons Croissant dataset-description
format extended with geospatial terms): spatial and temporal coverage,
sensor and spectral band semantics, sampling cadence, and machine-readable
field definitions binding filename patterns to semantic roles (image vs.
mask). It powers the `geocroissant` CLI and can be embedded in your own
Rust applications.

Stability
---------
The public library API is experimental in initial releases. Breaking
changes can occur.

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Add dependency
--------------
```toml
[dependencies]
geocroissant = "0.1"
```

Quick start: generate a document for a directory
------------------------------------------------
```rust,no_run
use std::path::Path;
use geocroissant::{Generator, GeneratorConfig};

fn main() -> geocroissant::Result<()> {
    let generator = Generator::new(GeneratorConfig::default());
    let result = generator.generate_to_path(
        Path::new("/data/burn_scars"),
        Path::new("/data/burn_scars/geocroissant.json"),
    )?;
    println!(
        "extracted={} failed={}",
        result.files_extracted, result.files_failed
    );
    Ok(())
}
```

Deterministic output
--------------------
`Generator::generate_with_date` takes the "current date" as a parameter;
for a fixed date and an unchanged directory two runs produce byte-identical
documents.

```rust,no_run
use std::path::Path;
use chrono::NaiveDate;
use geocroissant::Generator;

fn main() -> geocroissant::Result<()> {
    let generator = Generator::default();
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let result = generator.generate_with_date(Path::new("/data/burn_scars"), today)?;
    println!("{}", serde_json::to_string_pretty(&result.document)?);
    Ok(())
}
```

Error handling
--------------
All public functions return `geocroissant::Result<T>`; match on
`geocroissant::Error` to handle specific cases. A directory without any
raster files fails with `Error::Discovery` before extraction begins;
individual unreadable files are skipped with a warning, and only when every
file fails does the run abort with `Error::NoSampleAvailable`.

```rust,no_run
use std::path::Path;
use geocroissant::{Error, Generator};

fn main() {
    match Generator::default().generate(Path::new("/data/empty")) {
        Ok(result) => println!("{} files described", result.files_extracted),
        Err(Error::Discovery { root }) => eprintln!("no rasters under {:?}", root),
        Err(Error::NoSampleAvailable { failed }) => {
            eprintln!("all {failed} files failed extraction")
        }
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — directory classification, sensor/temporal registries, and
  document assembly.
- [`io`] — GDAL raster metadata extraction, CRS inference, cache writing.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::config::GeneratorConfig;
pub use error::{Error, Result};
pub use types::{CrsUnit, FileRole, Split, TemporalResolution, TemporalUnit};

// Directory scanning
pub use core::scan::{FileEntry, FileInventory, scan_directory};

// Registries
pub use core::sensor::{HLS_BANDS, Sensor, SpectralBand, spectral_band};

// Raster metadata extraction
pub use io::raster::{
    BandMetadata, BandStatistics, GeoBounds, RasterError, RasterMetadata, RasterMetadataExtractor,
};

// High-level API re-exports
pub use api::{GeneratedDocument, Generator};
