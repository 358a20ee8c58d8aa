//! Command Line Interface (CLI) layer for the GeoCroissant generator.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that wires user-provided options
//! to the library functionality exposed via `geocroissant::api`.
//!
//! If you are embedding the generator into another application, prefer
//! using the high-level `geocroissant::api` module instead of calling the
//! CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
