//! Core pipeline building blocks: directory classification, sensor and
//! temporal registries, configuration, and document assembly. These are
//! internal primitives consumed by the high-level `api` module.
pub mod config;
pub mod document;
pub mod scan;
pub mod sensor;
pub mod temporal;
