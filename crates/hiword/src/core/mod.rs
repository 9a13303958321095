//! Core configuration.
//!
//! [`config::ExtractorConfig`] holds the extraction thresholds and the
//! locations of the lexical resources. It can be built in code, loaded from a
//! TOML, YAML or JSON file, or discovered by walking up from a directory.

pub mod config;

pub use config::{ExtractorConfig, ResourceConfig};
