//! Parsing and validation of `mistral.toml` architecture build configuration.
//!
//! The configuration selects which primitive kinds the architecture builder
//! instantiates, which clock-buffer sub-indices are modelled, and the default
//! routing-edge delay.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
