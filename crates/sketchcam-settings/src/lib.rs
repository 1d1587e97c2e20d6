//! SketchCAM Settings Crate
//!
//! Loads, validates and saves the machine, cutting, output and controller
//! configuration.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, JogSettings, OutputSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
