//! Configuration and settings management for SketchCAM
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into sections:
//! - Machine envelope (axis ranges and margin)
//! - Cutting parameters (Z levels, feeds, units)
//! - Output (where programs are written for hand-off)
//! - Controller (linuxcncrsh connection)
//! - Jog speed

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use sketchcam_communication::ShellConfig;
use sketchcam_core::constants::{DEFAULT_JOG_SPEED, DEFAULT_PROGRAM_PATH};
use sketchcam_core::{CutParameters, MachineEnvelope};
use std::path::{Path, PathBuf};

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Program file handed to the controller
    pub program_path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            program_path: PathBuf::from(DEFAULT_PROGRAM_PATH),
        }
    }
}

/// Jog settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JogSettings {
    /// Continuous jog velocity magnitude
    pub speed: f64,
}

impl Default for JogSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_JOG_SPEED,
        }
    }
}

/// Complete application configuration
///
/// Missing sections and fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub machine: MachineEnvelope,
    pub cutting: CutParameters,
    pub output: OutputSettings,
    pub controller: ShellConfig,
    pub jog: JogSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

/// `<config dir>/sketchcam/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::UnsupportedPlatform("no configuration directory".to_string())
    })?;
    Ok(dir.join("sketchcam").join("config.toml"))
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError(e.to_string()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.machine
            .validate()
            .map_err(|e| SettingsError::invalid("machine", e.to_string()))?;

        self.cutting
            .validate()
            .map_err(|reason| SettingsError::invalid("cutting", reason))?;

        if self.output.program_path.as_os_str().is_empty() {
            return Err(SettingsError::invalid(
                "output.program_path",
                "must not be empty",
            ));
        }

        if self.controller.host.trim().is_empty() {
            return Err(SettingsError::invalid("controller.host", "must not be empty"));
        }
        if self.controller.port == 0 {
            return Err(SettingsError::invalid("controller.port", "must be > 0"));
        }
        if self.controller.timeout_ms == 0 {
            return Err(SettingsError::invalid("controller.timeout_ms", "must be > 0"));
        }

        if self.jog.speed.is_nan() || self.jog.speed <= 0.0 {
            return Err(SettingsError::invalid("jog.speed", "must be > 0"));
        }

        Ok(())
    }
}
