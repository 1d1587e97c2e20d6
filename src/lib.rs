//! # SketchCAM
//!
//! Turns a sketch of simple 2D shapes (segments, rectangles, circles,
//! ellipses, polylines) into a G-code program scaled and centered to fit a
//! machine envelope, and hands the program to a LinuxCNC controller.
//!
//! ## Architecture
//!
//! SketchCAM is organized as a workspace with multiple crates:
//!
//! 1. **sketchcam-core** - Error types, envelope and cutting parameters, machine-control vocabulary
//! 2. **sketchcam-designer** - Shape capture, bounding box, fit transform, toolpath emission, G-code text
//! 3. **sketchcam-communication** - Controller trait, hand-off sequence, linuxcncrsh client
//! 4. **sketchcam-settings** - Configuration files
//! 5. **sketchcam** - This crate: logging setup, command glue and the CLI binary

pub mod commands;

pub use sketchcam_communication as communication;
pub use sketchcam_designer as designer;
pub use sketchcam_settings as settings;

pub use sketchcam_communication::{hand_off, LinuxCncShell, MachineController, NoOpController};
pub use sketchcam_core::{Error, GenerationError, HandoffError, MachineState};
pub use sketchcam_designer::{GcodePipeline, Generation, Shape, Sketch};
pub use sketchcam_settings::Config;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with tracing
///
/// Logs go to stderr so program text printed on stdout stays clean.
/// `RUST_LOG` takes precedence; otherwise INFO, or DEBUG when `verbose`.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
