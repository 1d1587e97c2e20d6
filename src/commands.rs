//! Command glue shared by the CLI.
//!
//! Each function takes explicit inputs and returns `anyhow::Result` with
//! context; nothing here exits the process.

use anyhow::{bail, Context, Result};
use sketchcam_communication::{hand_off, LinuxCncShell, MachineController, NoOpController};
use sketchcam_core::{Axis, MachineState};
use sketchcam_designer::{load_program, load_sketch, GcodePipeline, Generation};
use sketchcam_settings::{default_config_path, Config};
use std::path::{Path, PathBuf};

pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(default_config_path()?),
    }
}

/// Resolves the config path and loads it, falling back to defaults when the
/// file does not exist.
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, PathBuf)> {
    let path = resolve_config_path(explicit)?;
    let config = Config::load_or_default(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    Ok((config, path))
}

/// Writes a default config file; refuses to overwrite unless `force`.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save_to_file(path)?;
    Ok(())
}

/// Compiles a sketch file with the configured envelope and parameters.
pub fn generate_from_sketch(sketch_path: &Path, config: &Config) -> Result<Generation> {
    let sketch = load_sketch(sketch_path)?;
    let store = sketch.to_store();
    let pipeline = GcodePipeline::new(config.machine, config.cutting);
    let generation = pipeline
        .generate(&store.snapshot())
        .with_context(|| format!("Cannot generate G-code for {}", sketch_path.display()))?;

    for skipped in &generation.report.skipped {
        tracing::warn!(
            "Shape {} ({}) not cut: {}",
            skipped.index,
            skipped.shape_type,
            skipped.reason
        );
    }
    Ok(generation)
}

/// Extensions of files that already hold G-code.
const PROGRAM_EXTENSIONS: [&str; 3] = ["ngc", "nc", "gcode"];

/// Program text for `input`: G-code files are sent as-is, anything else is
/// treated as a sketch and compiled.
pub fn program_text(input: &Path, config: &Config) -> Result<String> {
    let is_program = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PROGRAM_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });
    if is_program {
        load_program(input)
    } else {
        Ok(generate_from_sketch(input, config)?.gcode())
    }
}

/// Connects to the configured controller, or a logging stand-in for dry runs.
pub async fn connect(config: &Config, dry_run: bool) -> Result<Box<dyn MachineController>> {
    if dry_run {
        return Ok(Box::new(NoOpController::new()));
    }
    let shell = LinuxCncShell::connect(config.controller.clone())
        .await
        .with_context(|| format!("Cannot reach controller at {}", config.controller.address()))?;
    Ok(Box::new(shell))
}

/// Writes `program` to the configured output path and starts it.
pub async fn send_program(
    controller: &mut dyn MachineController,
    program: &str,
    config: &Config,
) -> Result<()> {
    hand_off(controller, program, &config.output.program_path).await?;
    Ok(())
}

pub async fn set_power(controller: &mut dyn MachineController, on: bool) -> Result<MachineState> {
    if on {
        controller.set_state(MachineState::EstopReset).await?;
        controller.wait_complete().await?;
        controller.set_state(MachineState::On).await?;
    } else {
        controller.set_state(MachineState::Off).await?;
    }
    controller.wait_complete().await?;
    Ok(controller.query_state().await?)
}

pub async fn jog(
    controller: &mut dyn MachineController,
    axis: Axis,
    negative: bool,
    speed: f64,
) -> Result<()> {
    let velocity = if negative { -speed } else { speed };
    controller.jog_continuous(axis, velocity).await?;
    Ok(())
}
