//! A controller that accepts every request and only logs it.
//!
//! Used for `--dry-run` hand-offs and in tests.

use crate::controller::MachineController;
use async_trait::async_trait;
use sketchcam_core::{Axis, ControllerError, MachineMode, MachineState};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct NoOpController {
    state: MachineState,
    mode: MachineMode,
    program: Option<PathBuf>,
}

impl Default for NoOpController {
    fn default() -> Self {
        Self::new()
    }
}

impl NoOpController {
    pub fn new() -> Self {
        Self {
            state: MachineState::Estop,
            mode: MachineMode::Manual,
            program: None,
        }
    }

    pub fn mode(&self) -> MachineMode {
        self.mode
    }

    /// The last program opened, if any.
    pub fn program(&self) -> Option<&Path> {
        self.program.as_deref()
    }
}

#[async_trait]
impl MachineController for NoOpController {
    fn name(&self) -> &str {
        "no-op"
    }

    async fn set_state(&mut self, state: MachineState) -> Result<(), ControllerError> {
        tracing::info!("[dry-run] state -> {}", state);
        self.state = state;
        Ok(())
    }

    async fn set_mode(&mut self, mode: MachineMode) -> Result<(), ControllerError> {
        tracing::info!("[dry-run] mode -> {}", mode);
        self.mode = mode;
        Ok(())
    }

    async fn program_open(&mut self, path: &Path) -> Result<(), ControllerError> {
        tracing::info!("[dry-run] open {}", path.display());
        self.program = Some(path.to_path_buf());
        Ok(())
    }

    async fn run_from(&mut self, line: u32) -> Result<(), ControllerError> {
        if self.program.is_none() {
            return Err(ControllerError::CommandRejected {
                reason: "no program open".to_string(),
            });
        }
        tracing::info!("[dry-run] run from line {}", line);
        Ok(())
    }

    async fn wait_complete(&mut self) -> Result<(), ControllerError> {
        Ok(())
    }

    async fn jog_continuous(
        &mut self,
        axis: Axis,
        velocity: f64,
    ) -> Result<(), ControllerError> {
        tracing::info!("[dry-run] jog {} at {:.2}", axis, velocity);
        Ok(())
    }

    /// Reports states the way linuxcncrsh does: a powered-off machine with
    /// the estop released reads as ESTOP RESET.
    async fn query_state(&mut self) -> Result<MachineState, ControllerError> {
        match self.state {
            MachineState::Off => Ok(MachineState::EstopReset),
            state => Ok(state),
        }
    }
}
