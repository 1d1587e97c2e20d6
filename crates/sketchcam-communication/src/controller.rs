//! Machine controller trait.

use async_trait::async_trait;
use sketchcam_core::{Axis, ControllerError, HandoffStep, MachineMode, MachineState};
use std::path::Path;

/// Blocking requests understood by the machine-control collaborator.
///
/// Each request returns once the controller has accepted it; callers that
/// need the effect to have finished follow up with
/// [`wait_complete`](MachineController::wait_complete).
#[async_trait]
pub trait MachineController: Send {
    /// Get the controller name
    fn name(&self) -> &str;

    /// Request a task state change (estop reset, power on/off)
    async fn set_state(&mut self, state: MachineState) -> Result<(), ControllerError>;

    /// Request an execution mode change
    async fn set_mode(&mut self, mode: MachineMode) -> Result<(), ControllerError>;

    /// Open a program file that already exists on the controller host
    async fn program_open(&mut self, path: &Path) -> Result<(), ControllerError>;

    /// Run the open program starting at `line`
    async fn run_from(&mut self, line: u32) -> Result<(), ControllerError>;

    /// Wait until the last request has finished executing
    async fn wait_complete(&mut self) -> Result<(), ControllerError>;

    /// Start a continuous jog; the sign of `velocity` gives the direction
    async fn jog_continuous(&mut self, axis: Axis, velocity: f64)
        -> Result<(), ControllerError>;

    /// Read the current task state
    async fn query_state(&mut self) -> Result<MachineState, ControllerError>;

    /// End the session; later requests fail with `NotConnected`
    async fn disconnect(&mut self) -> Result<(), ControllerError> {
        Ok(())
    }
}

/// Issues the controller request belonging to one hand-off step.
///
/// [`HandoffStep::WriteProgram`] is local file work and issues nothing.
pub async fn issue_step<C>(
    controller: &mut C,
    step: HandoffStep,
    path: &Path,
) -> Result<(), ControllerError>
where
    C: MachineController + ?Sized,
{
    match step {
        HandoffStep::WriteProgram => Ok(()),
        HandoffStep::ResetFault => controller.set_state(MachineState::EstopReset).await,
        HandoffStep::PowerOn => controller.set_state(MachineState::On).await,
        HandoffStep::AutoMode => controller.set_mode(MachineMode::Auto).await,
        HandoffStep::LoadProgram => controller.program_open(path).await,
        HandoffStep::Start => controller.run_from(0).await,
    }
}
