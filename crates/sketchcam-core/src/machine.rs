//! Machine-control vocabulary
//!
//! States, modes and axes understood by the machine-control collaborator,
//! and the ordered steps of a program hand-off.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task state of the machine controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineState {
    /// Emergency stop engaged
    Estop,
    /// Emergency stop released, machine still off
    EstopReset,
    /// Machine powered on
    On,
    /// Machine powered off
    Off,
    /// State could not be determined
    Unknown,
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Estop => write!(f, "ESTOP"),
            Self::EstopReset => write!(f, "ESTOP RESET"),
            Self::On => write!(f, "ON"),
            Self::Off => write!(f, "OFF"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Execution mode of the machine controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineMode {
    Manual,
    Auto,
}

impl fmt::Display for MachineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

/// A jog-able machine axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Joint index used by the controller.
    pub fn index(self) -> u8 {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
            Self::Z => write!(f, "Z"),
        }
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(format!("Unknown axis: {}", s)),
        }
    }
}

/// One step of handing a finished program to the machine controller.
///
/// Steps run in declaration order; each must complete before the next one
/// is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandoffStep {
    /// Write the program text to the hand-off path
    WriteProgram,
    /// Clear any emergency-stop / fault state
    ResetFault,
    /// Power the machine on
    PowerOn,
    /// Switch to automatic execution mode
    AutoMode,
    /// Open the written program
    LoadProgram,
    /// Run the program from its first line
    Start,
}

impl HandoffStep {
    /// Controller-side steps, in the order they are issued.
    pub const CONTROLLER_SEQUENCE: [HandoffStep; 5] = [
        HandoffStep::ResetFault,
        HandoffStep::PowerOn,
        HandoffStep::AutoMode,
        HandoffStep::LoadProgram,
        HandoffStep::Start,
    ];
}

impl fmt::Display for HandoffStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteProgram => write!(f, "write program"),
            Self::ResetFault => write!(f, "reset fault"),
            Self::PowerOn => write!(f, "power on"),
            Self::AutoMode => write!(f, "auto mode"),
            Self::LoadProgram => write!(f, "load program"),
            Self::Start => write!(f, "start"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_state_display() {
        assert_eq!(MachineState::EstopReset.to_string(), "ESTOP RESET");
        assert_eq!(MachineState::On.to_string(), "ON");
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!("Z".parse::<Axis>().map(Axis::index), Ok(2));
        assert!("w".parse::<Axis>().is_err());
    }

    #[test]
    fn test_controller_sequence_order() {
        assert_eq!(HandoffStep::CONTROLLER_SEQUENCE[0], HandoffStep::ResetFault);
        assert_eq!(HandoffStep::CONTROLLER_SEQUENCE[4], HandoffStep::Start);
    }
}
