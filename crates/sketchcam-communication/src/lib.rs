//! # SketchCAM Communication
//!
//! Hands finished programs to a LinuxCNC machine controller.
//!
//! The [`MachineController`] trait is the seam between the compiler and the
//! machine: [`hand_off`] drives any implementation through the fixed
//! write → reset fault → power on → auto mode → load → start sequence.
//! [`LinuxCncShell`] talks to a running `linuxcncrsh` over TCP and
//! [`NoOpController`] only logs, for dry runs.

pub mod controller;
pub mod handoff;
pub mod linuxcnc_shell;
pub mod noop;

pub use controller::{issue_step, MachineController};
pub use handoff::{hand_off, write_program};
pub use linuxcnc_shell::{LinuxCncShell, ShellConfig};
pub use noop::NoOpController;
