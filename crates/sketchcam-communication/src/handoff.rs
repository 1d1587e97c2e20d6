//! Program hand-off.
//!
//! The program is written to the hand-off path first, then the controller is
//! walked through [`HandoffStep::CONTROLLER_SEQUENCE`]. Every request is followed by a
//! `wait_complete`; the first failure stops the sequence and names its step.

use crate::controller::{issue_step, MachineController};
use sketchcam_core::{HandoffError, HandoffStep};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Writes `text` to `path` through a sibling temporary file and a rename.
///
/// A failure at any point leaves a previous program at `path` intact.
pub fn write_program(path: &Path, text: &str) -> io::Result<()> {
    let tmp = temp_path(path);
    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            file.write_all(b"\n")?;
        }
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "program".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

/// Writes `program` to `path` and starts it on `controller`.
pub async fn hand_off<C>(
    controller: &mut C,
    program: &str,
    path: &Path,
) -> Result<(), HandoffError>
where
    C: MachineController + ?Sized,
{
    if program.trim().is_empty() {
        return Err(HandoffError::new(
            HandoffStep::WriteProgram,
            "No G-code to send",
        ));
    }

    write_program(path, program)
        .map_err(|e| HandoffError::new(HandoffStep::WriteProgram, e.to_string()))?;
    tracing::info!("Hand-off: wrote program to {}", path.display());

    for step in HandoffStep::CONTROLLER_SEQUENCE {
        tracing::info!("Hand-off via {}: {}", controller.name(), step);
        issue_step(controller, step, path)
            .await
            .map_err(|e| HandoffError::new(step, e.to_string()))?;
        controller
            .wait_complete()
            .await
            .map_err(|e| HandoffError::new(step, e.to_string()))?;
    }

    tracing::info!("Program {} started", path.display());
    Ok(())
}
