//! G-code text generation from toolpath programs.
//!
//! One command per line, positional words only, every number with exactly two
//! decimals:
//!
//! ```text
//! G21
//! G90
//! G0 Z0.10
//! G0 X-9.00 Y-9.00
//! G1 Z-1.00 F100.00
//! G1 X9.00 Y-9.00 F300.00
//! G1 X9.00 Y9.00
//! ...
//! M30
//! ```

use crate::toolpath::{ArcDirection, MotionCommand, ToolpathProgram};
use std::fmt;

/// Formats a numeric word value with two decimals, never as `-0.00`.
pub fn format_value(value: f64) -> String {
    let text = format!("{:.2}", value);
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionCommand::SetUnits(units) => write!(f, "{}", units.gcode_word()),
            MotionCommand::SetAbsoluteMode => write!(f, "G90"),
            MotionCommand::RapidMove(p) => {
                write!(f, "G0 X{} Y{}", format_value(p.x), format_value(p.y))
            }
            MotionCommand::Plunge { z, feed } => {
                write!(f, "G1 Z{} F{}", format_value(*z), format_value(*feed))
            }
            MotionCommand::LinearMove { to, feed } => {
                write!(f, "G1 X{} Y{}", format_value(to.x), format_value(to.y))?;
                if let Some(feed) = feed {
                    write!(f, " F{}", format_value(*feed))?;
                }
                Ok(())
            }
            MotionCommand::ArcMove {
                direction,
                to,
                offset,
            } => {
                let code = match direction {
                    ArcDirection::Clockwise => "G2",
                    ArcDirection::CounterClockwise => "G3",
                };
                write!(
                    f,
                    "{} X{} Y{} I{} J{}",
                    code,
                    format_value(to.x),
                    format_value(to.y),
                    format_value(offset.x),
                    format_value(offset.y)
                )
            }
            MotionCommand::Retract(z) => write!(f, "G0 Z{}", format_value(*z)),
            MotionCommand::ProgramEnd => write!(f, "M30"),
        }
    }
}

impl ToolpathProgram {
    /// One line per command.
    pub fn lines(&self) -> Vec<String> {
        self.commands().iter().map(ToString::to_string).collect()
    }

    /// Newline-joined program text, without a trailing newline.
    pub fn to_gcode(&self) -> String {
        self.lines().join("\n")
    }
}

impl fmt::Display for ToolpathProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_gcode())
    }
}
