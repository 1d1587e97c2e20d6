//! Default machine and cutting constants.

/// Usable travel along X (machine units, centered on the origin).
pub const DEFAULT_X_RANGE: f64 = 20.0;
/// Usable travel along Y (machine units, centered on the origin).
pub const DEFAULT_Y_RANGE: f64 = 20.0;
/// Margin kept clear on each side of each axis.
pub const DEFAULT_MARGIN: f64 = 1.0;

/// Retract height between cuts.
pub const DEFAULT_SAFE_Z: f64 = 0.1;
/// Depth of every cut.
pub const DEFAULT_CUT_Z: f64 = -1.0;
/// Feed rate for plunging to cut depth.
pub const DEFAULT_PLUNGE_FEED: f64 = 100.0;
/// Feed rate while cutting.
pub const DEFAULT_CUT_FEED: f64 = 300.0;

/// Tolerance for comparing canvas geometry.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Where finished programs are written before hand-off.
pub const DEFAULT_PROGRAM_PATH: &str = "/tmp/gui_output.ngc";

/// Continuous jog velocity, signed by direction.
pub const DEFAULT_JOG_SPEED: f64 = 5.0;
