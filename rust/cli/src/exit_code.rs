//! Process exit codes of the `showdown` binary.

pub const SUCCESS: i32 = 0;

/// Any failure: bad arguments, configuration, I/O or a refused table setup.
pub const ERROR: i32 = 2;

/// The human left a `play` match.
pub const INTERRUPTED: i32 = 130;
