//! Output macros shared by the command handlers and the console agents.

/// Writes a line and returns [`crate::exit_code::ERROR`] from the enclosing
/// function when the stream is gone.
///
/// ```ignore
/// write_or_exit!(err, "Error: {}", message);
/// ```
macro_rules! write_or_exit {
    ($dest:expr, $($arg:tt)*) => {
        if writeln!($dest, $($arg)*).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
}

/// Writes a line from inside a notification, which has no way to report
/// failure: a broken stream is logged and the line dropped.
macro_rules! say {
    ($dest:expr, $($arg:tt)*) => {
        if let Err(e) = writeln!($dest, $($arg)*) {
            tracing::warn!(error = %e, "console output failed");
        }
    };
}
