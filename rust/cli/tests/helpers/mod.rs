//! Shared helpers for the integration tests.
//!
//! - `cli_runner`: [`cli_runner::CliRunner`] runs the `showdown` binary in a
//!   scratch directory and captures exit code, stdout and stderr.
//!
//! ```rust,ignore
//! use crate::helpers::cli_runner::CliRunner;
//!
//! let cli = CliRunner::new();
//! let res = cli.run(&["deal", "--seed", "1"]);
//! assert_eq!(res.exit_code, 0);
//! ```
pub mod cli_runner;
