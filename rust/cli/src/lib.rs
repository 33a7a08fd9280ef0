//! # Showdown CLI Library
//!
//! Command-line front end of the showdown Texas Hold'em engine: a human
//! console player, bot simulations and a few inspection tools.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments and runs the matching subcommand with the
//! given streams, returning the process exit code.
//!
//! ```
//! use std::io;
//! let args = vec!["showdown", "deal", "--seed", "42"];
//! let code = showdown_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: A human against bots, answering on stdin
//! - `sim`: Bots-only matches with optional narration and hand history
//! - `eval`: Rank a hand and list its outs
//! - `deal`: Deal pockets and a board from a seeded deck
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{COMMANDS, Commands, ShowdownCli};
use commands::{
    Overrides, handle_cfg_command, handle_deal_command, handle_eval_command,
    handle_play_command, handle_sim_command,
};

pub use error::CliError;

/// Maps a handler result to an exit code, reporting failures on `err`.
fn finish(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            tracing::info!(%msg, "interrupted");
            exit_code::INTERRUPTED
        }
        Err(e) => {
            if ui::write_error(err, &e.to_string()).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Command-line arguments including the program name
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when the human left a
/// `play` match. `play` reads its answers from the process stdin.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// [`run`] with an explicit input stream for `play`.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn std::io::BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = ShowdownCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: showdown <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: showdown --help");
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Cfg => handle_cfg_command(out),
                Commands::Play {
                    bots,
                    bot,
                    seed,
                    small_blind,
                    name,
                    history,
                } => handle_play_command(
                    Overrides {
                        seed,
                        small_blind,
                        bots,
                        bot,
                    },
                    &name,
                    history,
                    out,
                    stdin,
                ),
                Commands::Sim {
                    bots,
                    bot,
                    seed,
                    matches,
                    history,
                    quiet,
                } => handle_sim_command(
                    Overrides {
                        seed,
                        small_blind: None,
                        bots,
                        bot,
                    },
                    matches,
                    history,
                    quiet,
                    out,
                ),
                Commands::Eval { cards } => handle_eval_command(&cards, out),
                Commands::Deal { seed, players } => handle_deal_command(seed, players, out),
            };
            finish(result, err)
        }
    }
}
