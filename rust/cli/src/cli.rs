//! Command-line definition of the `showdown` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::MAX_BOTS;

#[derive(Parser, Debug)]
#[command(
    name = "showdown",
    version,
    about = "Texas Hold'em tables for humans and bots"
)]
pub struct ShowdownCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Flags left unset fall back to the resolved configuration.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a match against bots until you bust or win
    Play {
        /// Number of bot opponents
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=MAX_BOTS as i64))]
        bots: Option<u8>,
        /// Bot kind: random or simple
        #[arg(long)]
        bot: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Small blind; the big blind is twice as much
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        small_blind: Option<u32>,
        /// Your name at the table
        #[arg(long, default_value = "you")]
        name: String,
        /// Append every finished hand as a JSON line to this file
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Let bots play whole matches against each other
    Sim {
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=MAX_BOTS as i64 + 1))]
        bots: Option<u8>,
        #[arg(long)]
        bot: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Matches to play, each seeded from the previous seed plus one
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        matches: u32,
        #[arg(long)]
        history: Option<PathBuf>,
        /// Only print the final standings
        #[arg(long)]
        quiet: bool,
    },
    /// Rank a hand and list its outs
    Eval {
        /// Five to seven cards, e.g. "As Ks Qs Js 9d"
        #[arg(long)]
        cards: String,
    },
    /// Deal pockets and a board from a seeded deck
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=10))]
        players: u8,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

/// Names of the subcommands, as listed in usage errors.
pub const COMMANDS: &[&str] = &["play", "sim", "eval", "deal", "cfg"];
