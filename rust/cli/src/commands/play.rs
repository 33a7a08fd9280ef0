//! # Play Command
//!
//! A human against a table of bots. The match runs until the human busts
//! or is the last one seated; quitting (`q` or end of input) folds every
//! remaining hand and ends with exit code 130.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use showdown_ai::create_ai;
use showdown_engine::game::Game;
use showdown_engine::logger::{HandLogger, HandRecorder};

use super::{Overrides, game_config, resolve_config};
use crate::console::ConsolePlayer;
use crate::error::CliError;
use crate::formatters::format_standings;

/// Spectator name of the hand-history recorder.
pub(crate) const HISTORY_SEAT: &str = "history";

/// Handle the play command.
///
/// # Arguments
///
/// * `overrides` - Flags overriding the configured seed, blinds and bots
/// * `name` - The human's seat name
/// * `history` - Optional JSON lines file receiving every finished hand
/// * `out` - Table narration and prompts
/// * `stdin` - The human's answers, one per line
///
/// # Errors
///
/// Invalid configuration, a name clashing with a bot, an unwritable history
/// file, and [`CliError::Interrupted`] when the human left the match.
pub fn handle_play_command(
    overrides: Overrides,
    name: &str,
    history: Option<PathBuf>,
    out: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = resolve_config(overrides)?;
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let kind = cfg.bot.to_ascii_lowercase();
    let mut logger = history.map(HandLogger::create).transpose()?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(
        out,
        "{} against {} {} bots, blinds {}/{}. Type help for the actions.",
        name,
        cfg.bots,
        kind,
        cfg.small_blind,
        cfg.big_blind()
    )?;

    let (standings, quit) = {
        let mut game = Game::with_config(game_config(&cfg), seed);
        let player = ConsolePlayer::new(name, stdin, out, cfg.input_policy);
        let quit = player.quit_flag();
        game.add_player(name, Box::new(player))?;
        for i in 1..=u64::from(cfg.bots) {
            let bot = create_ai(&kind, seed.wrapping_add(i))?;
            game.add_player(format!("{}-{}", kind, i), bot)?;
        }
        if let Some(logger) = logger.as_mut() {
            game.add_spectator(HISTORY_SEAT, Box::new(HandRecorder::new(logger, Some(seed))))?;
        }
        game.set_must_survive([name]);
        (game.run()?, quit)
    };

    writeln!(out)?;
    if standings.len() == 1 && standings[0].0 == name {
        writeln!(out, "You won the match!")?;
    } else if standings.iter().all(|(n, _)| n != name) {
        writeln!(out, "You are out of chips.")?;
    }
    for line in format_standings(&standings) {
        writeln!(out, "{}", line)?;
    }

    if quit.get() {
        return Err(CliError::Interrupted(format!("{} left the match", name)));
    }
    Ok(())
}
