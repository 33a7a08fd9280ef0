//! # Sim Command
//!
//! Bots-only matches, narrated by a console spectator unless `--quiet`.
//! Match `m` (counting from 0) is seeded with `seed + m`.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use showdown_ai::create_ai;
use showdown_engine::game::Game;
use showdown_engine::logger::{HandLogger, HandRecorder};

use super::play::HISTORY_SEAT;
use super::{Overrides, game_config, resolve_config};
use crate::console::ConsoleSpectator;
use crate::error::CliError;
use crate::formatters::format_standings;

const NARRATOR_SEAT: &str = "console";

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    wins: u32,
    chips: u64,
}

/// Handle the sim command.
///
/// `bots` counts every seat; when unset the table gets the configured bot
/// count plus the seat a human would take in `play`.
pub fn handle_sim_command(
    overrides: Overrides,
    matches: u32,
    history: Option<PathBuf>,
    quiet: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seats = overrides.bots;
    let cfg = resolve_config(Overrides {
        bots: None,
        ..overrides
    })?;
    let seats = seats.unwrap_or(cfg.bots + 1);
    if seats < 2 {
        return Err(CliError::InvalidInput(
            "a simulation needs at least 2 bots".into(),
        ));
    }
    let base_seed = cfg.seed.unwrap_or_else(rand::random);
    let kind = cfg.bot.to_ascii_lowercase();
    let mut logger = history.map(HandLogger::create).transpose()?;
    let mut tally: BTreeMap<String, Tally> = BTreeMap::new();

    writeln!(out, "Seed: {}", base_seed)?;
    for m in 0..matches {
        let seed = base_seed.wrapping_add(u64::from(m));
        let (standings, hands) = {
            let mut game = Game::with_config(game_config(&cfg), seed);
            for i in 1..=u64::from(seats) {
                let bot = create_ai(&kind, seed.wrapping_add(i))?;
                game.add_player(format!("{}-{}", kind, i), bot)?;
            }
            if !quiet {
                game.add_spectator(NARRATOR_SEAT, Box::new(ConsoleSpectator::new(&mut *out)))?;
            }
            if let Some(logger) = logger.as_mut() {
                game.add_spectator(HISTORY_SEAT, Box::new(HandRecorder::new(logger, Some(seed))))?;
            }
            (game.run()?, game.hands_played())
        };
        tracing::info!(match_no = m + 1, seed, hands, "simulation match finished");

        for (i, (name, chips)) in standings.iter().enumerate() {
            let entry = tally.entry(name.clone()).or_default();
            entry.chips += u64::from(*chips);
            if i == 0 {
                entry.wins += 1;
            }
        }
        writeln!(out)?;
        writeln!(
            out,
            "Match {} (seed {}): {} hands",
            m + 1,
            seed,
            hands
        )?;
        for line in format_standings(&standings) {
            writeln!(out, "{}", line)?;
        }
    }

    if matches > 1 {
        let mut totals: Vec<(&String, &Tally)> = tally.iter().collect();
        totals.sort_by(|a, b| b.1.wins.cmp(&a.1.wins).then(b.1.chips.cmp(&a.1.chips)));
        writeln!(out)?;
        writeln!(out, "Totals over {} matches", matches)?;
        for (name, t) in totals {
            writeln!(out, "  {:<12} wins {:>4}  chips {:>10}", name, t.wins, t.chips)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn run_sim(seed: u64, matches: u32, quiet: bool) -> String {
        let mut out = Vec::new();
        let overrides = Overrides {
            seed: Some(seed),
            bots: Some(3),
            ..Overrides::default()
        };
        handle_sim_command(overrides, matches, None, quiet, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    #[serial]
    fn quiet_run_only_prints_results() {
        let output = run_sim(11, 1, true);
        assert!(output.contains("Match 1 (seed 11)"));
        assert!(!output.contains("deals the cards"));
        assert!(!output.contains("Totals"));
    }

    #[test]
    #[serial]
    fn narrated_runs_are_reproducible() {
        let a = run_sim(5, 2, false);
        assert!(a.contains("deals the cards"));
        assert!(a.contains("Totals over 2 matches"));
        assert_eq!(a, run_sim(5, 2, false));
    }

    #[test]
    #[serial]
    fn blinds_too_large_for_the_table_are_rejected() {
        let mut out = Vec::new();
        let overrides = Overrides {
            seed: Some(1),
            small_blind: Some(60_000_000),
            bots: Some(10),
            ..Overrides::default()
        };
        let result = handle_sim_command(overrides, 1, None, true, &mut out);
        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(out.is_empty());
    }

    #[test]
    #[serial]
    fn history_file_gets_every_hand() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.jsonl");
        let mut out = Vec::new();
        let overrides = Overrides {
            seed: Some(3),
            bots: Some(2),
            ..Overrides::default()
        };
        handle_sim_command(overrides, 2, Some(path.clone()), true, &mut out).unwrap();
        let lines = std::fs::read_to_string(&path).unwrap().lines().count();
        assert!(lines >= 2);
    }
}
