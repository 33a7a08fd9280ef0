//! One module per subcommand.
//!
//! Every handler has the shape `handle_X_command(..., out: &mut dyn Write) ->
//! Result<(), CliError>`; output streams are passed in so tests can capture
//! them.

mod cfg;
mod deal;
mod eval;
mod play;
mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::{handle_eval_command, parse_cards};
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use showdown_engine::game::GameConfig;

use crate::config::{self, Config};
use crate::error::CliError;

/// Flags that override the resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub small_blind: Option<u32>,
    pub bots: Option<u8>,
    pub bot: Option<String>,
}

/// Configuration with command-line flags applied on top.
pub(crate) fn resolve_config(overrides: Overrides) -> Result<Config, CliError> {
    let mut cfg = config::load_with_sources()?.config;
    if let Some(seed) = overrides.seed {
        cfg.seed = Some(seed);
    }
    if let Some(sb) = overrides.small_blind {
        cfg.small_blind = sb;
    }
    if let Some(bots) = overrides.bots {
        cfg.bots = bots;
    }
    if let Some(bot) = overrides.bot {
        cfg.bot = bot;
    }
    config::validate(&cfg)?;
    Ok(cfg)
}

pub(crate) fn game_config(cfg: &Config) -> GameConfig {
    GameConfig {
        small_blind: cfg.small_blind,
        big_blind: cfg.big_blind(),
        ..GameConfig::default()
    }
}
