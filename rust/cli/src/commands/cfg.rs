use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Prints the resolved configuration as JSON, each value with its source.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind(),
            "source": sources.small_blind,
        },
        "bots": {
            "value": config.bots,
            "source": sources.bots,
        },
        "bot": {
            "value": config.bot,
            "source": sources.bot,
        },
        "input_policy": {
            "value": config.input_policy,
            "source": sources.input_policy,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
