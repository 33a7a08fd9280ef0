use serde::{Deserialize, Serialize};
use std::fs;

use showdown_ai::AI_KINDS;
use showdown_engine::game::DEFAULT_STACK_IN_BIG_BLINDS;

use crate::validation::InputPolicy;

pub const ENV_CONFIG: &str = "SHOWDOWN_CONFIG";
pub const ENV_SEED: &str = "SHOWDOWN_SEED";
pub const ENV_SMALL_BLIND: &str = "SHOWDOWN_SMALL_BLIND";
pub const ENV_BOTS: &str = "SHOWDOWN_BOTS";
pub const ENV_BOT: &str = "SHOWDOWN_BOT";
pub const ENV_INPUT_POLICY: &str = "SHOWDOWN_INPUT_POLICY";

/// Most bots a table of ten seats can take next to the human.
pub const MAX_BOTS: u8 = 9;

/// Largest small blind whose chips still fit a `u32` on a full table.
pub const MAX_SMALL_BLIND: u32 =
    u32::MAX / (2 * (DEFAULT_STACK_IN_BIG_BLINDS * (MAX_BOTS as u32 + 1) + 1));

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub small_blind: u32,
    pub bots: u8,
    pub bot: String,
    pub input_policy: InputPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub small_blind: ValueSource,
    pub bots: ValueSource,
    pub bot: ValueSource,
    pub input_policy: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            small_blind: ValueSource::Default,
            bots: ValueSource::Default,
            bot: ValueSource::Default,
            input_policy: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            small_blind: 250,
            bots: 3,
            bot: "simple".into(),
            input_policy: InputPolicy::Reprompt,
        }
    }
}

impl Config {
    /// Big blind is always twice the small blind.
    pub fn big_blind(&self) -> u32 {
        self.small_blind * 2
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Resolves the configuration: defaults, then the TOML file named by
/// `SHOWDOWN_CONFIG`, then `SHOWDOWN_*` variables. Empty variables are ignored.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(ENV_CONFIG)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.bots {
            cfg.bots = v;
            sources.bots = ValueSource::File;
        }
        if let Some(v) = f.bot {
            cfg.bot = v;
            sources.bot = ValueSource::File;
        }
        if let Some(v) = f.input_policy {
            cfg.input_policy = v;
            sources.input_policy = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(ENV_SEED)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", ENV_SEED, seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(sb) = std::env::var(ENV_SMALL_BLIND)
        && !sb.is_empty()
    {
        cfg.small_blind = sb
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", ENV_SMALL_BLIND, sb)))?;
        sources.small_blind = ValueSource::Env;
    }
    if let Ok(bots) = std::env::var(ENV_BOTS)
        && !bots.is_empty()
    {
        cfg.bots = bots
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", ENV_BOTS, bots)))?;
        sources.bots = ValueSource::Env;
    }
    if let Ok(bot) = std::env::var(ENV_BOT)
        && !bot.is_empty()
    {
        cfg.bot = bot;
        sources.bot = ValueSource::Env;
    }
    if let Ok(policy) = std::env::var(ENV_INPUT_POLICY)
        && !policy.is_empty()
    {
        cfg.input_policy = policy.parse().map_err(ConfigError::Invalid)?;
        sources.input_policy = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    bots: Option<u8>,
    #[serde(default)]
    bot: Option<String>,
    #[serde(default)]
    input_policy: Option<InputPolicy>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.small_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small_blind must be >0".into(),
        ));
    }
    if cfg.small_blind > MAX_SMALL_BLIND {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: small_blind must be at most {}",
            MAX_SMALL_BLIND
        )));
    }
    if cfg.bots == 0 || cfg.bots > MAX_BOTS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: bots must be within 1..={}",
            MAX_BOTS
        )));
    }
    if !AI_KINDS.contains(&cfg.bot.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: bot must be one of {}",
            AI_KINDS.join(", ")
        )));
    }
    Ok(())
}
