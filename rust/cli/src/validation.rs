//! Parsing of the answers a human types at the table.
//!
//! Inputs are matched case-insensitively:
//! - `f` / `fold`
//! - `c` / `check` (only when nothing is owed)
//! - `call`
//! - `a` / `allin` / `all-in`
//! - a number, the total bet wanted for the hand (negative folds)
//! - `h` / `help` / `?`
//! - `q` / `quit`, folding every hand until the match ends

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use showdown_engine::agent::BetRequest;

/// What the console does with an answer it cannot accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Explain the problem and ask again
    Reprompt,
    /// Explain the problem and fold
    Fold,
}

impl FromStr for InputPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reprompt" => Ok(InputPolicy::Reprompt),
            "fold" => Ok(InputPolicy::Fold),
            other => Err(format!(
                "Invalid input policy: {} (expected reprompt or fold)",
                other
            )),
        }
    }
}

impl fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputPolicy::Reprompt => write!(f, "reprompt"),
            InputPolicy::Fold => write!(f, "fold"),
        }
    }
}

/// Outcome of parsing one line of input.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// A bet answer ready for the table: negative folds
    Bet(i64),
    Help,
    Quit,
    Invalid(String),
}

/// Parses one line typed in answer to `req`.
///
/// # Example
///
/// ```rust
/// use showdown_cli::validation::{parse_player_input, ParseResult};
/// use showdown_engine::agent::BetRequest;
///
/// let req = BetRequest {
///     current_bet: 500,
///     min_raise: 1_000,
///     pot: 750,
///     own_bet: 250,
///     own_stack: 9_750,
///     pockets: &[],
///     community: &[],
/// };
/// assert_eq!(parse_player_input("call", &req), ParseResult::Bet(500));
/// assert_eq!(parse_player_input("1200", &req), ParseResult::Bet(1_200));
/// assert_eq!(parse_player_input("fold", &req), ParseResult::Bet(-1));
/// assert!(matches!(parse_player_input("check", &req), ParseResult::Invalid(_)));
/// ```
pub fn parse_player_input(input: &str, req: &BetRequest<'_>) -> ParseResult {
    let input = input.trim().to_lowercase();
    let Some(word) = input.split_whitespace().next() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match word {
        "q" | "quit" => ParseResult::Quit,
        "h" | "help" | "?" => ParseResult::Help,
        "f" | "fold" => ParseResult::Bet(-1),
        "c" | "check" => {
            if req.own_bet == req.current_bet {
                ParseResult::Bet(i64::from(req.current_bet))
            } else {
                ParseResult::Invalid(format!(
                    "Cannot check, {} to call",
                    req.to_call()
                ))
            }
        }
        "call" => ParseResult::Bet(i64::from(req.current_bet.min(req.all_in_level()))),
        "a" | "allin" | "all-in" => ParseResult::Bet(i64::from(req.all_in_level())),
        other => match other.parse::<i64>() {
            Ok(value) => clean_value(value, req),
            Err(_) => ParseResult::Invalid(format!(
                "Unrecognized action: {} (type help for the list)",
                other
            )),
        },
    }
}

/// Checks a typed total bet against the table.
///
/// Anything above the player's chips means all-in. Below the current level
/// only an all-in is accepted; above it the bet has to reach `min_raise`.
pub fn clean_value(value: i64, req: &BetRequest<'_>) -> ParseResult {
    let all_in = i64::from(req.all_in_level());
    let current = i64::from(req.current_bet);
    let bet = value.min(all_in);
    if bet < 0 {
        ParseResult::Bet(-1)
    } else if bet < current && bet < all_in {
        ParseResult::Invalid(format!(
            "Cannot bet less than {}, except for all in",
            current
        ))
    } else if bet <= current {
        ParseResult::Bet(bet)
    } else if bet < i64::from(req.min_raise) && bet < all_in {
        ParseResult::Invalid(format!(
            "Needs to bet at least {} for raising",
            req.min_raise
        ))
    } else {
        ParseResult::Bet(bet)
    }
}

pub const HELP_TEXT: &str = "\
Actions:
  fold, f        give up the hand
  check, c       stay in without betting (only when nothing is owed)
  call           match the current bet
  allin, a       push every chip
  <number>       total bet for the hand, at least the raise level to raise
  help, h, ?     show this list
  quit, q        fold every hand until the match ends";
