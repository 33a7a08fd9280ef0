//! # showdown-ai: Bot Players
//!
//! Bot implementations of [`PlayerAgent`] for the showdown engine.
//!
//! ## Core Components
//!
//! - [`random`] - A bot choosing uniformly among the moves it can afford
//! - [`simple`] - A heuristic bot driven by hand strength and a bluffing temperament
//! - [`create_ai`] - Factory creating bots by name
//!
//! ## Quick Start
//!
//! ```rust
//! use showdown_ai::create_ai;
//! use showdown_engine::game::Game;
//!
//! let mut game = Game::new_with_seed(42);
//! game.add_player("rnd", create_ai("random", 1).unwrap()).unwrap();
//! game.add_player("smp", create_ai("simple", 2).unwrap()).unwrap();
//! let standings = game.run().unwrap();
//! assert_eq!(standings.iter().map(|(_, s)| s).sum::<u32>(), 20_000);
//! ```

use showdown_engine::agent::PlayerAgent;
use showdown_engine::errors::GameError;

pub mod random;
pub mod simple;

pub use random::RandomAI;
pub use simple::SimpleAI;

/// Bot kinds understood by [`create_ai`].
pub const AI_KINDS: [&str; 2] = ["random", "simple"];

/// Creates a bot by kind, seeding its private random source with `seed`.
///
/// # Errors
///
/// [`GameError::UnrecognizedPlayerType`] for unknown kinds.
///
/// # Example
///
/// ```rust
/// use showdown_ai::create_ai;
///
/// assert!(create_ai("simple", 7).is_ok());
/// assert!(create_ai("oracle", 7).is_err());
/// ```
pub fn create_ai(kind: &str, seed: u64) -> Result<Box<dyn PlayerAgent>, GameError> {
    match kind.to_ascii_lowercase().as_str() {
        "random" => Ok(Box::new(RandomAI::new(seed))),
        "simple" => Ok(Box::new(SimpleAI::new(seed))),
        _ => Err(GameError::UnrecognizedPlayerType(kind.to_string())),
    }
}
