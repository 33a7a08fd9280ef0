//! # showdown-engine: Texas Hold'em Table Core
//!
//! A multi-player Texas Hold'em engine: dealing, betting intervals, side-pot
//! formation and showdown. Decisions and display are left to agents plugged
//! in through the [`agent`] traits.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card codec (identifier 0..52 to rank and suit)
//! - [`deck`] - Undrawn cards and the seeded ChaCha20 random source
//! - [`hand`] - Hand evaluation, comparison and outs
//! - [`player`] - Player state and its status transitions
//! - [`pot`] - Pot ledger and showdown payouts
//! - [`rules`] - Fitting bet answers to the table
//! - [`game`] - Betting intervals, hands and the elimination loop
//! - [`agent`] - Notification and decision interfaces
//! - [`logger`] - Hand history as JSON lines
//! - [`errors`] - Error types for rejected operations
//!
//! ## Quick Start
//!
//! ```rust
//! use showdown_engine::cards::Card;
//! use showdown_engine::hand::{evaluate_hand, Outs, Category};
//!
//! let cards: Vec<Card> = ["2c", "3c", "4c", "5c", "9d", "Kh", "Ks"]
//!     .iter()
//!     .map(|c| c.parse().unwrap())
//!     .collect();
//!
//! let strength = evaluate_hand(&cards);
//! assert_eq!(strength.category, Category::OnePair);
//!
//! let outs = Outs::compute(&cards);
//! assert_eq!(outs.for_category(Category::Flush).len(), 9);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Every random choice of a match comes from one seeded source:
//!
//! ```rust
//! use showdown_engine::deck::Deck;
//!
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! assert_eq!(deck1.draw(5), deck2.draw(5));
//! ```

pub mod agent;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
