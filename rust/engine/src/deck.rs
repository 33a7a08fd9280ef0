use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// The undrawn cards of one 52-card deck plus the random source that picks from them.
///
/// The deck owns the game's only random number generator, so a single seed
/// reproduces every shuffle, seating draw and first-dealer draw of a match.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: ChaCha20Rng) -> Self {
        Self {
            cards: full_deck(),
            rng,
        }
    }

    /// Removes `n` uniformly random cards and returns them. The count is clamped to
    /// the number of cards left; the order of the returned cards carries no meaning.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        let picks = n.min(self.cards.len());
        let mut drawn = Vec::with_capacity(picks);
        for _ in 0..picks {
            let idx = self.rng.random_range(0..self.cards.len());
            drawn.push(self.cards.swap_remove(idx));
        }
        tracing::trace!(?drawn, remaining = self.cards.len(), "cards drawn");
        drawn
    }

    pub fn draw_one(&mut self) -> Option<Card> {
        self.draw(1).pop()
    }

    /// Puts every card back, whatever has been drawn before.
    pub fn restore(&mut self) {
        self.cards = full_deck();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }
}
