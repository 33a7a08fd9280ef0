//! A bot that picks its moves at random.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use showdown_engine::agent::{BetRequest, PlayerAgent, UserAgent};

/// Chooses uniformly among the moves it can afford: fold, call, raise.
///
/// A raise is drawn uniformly from `[min_raise, 1.025 × (stack + bet)]`; the
/// table clamps anything above the player's chips to an all-in.
///
/// # Example
///
/// ```rust
/// use showdown_ai::random::RandomAI;
/// use showdown_engine::agent::{BetRequest, PlayerAgent};
///
/// let mut ai = RandomAI::new(42);
/// let req = BetRequest {
///     current_bet: 500,
///     min_raise: 1_000,
///     pot: 750,
///     own_bet: 0,
///     own_stack: 10_000,
///     pockets: &[],
///     community: &[],
/// };
/// let bet = ai.demand_bet(&req);
/// assert!(bet == -1 || bet == 500 || bet >= 1_000);
/// ```
#[derive(Debug, Clone)]
pub struct RandomAI {
    rng: ChaCha20Rng,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Fold,
    Raise,
    Call,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl UserAgent for RandomAI {}

impl PlayerAgent for RandomAI {
    fn demand_bet(&mut self, req: &BetRequest<'_>) -> i64 {
        let own = req.all_in_level();
        let mut moves = vec![Move::Fold];
        if own >= req.min_raise {
            moves.push(Move::Raise);
        }
        if own >= req.current_bet {
            moves.push(Move::Call);
        }
        match moves[self.rng.random_range(0..moves.len())] {
            Move::Fold => -1,
            Move::Call => i64::from(req.current_bet),
            Move::Raise => {
                let top = (1.025 * f64::from(own)).round() as i64;
                self.rng.random_range(i64::from(req.min_raise)..=top)
            }
        }
    }
}
