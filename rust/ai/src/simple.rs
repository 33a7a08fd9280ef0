//! Heuristic bot: plays its pocket cards by a strength table pre-flop and
//! its made hand after the flop, with a per-bot appetite for bluffing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use showdown_engine::agent::{BetRequest, PlayerAgent, SeatInfo, UserAgent};
use showdown_engine::cards::Card;
use showdown_engine::hand::{evaluate_hand, Category};

/// Percent chance of playing a starting hand. Rows and columns run from ace
/// (0) down to two (12): above the diagonal are suited hands, below it
/// offsuit hands, the diagonal holds pairs.
const POCKET_STRENGTH: [[i32; 13]; 13] = [
    [100, 100, 90, 90, 80, 60, 60, 60, 60, 60, 60, 60, 60], // A
    [90, 100, 90, 80, 70, 50, 40, 40, 40, 40, 40, 40, 40],  // K
    [80, 70, 100, 80, 70, 60, 40, 0, 0, 0, 0, 0, 0],        // Q
    [70, 60, 60, 100, 80, 70, 50, 30, 0, 0, 0, 0, 0],       // J
    [50, 50, 50, 60, 90, 70, 60, 40, 0, 0, 0, 0, 0],        // T
    [30, 30, 30, 40, 40, 80, 70, 60, 30, 0, 0, 0, 0],       // 9
    [0, 0, 0, 30, 30, 40, 70, 60, 50, 30, 0, 0, 0],         // 8
    [0, 0, 0, 0, 0, 0, 30, 60, 60, 40, 30, 0, 0],           // 7
    [0, 0, 0, 0, 0, 0, 0, 30, 50, 60, 40, 0, 0],            // 6
    [0, 0, 0, 0, 0, 0, 0, 0, 30, 40, 40, 30, 0],            // 5
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 30, 40, 40, 30],            // 4
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 40, 30],              // 3
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 40],               // 2
];

const RANKS: i32 = 13;
/// Dice range after the flop covers every category × rank strength.
const POSTFLOP_DICE_MAX: i32 = RANKS * Category::StraightFlush as i32 + RANKS - 1;

/// Heuristic bot with a random temperament.
///
/// `tightness` (drawn from -25..=25) is subtracted from pocket strengths;
/// `bluffiness` (1..=30) is the lowest threshold it ever folds below. While
/// bluffing in a hand the threshold rises by about 20 on every decision.
#[derive(Debug, Clone)]
pub struct SimpleAI {
    rng: ChaCha20Rng,
    tightness: i32,
    bluffiness: i32,
    bluffing: i32,
}

impl SimpleAI {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let tightness = rng.random_range(-25..=25);
        let bluffiness = rng.random_range(1..=30);
        Self {
            rng,
            tightness,
            bluffiness,
            bluffing: bluffiness,
        }
    }

    pub fn tightness(&self) -> i32 {
        self.tightness
    }

    pub fn bluffiness(&self) -> i32 {
        self.bluffiness
    }

    /// Table strength of two pocket cards, before tightness.
    pub fn pocket_strength(pockets: &[Card]) -> i32 {
        let [a, b] = pockets else {
            return 0;
        };
        let idx = |c: &Card| (RANKS - 1 - c.rank() as i32) as usize;
        let (high, low) = (idx(a).min(idx(b)), idx(a).max(idx(b)));
        // suited pairs read above the diagonal, offsuit below
        if a.suit() == b.suit() {
            POCKET_STRENGTH[high][low]
        } else {
            POCKET_STRENGTH[low][high]
        }
    }

    fn preflop_bet(&mut self, req: &BetRequest<'_>) -> i64 {
        let threshold = Self::pocket_strength(req.pockets) - self.tightness
            + self.rng.random_range(-3..=3);
        let dice = self.rng.random_range(0..=99);
        self.bet_for(req, threshold, dice)
    }

    fn postflop_bet(&mut self, req: &BetRequest<'_>) -> i64 {
        let cards: Vec<Card> = req.pockets.iter().chain(req.community).copied().collect();
        let rank = evaluate_hand(&cards);
        let top = rank.tiebreaks.first().copied().unwrap_or(0) as i32;
        let threshold = RANKS * rank.category as i32 + top;
        let dice = self.rng.random_range(0..=POSTFLOP_DICE_MAX);
        self.bet_for(req, threshold, dice)
    }

    /// Stays in when `dice` lands below the threshold, which never drops
    /// under the current bluffing level.
    fn bet_for(&mut self, req: &BetRequest<'_>, mut threshold: i32, dice: i32) -> i64 {
        if threshold < self.bluffing {
            threshold = self.bluffing;
            self.bluffing += 20 + self.rng.random_range(-3..=3);
        }
        if dice >= threshold {
            return -1;
        }
        let own = req.all_in_level();
        if own < req.current_bet {
            return i64::from(own);
        }
        if own < req.min_raise {
            return i64::from(req.current_bet);
        }
        self.rng.random_range(i64::from(req.min_raise)..=i64::from(own))
    }
}

impl UserAgent for SimpleAI {
    fn on_begin_hand(&mut self, _hand_no: u32, _dealer: &str, _seats: &[SeatInfo]) {
        self.bluffing = self.bluffiness;
    }
}

impl PlayerAgent for SimpleAI {
    fn demand_bet(&mut self, req: &BetRequest<'_>) -> i64 {
        if req.community.len() < 3 {
            self.preflop_bet(req)
        } else {
            self.postflop_bet(req)
        }
    }
}
