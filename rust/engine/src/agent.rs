use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Street;
use crate::hand::HandRank;

/// Public view of a seat: what every participant at the table may know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    pub name: String,
    pub stack: u32,
}

/// Everything an agent gets to see when asked for a bet.
#[derive(Debug, Clone, Copy)]
pub struct BetRequest<'a> {
    pub current_bet: u32,
    pub min_raise: u32,
    pub pot: u32,
    pub own_bet: u32,
    pub own_stack: u32,
    pub pockets: &'a [Card],
    pub community: &'a [Card],
}

impl BetRequest<'_> {
    /// Chips still needed to match the current bet level.
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.own_bet)
    }

    /// Total bet reachable by pushing every chip.
    pub fn all_in_level(&self) -> u32 {
        self.own_bet + self.own_stack
    }
}

/// Receives the notification stream of a match. Every method defaults to a
/// no-op so agents only implement what they care about.
///
/// Player names identify seats; amounts are total bets for the hand.
#[allow(unused_variables)]
pub trait UserAgent {
    /// Humans are kept on as spectators after elimination.
    fn is_human(&self) -> bool {
        false
    }

    fn on_set_players(&mut self, seats: &[SeatInfo]) {}
    /// One card per seat decides the first dealer.
    fn on_dealer_draw(&mut self, player: &str, card: Card) {}
    fn on_first_dealer(&mut self, dealer: &str) {}
    fn on_begin_hand(&mut self, hand_no: u32, dealer: &str, seats: &[SeatInfo]) {}
    /// `cards` is only `Some` for the owner of the pockets and for spectators.
    fn on_pockets_dealt(&mut self, player: &str, cards: Option<&[Card]>) {}
    fn on_small_blind(&mut self, player: &str, amount: u32) {}
    fn on_big_blind(&mut self, player: &str, amount: u32) {}
    fn on_fold(&mut self, player: &str) {}
    fn on_check(&mut self, player: &str) {}
    fn on_call(&mut self, player: &str, amount: u32) {}
    fn on_raise(&mut self, player: &str, amount: u32) {}
    /// All remaining chips, still short of the current bet level.
    fn on_last_chips(&mut self, player: &str, amount: u32) {}
    fn on_all_in(&mut self, player: &str, amount: u32) {}
    fn on_community_cards(&mut self, street: Street, dealt: &[Card], board: &[Card]) {}
    fn on_showdown(&mut self) {}
    fn on_reveal(&mut self, player: &str, pockets: &[Card], rank: &HandRank) {}
    /// `net` is the amount won minus the player's own bet for the hand.
    fn on_pot_won(&mut self, player: &str, amount: u32, net: i64) {}
    fn on_eliminated(&mut self, player: &str) {}
    fn on_end_hand(&mut self) {}
    fn on_end_match(&mut self, standings: &[SeatInfo]) {}
}

/// An agent that also plays: it answers bet requests for its seat.
pub trait PlayerAgent: UserAgent {
    /// Returns a negative value to fold, otherwise the total bet wanted for
    /// the hand. The table fits the answer to its rules, see
    /// [`crate::rules::resolve_bet`]. Must return eventually.
    fn demand_bet(&mut self, request: &BetRequest<'_>) -> i64;
}
