use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Where a seated player stands within the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Status {
    /// Still playing and may act
    Active,
    /// All-in: skipped for action, still wins at showdown
    EligibleOnly,
    /// Folded, cannot win anything this hand
    Inactive,
}

/// A seated player with their chip stack, committed bet and cards.
///
/// Fields are private; status only changes through [`Player::reset_for_hand`],
/// [`Player::fold`] and [`Player::all_in`], which keeps `Active ⇒ Eligible`.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    /// Chips not yet wagered
    stack: u32,
    /// Chips committed this hand
    bet: u32,
    pockets: Vec<Card>,
    /// Community cards as seen by this player
    opens: Vec<Card>,
    status: Status,
    yet_unasked: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u32) -> Self {
        Self {
            name: name.into(),
            stack,
            bet: 0,
            pockets: Vec::with_capacity(2),
            opens: Vec::with_capacity(5),
            status: Status::Active,
            yet_unasked: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn bet(&self) -> u32 {
        self.bet
    }
    pub fn pockets(&self) -> &[Card] {
        &self.pockets
    }
    pub fn opens(&self) -> &[Card] {
        &self.opens
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn yet_unasked(&self) -> bool {
        self.yet_unasked
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
    pub fn is_eligible(&self) -> bool {
        self.status != Status::Inactive
    }
    pub fn is_all_in(&self) -> bool {
        self.status == Status::EligibleOnly
    }

    /// Pocket cards followed by the community cards.
    pub fn all_cards(&self) -> Vec<Card> {
        self.pockets.iter().chain(self.opens.iter()).copied().collect()
    }

    /// Clears cards and bet and makes the player active again.
    pub fn reset_for_hand(&mut self) {
        self.bet = 0;
        self.pockets.clear();
        self.opens.clear();
        self.status = Status::Active;
        self.yet_unasked = true;
    }

    pub fn set_stack(&mut self, stack: u32) {
        self.stack = stack;
    }

    pub fn give_pockets(&mut self, cards: &[Card]) {
        self.pockets.extend_from_slice(cards);
    }

    pub fn show_opens(&mut self, cards: &[Card]) {
        self.opens.extend_from_slice(cards);
    }

    pub fn mark_unasked(&mut self) {
        self.yet_unasked = true;
    }

    pub fn mark_asked(&mut self) {
        self.yet_unasked = false;
    }

    /// Moves up to `amount` chips from the stack into the bet and returns how
    /// many actually moved.
    pub fn inc_bet(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.stack);
        self.stack -= moved;
        self.bet += moved;
        moved
    }

    pub fn win(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub fn fold(&mut self) {
        self.status = Status::Inactive;
    }

    /// Demotes an active player to eligible-only. Folded players stay folded.
    pub fn all_in(&mut self) {
        if self.status == Status::Active {
            self.status = Status::EligibleOnly;
        }
    }
}
