use std::collections::{BTreeMap, BTreeSet};

use crate::hand::HandRank;

/// A pot sealed at a bet level, with the seats that may win it.
///
/// A pot at threshold `T` above the next-lower threshold `L` holds
/// `min(bet, T) - L` chips from every seat whose bet exceeds `L`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub threshold: u32,
    pub eligible: BTreeSet<usize>,
}

/// Table state a pot needs to be resolved: bets and hand ranks by seat, plus
/// the dealer seat for handing out odd chips.
#[derive(Debug, Clone, Copy)]
pub struct Showdown<'a> {
    pub bets: &'a [u32],
    pub ranks: &'a [Option<HandRank>],
    pub dealer: usize,
}

impl Showdown<'_> {
    pub fn total_bets(&self) -> u32 {
        self.bets.iter().sum()
    }
}

/// Layered pots of one hand. At most one pot exists per bet level.
#[derive(Debug, Clone, Default)]
pub struct PotLedger {
    pots: Vec<Pot>,
}

impl PotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn clear(&mut self) {
        self.pots.clear();
    }

    /// Makes `seats` eligible for the pot sealed at `level`, creating the pot
    /// if no pot exists at that level yet.
    pub fn add_to_pot(&mut self, seats: impl IntoIterator<Item = usize>, level: u32) {
        match self.pots.iter_mut().find(|p| p.threshold == level) {
            Some(pot) => pot.eligible.extend(seats),
            None => {
                let eligible: BTreeSet<usize> = seats.into_iter().collect();
                tracing::debug!(level, ?eligible, "pot sealed");
                self.pots.push(Pot {
                    threshold: level,
                    eligible,
                });
            }
        }
    }

    /// Resolves every pot and returns the gross winnings per seat.
    ///
    /// Seats still active are first added to the pot at `current_bet`. Pots
    /// are then paid out from the highest threshold down, and every pot's
    /// eligible seats also become eligible for the pots below it.
    ///
    /// # Panics
    ///
    /// Panics if chips would be created or lost, or if a pot holding chips
    /// has nobody eligible.
    pub fn evaluate_pots(
        &mut self,
        active: &[usize],
        current_bet: u32,
        table: &Showdown<'_>,
    ) -> BTreeMap<usize, u32> {
        if !active.is_empty() {
            self.add_to_pot(active.iter().copied(), current_bet);
        }
        self.pots.sort_by(|a, b| b.threshold.cmp(&a.threshold));

        let mut winnings: BTreeMap<usize, u32> = BTreeMap::new();
        for i in 0..self.pots.len() {
            let next_lower = self.pots.get(i + 1).map_or(0, |p| p.threshold);
            for (seat, amount) in evaluate_single_pot(&self.pots[i], next_lower, table) {
                *winnings.entry(seat).or_insert(0) += amount;
            }
            if i + 1 < self.pots.len() {
                let upper = self.pots[i].eligible.clone();
                self.pots[i + 1].eligible.extend(upper);
            }
        }

        let paid: u32 = winnings.values().sum();
        assert_eq!(
            paid,
            table.total_bets(),
            "pots paid out {} chips but {} were wagered",
            paid,
            table.total_bets()
        );
        winnings
    }
}

/// Chips in `pot` given the next-lower threshold.
pub fn pot_size(pot: &Pot, next_lower: u32, bets: &[u32]) -> u32 {
    bets.iter()
        .map(|&bet| bet.min(pot.threshold).saturating_sub(next_lower))
        .sum()
}

/// Pays out one pot to its best hands.
///
/// Ties split evenly; odd chips go one each to the winners in seat order
/// starting left of the dealer.
pub fn evaluate_single_pot(
    pot: &Pot,
    next_lower: u32,
    table: &Showdown<'_>,
) -> BTreeMap<usize, u32> {
    let size = pot_size(pot, next_lower, table.bets);
    let mut payout = BTreeMap::new();
    if size == 0 {
        return payout;
    }
    let winners = best_hand_owners(&pot.eligible, table.ranks);
    let count = winners.len() as u32;
    let (share, mut remainder) = (size / count, size % count);

    let seats = table.bets.len();
    for k in 1..=seats {
        let seat = (table.dealer + k) % seats;
        if !winners.contains(&seat) {
            continue;
        }
        let extra = u32::from(remainder > 0);
        remainder -= extra;
        payout.insert(seat, share + extra);
    }
    tracing::debug!(threshold = pot.threshold, size, ?payout, "pot resolved");
    payout
}

/// Seats in `eligible` holding the best hand. A single contender wins
/// without needing a rank.
///
/// # Panics
///
/// Panics on an empty set, or if a contender of a contested pot has no rank.
pub fn best_hand_owners(eligible: &BTreeSet<usize>, ranks: &[Option<HandRank>]) -> Vec<usize> {
    assert!(!eligible.is_empty(), "no eligible player to award the pot to");
    if eligible.len() == 1 {
        return eligible.iter().copied().collect();
    }
    let ranked: Vec<(usize, &HandRank)> = eligible
        .iter()
        .map(|&seat| {
            let rank = ranks
                .get(seat)
                .and_then(Option::as_ref)
                .unwrap_or_else(|| panic!("seat {} contests a pot without a hand rank", seat));
            (seat, rank)
        })
        .collect();
    let best = ranked.iter().map(|(_, r)| *r).max().unwrap_or_else(|| unreachable!());
    ranked
        .iter()
        .filter(|(_, r)| *r == best)
        .map(|(seat, _)| *seat)
        .collect()
}
