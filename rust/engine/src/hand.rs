use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, DECK_SIZE, RANKS_PER_SUIT};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::HighCard,
        Category::OnePair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
    ];
}

const STRAIGHT_LEN: usize = 5;
const FLUSH_LEN: u8 = 5;
const SUITS: usize = 4;
const RANKS: usize = RANKS_PER_SUIT as usize;
/// Filler for tuple slots a category does not use.
const UNUSED: i8 = -1;
/// First rank of every five-card window that forms a straight. Rank 12 (ace)
/// starts the only window allowed to wrap (A-2-3-4-5); windows starting at
/// J, Q or K would wrap without the ace pivot and are not straights.
const STRAIGHT_STARTS: [usize; 10] = [12, 0, 1, 2, 3, 4, 5, 6, 7, 8];

/// Strength of a hand as the tuple `(category, tiebreak, …)`.
///
/// The tuple length is fixed per category, so two ranks of the same category
/// always compare position by position.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    // ordered high -> low, -1 in unused slots
    pub tiebreaks: Vec<i8>,
}

impl HandRank {
    fn new(category: Category, tiebreaks: Vec<i8>) -> Self {
        Self {
            category,
            tiebreaks,
        }
    }

    pub fn to_tuple(&self) -> Vec<i8> {
        std::iter::once(self.category as i8)
            .chain(self.tiebreaks.iter().copied())
            .collect()
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hands(self, other)
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ranks 5 to 7 distinct cards.
///
/// Categories are tried from the strongest down and the first match wins.
/// The caller's slice is only read.
///
/// # Panics
///
/// Panics if fewer than 5 or more than 7 cards are given.
///
/// # Examples
///
/// ```
/// use showdown_engine::cards::Card;
/// use showdown_engine::hand::{evaluate_hand, Category};
///
/// let cards: Vec<Card> = ["Ah", "Kh", "Qh", "Jh", "Th", "2c", "3d"]
///     .iter()
///     .map(|c| c.parse().unwrap())
///     .collect();
/// let rank = evaluate_hand(&cards);
/// assert_eq!(rank.category, Category::StraightFlush);
/// assert_eq!(rank.to_tuple(), vec![8, 12, -1]);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> HandRank {
    assert!(
        (5..=7).contains(&cards.len()),
        "hand evaluation needs 5 to 7 cards, got {}",
        cards.len()
    );
    let rank_freqs = rank_frequencies(cards);
    let suit_freqs = suit_frequencies(cards);
    let pairs = multiples(&rank_freqs, 2);
    let triples = multiples(&rank_freqs, 3);
    let quads = multiples(&rank_freqs, 4);
    let ends = straight_ends(&rank_freqs);
    let flushes = flush_suits(&suit_freqs);

    // Straight flush
    if !flushes.is_empty() && !ends.is_empty() {
        if let Some(end) = straight_flush_end(cards, &ends) {
            return HandRank::new(Category::StraightFlush, vec![end as i8, UNUSED]);
        }
    }

    // Four of a kind
    if let Some(&quad) = quads.last() {
        let kicker = kickers_excluding(cards, &[quad])[0];
        return HandRank::new(Category::FourOfAKind, vec![quad as i8, kicker as i8]);
    }

    // Full house, a second triple serves as the pair
    if let Some(&three) = triples.last() {
        let pair = pairs
            .iter()
            .chain(triples.iter().filter(|&&t| t != three))
            .max();
        if let Some(&pair) = pair {
            return HandRank::new(Category::FullHouse, vec![three as i8, pair as i8]);
        }
    }

    // Flush: the suit with the highest top card
    if let Some(values) = flushes
        .iter()
        .map(|&suit| suited_ranks_desc(cards, suit))
        .max_by_key(|values| values[0])
    {
        let top = values.iter().take(5).map(|&v| v as i8).collect();
        return HandRank::new(Category::Flush, top);
    }

    // Straight
    if let Some(&end) = ends.iter().max() {
        return HandRank::new(Category::Straight, vec![end as i8, UNUSED]);
    }

    if let Some(&three) = triples.last() {
        let kickers = kickers_excluding(cards, &[three]);
        return HandRank::new(
            Category::ThreeOfAKind,
            vec![three as i8, kickers[0] as i8, kickers[1] as i8],
        );
    }

    if pairs.len() >= 2 {
        let high = pairs[pairs.len() - 1];
        let low = pairs[pairs.len() - 2];
        let kicker = kickers_excluding(cards, &[high, low])[0];
        return HandRank::new(
            Category::TwoPair,
            vec![high as i8, low as i8, kicker as i8],
        );
    }

    if let Some(&pair) = pairs.first() {
        let kickers = kickers_excluding(cards, &[pair]);
        let mut tiebreaks = vec![pair as i8];
        tiebreaks.extend(kickers.iter().take(3).map(|&k| k as i8));
        return HandRank::new(Category::OnePair, tiebreaks);
    }

    let highs = kickers_excluding(cards, &[]);
    HandRank::new(
        Category::HighCard,
        highs.iter().take(5).map(|&k| k as i8).collect(),
    )
}

/// Lexicographic comparison of two hand-rank tuples; the first differing
/// position decides.
///
/// # Panics
///
/// Panics when one tuple is a strict prefix of the other, which cannot happen
/// for ranks produced by [`evaluate_hand`].
pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    let (a, b) = (a.to_tuple(), b.to_tuple());
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    assert_eq!(
        a.len(),
        b.len(),
        "hand rank tuples of different length: {:?} vs {:?}",
        a,
        b
    );
    Ordering::Equal
}

/// How many cards of each rank (index 0 = two … 12 = ace) the hand holds.
pub fn rank_frequencies(cards: &[Card]) -> [u8; RANKS] {
    let mut freqs = [0u8; RANKS];
    for c in cards {
        freqs[c.rank() as usize] += 1;
    }
    freqs
}

/// How many cards of each suit the hand holds.
pub fn suit_frequencies(cards: &[Card]) -> [u8; SUITS] {
    let mut freqs = [0u8; SUITS];
    for c in cards {
        freqs[c.suit() as usize] += 1;
    }
    freqs
}

/// Ranks held exactly `n` times, ascending.
pub fn multiples(freqs: &[u8; RANKS], n: u8) -> Vec<u8> {
    (0..RANKS as u8)
        .filter(|&r| freqs[r as usize] == n)
        .collect()
}

/// End ranks of every straight present, in window order (ace-low first).
pub fn straight_ends(freqs: &[u8; RANKS]) -> Vec<u8> {
    STRAIGHT_STARTS
        .iter()
        .filter(|&&start| window(start).all(|r| freqs[r] > 0))
        .map(|&start| ((start + STRAIGHT_LEN - 1) % RANKS) as u8)
        .collect()
}

/// Suits holding at least five cards.
pub fn flush_suits(freqs: &[u8; SUITS]) -> Vec<u8> {
    (0..SUITS as u8)
        .filter(|&s| freqs[s as usize] >= FLUSH_LEN)
        .collect()
}

/// Highest straight end among `ends` whose five cards are all held in one suit.
pub fn straight_flush_end(cards: &[Card], ends: &[u8]) -> Option<u8> {
    let held = card_mask(cards);
    let mut ends = ends.to_vec();
    ends.sort_unstable_by(|a, b| b.cmp(a));
    ends.into_iter().find(|&end| {
        (0..SUITS).any(|suit| {
            (0..STRAIGHT_LEN).all(|k| {
                let rank = (end as usize + RANKS - k) % RANKS;
                held & bit(suit * RANKS + rank) != 0
            })
        })
    })
}

/// Rank values of the cards whose rank is not in `excluded`, descending.
/// Cards of equal rank each contribute an entry.
pub fn kickers_excluding(cards: &[Card], excluded: &[u8]) -> Vec<u8> {
    let mut kickers: Vec<u8> = cards
        .iter()
        .map(|c| c.rank() as u8)
        .filter(|r| !excluded.contains(r))
        .collect();
    kickers.sort_unstable_by(|a, b| b.cmp(a));
    kickers
}

fn suited_ranks_desc(cards: &[Card], suit: u8) -> Vec<u8> {
    let mut values: Vec<u8> = cards
        .iter()
        .filter(|c| c.suit() as u8 == suit)
        .map(|c| c.rank() as u8)
        .collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values
}

fn window(start: usize) -> impl Iterator<Item = usize> {
    (0..STRAIGHT_LEN).map(move |k| (start + k) % RANKS)
}

fn bit(index: usize) -> u64 {
    1u64 << index
}

fn card_mask(cards: &[Card]) -> u64 {
    cards.iter().fold(0, |m, c| m | bit(c.index() as usize))
}

fn mask_to_cards(mask: u64) -> Vec<Card> {
    (0..DECK_SIZE)
        .filter(|&i| mask & bit(i as usize) != 0)
        .filter_map(Card::from_index)
        .collect()
}

/// Cards of `rank` that are not in `held`.
fn missing_of_rank(held: u64, rank: usize) -> u64 {
    (0..SUITS)
        .map(|suit| bit(suit * RANKS + rank))
        .filter(|b| held & b == 0)
        .fold(0, |m, b| m | b)
}

fn missing_of_ranks(held: u64, ranks: &[u8]) -> Vec<Card> {
    let mask = ranks
        .iter()
        .fold(0, |m, &r| m | missing_of_rank(held, r as usize));
    mask_to_cards(mask)
}

// ---------------------------------------------------------------------------
// Outs: single cards that would complete a category the hand is one card short of.
// All functions assume the standard 52-card deck.

/// Every straight window missing exactly one rank contributes all four cards of that rank.
pub fn straight_outs(cards: &[Card]) -> Vec<Card> {
    let freqs = rank_frequencies(cards);
    let mut outs = 0u64;
    for &start in STRAIGHT_STARTS.iter() {
        let missing: Vec<usize> = window(start).filter(|&r| freqs[r] == 0).collect();
        if let [rank] = missing[..] {
            outs |= missing_of_rank(0, rank);
        }
    }
    mask_to_cards(outs)
}

/// Every suit held exactly four times contributes its nine missing cards.
pub fn flush_outs(cards: &[Card]) -> Vec<Card> {
    let held = card_mask(cards);
    let freqs = suit_frequencies(cards);
    let mut outs = 0u64;
    for suit in (0..SUITS).filter(|&s| freqs[s] == FLUSH_LEN - 1) {
        for rank in 0..RANKS {
            let b = bit(suit * RANKS + rank);
            if held & b == 0 {
                outs |= b;
            }
        }
    }
    mask_to_cards(outs)
}

/// Straight-flush outs as the intersection of straight and flush outs.
pub fn straight_flush_outs(straight: &[Card], flush: &[Card]) -> Vec<Card> {
    let mut outs: Vec<Card> = straight
        .iter()
        .filter(|c| flush.contains(c))
        .copied()
        .collect();
    outs.sort_unstable();
    outs.dedup();
    outs
}

/// Missing cards of every rank held exactly `x - 1` times.
///
/// # Panics
///
/// Panics if `x` is below 2.
pub fn x_of_a_kind_outs(cards: &[Card], x: u8) -> Vec<Card> {
    assert!(x >= 2, "x of a kind needs x >= 2, got {}", x);
    let freqs = rank_frequencies(cards);
    missing_of_ranks(card_mask(cards), &multiples(&freqs, x - 1))
}

/// Full-house outs for hands short of a full house by one card.
///
/// Only upgrades from fewer pairs/triples than needed are found: one triple
/// pairs up any single, two or more pairs trip up any pair. A hand that is
/// already a full house gets no outs, even if a better one is one card away.
pub fn full_house_outs(cards: &[Card]) -> Vec<Card> {
    let freqs = rank_frequencies(cards);
    let pairs = multiples(&freqs, 2);
    let triples = multiples(&freqs, 3);
    let held = card_mask(cards);
    if triples.len() >= 2 || (!triples.is_empty() && !pairs.is_empty()) {
        Vec::new()
    } else if triples.len() == 1 {
        missing_of_ranks(held, &multiples(&freqs, 1))
    } else if pairs.len() >= 2 {
        missing_of_ranks(held, &pairs)
    } else {
        Vec::new()
    }
}

/// Two-pair outs: only a hand with exactly one pair has any, namely the
/// missing cards of each single. Hands with two or more pairs get none, even
/// when pairing a higher single would improve them.
pub fn two_pair_outs(cards: &[Card]) -> Vec<Card> {
    let freqs = rank_frequencies(cards);
    if multiples(&freqs, 2).len() == 1 {
        missing_of_ranks(card_mask(cards), &multiples(&freqs, 1))
    } else {
        Vec::new()
    }
}

/// Outs of a hand for every category, indexed by [`Category`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outs {
    by_category: [Vec<Card>; 9],
}

impl Outs {
    pub fn compute(cards: &[Card]) -> Self {
        let straight = straight_outs(cards);
        let flush = flush_outs(cards);
        let mut outs = Outs::default();
        outs.by_category[Category::OnePair as usize] = x_of_a_kind_outs(cards, 2);
        outs.by_category[Category::TwoPair as usize] = two_pair_outs(cards);
        outs.by_category[Category::ThreeOfAKind as usize] = x_of_a_kind_outs(cards, 3);
        outs.by_category[Category::StraightFlush as usize] =
            straight_flush_outs(&straight, &flush);
        outs.by_category[Category::FullHouse as usize] = full_house_outs(cards);
        outs.by_category[Category::FourOfAKind as usize] = x_of_a_kind_outs(cards, 4);
        outs.by_category[Category::Straight as usize] = straight;
        outs.by_category[Category::Flush as usize] = flush;
        outs
    }

    pub fn for_category(&self, category: Category) -> &[Card] {
        &self.by_category[category as usize]
    }

    /// Categories with at least one out, strongest first.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Card])> + '_ {
        Category::ALL
            .iter()
            .rev()
            .map(move |&c| (c, self.for_category(c)))
            .filter(|(_, cards)| !cards.is_empty())
    }
}
