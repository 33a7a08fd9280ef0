use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of cards in the standard deck every helper in this crate assumes.
pub const DECK_SIZE: u8 = 52;
/// Number of ranks per suit.
pub const RANKS_PER_SUIT: u8 = 13;

/// Represents one of the four suits in a standard 52-card deck.
/// Suits carry no value in hand rankings; they only break ties deterministically.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs = 0,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// The discriminant is the rank index used throughout the evaluator (0 = two, 12 = ace).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 0,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Maps a rank index (0..13) back to its rank. Out-of-range values saturate to Ace.
    pub fn from_u8(v: u8) -> Rank {
        match v {
            0 => Rank::Two,
            1 => Rank::Three,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            _ => Rank::Ace,
        }
    }

    pub fn symbol(self) -> char {
        b"23456789TJQKA"[self as usize] as char
    }
}

impl Suit {
    pub fn from_u8(v: u8) -> Suit {
        match v {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }

    pub fn symbol(self) -> char {
        b"cdhs"[self as usize] as char
    }
}

/// A single playing card, stored as its identifier in `0..52`.
///
/// `rank = id % 13` and `suit = id / 13`, so every physical card maps to exactly
/// one integer and a full deck is the set `{0, …, 51}`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card(suit as u8 * RANKS_PER_SUIT + rank as u8)
    }

    /// Returns `None` for identifiers outside `0..52`.
    pub fn from_index(index: u8) -> Option<Card> {
        (index < DECK_SIZE).then_some(Card(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> Rank {
        Rank::from_u8(rank_of(self.0))
    }

    pub fn suit(self) -> Suit {
        Suit::from_u8(suit_of(self.0))
    }
}

impl TryFrom<u8> for Card {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Card::from_index(value).ok_or_else(|| format!("card index {} out of range", value))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().symbol(), self.suit().symbol())
    }
}

impl FromStr for Card {
    type Err = String;

    /// Parses two-character notation such as `As`, `Td` or `2c` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(format!("invalid card '{}'", s));
        };
        let rank = match r.to_ascii_uppercase() {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(format!("invalid rank in '{}'", s)),
        };
        let suit = match su.to_ascii_lowercase() {
            'c' => Suit::Clubs,
            'd' => Suit::Diamonds,
            'h' => Suit::Hearts,
            's' => Suit::Spades,
            _ => return Err(format!("invalid suit in '{}'", s)),
        };
        Ok(Card::new(rank, suit))
    }
}

/// Rank index of a raw card identifier.
pub fn rank_of(card: u8) -> u8 {
    card % RANKS_PER_SUIT
}

/// Suit index of a raw card identifier.
pub fn suit_of(card: u8) -> u8 {
    card / RANKS_PER_SUIT
}

/// Compares two raw card identifiers by rank, then by suit.
///
/// Returns `false` when `a` is not a valid identifier or when both are equal,
/// and `true` when `a` is valid but `b` is not.
pub fn is_higher_card(a: i32, b: i32) -> bool {
    let valid = |c: i32| (0..DECK_SIZE as i32).contains(&c);
    match (valid(a), valid(b)) {
        (false, _) => false,
        (true, false) => true,
        (true, true) => {
            let (a, b) = (a as u8, b as u8);
            (rank_of(a), suit_of(a)) > (rank_of(b), suit_of(b))
        }
    }
}

pub fn full_deck() -> Vec<Card> {
    (0..DECK_SIZE).map(Card).collect()
}
