//! Text rendering of cards, hands and standings for the terminal.
//!
//! Suits print as ♥ ♦ ♣ ♠ where the terminal is known to cope with them and
//! as the letters h d c s otherwise (see [`supports_unicode`]).
//!
//! ```rust
//! use showdown_cli::formatters::{format_board, format_card};
//!
//! let ace: showdown_engine::cards::Card = "As".parse().unwrap();
//! assert!(format_card(ace) == "A♠" || format_card(ace) == "As");
//! assert_eq!(format_board(&[]), "-");
//! ```

use showdown_engine::cards::{Card, Rank, Suit};
use showdown_engine::game::Street;
use showdown_engine::hand::{Category, HandRank, Outs};

/// On Windows only a few modern terminals are trusted with suit symbols;
/// everywhere else they are assumed to work.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.symbol().to_string()
    }
}

pub fn format_card(card: Card) -> String {
    format!("{}{}", card.rank().symbol(), format_suit(card.suit()))
}

/// Cards separated by spaces, `-` when there are none.
pub fn format_board(cards: &[Card]) -> String {
    if cards.is_empty() {
        "-".to_string()
    } else {
        cards
            .iter()
            .map(|&c| format_card(c))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn category_name(category: Category) -> &'static str {
    match category {
        Category::HighCard => "High card",
        Category::OnePair => "Pair",
        Category::TwoPair => "Two pair",
        Category::ThreeOfAKind => "Three of a kind",
        Category::Straight => "Straight",
        Category::Flush => "Flush",
        Category::FullHouse => "Full house",
        Category::FourOfAKind => "Four of a kind",
        Category::StraightFlush => "Straight flush",
    }
}

fn rank_name(rank: i8) -> &'static str {
    const NAMES: [&str; 13] = [
        "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "jack", "queen",
        "king", "ace",
    ];
    usize::try_from(rank)
        .ok()
        .and_then(|r| NAMES.get(r))
        .copied()
        .unwrap_or("?")
}

fn plural(rank: i8) -> String {
    match rank_name(rank) {
        "six" => "sixes".to_string(),
        name => format!("{}s", name),
    }
}

/// Describes a hand rank the way players call it out.
///
/// ```rust
/// use showdown_cli::formatters::describe_hand;
/// use showdown_engine::cards::Card;
/// use showdown_engine::hand::evaluate_hand;
///
/// let cards: Vec<Card> = ["Kh", "Kd", "Ks", "2c", "2d"]
///     .iter()
///     .map(|c| c.parse().unwrap())
///     .collect();
/// assert_eq!(describe_hand(&evaluate_hand(&cards)), "Full house, kings full of twos");
/// ```
pub fn describe_hand(rank: &HandRank) -> String {
    let t = |i: usize| rank.tiebreaks.get(i).copied().unwrap_or(-1);
    let name = category_name(rank.category);
    match rank.category {
        Category::HighCard | Category::Flush => format!("{}, {} high", name, rank_name(t(0))),
        Category::OnePair | Category::ThreeOfAKind | Category::FourOfAKind => {
            format!("{}, {}", name, plural(t(0)))
        }
        Category::TwoPair => format!("{}, {} and {}", name, plural(t(0)), plural(t(1))),
        Category::Straight | Category::StraightFlush if t(0) == Rank::Ace as i8 => {
            if rank.category == Category::StraightFlush {
                "Royal flush".to_string()
            } else {
                format!("{}, ace high", name)
            }
        }
        Category::Straight | Category::StraightFlush => {
            format!("{}, {} high", name, rank_name(t(0)))
        }
        Category::FullHouse => format!("{}, {} full of {}", name, plural(t(0)), plural(t(1))),
    }
}

pub fn street_name(street: Street) -> &'static str {
    match street {
        Street::Preflop => "Pre-flop",
        Street::Flop => "Flop",
        Street::Turn => "Turn",
        Street::River => "River",
    }
}

/// One line per category that can still be reached, strongest first.
pub fn format_outs(outs: &Outs) -> Vec<String> {
    outs.iter()
        .map(|(category, cards)| {
            format!(
                "{:<16} {:>2}  {}",
                category_name(category),
                cards.len(),
                format_board(cards)
            )
        })
        .collect()
}

/// Ranked chip counts, one line per player.
pub fn format_standings(standings: &[(String, u32)]) -> Vec<String> {
    let width = standings
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    standings
        .iter()
        .enumerate()
        .map(|(i, (name, chips))| format!("{:>2}. {:<width$}  {:>8}", i + 1, name, chips))
        .collect()
}
