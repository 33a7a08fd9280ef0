use std::collections::HashSet;

use showdown_engine::cards::{Card, DECK_SIZE};
use showdown_engine::deck::Deck;

#[test]
fn fresh_deck_draws_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    let drawn = deck.draw(52);
    let set: HashSet<Card> = drawn.iter().copied().collect();
    assert_eq!(set.len(), 52);
    assert_eq!(deck.remaining(), 0);
    assert!(deck.draw_one().is_none());
}

#[test]
fn draw_is_clamped_to_remaining_cards() {
    let mut deck = Deck::new_with_seed(1);
    assert_eq!(deck.draw(50).len(), 50);
    assert_eq!(deck.draw(5).len(), 2);
    assert!(deck.draw(3).is_empty());
}

#[test]
fn drawn_cards_leave_the_deck() {
    let mut deck = Deck::new_with_seed(9);
    for card in deck.draw(7) {
        assert!(!deck.contains(card));
    }
    assert_eq!(deck.remaining(), 45);
}

#[test]
fn restore_is_idempotent_after_any_draws() {
    let mut deck = Deck::new_with_seed(3);
    for n in [0, 1, 5, 52, 60] {
        deck.draw(n);
        deck.restore();
        deck.restore();
        assert_eq!(deck.remaining(), DECK_SIZE as usize);
        let all: HashSet<u8> = deck.draw(52).iter().map(|c| c.index()).collect();
        assert_eq!(all, (0..DECK_SIZE).collect::<HashSet<u8>>());
        deck.restore();
    }
}

#[test]
fn same_seed_same_draws() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    assert_eq!(d1.draw(10), d2.draw(10));
    d1.restore();
    d2.restore();
    assert_eq!(d1.draw(10), d2.draw(10));
}

#[test]
fn different_seeds_differ() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    assert_ne!(d1.draw(10), d2.draw(10));
}
