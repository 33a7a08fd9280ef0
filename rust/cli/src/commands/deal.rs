use crate::error::CliError;
use crate::formatters::{describe_hand, format_board};
use showdown_engine::cards::Card;
use showdown_engine::deck::Deck;
use showdown_engine::hand::{HandRank, evaluate_hand};
use std::io::Write;

const POCKET_CARDS: usize = 2;
const BOARD_CARDS: usize = 5;

/// Deals two pocket cards per seat and a full board from a seeded deck, then
/// shows every seat's best hand and who would take the pot.
pub fn handle_deal_command(
    seed: Option<u64>,
    players: u8,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(seed);
    let pockets: Vec<Vec<Card>> = (0..players).map(|_| deck.draw(POCKET_CARDS)).collect();
    let board = deck.draw(BOARD_CARDS);
    if board.len() < BOARD_CARDS {
        return Err(CliError::InvalidInput(format!(
            "not enough cards for {} players",
            players
        )));
    }
    tracing::debug!(seed, players, "dealt");

    writeln!(out, "Seed: {}", seed)?;
    let ranks: Vec<HandRank> = pockets
        .iter()
        .map(|hole| {
            let all: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
            evaluate_hand(&all)
        })
        .collect();
    for (seat, (hole, rank)) in pockets.iter().zip(ranks.iter()).enumerate() {
        writeln!(
            out,
            "Seat {:>2}: {}  {}",
            seat + 1,
            format_board(hole),
            describe_hand(rank)
        )?;
    }
    writeln!(out, "Board: {}", format_board(&board))?;

    let Some(best) = ranks.iter().max() else {
        return Ok(());
    };
    let winners: Vec<String> = ranks
        .iter()
        .enumerate()
        .filter(|(_, r)| *r == best)
        .map(|(seat, _)| format!("Seat {}", seat + 1))
        .collect();
    writeln!(out, "Best hand: {}", winners.join(", "))?;
    Ok(())
}
