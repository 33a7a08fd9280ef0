use crate::error::CliError;
use crate::formatters::{category_name, describe_hand, format_board, format_outs};
use showdown_engine::cards::Card;
use showdown_engine::hand::{Outs, evaluate_hand};
use std::collections::HashSet;
use std::io::Write;

/// Parses cards written as `As Kd 7c`, separated by spaces or commas.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, CliError> {
    let mut seen = HashSet::new();
    let mut cards = Vec::new();
    for token in text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let card: Card = token
            .parse()
            .map_err(|_| CliError::InvalidInput(format!("not a card: {}", token)))?;
        if !seen.insert(card) {
            return Err(CliError::InvalidInput(format!("card given twice: {}", token)));
        }
        cards.push(card);
    }
    Ok(cards)
}

/// Ranks five to seven cards and lists the outs towards every category.
pub fn handle_eval_command(cards: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(cards)?;
    if !(5..=7).contains(&cards.len()) {
        return Err(CliError::InvalidInput(format!(
            "a hand needs 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    let rank = evaluate_hand(&cards);

    writeln!(out, "Cards: {}", format_board(&cards))?;
    writeln!(out, "Hand: {}", describe_hand(&rank))?;
    writeln!(out, "Category: {}", category_name(rank.category))?;
    writeln!(out, "Rank: {:?}", rank.to_tuple())?;

    let outs = format_outs(&Outs::compute(&cards));
    if outs.is_empty() {
        writeln!(out, "Outs: none")?;
    } else {
        writeln!(out, "Outs:")?;
        for line in outs {
            writeln!(out, "  {}", line)?;
        }
    }
    Ok(())
}
