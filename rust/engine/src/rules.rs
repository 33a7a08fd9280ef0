/// What a player's bet answer amounts to once it has been fitted to the table.
///
/// Amounts are the player's total bet for the hand after the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBet {
    Fold,
    /// Bet unchanged and already level with the table
    Check,
    /// Matches the current bet level
    Call(u32),
    /// Lifts the current bet level
    Raise(u32),
    /// All remaining chips, still below the current bet level
    Short(u32),
}

/// Minimum level a raise has to reach.
pub fn min_raise_level(current_bet: u32, big_blind: u32) -> u32 {
    current_bet.saturating_add(big_blind)
}

/// Fits a raw bet answer to the table.
///
/// # Arguments
///
/// * `request` - The answer of the agent; negative folds, otherwise the total bet wanted
/// * `own_bet` - Chips the player already committed this hand
/// * `own_stack` - Chips the player has left
/// * `current_bet` - Current bet level of the table
/// * `min_raise` - Lowest level a raise may reach
///
/// # Returns
///
/// The answer is clamped to `[own_bet, own_bet + own_stack]`. A raise that
/// does not reach `min_raise` becomes a call unless it puts the player all-in.
/// Anything below the current bet that is not all-in becomes a call too
/// (or an all-in for less when the stack cannot cover it).
///
/// # Examples
///
/// ```
/// use showdown_engine::rules::{resolve_bet, ResolvedBet};
///
/// // too small to be a raise: snapped to a call
/// assert_eq!(resolve_bet(700, 0, 10_000, 500, 1_000), ResolvedBet::Call(500));
/// // all chips stand even below the minimum raise
/// assert_eq!(resolve_bet(700, 0, 700, 500, 1_000), ResolvedBet::Raise(700));
/// assert_eq!(resolve_bet(-1, 0, 700, 500, 1_000), ResolvedBet::Fold);
/// ```
pub fn resolve_bet(
    request: i64,
    own_bet: u32,
    own_stack: u32,
    current_bet: u32,
    min_raise: u32,
) -> ResolvedBet {
    if request < 0 {
        return ResolvedBet::Fold;
    }
    let ceiling = own_bet + own_stack;
    let mut total = (request.min(ceiling as i64) as u32).max(own_bet);
    if total != ceiling {
        if total > current_bet && total < min_raise {
            total = current_bet;
        } else if total < current_bet {
            total = current_bet.min(ceiling);
        }
    }

    if total < current_bet {
        ResolvedBet::Short(total)
    } else if total > current_bet {
        ResolvedBet::Raise(total)
    } else if total == own_bet {
        ResolvedBet::Check
    } else {
        ResolvedBet::Call(total)
    }
}
