//! Terminal agents: a human player answering from stdin and a spectator
//! narrating the match.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use showdown_engine::agent::{BetRequest, PlayerAgent, SeatInfo, UserAgent};
use showdown_engine::cards::Card;
use showdown_engine::game::Street;
use showdown_engine::hand::HandRank;

use crate::formatters::{
    describe_hand, format_board, format_card, format_standings, street_name,
};
use crate::io_utils::read_stdin_line;
use crate::validation::{HELP_TEXT, InputPolicy, ParseResult, parse_player_input};

const NAME_HEADER: &str = "NAME";
const VALUE_WIDTH: usize = 8;

/// A seat as the console follows it through a hand.
#[derive(Debug, Clone)]
struct SeatView {
    name: String,
    stack: u32,
    bet: u32,
    folded: bool,
}

/// Narrates every notification as a line of text. The human player builds
/// on it, so `you` marks the seat shown as the reader's own.
pub struct ConsoleSpectator<'a> {
    out: &'a mut dyn Write,
    you: Option<String>,
    seats: Vec<SeatView>,
}

impl<'a> ConsoleSpectator<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self {
            out,
            you: None,
            seats: Vec::new(),
        }
    }

    fn seat_mut(&mut self, player: &str) -> Option<&mut SeatView> {
        self.seats.iter_mut().find(|s| s.name == player)
    }

    /// Moves the player's chips so their bet for the hand becomes `total`.
    fn commit(&mut self, player: &str, total: u32) {
        if let Some(seat) = self.seat_mut(player) {
            seat.stack = seat.stack.saturating_sub(total.saturating_sub(seat.bet));
            seat.bet = total;
        }
    }

    fn label(&self, name: &str) -> String {
        match &self.you {
            Some(you) if you == name => format!("{} (you)", name),
            _ => name.to_string(),
        }
    }

    fn print_table(&mut self) {
        let width = self
            .seats
            .iter()
            .map(|s| self.label(&s.name).chars().count())
            .max()
            .unwrap_or(0)
            .max(NAME_HEADER.len());
        say!(self.out, "");
        say!(
            self.out,
            "  {:<width$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$}",
            NAME_HEADER,
            "STACK",
            "BET"
        );
        let rows: Vec<String> = self
            .seats
            .iter()
            .map(|s| {
                let status = if s.folded {
                    "folded"
                } else if s.stack == 0 && s.bet > 0 {
                    "all in"
                } else {
                    ""
                };
                format!(
                    "  {:<width$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$} {}",
                    self.label(&s.name),
                    s.stack,
                    s.bet,
                    status
                )
            })
            .collect();
        for row in rows {
            say!(self.out, "{}", row.trim_end());
        }
    }
}

impl UserAgent for ConsoleSpectator<'_> {
    fn on_set_players(&mut self, seats: &[SeatInfo]) {
        let names: Vec<&str> = seats.iter().map(|s| s.name.as_str()).collect();
        say!(self.out, "Players: {}", names.join(", "));
    }

    fn on_dealer_draw(&mut self, player: &str, card: Card) {
        say!(self.out, "{} draws {} for the button", player, format_card(card));
    }

    fn on_first_dealer(&mut self, dealer: &str) {
        say!(self.out, "{} draws the first deal", dealer);
    }

    fn on_begin_hand(&mut self, hand_no: u32, dealer: &str, seats: &[SeatInfo]) {
        self.seats = seats
            .iter()
            .map(|s| SeatView {
                name: s.name.clone(),
                stack: s.stack,
                bet: 0,
                folded: false,
            })
            .collect();
        say!(self.out, "");
        say!(self.out, "Hand #{}: {} deals the cards", hand_no, dealer);
    }

    fn on_pockets_dealt(&mut self, player: &str, cards: Option<&[Card]>) {
        let Some(cards) = cards else {
            return;
        };
        if self.you.as_deref() == Some(player) {
            say!(self.out, "Your pocket cards: {}", format_board(cards));
        } else {
            say!(self.out, "{} holds {}", player, format_board(cards));
        }
    }

    fn on_small_blind(&mut self, player: &str, amount: u32) {
        self.commit(player, amount);
        say!(self.out, "{} posts the small blind of {}", player, amount);
    }

    fn on_big_blind(&mut self, player: &str, amount: u32) {
        self.commit(player, amount);
        say!(self.out, "{} posts the big blind of {}", player, amount);
    }

    fn on_fold(&mut self, player: &str) {
        if let Some(seat) = self.seat_mut(player) {
            seat.folded = true;
        }
        say!(self.out, "{} folds", player);
    }

    fn on_check(&mut self, player: &str) {
        say!(self.out, "{} checks", player);
    }

    fn on_call(&mut self, player: &str, amount: u32) {
        self.commit(player, amount);
        say!(self.out, "{} calls {}", player, amount);
    }

    fn on_raise(&mut self, player: &str, amount: u32) {
        self.commit(player, amount);
        say!(self.out, "{} raises to {}", player, amount);
    }

    fn on_last_chips(&mut self, player: &str, amount: u32) {
        self.commit(player, amount);
        say!(self.out, "{} bets the last chips, {} in total", player, amount);
    }

    fn on_all_in(&mut self, player: &str, amount: u32) {
        self.commit(player, amount);
        say!(self.out, "{} is all in with {}", player, amount);
    }

    fn on_community_cards(&mut self, street: Street, dealt: &[Card], board: &[Card]) {
        say!(self.out, "");
        say!(
            self.out,
            "{}: {}   board: {}",
            street_name(street),
            format_board(dealt),
            format_board(board)
        );
    }

    fn on_showdown(&mut self) {
        say!(self.out, "");
        say!(self.out, "Showdown");
    }

    fn on_reveal(&mut self, player: &str, pockets: &[Card], rank: &HandRank) {
        say!(
            self.out,
            "{} shows {}: {}",
            player,
            format_board(pockets),
            describe_hand(rank)
        );
    }

    fn on_pot_won(&mut self, player: &str, amount: u32, net: i64) {
        if let Some(seat) = self.seat_mut(player) {
            seat.stack += amount;
        }
        say!(self.out, "{} wins {} ({:+})", player, amount, net);
    }

    fn on_eliminated(&mut self, player: &str) {
        say!(self.out, "{} is eliminated", player);
    }

    fn on_end_hand(&mut self) {
        say!(self.out, "----------");
    }

    fn on_end_match(&mut self, standings: &[SeatInfo]) {
        let standings: Vec<(String, u32)> = standings
            .iter()
            .map(|s| (s.name.clone(), s.stack))
            .collect();
        say!(self.out, "");
        say!(self.out, "Final standings");
        for line in format_standings(&standings) {
            say!(self.out, "{}", line);
        }
    }
}

/// A human at the table, typing answers on a line-based input.
///
/// End of input or `q` makes the player fold every remaining decision; the
/// flag returned by [`ConsolePlayer::quit_flag`] records it.
pub struct ConsolePlayer<'a> {
    view: ConsoleSpectator<'a>,
    input: &'a mut dyn BufRead,
    policy: InputPolicy,
    quit: Rc<Cell<bool>>,
}

impl<'a> ConsolePlayer<'a> {
    pub fn new(
        name: impl Into<String>,
        input: &'a mut dyn BufRead,
        out: &'a mut dyn Write,
        policy: InputPolicy,
    ) -> Self {
        let mut view = ConsoleSpectator::new(out);
        view.you = Some(name.into());
        Self {
            view,
            input,
            policy,
            quit: Rc::new(Cell::new(false)),
        }
    }

    /// Shared flag raised once the player has left the match.
    pub fn quit_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.quit)
    }

    fn leave(&mut self, reason: &str) -> i64 {
        self.quit.set(true);
        say!(self.view.out, "{}, folding from now on", reason);
        -1
    }

    fn prompt(&mut self, req: &BetRequest<'_>) {
        self.view.print_table();
        say!(self.view.out, "");
        say!(
            self.view.out,
            "Pocket cards: {}   community cards: {}",
            format_board(req.pockets),
            format_board(req.community)
        );
        say!(
            self.view.out,
            "Current bet: {} (to call {}), raise to at least {}, pot {}",
            req.current_bet,
            req.to_call(),
            req.min_raise,
            req.pot
        );
        if let Err(e) = write!(self.view.out, "Your action: ").and_then(|_| self.view.out.flush())
        {
            tracing::warn!(error = %e, "console output failed");
        }
    }
}

impl UserAgent for ConsolePlayer<'_> {
    fn is_human(&self) -> bool {
        true
    }

    fn on_set_players(&mut self, seats: &[SeatInfo]) {
        self.view.on_set_players(seats);
    }
    fn on_dealer_draw(&mut self, player: &str, card: Card) {
        self.view.on_dealer_draw(player, card);
    }
    fn on_first_dealer(&mut self, dealer: &str) {
        self.view.on_first_dealer(dealer);
    }
    fn on_begin_hand(&mut self, hand_no: u32, dealer: &str, seats: &[SeatInfo]) {
        self.view.on_begin_hand(hand_no, dealer, seats);
    }
    fn on_pockets_dealt(&mut self, player: &str, cards: Option<&[Card]>) {
        self.view.on_pockets_dealt(player, cards);
    }
    fn on_small_blind(&mut self, player: &str, amount: u32) {
        self.view.on_small_blind(player, amount);
    }
    fn on_big_blind(&mut self, player: &str, amount: u32) {
        self.view.on_big_blind(player, amount);
    }
    fn on_fold(&mut self, player: &str) {
        self.view.on_fold(player);
    }
    fn on_check(&mut self, player: &str) {
        self.view.on_check(player);
    }
    fn on_call(&mut self, player: &str, amount: u32) {
        self.view.on_call(player, amount);
    }
    fn on_raise(&mut self, player: &str, amount: u32) {
        self.view.on_raise(player, amount);
    }
    fn on_last_chips(&mut self, player: &str, amount: u32) {
        self.view.on_last_chips(player, amount);
    }
    fn on_all_in(&mut self, player: &str, amount: u32) {
        self.view.on_all_in(player, amount);
    }
    fn on_community_cards(&mut self, street: Street, dealt: &[Card], board: &[Card]) {
        self.view.on_community_cards(street, dealt, board);
    }
    fn on_showdown(&mut self) {
        self.view.on_showdown();
    }
    fn on_reveal(&mut self, player: &str, pockets: &[Card], rank: &HandRank) {
        self.view.on_reveal(player, pockets, rank);
    }
    fn on_pot_won(&mut self, player: &str, amount: u32, net: i64) {
        self.view.on_pot_won(player, amount, net);
    }
    fn on_eliminated(&mut self, player: &str) {
        self.view.on_eliminated(player);
    }
    fn on_end_hand(&mut self) {
        self.view.on_end_hand();
    }
    fn on_end_match(&mut self, standings: &[SeatInfo]) {
        self.view.on_end_match(standings);
    }
}

impl PlayerAgent for ConsolePlayer<'_> {
    fn demand_bet(&mut self, req: &BetRequest<'_>) -> i64 {
        if self.quit.get() {
            return -1;
        }
        loop {
            self.prompt(req);
            let Some(line) = read_stdin_line(self.input) else {
                say!(self.view.out, "");
                return self.leave("Input closed");
            };
            match parse_player_input(&line, req) {
                ParseResult::Bet(bet) => {
                    tracing::debug!(bet, "human answer");
                    return bet;
                }
                ParseResult::Help => {
                    say!(self.view.out, "{}", HELP_TEXT);
                }
                ParseResult::Quit => return self.leave("Leaving the table"),
                ParseResult::Invalid(msg) => {
                    say!(self.view.out, "{}", msg);
                    if self.policy == InputPolicy::Fold {
                        return -1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn request<'a>(pockets: &'a [Card]) -> BetRequest<'a> {
        BetRequest {
            current_bet: 500,
            min_raise: 1_000,
            pot: 750,
            own_bet: 0,
            own_stack: 10_000,
            pockets,
            community: &[],
        }
    }

    #[test]
    fn reprompts_until_a_valid_answer() {
        let mut input = Cursor::new(&b"bogus\nhelp\n700\n1500\n"[..]);
        let mut out = Vec::new();
        let bet = {
            let mut player =
                ConsolePlayer::new("me", &mut input, &mut out, InputPolicy::Reprompt);
            player.demand_bet(&request(&[]))
        };
        assert_eq!(bet, 1_500);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Unrecognized action"));
        assert!(text.contains("Actions:"));
        assert!(text.contains("at least 1000"));
    }

    #[test]
    fn fold_policy_folds_on_bad_input() {
        let mut input = Cursor::new(&b"700\n1500\n"[..]);
        let mut out = Vec::new();
        let mut player = ConsolePlayer::new("me", &mut input, &mut out, InputPolicy::Fold);
        assert_eq!(player.demand_bet(&request(&[])), -1);
        assert!(!player.quit_flag().get());
    }

    #[test]
    fn end_of_input_folds_for_good() {
        let mut input = Cursor::new(&b""[..]);
        let mut out = Vec::new();
        let mut player = ConsolePlayer::new("me", &mut input, &mut out, InputPolicy::Reprompt);
        let flag = player.quit_flag();
        assert_eq!(player.demand_bet(&request(&[])), -1);
        assert!(flag.get());
        assert_eq!(player.demand_bet(&request(&[])), -1);
    }

    #[test]
    fn table_tracks_chips_through_the_hand() {
        let mut out = Vec::new();
        {
            let mut view = ConsoleSpectator::new(&mut out);
            let seats = [
                SeatInfo {
                    name: "ann".into(),
                    stack: 1_000,
                },
                SeatInfo {
                    name: "bob".into(),
                    stack: 1_000,
                },
            ];
            view.on_begin_hand(1, "ann", &seats);
            view.on_small_blind("ann", 50);
            view.on_big_blind("bob", 100);
            view.on_raise("ann", 300);
            view.on_fold("bob");
            assert_eq!(view.seats[0].stack, 700);
            assert_eq!(view.seats[1].stack, 900);
            assert!(view.seats[1].folded);
            view.on_pot_won("ann", 400, 100);
            assert_eq!(view.seats[0].stack, 1_100);
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Hand #1: ann deals the cards"));
        assert!(text.contains("ann raises to 300"));
        assert!(text.contains("ann wins 400 (+100)"));
    }

    #[test]
    fn hidden_pockets_are_not_printed() {
        let mut out = Vec::new();
        {
            let mut view = ConsoleSpectator::new(&mut out);
            view.on_pockets_dealt("bob", None);
        }
        assert!(out.is_empty());
    }

    #[test]
    fn button_draws_are_narrated() {
        let mut out = Vec::new();
        {
            let mut view = ConsoleSpectator::new(&mut out);
            view.on_dealer_draw("ann", "Kh".parse().unwrap());
            view.on_dealer_draw("bob", "As".parse().unwrap());
            view.on_first_dealer("bob");
        }
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ann draws ") && lines[0].ends_with(" for the button"));
        assert!(lines[1].starts_with("bob draws "));
        assert_eq!(lines[2], "bob draws the first deal");
    }
}
