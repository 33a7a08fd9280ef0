use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::{BetRequest, PlayerAgent, SeatInfo, UserAgent};
use crate::cards::{is_higher_card, Card};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{evaluate_hand, HandRank};
use crate::player::Player;
use crate::pot::{PotLedger, Showdown};
use crate::rules::{min_raise_level, resolve_bet, ResolvedBet};

/// Betting rounds of a hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// Before the flop (pockets dealt)
    Preflop,
    /// After the flop (3 community cards)
    Flop,
    /// After the turn (4th community card)
    Turn,
    /// After the river (5th community card)
    River,
}

impl Street {
    /// Community cards dealt when the street opens.
    pub fn cards_dealt(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }
}

/// Starting stack of the default table, in big blinds.
pub const DEFAULT_STACK_IN_BIG_BLINDS: u32 = 20;

/// Table settings of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    /// Starting stack in big blinds
    pub stack_in_big_blinds: u32,
    /// The match ends once this many players (at least 1) are left
    pub play_until_left: usize,
    pub max_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            small_blind: 250,
            big_blind: 500,
            stack_in_big_blinds: DEFAULT_STACK_IN_BIG_BLINDS,
            play_until_left: 1,
            max_players: 10,
        }
    }
}

impl GameConfig {
    /// `None` when the stack does not fit a `u32`.
    pub fn starting_stack(&self) -> Option<u32> {
        self.stack_in_big_blinds.checked_mul(self.big_blind)
    }

    /// Every chip a table of `players` holds, plus one big blind of headroom
    /// for the highest possible minimum raise.
    pub fn chips_in_play(&self, players: usize) -> Option<u32> {
        let players = u32::try_from(players).ok()?;
        self.starting_stack()?
            .checked_mul(players)?
            .checked_add(self.big_blind)
    }
}

struct Spectator<'a> {
    name: String,
    agent: Box<dyn UserAgent + 'a>,
}

/// Everyone receiving notifications: one agent per seat (same order as the
/// players) plus spectators.
#[derive(Default)]
struct Audience<'a> {
    agents: Vec<Box<dyn PlayerAgent + 'a>>,
    spectators: Vec<Spectator<'a>>,
}

impl Audience<'_> {
    fn broadcast(&mut self, mut notify: impl FnMut(&mut dyn UserAgent)) {
        for agent in self.agents.iter_mut() {
            let agent: &mut (dyn UserAgent + '_) = agent.as_mut();
            notify(agent);
        }
        for spectator in self.spectators.iter_mut() {
            notify(spectator.agent.as_mut());
        }
    }
}

/// A poker table running a whole match: seating, hands, eliminations.
///
/// Players and their agents are kept in two parallel lists indexed by seat.
/// Agents may borrow from the caller (a console, a log file) for `'a`.
///
/// # Examples
///
/// ```
/// use showdown_engine::agent::{BetRequest, PlayerAgent, UserAgent};
/// use showdown_engine::game::Game;
///
/// struct Caller;
/// impl UserAgent for Caller {}
/// impl PlayerAgent for Caller {
///     fn demand_bet(&mut self, req: &BetRequest<'_>) -> i64 {
///         req.current_bet as i64
///     }
/// }
///
/// struct Pusher;
/// impl UserAgent for Pusher {}
/// impl PlayerAgent for Pusher {
///     fn demand_bet(&mut self, req: &BetRequest<'_>) -> i64 {
///         req.all_in_level() as i64
///     }
/// }
///
/// let mut game = Game::new_with_seed(7);
/// game.add_player("calla", Box::new(Caller)).unwrap();
/// game.add_player("push", Box::new(Pusher)).unwrap();
/// let standings = game.run().unwrap();
/// assert_eq!(standings.len(), 1);
/// assert_eq!(standings[0].1, 2 * 20 * 500);
/// ```
pub struct Game<'a> {
    config: GameConfig,
    deck: Deck,
    players: Vec<Player>,
    audience: Audience<'a>,
    dealer: usize,
    current_bet: u32,
    community: Vec<Card>,
    pots: PotLedger,
    started: bool,
    must_survive: Vec<String>,
    hand_no: u32,
}

impl<'a> Game<'a> {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            deck: Deck::new_with_seed(seed),
            players: Vec::new(),
            audience: Audience::default(),
            dealer: 0,
            current_bet: 0,
            community: Vec::with_capacity(5),
            pots: PotLedger::new(),
            started: false,
            must_survive: Vec::new(),
            hand_no: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn hands_played(&self) -> u32 {
        self.hand_no
    }

    fn name_taken(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name() == name)
            || self.audience.spectators.iter().any(|s| s.name == name)
    }

    /// Seats a player at a uniformly random position.
    ///
    /// # Errors
    ///
    /// Fails when the match already started, the table is full or the name
    /// is taken; the table is left untouched.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        agent: Box<dyn PlayerAgent + 'a>,
    ) -> Result<(), GameError> {
        let name = name.into();
        if self.started {
            return Err(GameError::GameAlreadyStarted);
        }
        if self.players.len() >= self.config.max_players {
            return Err(GameError::TableFull {
                max: self.config.max_players,
            });
        }
        if self.name_taken(&name) {
            return Err(GameError::DuplicateName(name));
        }
        let seat = self.deck.rng_mut().random_range(0..=self.players.len());
        tracing::debug!(%name, seat, "player seated");
        self.players.insert(seat, Player::new(name, 0));
        self.audience.agents.insert(seat, agent);
        Ok(())
    }

    /// Adds a watcher that sees every card, including all pockets.
    pub fn add_spectator(
        &mut self,
        name: impl Into<String>,
        agent: Box<dyn UserAgent + 'a>,
    ) -> Result<(), GameError> {
        let name = name.into();
        if self.name_taken(&name) {
            return Err(GameError::DuplicateName(name));
        }
        self.audience.spectators.push(Spectator { name, agent });
        Ok(())
    }

    /// The match stops as soon as none of `names` is seated any more.
    /// An empty list removes the condition.
    pub fn set_must_survive<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.must_survive = names.into_iter().map(Into::into).collect();
    }

    fn seat_infos(&self) -> Vec<SeatInfo> {
        self.players
            .iter()
            .map(|p| SeatInfo {
                name: p.name().to_string(),
                stack: p.stack(),
            })
            .collect()
    }

    /// Plays hands until the match is decided and returns the standings,
    /// richest first.
    ///
    /// # Errors
    ///
    /// [`GameError::NotEnoughPlayers`] if fewer than two players are seated,
    /// [`GameError::StakesTooHigh`] if the table's chips overflow a `u32`;
    /// no chips move in either case.
    pub fn run(&mut self) -> Result<Vec<(String, u32)>, GameError> {
        let players = self.players.len();
        if players < 2 {
            return Err(GameError::NotEnoughPlayers { found: players });
        }
        let Some(stack) = self
            .config
            .chips_in_play(players)
            .and(self.config.starting_stack())
        else {
            return Err(GameError::StakesTooHigh {
                players,
                big_blind: self.config.big_blind,
            });
        };
        self.started = true;
        for p in self.players.iter_mut() {
            p.set_stack(stack);
        }
        tracing::info!(
            players = self.players.len(),
            stack,
            small_blind = self.config.small_blind,
            big_blind = self.config.big_blind,
            "match started"
        );
        let seats = self.seat_infos();
        self.audience.broadcast(|a| a.on_set_players(&seats));

        self.dealer = self.draw_first_dealer();
        let dealer_name = self.players[self.dealer].name();
        self.audience.broadcast(|a| a.on_first_dealer(dealer_name));

        while self.match_goes_on() {
            self.play_hand();
            self.remove_busted();
            self.dealer = (self.dealer + 1) % self.players.len();
        }

        let mut standings = self.seat_infos();
        standings.sort_by(|a, b| b.stack.cmp(&a.stack));
        tracing::info!(hands = self.hand_no, ?standings, "match finished");
        self.audience.broadcast(|a| a.on_end_match(&standings));
        Ok(standings.into_iter().map(|s| (s.name, s.stack)).collect())
    }

    /// One card each; the highest card (suit breaking ties) deals first.
    fn draw_first_dealer(&mut self) -> usize {
        self.deck.restore();
        let mut best = -1;
        let mut dealer = 0;
        for seat in 0..self.players.len() {
            if let Some(card) = self.deck.draw_one() {
                let name = self.players[seat].name();
                self.audience.broadcast(|a| a.on_dealer_draw(name, card));
                let card = card.index() as i32;
                if is_higher_card(card, best) {
                    best = card;
                    dealer = seat;
                }
            }
        }
        dealer
    }

    fn match_goes_on(&self) -> bool {
        let enough_left = self.players.len() > self.config.play_until_left.max(1);
        let watched_alive = self.must_survive.is_empty()
            || self
                .must_survive
                .iter()
                .any(|name| self.players.iter().any(|p| p.name() == name));
        enough_left && watched_alive
    }

    fn remove_busted(&mut self) {
        for seat in (0..self.players.len()).rev() {
            if self.players[seat].stack() > 0 {
                continue;
            }
            let player = self.players.remove(seat);
            let agent = self.audience.agents.remove(seat);
            tracing::info!(name = player.name(), "player eliminated");
            self.audience.broadcast(|a| a.on_eliminated(player.name()));
            if agent.is_human() {
                self.audience.spectators.push(Spectator {
                    name: player.name().to_string(),
                    agent,
                });
            }
            if self.dealer >= seat {
                self.dealer = match self.dealer.checked_sub(1) {
                    Some(d) => d,
                    None => self.players.len().saturating_sub(1),
                };
            }
        }
    }

    /// Next seat after `old`, going round the table, whose player is still
    /// active. `old` itself is returned when it is the only active seat.
    pub fn shift_play_index(&self, old: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|k| (old + k) % n)
            .find(|&seat| self.players[seat].is_active())
    }

    fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    fn eligible_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_eligible()).count()
    }

    fn pot_total(&self) -> u32 {
        self.players.iter().map(Player::bet).sum()
    }

    /// Whether `next` still has to act in the current interval.
    pub fn does_interval_go_on(&self, next: Option<usize>) -> bool {
        let Some(seat) = next else {
            return false;
        };
        let player = &self.players[seat];
        let must_act = player.bet() < self.current_bet
            || (player.yet_unasked() && self.active_count() > 1);
        must_act && self.eligible_count() > 1
    }

    /// Plays one complete hand, from the deal to paying out the pots.
    pub fn play_hand(&mut self) {
        self.hand_no += 1;
        self.deck.restore();
        self.community.clear();
        self.pots.clear();
        self.current_bet = 0;
        for p in self.players.iter_mut() {
            p.reset_for_hand();
        }
        tracing::info!(
            hand = self.hand_no,
            dealer = self.players[self.dealer].name(),
            "hand started"
        );
        let seats = self.seat_infos();
        let (hand_no, dealer_name) = (self.hand_no, self.players[self.dealer].name());
        self.audience
            .broadcast(|a| a.on_begin_hand(hand_no, dealer_name, &seats));

        self.deal_pockets();
        self.first_interval();
        for street in [Street::Flop, Street::Turn, Street::River] {
            if self.eligible_count() <= 1 {
                break;
            }
            let dealt = self.deck.draw(street.cards_dealt());
            self.community.extend_from_slice(&dealt);
            for p in self.players.iter_mut() {
                p.show_opens(&dealt);
            }
            let board = &self.community;
            self.audience
                .broadcast(|a| a.on_community_cards(street, &dealt, board));
            if self.active_count() > 1 {
                self.further_interval(street);
            }
        }

        let ranks = self.showdown();
        self.pay_out(&ranks);
        self.audience.broadcast(|a| a.on_end_hand());
    }

    /// Two cards per seat, starting left of the dealer. Only the owner and
    /// spectators are told which cards they are.
    fn deal_pockets(&mut self) {
        let n = self.players.len();
        for k in 1..=n {
            let seat = (self.dealer + k) % n;
            let cards = self.deck.draw(2);
            self.players[seat].give_pockets(&cards);
            let name = self.players[seat].name();
            for (i, agent) in self.audience.agents.iter_mut().enumerate() {
                agent.on_pockets_dealt(name, (i == seat).then_some(&cards[..]));
            }
            for spectator in self.audience.spectators.iter_mut() {
                spectator.agent.on_pockets_dealt(name, Some(&cards));
            }
        }
    }

    fn mark_everyone_unasked(&mut self) {
        for p in self.players.iter_mut().filter(|p| p.is_active()) {
            p.mark_unasked();
        }
    }

    /// Pre-flop: blinds are forced, then action starts left of the big blind.
    /// Heads-up the dealer posts the small blind.
    fn first_interval(&mut self) {
        let n = self.players.len();
        let small = if n == 2 {
            self.dealer
        } else {
            (self.dealer + 1) % n
        };
        let big = (small + 1) % n;
        self.mark_everyone_unasked();

        let amount = self.players[small].inc_bet(self.config.small_blind);
        let name = self.players[small].name();
        self.audience.broadcast(|a| a.on_small_blind(name, amount));
        self.settle(small);

        let amount = self.players[big].inc_bet(self.config.big_blind);
        let name = self.players[big].name();
        self.audience.broadcast(|a| a.on_big_blind(name, amount));
        self.settle(big);

        tracing::debug!(street = ?Street::Preflop, small, big, "interval started");
        self.interval_from(big);
    }

    /// Flop, turn and river: action starts left of the dealer.
    fn further_interval(&mut self, street: Street) {
        self.mark_everyone_unasked();
        tracing::debug!(?street, "interval started");
        self.interval_from(self.dealer);
    }

    fn interval_from(&mut self, seat: usize) {
        let mut next = self.shift_play_index(seat);
        while self.does_interval_go_on(next) {
            let Some(seat) = next else { break };
            self.play_action(seat);
            next = self.shift_play_index(seat);
        }
    }

    /// Asks the agent of `seat` for a bet and applies the answer.
    pub fn play_action(&mut self, seat: usize) {
        let big_blind = self.config.big_blind;
        let pot = self.pot_total();
        let player = &mut self.players[seat];
        player.mark_asked();
        let min_raise = min_raise_level(self.current_bet, big_blind);
        let request = BetRequest {
            current_bet: self.current_bet,
            min_raise,
            pot,
            own_bet: player.bet(),
            own_stack: player.stack(),
            pockets: player.pockets(),
            community: &self.community,
        };
        let answer = self.audience.agents[seat].demand_bet(&request);
        let resolved = resolve_bet(
            answer,
            player.bet(),
            player.stack(),
            self.current_bet,
            min_raise,
        );
        tracing::debug!(name = player.name(), answer, ?resolved, "action");

        match resolved {
            ResolvedBet::Fold => player.fold(),
            ResolvedBet::Check => {}
            ResolvedBet::Call(total) | ResolvedBet::Raise(total) | ResolvedBet::Short(total) => {
                let owed = total - player.bet();
                player.inc_bet(owed);
            }
        }
        let name = self.players[seat].name();
        self.audience.broadcast(|a| match resolved {
            ResolvedBet::Fold => a.on_fold(name),
            ResolvedBet::Check => a.on_check(name),
            ResolvedBet::Call(total) => a.on_call(name, total),
            ResolvedBet::Raise(total) => a.on_raise(name, total),
            ResolvedBet::Short(total) => a.on_last_chips(name, total),
        });
        if resolved != ResolvedBet::Fold {
            self.settle(seat);
        }
    }

    /// Bet bookkeeping after chips moved: lifts the current bet level and
    /// seals a pot for a player who just went all-in.
    fn settle(&mut self, seat: usize) {
        let player = &mut self.players[seat];
        let bet = player.bet();
        if bet > self.current_bet {
            self.current_bet = bet;
        }
        if player.stack() == 0 && player.is_active() {
            player.all_in();
            self.pots.add_to_pot([seat], bet);
            let name = self.players[seat].name();
            self.audience.broadcast(|a| a.on_all_in(name, bet));
        }
    }

    /// Reveals and ranks every eligible hand when more than one is left.
    fn showdown(&mut self) -> Vec<Option<HandRank>> {
        if self.eligible_count() <= 1 {
            return vec![None; self.players.len()];
        }
        self.audience.broadcast(|a| a.on_showdown());
        let ranks: Vec<Option<HandRank>> = self
            .players
            .iter()
            .map(|p| p.is_eligible().then(|| evaluate_hand(&p.all_cards())))
            .collect();
        for (player, rank) in self.players.iter().zip(ranks.iter()) {
            if let Some(rank) = rank {
                self.audience
                    .broadcast(|a| a.on_reveal(player.name(), player.pockets(), rank));
            }
        }
        ranks
    }

    fn pay_out(&mut self, ranks: &[Option<HandRank>]) {
        let bets: Vec<u32> = self.players.iter().map(Player::bet).collect();
        let active: Vec<usize> = (0..self.players.len())
            .filter(|&s| self.players[s].is_active())
            .collect();
        let table = Showdown {
            bets: &bets,
            ranks,
            dealer: self.dealer,
        };
        let winnings = self.pots.evaluate_pots(&active, self.current_bet, &table);
        for (seat, amount) in winnings {
            let player = &mut self.players[seat];
            player.win(amount);
            let net = i64::from(amount) - i64::from(bets[seat]);
            tracing::debug!(name = player.name(), amount, net, "pot won");
            let name = self.players[seat].name();
            self.audience.broadcast(|a| a.on_pot_won(name, amount, net));
        }
    }
}
