use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use showdown_engine::agent::{BetRequest, PlayerAgent, SeatInfo, UserAgent};
use showdown_engine::cards::Card;
use showdown_engine::errors::GameError;
use showdown_engine::game::{Game, GameConfig};

type Log = Rc<RefCell<Vec<String>>>;

/// Replays fixed answers, then pushes every chip.
struct Script {
    name: String,
    answers: VecDeque<i64>,
    human: bool,
    log: Log,
}

impl Script {
    fn new(name: &str, answers: &[i64], log: &Log) -> Box<Self> {
        Box::new(Self {
            name: name.to_string(),
            answers: answers.iter().copied().collect(),
            human: false,
            log: log.clone(),
        })
    }
}

impl UserAgent for Script {
    fn is_human(&self) -> bool {
        self.human
    }
    fn on_pockets_dealt(&mut self, player: &str, cards: Option<&[Card]>) {
        self.log.borrow_mut().push(format!(
            "{} sees pockets of {}: {}",
            self.name,
            player,
            cards.is_some()
        ));
    }
    fn on_eliminated(&mut self, player: &str) {
        self.log
            .borrow_mut()
            .push(format!("{} hears {} is out", self.name, player));
    }
    fn on_end_match(&mut self, _standings: &[SeatInfo]) {
        self.log.borrow_mut().push(format!("{} end", self.name));
    }
}

impl PlayerAgent for Script {
    fn demand_bet(&mut self, req: &BetRequest<'_>) -> i64 {
        self.answers
            .pop_front()
            .unwrap_or(req.all_in_level() as i64)
    }
}

/// Spectator writing every notification as a line.
struct Watcher(Log);

impl UserAgent for Watcher {
    fn on_dealer_draw(&mut self, player: &str, card: Card) {
        self.0.borrow_mut().push(format!("draw {} {}", player, card));
    }
    fn on_first_dealer(&mut self, dealer: &str) {
        self.0.borrow_mut().push(format!("first {}", dealer));
    }
    fn on_begin_hand(&mut self, hand_no: u32, dealer: &str, seats: &[SeatInfo]) {
        let names: Vec<&str> = seats.iter().map(|s| s.name.as_str()).collect();
        self.0
            .borrow_mut()
            .push(format!("hand {} dealer {} seats {}", hand_no, dealer, names.join(",")));
    }
    fn on_small_blind(&mut self, player: &str, amount: u32) {
        self.0.borrow_mut().push(format!("sb {} {}", player, amount));
    }
    fn on_big_blind(&mut self, player: &str, amount: u32) {
        self.0.borrow_mut().push(format!("bb {} {}", player, amount));
    }
    fn on_fold(&mut self, player: &str) {
        self.0.borrow_mut().push(format!("fold {}", player));
    }
    fn on_call(&mut self, player: &str, amount: u32) {
        self.0.borrow_mut().push(format!("call {} {}", player, amount));
    }
    fn on_raise(&mut self, player: &str, amount: u32) {
        self.0.borrow_mut().push(format!("raise {} {}", player, amount));
    }
    fn on_showdown(&mut self) {
        self.0.borrow_mut().push("showdown".to_string());
    }
    fn on_pot_won(&mut self, player: &str, amount: u32, net: i64) {
        self.0
            .borrow_mut()
            .push(format!("won {} {} {}", player, amount, net));
    }
    fn on_end_hand(&mut self) {
        self.0.borrow_mut().push("end hand".to_string());
    }
}

fn lines(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

fn three_handed(seed: u64, answers: &[i64], log: &Log) -> Game<'static> {
    let mut game = Game::new_with_seed(seed);
    for name in ["ann", "bob", "cyd"] {
        game.add_player(name, Script::new(name, answers, log)).unwrap();
    }
    game
}

#[test]
fn registration_rejections_leave_table_untouched() {
    let log = Log::default();
    let config = GameConfig {
        max_players: 2,
        ..GameConfig::default()
    };
    let mut game = Game::with_config(config, 1);
    game.add_player("ann", Script::new("ann", &[], &log)).unwrap();
    assert_eq!(
        game.add_player("ann", Script::new("ann", &[], &log)),
        Err(GameError::DuplicateName("ann".into()))
    );
    game.add_player("bob", Script::new("bob", &[], &log)).unwrap();
    assert_eq!(
        game.add_player("cyd", Script::new("cyd", &[], &log)),
        Err(GameError::TableFull { max: 2 })
    );
    assert_eq!(
        game.add_spectator("bob", Box::new(Watcher(log.clone()))),
        Err(GameError::DuplicateName("bob".into()))
    );
    assert_eq!(game.players().len(), 2);

    game.run().unwrap();
    assert_eq!(
        game.add_player("dan", Script::new("dan", &[], &log)),
        Err(GameError::GameAlreadyStarted)
    );
}

#[test]
fn match_needs_two_players() {
    let log = Log::default();
    let mut game = Game::new_with_seed(1);
    assert_eq!(game.run(), Err(GameError::NotEnoughPlayers { found: 0 }));
    game.add_player("solo", Script::new("solo", &[], &log)).unwrap();
    assert_eq!(game.run(), Err(GameError::NotEnoughPlayers { found: 1 }));
    assert_eq!(game.players()[0].stack(), 0);
    assert_eq!(game.hands_played(), 0);
}

#[test]
fn stakes_beyond_the_chip_range_are_refused() {
    let log = Log::default();
    let config = GameConfig {
        small_blind: 60_000_000,
        big_blind: 120_000_000,
        ..GameConfig::default()
    };
    assert_eq!(config.starting_stack(), None);

    let mut game = Game::with_config(config, 1);
    game.add_player("ann", Script::new("ann", &[], &log)).unwrap();
    game.add_player("bob", Script::new("bob", &[], &log)).unwrap();
    assert_eq!(
        game.run(),
        Err(GameError::StakesTooHigh {
            players: 2,
            big_blind: 120_000_000
        })
    );
    assert_eq!(game.hands_played(), 0);
    assert!(game.players().iter().all(|p| p.stack() == 0));
    // refused before starting, so seats are still open
    game.add_player("cyd", Script::new("cyd", &[], &log)).unwrap();
}

#[test]
fn largest_table_that_fits_plays_to_the_end() {
    let log = Log::default();
    let big_blind = (u32::MAX / 41) & !1;
    let config = GameConfig {
        small_blind: big_blind / 2,
        big_blind,
        ..GameConfig::default()
    };
    assert!(config.chips_in_play(2).is_some());
    assert!(config.chips_in_play(3).is_none());

    let mut game = Game::with_config(config, 4);
    game.add_player("ann", Script::new("ann", &[], &log)).unwrap();
    game.add_player("bob", Script::new("bob", &[], &log)).unwrap();
    let standings = game.run().unwrap();
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].1, 2 * config.starting_stack().unwrap());
}

#[test]
fn chips_are_conserved_over_a_match() {
    let log = Log::default();
    let mut game = three_handed(11, &[500, 500, -1, 0, 0], &log);
    let standings = game.run().unwrap();
    let total: u32 = standings.iter().map(|(_, s)| s).sum();
    assert_eq!(total, 3 * GameConfig::default().starting_stack().unwrap());
    assert_eq!(standings.len(), 1);
}

#[test]
fn fold_around_gives_blinds_to_big_blind() {
    let log = Log::default();
    let mut game = three_handed(5, &[-1], &log);
    game.add_spectator("tv", Box::new(Watcher(log.clone()))).unwrap();
    game.run().unwrap();

    let lines = lines(&log);
    let hand = lines.iter().find(|l| l.starts_with("hand 1 ")).unwrap();
    let seats: Vec<&str> = hand.rsplit(' ').next().unwrap().split(',').collect();
    let dealer = hand.split(' ').nth(3).unwrap();
    let d = seats.iter().position(|s| *s == dealer).unwrap();
    let (sb, bb) = (seats[(d + 1) % 3], seats[(d + 2) % 3]);

    let first_hand: Vec<&String> = lines
        .iter()
        .skip_while(|l| !l.starts_with("hand 1 "))
        .take_while(|l| *l != "end hand")
        .filter(|l| !l.contains("sees pockets"))
        .collect();
    let expected = vec![
        hand.clone(),
        format!("sb {} 250", sb),
        format!("bb {} 500", bb),
        format!("fold {}", dealer),
        format!("fold {}", sb),
        format!("won {} 750 250", bb),
    ];
    assert_eq!(first_hand, expected.iter().collect::<Vec<_>>());
}

#[test]
fn heads_up_dealer_posts_small_blind() {
    let log = Log::default();
    let quiet = Log::default();
    let mut game = Game::new_with_seed(3);
    game.add_player("ann", Script::new("ann", &[], &quiet)).unwrap();
    game.add_player("bob", Script::new("bob", &[], &quiet)).unwrap();
    game.add_spectator("tv", Box::new(Watcher(log.clone()))).unwrap();
    game.run().unwrap();

    let lines = lines(&log);
    let hand = lines.iter().position(|l| l.starts_with("hand 1 ")).unwrap();
    let dealer = lines[hand].split(' ').nth(3).unwrap();
    assert_eq!(lines[hand + 1], format!("sb {} 250", dealer));
    // the small blind acts first pre-flop: pushes, then the big blind calls
    assert_eq!(lines[hand + 3], format!("raise {} 10000", dealer));
    assert!(lines[hand + 4].starts_with("call "));
}

#[test]
fn first_dealer_is_announced_before_the_first_hand() {
    let log = Log::default();
    let mut game = three_handed(8, &[], &log);
    game.add_spectator("tv", Box::new(Watcher(log.clone()))).unwrap();
    game.run().unwrap();
    let lines = lines(&log);
    let first = lines.iter().position(|l| l.starts_with("first ")).unwrap();
    let hand = lines.iter().position(|l| l.starts_with("hand 1 ")).unwrap();
    assert!(first < hand);
    let name = lines[first].trim_start_matches("first ");
    assert!(lines[hand].contains(&format!("dealer {} ", name)));

    let draws: Vec<&String> = lines[..first]
        .iter()
        .filter(|l| l.starts_with("draw "))
        .collect();
    assert_eq!(draws.len(), 3);
    let best = draws
        .iter()
        .max_by_key(|l| {
            let card: Card = l.rsplit(' ').next().unwrap().parse().unwrap();
            (card.rank(), card.suit())
        })
        .unwrap();
    assert!(best.starts_with(&format!("draw {} ", name)));
}

#[test]
fn pockets_are_shown_only_to_their_owner() {
    let log = Log::default();
    let mut game = three_handed(21, &[], &log);
    game.run().unwrap();
    let lines = lines(&log);
    let seen: Vec<&String> = lines.iter().filter(|l| l.contains("sees pockets")).collect();
    assert!(!seen.is_empty());
    for line in seen {
        let words: Vec<&str> = line.split(' ').collect();
        let (viewer, owner, visible) = (words[0], words[4].trim_end_matches(':'), words[5]);
        assert_eq!(visible == "true", viewer == owner, "{}", line);
    }
}

#[test]
fn same_seed_replays_the_same_match() {
    let play = |seed: u64| {
        let log = Log::default();
        let mut game = three_handed(seed, &[500, 0, -1, 1500], &log);
        game.add_spectator("tv", Box::new(Watcher(log.clone()))).unwrap();
        let standings = game.run().unwrap();
        (standings, lines(&log))
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn must_survive_stops_when_the_watched_player_busts() {
    let log = Log::default();
    let mut game = Game::new_with_seed(17);
    for name in ["ann", "bob", "cyd", "dee"] {
        let mut agent = Script::new(name, &[], &log);
        agent.human = name == "ann";
        game.add_player(name, agent).unwrap();
    }
    game.set_must_survive(["ann"]);
    let standings = game.run().unwrap();
    let lines = lines(&log);

    let ann_seated = standings.iter().any(|(n, _)| n == "ann");
    if !ann_seated {
        assert!(lines.iter().any(|l| l.ends_with("hears ann is out")));
        // eliminated humans keep watching
        assert!(lines.iter().any(|l| l == "ann end"));
    }
    let total: u32 = standings.iter().map(|(_, s)| s).sum();
    assert_eq!(total, 4 * 10_000);
}

#[test]
fn play_until_left_keeps_several_players() {
    let log = Log::default();
    let config = GameConfig {
        play_until_left: 2,
        ..GameConfig::default()
    };
    let mut game = Game::with_config(config, 4);
    for name in ["ann", "bob", "cyd"] {
        game.add_player(name, Script::new(name, &[], &log)).unwrap();
    }
    let standings = game.run().unwrap();
    assert!(standings.len() <= 2);
    assert!(standings.windows(2).all(|w| w[0].1 >= w[1].1));
}
