use serde::{Deserialize, Serialize};

use crate::agent::{SeatInfo, UserAgent};
use crate::cards::Card;
use crate::game::Street;
use crate::hand::HandRank;

/// A single table action as it happened. Amounts are total bets for the hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Action {
    SmallBlind(u32),
    BigBlind(u32),
    Fold,
    Check,
    Call(u32),
    Raise(u32),
    /// Every remaining chip, short of the current bet level
    LastChips(u32),
    AllIn(u32),
}

/// Records a single player action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: String,
    pub street: Street,
    pub action: Action,
}

/// A hand revealed at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownEntry {
    pub player: String,
    pub pockets: Vec<Card>,
    pub rank: HandRank,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub player: String,
    pub amount: u32,
    pub net: i64,
}

/// Complete record of a finished hand, written as one JSON line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Seed of the match the hand belongs to
    #[serde(default)]
    pub seed: Option<u64>,
    pub hand_no: u32,
    pub dealer: String,
    /// Stacks at the start of the hand
    pub seats: Vec<SeatInfo>,
    /// Chronological list of all player actions
    pub actions: Vec<ActionRecord>,
    /// Community cards on the board (up to 5 cards)
    pub board: Vec<Card>,
    #[serde(default)]
    pub showdown: Vec<ShowdownEntry>,
    pub payouts: Vec<Payout>,
    /// Timestamp when the hand was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends hand records to a JSON lines file.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that numbers hands but writes nowhere.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

/// A spectator that turns the notification stream into [`HandRecord`]s and
/// hands each finished one to a [`HandLogger`]. The logger is borrowed so
/// several matches in a row can share one file and one hand numbering.
pub struct HandRecorder<'a> {
    logger: &'a mut HandLogger,
    seed: Option<u64>,
    street: Street,
    current: Option<HandRecord>,
    written: usize,
}

impl<'a> HandRecorder<'a> {
    pub fn new(logger: &'a mut HandLogger, seed: Option<u64>) -> Self {
        Self {
            logger,
            seed,
            street: Street::Preflop,
            current: None,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    fn push(&mut self, player: &str, action: Action) {
        let street = self.street;
        if let Some(rec) = self.current.as_mut() {
            rec.actions.push(ActionRecord {
                player: player.to_string(),
                street,
                action,
            });
        }
    }
}

impl UserAgent for HandRecorder<'_> {
    fn on_begin_hand(&mut self, hand_no: u32, dealer: &str, seats: &[SeatInfo]) {
        self.street = Street::Preflop;
        self.current = Some(HandRecord {
            hand_id: self.logger.next_id(),
            seed: self.seed,
            hand_no,
            dealer: dealer.to_string(),
            seats: seats.to_vec(),
            actions: Vec::new(),
            board: Vec::new(),
            showdown: Vec::new(),
            payouts: Vec::new(),
            ts: None,
        });
    }

    fn on_small_blind(&mut self, player: &str, amount: u32) {
        self.push(player, Action::SmallBlind(amount));
    }
    fn on_big_blind(&mut self, player: &str, amount: u32) {
        self.push(player, Action::BigBlind(amount));
    }
    fn on_fold(&mut self, player: &str) {
        self.push(player, Action::Fold);
    }
    fn on_check(&mut self, player: &str) {
        self.push(player, Action::Check);
    }
    fn on_call(&mut self, player: &str, amount: u32) {
        self.push(player, Action::Call(amount));
    }
    fn on_raise(&mut self, player: &str, amount: u32) {
        self.push(player, Action::Raise(amount));
    }
    fn on_last_chips(&mut self, player: &str, amount: u32) {
        self.push(player, Action::LastChips(amount));
    }
    fn on_all_in(&mut self, player: &str, amount: u32) {
        self.push(player, Action::AllIn(amount));
    }

    fn on_community_cards(&mut self, street: Street, _dealt: &[Card], board: &[Card]) {
        self.street = street;
        if let Some(rec) = self.current.as_mut() {
            rec.board = board.to_vec();
        }
    }

    fn on_reveal(&mut self, player: &str, pockets: &[Card], rank: &HandRank) {
        if let Some(rec) = self.current.as_mut() {
            rec.showdown.push(ShowdownEntry {
                player: player.to_string(),
                pockets: pockets.to_vec(),
                rank: rank.clone(),
            });
        }
    }

    fn on_pot_won(&mut self, player: &str, amount: u32, net: i64) {
        if let Some(rec) = self.current.as_mut() {
            rec.payouts.push(Payout {
                player: player.to_string(),
                amount,
                net,
            });
        }
    }

    fn on_end_hand(&mut self) {
        let Some(rec) = self.current.take() else {
            return;
        };
        match self.logger.write(&rec) {
            Ok(()) => self.written += 1,
            Err(e) => tracing::warn!(hand_id = %rec.hand_id, error = %e, "failed to write hand record"),
        }
    }
}
