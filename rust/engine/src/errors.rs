use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Game already started, no more registrations")]
    GameAlreadyStarted,
    #[error("Table is full (maximum {max} players)")]
    TableFull { max: usize },
    #[error("Name '{0}' is already taken")]
    DuplicateName(String),
    #[error("Unrecognized player type: {0}")]
    UnrecognizedPlayerType(String),
    #[error("Not enough players to start: {found} seated, at least 2 needed")]
    NotEnoughPlayers { found: usize },
    #[error("Stakes too high: {players} stacks at big blind {big_blind} exceed the chip range")]
    StakesTooHigh { players: usize, big_blind: u32 },
}
