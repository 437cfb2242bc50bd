use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShoeError {
    #[error("Shoe is empty")]
    Empty,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetError {
    #[error("Bet must be at least 1")]
    ZeroBet,
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: u64, available: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Starting balance must be at least 1")]
    ZeroStartingBalance,
    #[error("Minimum bet must be at least 1")]
    ZeroMinimumBet,
    #[error("Bet increment must be at least 1")]
    ZeroBetIncrement,
    #[error("Dealer tick interval must be non-zero")]
    ZeroDealerTick,
    #[error("Reshuffle threshold {0} must be between 15 and 52")]
    ReshuffleThreshold(usize),
    #[error("Rounds per shoe must be at least 1")]
    ZeroRoundsPerShoe,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Bet(#[from] BetError),
    #[error(transparent)]
    Shoe(#[from] ShoeError),
}

pub type GameResult<T> = Result<T, GameError>;
