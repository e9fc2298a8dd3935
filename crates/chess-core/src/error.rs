//! Error types for the parsing boundary and the replay engine.

use thiserror::Error;

/// A Lichess game line that could not be turned into a `GameRecord`.
#[derive(Error, Debug)]
pub enum GameParseError {
    #[error("invalid game JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("game record has an empty id")]
    MissingId,

    #[error("game {id} has an unknown winner '{winner}'")]
    UnknownWinner { id: String, winner: String },

    #[error("game {0} has an out-of-range creation timestamp")]
    InvalidTimestamp(String),
}

/// Why a single ply could not be applied during replay.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("unrecognised move notation '{0}'")]
    Notation(String),

    #[error("unsupported move '{0}'")]
    Unsupported(String),

    #[error("no {role} can play '{san}'")]
    NoCandidate { san: String, role: &'static str },

    #[error("pawn move '{0}' reaches the last rank without a promotion piece")]
    MissingPromotion(String),
}
