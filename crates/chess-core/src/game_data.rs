use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of the board a player sat on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "white" => Ok(Side::White),
            "black" => Ok(Side::Black),
            other => Err(format!("unknown side '{other}'")),
        }
    }
}

/// Result of a game from the searched player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "win" | "w" => Ok(Outcome::Win),
            "loss" | "l" => Ok(Outcome::Loss),
            "draw" | "d" => Ok(Outcome::Draw),
            other => Err(format!("unknown outcome '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: Option<String>,
    pub rating: Option<i32>,
    pub rating_diff: Option<i32>,
}

impl Participant {
    /// Case-insensitive name match. Anonymous players never match.
    pub fn is_named(&self, username: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase() == username.to_lowercase())
    }

    /// Rating after the game, falling back to the pre-game rating when no diff was reported.
    pub fn post_game_rating(&self) -> Option<i32> {
        self.rating.map(|r| r + self.rating_diff.unwrap_or(0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    pub eco: String,
    pub name: String,
}

/// One finished game as fetched from Lichess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub white: Participant,
    pub black: Participant,
    pub winner: Option<Side>, // None = draw
    pub speed: String,
    pub rated: bool,
    pub status: Option<String>,
    pub opening: Option<Opening>,
    pub moves: Vec<String>, // SAN notation
}

impl GameRecord {
    pub fn participant(&self, side: Side) -> &Participant {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    /// Which side `username` played, white checked first.
    pub fn side_of(&self, username: &str) -> Option<Side> {
        if self.white.is_named(username) {
            Some(Side::White)
        } else if self.black.is_named(username) {
            Some(Side::Black)
        } else {
            None
        }
    }

    pub fn outcome_for(&self, side: Side) -> Outcome {
        match self.winner {
            None => Outcome::Draw,
            Some(winner) if winner == side => Outcome::Win,
            Some(_) => Outcome::Loss,
        }
    }

    pub fn played_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}
