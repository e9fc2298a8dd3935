//! Lichess wire formats and the typed parsing step at the fetch boundary.
//!
//! Raw JSON is deserialized into private shapes and then validated into
//! [`GameRecord`]s. A line that fails either step is dropped, never returned
//! half-filled.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::GameParseError;
use crate::game_data::{GameRecord, Opening, Participant, Side};
use crate::pgn;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGame {
    id: String,
    created_at: i64,
    #[serde(default)]
    rated: bool,
    speed: Option<String>,
    status: Option<String>,
    players: RawPlayers,
    winner: Option<String>,
    opening: Option<RawOpening>,
    moves: Option<String>,
    pgn: Option<String>,
}

#[derive(Deserialize)]
struct RawPlayers {
    white: RawPlayer,
    black: RawPlayer,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlayer {
    user: Option<RawUser>,
    rating: Option<i32>,
    rating_diff: Option<i32>,
}

#[derive(Deserialize)]
struct RawUser {
    name: String,
}

#[derive(Deserialize)]
struct RawOpening {
    eco: String,
    name: String,
}

impl From<RawPlayer> for Participant {
    fn from(raw: RawPlayer) -> Self {
        Participant {
            name: raw.user.map(|u| u.name),
            rating: raw.rating,
            rating_diff: raw.rating_diff,
        }
    }
}

impl TryFrom<RawGame> for GameRecord {
    type Error = GameParseError;

    fn try_from(raw: RawGame) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(GameParseError::MissingId);
        }

        let winner = match raw.winner.as_deref() {
            None => None,
            Some("white") => Some(Side::White),
            Some("black") => Some(Side::Black),
            Some(other) => {
                return Err(GameParseError::UnknownWinner {
                    id: raw.id,
                    winner: other.to_string(),
                })
            }
        };

        let created_at = match Utc.timestamp_millis_opt(raw.created_at).single() {
            Some(ts) => ts,
            None => return Err(GameParseError::InvalidTimestamp(raw.id)),
        };

        // Prefer the plain `moves` field; fall back to the embedded PGN.
        let moves = match (raw.moves.as_deref(), raw.pgn.as_deref()) {
            (Some(moves), _) if !moves.trim().is_empty() => pgn::split_moves(moves),
            (_, Some(text)) => pgn::extract_moves(text),
            _ => Vec::new(),
        };

        let opening = match raw.opening {
            Some(o) => Some(Opening { eco: o.eco, name: o.name }),
            None => raw.pgn.as_deref().and_then(|text| {
                Some(Opening {
                    eco: pgn::extract_header(text, "ECO")?,
                    name: pgn::extract_header(text, "Opening")?,
                })
            }),
        };

        Ok(GameRecord {
            id: raw.id,
            created_at,
            white: raw.players.white.into(),
            black: raw.players.black.into(),
            winner,
            speed: raw.speed.unwrap_or_else(|| "unknown".to_string()),
            rated: raw.rated,
            status: raw.status,
            opening,
            moves,
        })
    }
}

/// Parse a single game object (one NDJSON line, or a `/game/export` body).
pub fn parse_game(json: &str) -> Result<GameRecord, GameParseError> {
    let raw: RawGame = serde_json::from_str(json)?;
    GameRecord::try_from(raw)
}

/// Parse an NDJSON body, dropping (and logging) every line that fails to parse.
pub fn parse_games_ndjson(body: &str) -> Vec<GameRecord> {
    let mut games = Vec::new();

    for (line_no, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_game(line) {
            Ok(game) => games.push(game),
            Err(e) => {
                tracing::warn!(line = line_no + 1, "Dropping Lichess game line: {e}");
            }
        }
    }

    games
}

/// Rating and game count for one Lichess perf (blitz, rapid, puzzle, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfStat {
    pub games: Option<u32>,
    pub rating: Option<i32>,
    #[serde(default)]
    pub prov: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCounts {
    #[serde(default)]
    pub all: u32,
    #[serde(default)]
    pub rated: u32,
    #[serde(default)]
    pub win: u32,
    #[serde(default)]
    pub loss: u32,
    #[serde(default)]
    pub draw: u32,
}

/// Public profile from `/api/user/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub perfs: BTreeMap<String, PerfStat>,
    #[serde(default)]
    pub count: Option<GameCounts>,
    pub created_at: Option<i64>,
    #[serde(default)]
    pub disabled: bool,
}

impl PlayerProfile {
    pub fn perf_rating(&self, perf: &str) -> Option<i32> {
        self.perfs.get(perf).and_then(|p| p.rating)
    }

    /// The headline rating: blitz if rated there, otherwise the most-played perf.
    pub fn headline_rating(&self) -> Option<(&str, i32)> {
        if let Some(rating) = self.perf_rating("blitz") {
            return Some(("blitz", rating));
        }

        self.perfs
            .iter()
            .filter_map(|(name, perf)| Some((name.as_str(), perf.rating?, perf.games.unwrap_or(0))))
            .max_by_key(|(_, _, games)| *games)
            .map(|(name, rating, _)| (name, rating))
    }
}

pub fn parse_profile(json: &str) -> Result<PlayerProfile, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME: &str = r#"{"id":"q7ZvsdUF","rated":true,"variant":"standard","speed":"blitz","perf":"blitz","createdAt":1700000000000,"lastMoveAt":1700000300000,"status":"resign","players":{"white":{"user":{"name":"Alice","id":"alice"},"rating":1500,"ratingDiff":7},"black":{"user":{"name":"bob","id":"bob"},"rating":1480,"ratingDiff":-7}},"winner":"white","opening":{"eco":"C60","name":"Ruy Lopez","ply":5},"moves":"e4 e5 Nf3 Nc6 Bb5"}"#;

    #[test]
    fn test_parse_game_basic() {
        let game = parse_game(GAME).unwrap();
        assert_eq!(game.id, "q7ZvsdUF");
        assert_eq!(game.white.name.as_deref(), Some("Alice"));
        assert_eq!(game.white.post_game_rating(), Some(1507));
        assert_eq!(game.black.post_game_rating(), Some(1473));
        assert_eq!(game.winner, Some(Side::White));
        assert_eq!(game.speed, "blitz");
        assert_eq!(game.opening.as_ref().unwrap().eco, "C60");
        assert_eq!(game.moves.len(), 5);
        assert_eq!(game.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_parse_game_anonymous_draw() {
        let json = r#"{"id":"abc","createdAt":1700000000000,"speed":"rapid","players":{"white":{"aiLevel":3},"black":{"user":{"name":"bob"},"rating":1400}},"status":"draw"}"#;
        let game = parse_game(json).unwrap();
        assert_eq!(game.white.name, None);
        assert_eq!(game.winner, None);
        assert!(game.opening.is_none());
        assert!(game.moves.is_empty());
    }

    #[test]
    fn test_parse_game_falls_back_to_pgn() {
        let json = r#"{"id":"p1","createdAt":1700000000000,"players":{"white":{},"black":{}},"pgn":"[ECO \"B20\"]\n[Opening \"Sicilian Defense\"]\n\n1. e4 c5 *"}"#;
        let game = parse_game(json).unwrap();
        assert_eq!(game.moves, vec!["e4", "c5"]);
        assert_eq!(game.opening.unwrap().name, "Sicilian Defense");
        assert_eq!(game.speed, "unknown");
    }

    #[test]
    fn test_parse_game_rejects_bad_shapes() {
        assert!(matches!(parse_game("{not json"), Err(GameParseError::Json(_))));
        assert!(matches!(
            parse_game(r#"{"id":"x","createdAt":1,"players":{"white":{},"black":{}},"winner":"green"}"#),
            Err(GameParseError::UnknownWinner { .. })
        ));
        assert!(matches!(
            parse_game(r#"{"id":"","createdAt":1,"players":{"white":{},"black":{}}}"#),
            Err(GameParseError::MissingId)
        ));
        // players missing entirely
        assert!(parse_game(r#"{"id":"x","createdAt":1}"#).is_err());
    }

    #[test]
    fn test_parse_ndjson_drops_malformed_lines() {
        let body = format!("{GAME}\n\n{{\"id\":\"broken\"\n{GAME}\n");
        let games = parse_games_ndjson(&body);
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn test_parse_profile() {
        let json = r#"{"id":"alice","username":"Alice","perfs":{"blitz":{"games":120,"rating":1510,"rd":60,"prog":12},"storm":{"runs":4,"score":20}},"count":{"all":130,"rated":120,"win":60,"loss":50,"draw":10},"createdAt":1600000000000}"#;
        let profile = parse_profile(json).unwrap();
        assert_eq!(profile.username, "Alice");
        assert_eq!(profile.perf_rating("blitz"), Some(1510));
        assert_eq!(profile.perf_rating("storm"), None);
        assert_eq!(profile.headline_rating(), Some(("blitz", 1510)));
        assert_eq!(profile.count.unwrap().win, 60);
    }

    #[test]
    fn test_headline_rating_without_blitz() {
        let json = r#"{"id":"c","username":"C","perfs":{"rapid":{"games":40,"rating":1700},"bullet":{"games":90,"rating":1600}}}"#;
        let profile = parse_profile(json).unwrap();
        assert_eq!(profile.headline_rating(), Some(("bullet", 1600)));
    }
}
