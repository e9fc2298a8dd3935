//! Win/loss/draw aggregation for a searched player.

use serde::Serialize;
use std::collections::HashMap;

use crate::game_data::{GameRecord, Outcome, Side};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub username: String,
    pub total_games: usize,
    pub matched_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub white_games: usize,
    pub black_games: usize,
    /// `None` when no games were played with white.
    pub white_win_percent: Option<u32>,
    /// `None` when no games were played with black.
    pub black_win_percent: Option<u32>,
    pub most_played_opening: Option<String>,
}

#[derive(Default)]
struct ColorTally {
    games: usize,
    wins: usize,
}

/// `round(wins / games * 100)`, or `None` when there were no games.
pub fn win_percent(wins: usize, games: usize) -> Option<u32> {
    if games == 0 {
        return None;
    }
    Some(((wins as f64 / games as f64) * 100.0).round() as u32)
}

/// Aggregate results for `username`. Games where neither side matches the
/// username (anonymous or mismatched identities) are skipped entirely.
pub fn summarize(username: &str, games: &[GameRecord]) -> PlayerSummary {
    let mut white = ColorTally::default();
    let mut black = ColorTally::default();
    let mut losses = 0;
    let mut draws = 0;

    for game in games {
        let Some(side) = game.side_of(username) else {
            continue;
        };

        let tally = match side {
            Side::White => &mut white,
            Side::Black => &mut black,
        };
        tally.games += 1;

        match game.outcome_for(side) {
            Outcome::Win => tally.wins += 1,
            Outcome::Loss => losses += 1,
            Outcome::Draw => draws += 1,
        }
    }

    PlayerSummary {
        username: username.to_string(),
        total_games: games.len(),
        matched_games: white.games + black.games,
        wins: white.wins + black.wins,
        losses,
        draws,
        white_games: white.games,
        black_games: black.games,
        white_win_percent: win_percent(white.wins, white.games),
        black_win_percent: win_percent(black.wins, black.games),
        most_played_opening: most_played_opening(username, games),
    }
}

/// Most frequent opening name across the player's games.
///
/// Ties keep the name that was seen first.
pub fn most_played_opening(username: &str, games: &[GameRecord]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut seen_order: Vec<&str> = Vec::new();

    for game in games {
        if game.side_of(username).is_none() {
            continue;
        }
        let Some(opening) = game.opening.as_ref() else {
            continue;
        };

        let count = counts.entry(opening.name.as_str()).or_insert(0);
        if *count == 0 {
            seen_order.push(opening.name.as_str());
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for name in seen_order {
        let count = counts[name];
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((name, count));
        }
    }

    best.map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_data::{Opening, Participant};
    use chrono::{TimeZone, Utc};

    fn game(white: Option<&str>, black: Option<&str>, winner: Option<Side>, opening: Option<&str>) -> GameRecord {
        GameRecord {
            id: "g".into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            white: Participant { name: white.map(Into::into), rating: Some(1500), rating_diff: None },
            black: Participant { name: black.map(Into::into), rating: Some(1500), rating_diff: None },
            winner,
            speed: "blitz".into(),
            rated: true,
            status: None,
            opening: opening.map(|name| Opening { eco: "A00".into(), name: name.into() }),
            moves: Vec::new(),
        }
    }

    #[test]
    fn test_empty_games() {
        let summary = summarize("alice", &[]);
        assert_eq!(summary.wins + summary.losses + summary.draws, 0);
        assert_eq!(summary.white_win_percent, None);
        assert_eq!(summary.black_win_percent, None);
        assert_eq!(summary.most_played_opening, None);
        assert_eq!(summary.username, "alice");
    }

    #[test]
    fn test_counts_and_percentages() {
        let games = vec![
            game(Some("Alice"), Some("bob"), Some(Side::White), None),
            game(Some("alice"), Some("carol"), Some(Side::Black), None),
            game(Some("alice"), Some("dave"), Some(Side::White), None),
            game(Some("bob"), Some("ALICE"), None, None),
            game(Some("bob"), Some("alice"), Some(Side::Black), None),
            game(Some("bob"), Some("carol"), Some(Side::White), None),
            game(None, Some("carol"), Some(Side::White), None),
        ];

        let summary = summarize("alice", &games);
        assert_eq!(summary.total_games, 7);
        assert_eq!(summary.matched_games, 5);
        assert_eq!(summary.wins, 3);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.white_games, 3);
        assert_eq!(summary.black_games, 2);
        assert_eq!(summary.white_win_percent, Some(67));
        assert_eq!(summary.black_win_percent, Some(50));
    }

    #[test]
    fn test_percent_not_applicable_for_unplayed_color() {
        let games = vec![game(Some("alice"), Some("bob"), Some(Side::Black), None)];
        let summary = summarize("alice", &games);
        assert_eq!(summary.white_win_percent, Some(0));
        assert_eq!(summary.black_win_percent, None);
    }

    #[test]
    fn test_win_percent_rounding() {
        assert_eq!(win_percent(1, 3), Some(33));
        assert_eq!(win_percent(1, 8), Some(13)); // 12.5 rounds up
        assert_eq!(win_percent(5, 5), Some(100));
        assert_eq!(win_percent(0, 0), None);
    }

    #[test]
    fn test_most_played_opening_first_seen_tie_break() {
        let games = vec![
            game(Some("alice"), Some("bob"), None, Some("French Defense")),
            game(Some("alice"), Some("bob"), None, Some("Sicilian Defense")),
            game(Some("alice"), Some("bob"), None, Some("Sicilian Defense")),
            game(Some("alice"), Some("bob"), None, Some("French Defense")),
            // unmatched game must not count
            game(Some("x"), Some("y"), None, Some("Sicilian Defense")),
        ];
        assert_eq!(
            most_played_opening("alice", &games).as_deref(),
            Some("French Defense")
        );
    }

    #[test]
    fn test_most_played_opening_without_data() {
        let games = vec![game(Some("alice"), Some("bob"), None, None)];
        assert_eq!(most_played_opening("alice", &games), None);
    }
}
