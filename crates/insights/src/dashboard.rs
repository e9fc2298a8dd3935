//! Assembles the pure core results into the views the CLI presents.

use chess_core::cursor::{move_number_label, MoveCursor};
use chess_core::games::{annotate, filter_games, sort_games, GameFilter, GameRow, GameSort};
use chess_core::lichess::PlayerProfile;
use chess_core::replay::ReplayWarning;
use chess_core::{
    build_series, detect_deviation, play_to, summarize, BoardState, GameRecord, OpeningDeviation,
    PlayerSummary, SeriesPoint, Timeframe,
};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct DashboardOptions {
    pub timeframe: Timeframe,
    pub filter: GameFilter,
    pub sort: GameSort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlineRating {
    pub perf: String,
    pub rating: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub username: String,
    pub headline_rating: Option<HeadlineRating>,
    pub summary: PlayerSummary,
    pub timeframe: Timeframe,
    pub rating_series: Vec<SeriesPoint>,
    pub games: Vec<GameRow>,
}

impl Dashboard {
    /// Summary and rating series cover every fetched game; the table honours
    /// the filter and sort options.
    pub fn build(
        username: &str,
        profile: Option<&PlayerProfile>,
        games: &[GameRecord],
        options: &DashboardOptions,
        today: NaiveDate,
    ) -> Self {
        let username = profile.map_or(username, |p| p.username.as_str());

        let mut annotated = filter_games(annotate(username, games), &options.filter);
        sort_games(&mut annotated, options.sort);

        Self {
            username: username.to_string(),
            headline_rating: profile.and_then(|p| p.headline_rating()).map(|(perf, rating)| {
                HeadlineRating {
                    perf: perf.to_string(),
                    rating,
                }
            }),
            summary: summarize(username, games),
            timeframe: options.timeframe,
            rating_series: build_series(username, games, options.timeframe, today),
            games: annotated.iter().map(GameRow::from_annotated).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEntry {
    pub label: String,
    pub san: String,
    pub current: bool,
}

/// Single-game view: opening analysis, move list and the board at the cursor.
#[derive(Debug, Clone)]
pub struct GameDetail {
    pub header: Option<GameRow>,
    pub opening: OpeningDeviation,
    pub cursor: MoveCursor,
    pub moves: Vec<MoveEntry>,
    pub board: BoardState,
    pub warnings: Vec<ReplayWarning>,
}

impl GameDetail {
    /// `index` of `None` shows the final position.
    pub fn from_moves(moves: &[String], index: Option<isize>) -> Self {
        let cursor = match index {
            Some(i) => MoveCursor::at(moves.len(), i),
            None => {
                let mut cursor = MoveCursor::new(moves.len());
                cursor.end();
                cursor
            }
        };

        let replay = play_to(moves, cursor.index());

        Self {
            header: None,
            opening: detect_deviation(moves),
            cursor,
            moves: moves
                .iter()
                .enumerate()
                .map(|(i, san)| MoveEntry {
                    label: move_number_label(i),
                    san: san.clone(),
                    current: i as isize == cursor.index(),
                })
                .collect(),
            board: replay.state,
            warnings: replay.warnings,
        }
    }

    pub fn from_game(game: &GameRecord, index: Option<isize>) -> Self {
        Self {
            header: Some(GameRow::from_record(game)),
            ..Self::from_moves(&game.moves, index)
        }
    }
}
