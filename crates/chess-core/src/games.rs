//! Per-game table: annotation with the player's perspective, filtering and sorting.

use serde::Serialize;

use crate::game_data::{GameRecord, Outcome, Side};

/// A game seen from the searched player's side. Built by [`annotate`];
/// the underlying record is only borrowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedGame<'a> {
    pub game: &'a GameRecord,
    pub user_color: Side,
    pub opponent: Option<&'a str>,
    pub outcome: Outcome,
}

impl AnnotatedGame<'_> {
    pub fn player_rating(&self) -> Option<i32> {
        self.game.participant(self.user_color).rating
    }

    pub fn opponent_rating(&self) -> Option<i32> {
        self.game.participant(self.user_color.opposite()).rating
    }
}

/// Annotate every game `username` took part in; other games are left out.
pub fn annotate<'a>(username: &str, games: &'a [GameRecord]) -> Vec<AnnotatedGame<'a>> {
    games
        .iter()
        .filter_map(|game| {
            let side = game.side_of(username)?;
            Some(AnnotatedGame {
                game,
                user_color: side,
                opponent: game.participant(side.opposite()).name.as_deref(),
                outcome: game.outcome_for(side),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    pub speed: Option<String>,
    pub color: Option<Side>,
    pub outcome: Option<Outcome>,
}

impl GameFilter {
    pub fn is_empty(&self) -> bool {
        self.speed.is_none() && self.color.is_none() && self.outcome.is_none()
    }

    pub fn matches(&self, game: &AnnotatedGame) -> bool {
        self.speed
            .as_deref()
            .map_or(true, |speed| game.game.speed.eq_ignore_ascii_case(speed))
            && self.color.map_or(true, |c| game.user_color == c)
            && self.outcome.map_or(true, |o| game.outcome == o)
    }
}

pub fn filter_games<'a>(games: Vec<AnnotatedGame<'a>>, filter: &GameFilter) -> Vec<AnnotatedGame<'a>> {
    games.into_iter().filter(|g| filter.matches(g)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameSort {
    #[default]
    Newest,
    Oldest,
    PlayerRating,
    OpponentRating,
}

impl std::str::FromStr for GameSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "newest" | "date" => Ok(GameSort::Newest),
            "oldest" => Ok(GameSort::Oldest),
            "rating" | "player-rating" => Ok(GameSort::PlayerRating),
            "opponent" | "opponent-rating" => Ok(GameSort::OpponentRating),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

/// Stable sort. Rating sorts put the highest first and unrated games last.
pub fn sort_games(games: &mut [AnnotatedGame], sort: GameSort) {
    match sort {
        GameSort::Newest => games.sort_by(|a, b| b.game.created_at.cmp(&a.game.created_at)),
        GameSort::Oldest => games.sort_by_key(|g| g.game.created_at),
        GameSort::PlayerRating => games.sort_by(|a, b| b.player_rating().cmp(&a.player_rating())),
        GameSort::OpponentRating => {
            games.sort_by(|a, b| b.opponent_rating().cmp(&a.opponent_rating()))
        }
    }
}

/// One row of the recent-games table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRow {
    pub id: String,
    pub date: String,
    pub speed: String,
    pub white: String,
    pub black: String,
    pub result: String,
    pub opening: String,
    pub user_color: Option<Side>,
    pub outcome: Option<Outcome>,
}

impl GameRow {
    pub fn from_record(game: &GameRecord) -> Self {
        Self {
            id: game.id.clone(),
            date: game.played_on().format("%Y-%m-%d").to_string(),
            speed: game.speed.clone(),
            white: game.white.name.clone().unwrap_or_else(|| "Anon".to_string()),
            black: game.black.name.clone().unwrap_or_else(|| "Anon".to_string()),
            result: match game.winner {
                Some(side) => side.to_string(),
                None => "Draw".to_string(),
            },
            opening: game
                .opening
                .as_ref()
                .map(|o| o.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            user_color: None,
            outcome: None,
        }
    }

    pub fn from_annotated(game: &AnnotatedGame) -> Self {
        Self {
            user_color: Some(game.user_color),
            outcome: Some(game.outcome),
            ..Self::from_record(game.game)
        }
    }
}
