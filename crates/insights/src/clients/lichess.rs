use chess_core::lichess::{parse_games_ndjson, parse_profile, PlayerProfile};
use chess_core::{lichess, GameRecord};
use reqwest::{Client, Response, StatusCode};

use crate::config::Config;
use crate::error::AppError;

/// Profile plus recent games for one search.
#[derive(Debug, Clone)]
pub struct PlayerData {
    pub profile: PlayerProfile,
    pub games: Vec<GameRecord>,
}

pub struct LichessClient {
    client: Client,
    base_url: String,
}

impl LichessClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/api/user/{}", self.base_url, username)
    }

    pub fn games_url(&self, username: &str) -> String {
        format!("{}/api/games/user/{}", self.base_url, username)
    }

    pub fn game_url(&self, game_id: &str) -> String {
        format!("{}/game/export/{}", self.base_url, game_id)
    }

    /// Fetch the public profile for a user.
    pub async fn fetch_profile(&self, username: &str) -> Result<PlayerProfile, AppError> {
        let resp = self
            .client
            .get(self.profile_url(username))
            .header("Accept", "application/json")
            .send()
            .await?;

        let body = check_status(resp, || format!("Player '{username}' not found"))?
            .text()
            .await?;

        Ok(parse_profile(&body)?)
    }

    /// Fetch the most recent games for a user as NDJSON.
    /// Lines that do not parse into a complete game are dropped.
    pub async fn fetch_user_games(
        &self,
        username: &str,
        max_games: usize,
    ) -> Result<Vec<GameRecord>, AppError> {
        let params = [
            ("max", max_games.to_string()),
            ("opening", "true".to_string()),
            ("moves", "true".to_string()),
            ("pgnInJson", "true".to_string()),
        ];

        let resp = self
            .client
            .get(self.games_url(username))
            .query(&params)
            .header("Accept", "application/x-ndjson")
            .send()
            .await?;

        let body = check_status(resp, || format!("Player '{username}' not found"))?
            .text()
            .await?;

        let games = parse_games_ndjson(&body);
        tracing::debug!(username, count = games.len(), "Fetched Lichess games");
        Ok(games)
    }

    /// Fetch a single game by id.
    pub async fn fetch_game(&self, game_id: &str) -> Result<GameRecord, AppError> {
        let resp = self
            .client
            .get(self.game_url(game_id))
            .query(&[("moves", "true"), ("opening", "true")])
            .header("Accept", "application/json")
            .send()
            .await?;

        let body = check_status(resp, || format!("Game '{game_id}' not found"))?
            .text()
            .await?;

        Ok(lichess::parse_game(&body)?)
    }

    /// Profile first, then games. Either failure fails the whole search.
    pub async fn fetch_player(
        &self,
        username: &str,
        max_games: usize,
    ) -> Result<PlayerData, AppError> {
        tracing::info!(username, max_games, "Searching Lichess player");
        let profile = self.fetch_profile(username).await?;
        let games = self.fetch_user_games(username, max_games).await?;
        Ok(PlayerData { profile, games })
    }
}

fn check_status(resp: Response, not_found: impl FnOnce() -> String) -> Result<Response, AppError> {
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(not_found()));
    }
    if !status.is_success() {
        return Err(AppError::Status(status));
    }
    Ok(resp)
}
