use std::env;

pub const DEFAULT_API_URL: &str = "https://lichess.org";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub max_games: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            max_games: 50,
            timeout_secs: 30,
            user_agent: "LichessInsights/1.0".to_string(),
        }
    }
}

impl Config {
    /// Read settings from the environment. Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("LICHESS_API_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_url),
            max_games: env::var("LICHESS_MAX_GAMES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_games),
            timeout_secs: env::var("LICHESS_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            user_agent: env::var("LICHESS_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }
}
