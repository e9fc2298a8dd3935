use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Lichess responded with HTTP {0}")]
    Status(StatusCode),

    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    GameParse(#[from] chess_core::GameParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
