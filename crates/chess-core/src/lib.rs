//! Pure chess computations behind the Lichess insights dashboard.
//!
//! Everything here is synchronous and side-effect free apart from `tracing`
//! warnings: parsing fetched games, aggregating results, building rating
//! series, replaying move lists and classifying openings.

pub mod cursor;
pub mod error;
pub mod game_data;
pub mod games;
pub mod lichess;
pub mod notation;
pub mod opening;
pub mod pgn;
pub mod rating_series;
pub mod replay;
pub mod summary;

pub use error::{GameParseError, ReplayError};
pub use game_data::{GameRecord, Opening, Outcome, Participant, Side};
pub use opening::{detect_deviation, detect_opening, OpeningDeviation};
pub use rating_series::{build_series, SeriesPoint, Timeframe};
pub use replay::{apply_move, play_to, BoardState, Replay};
pub use summary::{summarize, PlayerSummary};
