//! Plain-text rendering for the terminal.

use std::fmt;

use chess_core::games::GameRow;
use chess_core::{BoardState, Outcome, SeriesPoint};
use shakmaty::{Color, File, Piece, Rank, Role, Square};

use crate::dashboard::{Dashboard, GameDetail};

fn percent(value: Option<u32>) -> String {
    value.map_or_else(|| "N/A".to_string(), |p| format!("{p}%"))
}

fn piece_symbol(piece: Piece) -> char {
    match (piece.role, piece.color) {
        (Role::Pawn, Color::White) => '♙',
        (Role::Pawn, Color::Black) => '♟',
        (Role::Knight, Color::White) => '♘',
        (Role::Knight, Color::Black) => '♞',
        (Role::Bishop, Color::White) => '♗',
        (Role::Bishop, Color::Black) => '♝',
        (Role::Rook, Color::White) => '♖',
        (Role::Rook, Color::Black) => '♜',
        (Role::Queen, Color::White) => '♕',
        (Role::Queen, Color::Black) => '♛',
        (Role::King, Color::White) => '♔',
        (Role::King, Color::Black) => '♚',
    }
}

/// Unicode board, rank 8 at the top. Squares of the last move are bracketed.
pub struct BoardView<'a>(pub &'a BoardState);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "   a  b  c  d  e  f  g  h")?;
        for rank in (0..8u32).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u32 {
                let sq = Square::from_coords(File::new(file), Rank::new(rank));
                let symbol = state.piece_at(sq).map_or('·', piece_symbol);
                if state.is_highlighted(sq) {
                    write!(f, "[{symbol}]")?;
                } else {
                    write!(f, " {symbol} ")?;
                }
            }
            writeln!(f, " {}", rank + 1)?;
        }
        writeln!(f, "   a  b  c  d  e  f  g  h")?;
        let turn = match state.turn() {
            Color::White => "White",
            Color::Black => "Black",
        };
        write!(f, "{turn} to move")?;
        if let Some(last) = state.last_move() {
            write!(f, " (last move {}-{})", last.from, last.to)?;
        }
        Ok(())
    }
}

/// Rating series, one line per bucket. Buckets without data show a dash.
pub struct SeriesView<'a>(pub &'a [SeriesPoint]);

impl fmt::Display for SeriesView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.iter().all(|p| p.rating.is_none()) {
            return writeln!(f, "No rating data available.");
        }
        for point in self.0 {
            match point.rating {
                Some(rating) => writeln!(f, "  {:<10} {rating}", point.label)?,
                None => writeln!(f, "  {:<10} —", point.label)?,
            }
        }
        Ok(())
    }
}

pub struct GamesView<'a>(pub &'a [GameRow]);

impl fmt::Display for GamesView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No recent games available.");
        }
        writeln!(
            f,
            "{:<10} {:<10} {:<12} {:<20} {:<20} {:<6} {:<5} Opening",
            "Date", "Id", "Speed", "White", "Black", "Result", "You"
        )?;
        for row in self.0 {
            let you = row.outcome.map_or("", |o| match o {
                Outcome::Win => "W",
                Outcome::Loss => "L",
                Outcome::Draw => "D",
            });
            writeln!(
                f,
                "{:<10} {:<10} {:<12} {:<20} {:<20} {:<6} {:<5} {}",
                row.date, row.id, row.speed, row.white, row.black, row.result, you, row.opening
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)?;
        if let Some(headline) = &self.headline_rating {
            write!(f, " ({} {})", headline.perf, headline.rating)?;
        }
        writeln!(f)?;
        writeln!(f)?;

        let s = &self.summary;
        writeln!(f, "Player Summary")?;
        writeln!(f, "  Total Games: {}", s.matched_games)?;
        writeln!(f, "  Wins: {}", s.wins)?;
        writeln!(f, "  Losses: {}", s.losses)?;
        writeln!(f, "  Draws: {}", s.draws)?;
        writeln!(f, "  White Win %: {}", percent(s.white_win_percent))?;
        writeln!(f, "  Black Win %: {}", percent(s.black_win_percent))?;
        writeln!(
            f,
            "  Most Played Opening: {}",
            s.most_played_opening.as_deref().unwrap_or("N/A")
        )?;
        writeln!(f)?;

        writeln!(f, "Rating ({})", self.timeframe)?;
        write!(f, "{}", SeriesView(&self.rating_series))?;
        writeln!(f)?;

        writeln!(f, "Recent Games")?;
        write!(f, "{}", GamesView(&self.games))
    }
}

impl fmt::Display for GameDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(row) = &self.header {
            writeln!(
                f,
                "{} vs {} | {} | {} | {}",
                row.white, row.black, row.speed, row.date, row.result
            )?;
            writeln!(f)?;
        }

        let opening = &self.opening;
        writeln!(f, "{} {}", opening.code, opening.name)?;
        match opening.deviation_move {
            Some(ply) => writeln!(f, "Theory followed until move {ply}")?,
            None => writeln!(f, "Theory followed until move N/A")?,
        }
        writeln!(f, "Book: {}", opening.book_moves)?;
        writeln!(f, "Played: {}", opening.actual_moves)?;
        writeln!(f, "{}", opening.reason)?;
        writeln!(f)?;

        for pair in self.moves.chunks(2) {
            let mut line = String::new();
            for entry in pair {
                let marker = if entry.current { "*" } else { " " };
                if entry.label.ends_with("...") && pair.len() == 2 {
                    line.push_str(&format!("{marker}{:<8}", entry.san));
                } else {
                    line.push_str(&format!("{:<5}{marker}{:<8}", entry.label, entry.san));
                }
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        writeln!(f)?;

        writeln!(f, "{}", BoardView(&self.board))?;
        writeln!(f, "Move {}", self.cursor.counter())?;

        for warning in &self.warnings {
            writeln!(
                f,
                "warning: move {} ({}) skipped: {}",
                warning.ply + 1,
                warning.san,
                warning.error
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::play_to;

    #[test]
    fn test_initial_board() {
        let text = BoardView(&BoardState::initial()).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "8  ♜  ♞  ♝  ♛  ♚  ♝  ♞  ♜  8");
        assert_eq!(lines[8], "1  ♖  ♘  ♗  ♕  ♔  ♗  ♘  ♖  1");
        assert_eq!(lines[10], "White to move");
    }

    #[test]
    fn test_last_move_is_bracketed() {
        let state = play_to(&["e4"], 0).state;
        let text = BoardView(&state).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[5], "4  ·  ·  ·  · [♙] ·  ·  ·  4");
        assert_eq!(lines[7], "2  ♙  ♙  ♙  ♙ [·] ♙  ♙  ♙  2");
        assert!(lines[10].starts_with("Black to move (last move e2-e4)"));
    }

    #[test]
    fn test_series_gaps_use_dash() {
        let points = vec![
            SeriesPoint { label: "2024-03-01".into(), rating: Some(1500) },
            SeriesPoint { label: "2024-03-02".into(), rating: None },
        ];
        let text = SeriesView(&points).to_string();
        assert!(text.contains("2024-03-01 1500"));
        assert!(text.contains("2024-03-02 —"));

        let empty = vec![SeriesPoint { label: "2024-03".into(), rating: None }];
        assert_eq!(SeriesView(&empty).to_string(), "No rating data available.\n");
    }

    #[test]
    fn test_empty_games_table() {
        assert_eq!(GamesView(&[]).to_string(), "No recent games available.\n");
    }

    #[test]
    fn test_game_detail_text() {
        let moves: Vec<String> = ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]
            .iter()
            .map(|m| m.to_string())
            .collect();
        let detail = GameDetail::from_moves(&moves, Some(2));
        let text = detail.to_string();
        assert!(text.starts_with("C60 Spanish Opening (Ruy Lopez)\n"));
        assert!(text.contains("Theory followed until move 5"));
        assert!(text.contains("1.    e4       e5"));
        assert!(text.contains("2.   *Nf3      Nc6"));
        assert!(text.contains("Move 3/6"));
    }
}
