//! Opening classification from a small prefix table, and the book/freeform
//! boundary ("deviation point") of a game.

use serde::Serialize;

/// How many leading moves are compared against the opening table.
pub const OPENING_WINDOW: usize = 6;

/// Book theory is assumed to end at this ply once a game is long enough.
pub const DEVIATION_PLY: usize = 6;

/// Games shorter than this are not analysed for deviation.
pub const MIN_ANALYSED_MOVES: usize = 3;

/// Known opening prefixes. Longer prefixes come first so the most specific match wins.
pub const OPENING_TABLE: &[(&str, &str, &str)] = &[
    ("e4 e5 Nf3 Nc6 Bb5", "C60", "Spanish Opening (Ruy Lopez)"),
    ("e4 e5 Nf3 Nc6", "C20", "King's Pawn Opening"),
    ("d4 d5 c4", "D06", "Queen's Gambit"),
    ("e4 c5", "B20", "Sicilian Defense"),
    ("e4 e6", "C00", "French Defense"),
    ("d4 Nf6", "A40", "Queen's Pawn Game"),
    ("Nf3 d5", "A04", "Réti Opening"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpeningInfo {
    pub code: String,
    pub name: String,
}

impl OpeningInfo {
    fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningDeviation {
    pub code: String,
    pub name: String,
    /// `None` when the game is too short to analyse.
    pub deviation_move: Option<usize>,
    pub book_moves: String,
    pub actual_moves: String,
    pub reason: String,
}

fn is_prefix<S: AsRef<str>>(prefix: &str, moves: &[S]) -> bool {
    let window = &moves[..moves.len().min(OPENING_WINDOW)];
    let tokens: Vec<&str> = prefix.split(' ').collect();
    tokens.len() <= window.len()
        && tokens
            .iter()
            .zip(window)
            .all(|(expected, played)| *expected == played.as_ref())
}

fn join<S: AsRef<str>>(moves: &[S]) -> String {
    moves
        .iter()
        .map(|m| m.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Name the opening from the first moves of a game.
pub fn detect_opening<S: AsRef<str>>(moves: &[S]) -> OpeningInfo {
    if moves.is_empty() {
        return OpeningInfo::new("A00", "Unknown Opening");
    }

    if let Some((_, code, name)) = OPENING_TABLE
        .iter()
        .find(|(prefix, _, _)| is_prefix(prefix, moves))
    {
        return OpeningInfo::new(code, name);
    }

    match moves[0].as_ref() {
        "e4" => OpeningInfo::new("B00", "King's Pawn Opening"),
        "d4" => OpeningInfo::new("A40", "Queen's Pawn Opening"),
        _ => OpeningInfo::new("A00", "Irregular Opening"),
    }
}

/// Opening plus the point where the game is assumed to leave book theory,
/// `min(6, len - 1)`.
pub fn detect_deviation<S: AsRef<str>>(moves: &[S]) -> OpeningDeviation {
    let opening = detect_opening(moves);

    if moves.len() < MIN_ANALYSED_MOVES {
        let all = join(moves);
        return OpeningDeviation {
            code: opening.code,
            name: opening.name,
            deviation_move: None,
            book_moves: all.clone(),
            actual_moves: all,
            reason: "Game too short for analysis".to_string(),
        };
    }

    let deviation = DEVIATION_PLY.min(moves.len() - 1);
    OpeningDeviation {
        code: opening.code,
        name: opening.name,
        deviation_move: Some(deviation),
        book_moves: join(&moves[..deviation]),
        actual_moves: join(&moves[..=deviation]),
        reason: "Beyond basic opening theory".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_prefix_wins() {
        let ruy = detect_opening(&["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);
        assert_eq!(ruy.code, "C60");

        let italian = detect_opening(&["e4", "e5", "Nf3", "Nc6", "Bc4"]);
        assert_eq!(italian.code, "C20");
    }

    #[test]
    fn test_table_entries() {
        assert_eq!(detect_opening(&["d4", "d5", "c4", "e6"]).name, "Queen's Gambit");
        assert_eq!(detect_opening(&["e4", "c5", "Nf3"]).code, "B20");
        assert_eq!(detect_opening(&["e4", "e6"]).code, "C00");
        assert_eq!(detect_opening(&["d4", "Nf6", "c4"]).name, "Queen's Pawn Game");
        assert_eq!(detect_opening(&["Nf3", "d5"]).code, "A04");
    }

    #[test]
    fn test_only_first_six_moves_are_compared() {
        // The prefix must sit inside the first six moves, token by token.
        assert_eq!(detect_opening(&["e4", "c55"]).code, "B00");
    }

    #[test]
    fn test_fallbacks() {
        let empty: [&str; 0] = [];
        assert_eq!(detect_opening(&empty), OpeningInfo::new("A00", "Unknown Opening"));
        assert_eq!(detect_opening(&["e4", "b6"]).name, "King's Pawn Opening");
        assert_eq!(detect_opening(&["d4", "f5"]).name, "Queen's Pawn Opening");
        assert_eq!(detect_opening(&["c4"]).name, "Irregular Opening");
    }

    #[test]
    fn test_deviation_for_six_moves() {
        let dev = detect_deviation(&["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);
        assert_eq!(dev.code, "C60");
        assert_eq!(dev.deviation_move, Some(5));
        assert_eq!(dev.book_moves, "e4 e5 Nf3 Nc6 Bb5");
        assert_eq!(dev.actual_moves, "e4 e5 Nf3 Nc6 Bb5 a6");
        assert_eq!(dev.reason, "Beyond basic opening theory");
    }

    #[test]
    fn test_deviation_caps_at_six() {
        let moves = [
            "e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6", "O-O", "Be7", "Re1", "b5", "Bb3",
            "d6",
        ];
        let dev = detect_deviation(&moves);
        assert_eq!(dev.deviation_move, Some(6));
        assert_eq!(dev.book_moves, "e4 e5 Nf3 Nc6 Bb5 a6");
        assert_eq!(dev.actual_moves, "e4 e5 Nf3 Nc6 Bb5 a6 Ba4");
    }

    #[test]
    fn test_short_game() {
        let dev = detect_deviation(&["e4", "e5"]);
        assert_eq!(dev.deviation_move, None);
        assert_eq!(dev.book_moves, "e4 e5");
        assert_eq!(dev.actual_moves, "e4 e5");
        assert_eq!(dev.reason, "Game too short for analysis");
        assert_eq!(dev.code, "B00");
    }
}
