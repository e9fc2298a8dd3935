//! Short algebraic notation parsing.

use shakmaty::san::San;
use shakmaty::{CastlingSide, File, Rank, Role, Square};

use crate::error::ReplayError;

/// A SAN move broken into the parts the replay engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedMove {
    Castle(CastlingSide),
    Normal {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        to: Square,
        promotion: Option<Role>,
    },
}

/// Drop trailing check, mate and annotation marks ("+", "#", "!", "?").
pub fn strip_annotations(san: &str) -> &str {
    san.trim()
        .trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'))
}

pub fn parse_san(san: &str) -> Result<ParsedMove, ReplayError> {
    let token = strip_annotations(san);

    match token {
        "O-O" | "0-0" => return Ok(ParsedMove::Castle(CastlingSide::KingSide)),
        "O-O-O" | "0-0-0" => return Ok(ParsedMove::Castle(CastlingSide::QueenSide)),
        _ => {}
    }

    match token.parse::<San>() {
        Ok(San::Normal {
            role,
            file,
            rank,
            capture,
            to,
            promotion,
        }) => Ok(ParsedMove::Normal {
            role,
            file,
            rank,
            capture,
            to,
            promotion,
        }),
        Ok(San::Castle(side)) => Ok(ParsedMove::Castle(side)),
        Ok(_) => Err(ReplayError::Unsupported(san.to_string())),
        Err(_) => Err(ReplayError::Notation(san.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(san: &str) -> (Role, Option<File>, Option<Rank>, bool, Square, Option<Role>) {
        match parse_san(san).unwrap() {
            ParsedMove::Normal { role, file, rank, capture, to, promotion } => {
                (role, file, rank, capture, to, promotion)
            }
            other => panic!("expected a normal move, got {other:?}"),
        }
    }

    #[test]
    fn test_castling_tokens() {
        assert_eq!(parse_san("O-O"), Ok(ParsedMove::Castle(CastlingSide::KingSide)));
        assert_eq!(parse_san("O-O-O+"), Ok(ParsedMove::Castle(CastlingSide::QueenSide)));
        assert_eq!(parse_san("0-0"), Ok(ParsedMove::Castle(CastlingSide::KingSide)));
    }

    #[test]
    fn test_piece_and_pawn_moves() {
        assert_eq!(normal("Nf3"), (Role::Knight, None, None, false, Square::F3, None));
        assert_eq!(normal("e4"), (Role::Pawn, None, None, false, Square::E4, None));
        assert_eq!(normal("exd5"), (Role::Pawn, Some(File::E), None, true, Square::D5, None));
    }

    #[test]
    fn test_disambiguators() {
        assert_eq!(normal("Nbd7"), (Role::Knight, Some(File::B), None, false, Square::D7, None));
        assert_eq!(normal("R1a3"), (Role::Rook, None, Some(Rank::First), false, Square::A3, None));
        assert_eq!(
            normal("Qh4xe1"),
            (Role::Queen, Some(File::H), Some(Rank::Fourth), true, Square::E1, None)
        );
    }

    #[test]
    fn test_promotion_and_suffixes() {
        assert_eq!(
            normal("e8=Q+"),
            (Role::Pawn, None, None, false, Square::E8, Some(Role::Queen))
        );
        assert_eq!(
            normal("bxa1=N#"),
            (Role::Pawn, Some(File::B), None, true, Square::A1, Some(Role::Knight))
        );
        assert_eq!(normal("Nf3!?").4, Square::F3);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert_eq!(parse_san("zz9"), Err(ReplayError::Notation("zz9".to_string())));
        assert!(parse_san("").is_err());
    }
}
