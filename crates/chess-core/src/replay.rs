//! Move replay: rebuilds the board after any ply of a SAN move list.
//!
//! Source squares are resolved by movement geometry only. There is no check,
//! pin, castling-rights or path-obstruction validation, so ambiguous or illegal
//! notation may move the wrong piece. Among several candidates the first one in
//! board-scan order (a1, b1, ..., h1, a2, ..., h8) is taken.

use shakmaty::{attacks, Bitboard, Board, CastlingSide, Color, File, Piece, Rank, Role, Square};
use std::fmt;

use crate::error::ReplayError;
use crate::notation::{parse_san, ParsedMove};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
}

/// Piece placement, side to move and the last move for highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    board: Board,
    turn: Color,
    last_move: Option<LastMove>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

impl BoardState {
    /// Standard starting position, white to move.
    pub fn initial() -> Self {
        Self {
            board: Board::new(),
            turn: Color::White,
            last_move: None,
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn is_highlighted(&self, sq: Square) -> bool {
        self.last_move
            .is_some_and(|m| m.from == sq || m.to == sq)
    }

    /// FEN piece-placement field, rank 8 first.
    pub fn placement(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8u32).rev() {
            let mut empty = 0;
            for file in 0..8u32 {
                let sq = Square::from_coords(File::new(file), Rank::new(rank));
                match self.board.piece_at(sq) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen
    }

    /// Pieces unchanged, turn passed, no highlight. Used for plies that fail to resolve.
    fn pass_turn(&self) -> Self {
        Self {
            board: self.board.clone(),
            turn: !self.turn,
            last_move: None,
        }
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u32).rev() {
            for file in 0..8u32 {
                let sq = Square::from_coords(File::new(file), Rank::new(rank));
                let c = self.board.piece_at(sq).map_or('.', |p| p.char());
                if file > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Apply one SAN move for the side to move, returning the new state.
pub fn apply_move(state: &BoardState, san: &str) -> Result<BoardState, ReplayError> {
    let color = state.turn;
    let mut board = state.board.clone();

    let (from, to) = match parse_san(san)? {
        ParsedMove::Castle(side) => castle(&mut board, color, side, san)?,
        ParsedMove::Normal {
            role,
            file,
            rank,
            capture,
            to,
            promotion,
        } => {
            let from = find_source(&board, color, role, file, rank, capture, to).ok_or_else(|| {
                ReplayError::NoCandidate {
                    san: san.to_string(),
                    role: role_name(role),
                }
            })?;
            move_piece(&mut board, color, role, from, to, promotion, san)?;
            (from, to)
        }
    };

    Ok(BoardState {
        board,
        turn: !color,
        last_move: Some(LastMove { from, to }),
    })
}

/// A reconstructed position plus the plies that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub state: BoardState,
    pub warnings: Vec<ReplayWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayWarning {
    pub ply: usize,
    pub san: String,
    pub error: ReplayError,
}

/// Replay from the initial position up to and including `index`.
///
/// `index < 0` gives the initial position; an index past the end clamps to the
/// last move. A move that cannot be applied is logged and skipped, and replay
/// carries on with the next one.
pub fn play_to<S: AsRef<str>>(moves: &[S], index: isize) -> Replay {
    let mut state = BoardState::initial();
    let mut warnings = Vec::new();

    if index < 0 || moves.is_empty() {
        return Replay { state, warnings };
    }

    let last = (index as usize).min(moves.len() - 1);
    for (ply, san) in moves[..=last].iter().enumerate() {
        let san = san.as_ref();
        match apply_move(&state, san) {
            Ok(next) => state = next,
            Err(error) => {
                tracing::warn!(ply, san, "Skipping unresolvable move: {error}");
                state = state.pass_turn();
                warnings.push(ReplayWarning {
                    ply,
                    san: san.to_string(),
                    error,
                });
            }
        }
    }

    Replay { state, warnings }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::Pawn => "pawn",
        Role::Knight => "knight",
        Role::Bishop => "bishop",
        Role::Rook => "rook",
        Role::Queen => "queen",
        Role::King => "king",
    }
}

fn back_rank(color: Color) -> Rank {
    match color {
        Color::White => Rank::First,
        Color::Black => Rank::Eighth,
    }
}

/// King and rook jump to their fixed castling squares. Rights are not tracked,
/// and whatever stands on the destination squares is overwritten.
fn castle(
    board: &mut Board,
    color: Color,
    side: CastlingSide,
    san: &str,
) -> Result<(Square, Square), ReplayError> {
    let rank = back_rank(color);
    let king = Piece { color, role: Role::King };
    let rook = Piece { color, role: Role::Rook };

    let king_from = Square::from_coords(File::E, rank);
    let (king_file, rook_from_file, rook_file) = match side {
        CastlingSide::KingSide => (File::G, File::H, File::F),
        CastlingSide::QueenSide => (File::C, File::A, File::D),
    };
    let king_to = Square::from_coords(king_file, rank);
    let rook_from = Square::from_coords(rook_from_file, rank);
    let rook_to = Square::from_coords(rook_file, rank);

    if board.piece_at(king_from) != Some(king) {
        return Err(ReplayError::NoCandidate {
            san: san.to_string(),
            role: "king",
        });
    }

    board.discard_piece_at(king_from);
    board.set_piece_at(king_to, king);
    if board.piece_at(rook_from) == Some(rook) {
        board.discard_piece_at(rook_from);
        board.set_piece_at(rook_to, rook);
    }

    Ok((king_from, king_to))
}

fn find_source(
    board: &Board,
    color: Color,
    role: Role,
    file: Option<File>,
    rank: Option<Rank>,
    capture: bool,
    to: Square,
) -> Option<Square> {
    let candidates = board.by_role(role) & board.by_color(color);

    candidates.into_iter().find(|&from| {
        from != to
            && file.map_or(true, |f| from.file() == f)
            && rank.map_or(true, |r| from.rank() == r)
            && reaches(board, color, role, from, to, capture)
    })
}

/// Movement geometry for `role`, ignoring anything standing in between.
fn reaches(board: &Board, color: Color, role: Role, from: Square, to: Square, capture: bool) -> bool {
    let targets = match role {
        Role::Pawn => return pawn_reaches(board, color, from, to, capture),
        Role::Knight => attacks::knight_attacks(from),
        Role::Bishop => attacks::bishop_attacks(from, Bitboard::EMPTY),
        Role::Rook => attacks::rook_attacks(from, Bitboard::EMPTY),
        Role::Queen => attacks::queen_attacks(from, Bitboard::EMPTY),
        Role::King => attacks::king_attacks(from),
    };
    targets.contains(to)
}

fn pawn_reaches(board: &Board, color: Color, from: Square, to: Square, capture: bool) -> bool {
    let forward = match color {
        Color::White => 1,
        Color::Black => -1,
    };
    let rank_step = to.rank() as i32 - from.rank() as i32;
    let file_step = (to.file() as i32 - from.file() as i32).abs();

    if capture {
        return file_step == 1 && rank_step == forward;
    }
    if file_step != 0 {
        return false;
    }

    if rank_step == forward {
        return true;
    }

    // Double step from the start rank, only over an empty square.
    let start_rank = match color {
        Color::White => Rank::Second,
        Color::Black => Rank::Seventh,
    };
    if rank_step != 2 * forward || from.rank() != start_rank {
        return false;
    }
    let skipped = Square::from_coords(from.file(), Rank::new((from.rank() as i32 + forward) as u32));
    board.piece_at(skipped).is_none()
}

fn move_piece(
    board: &mut Board,
    color: Color,
    role: Role,
    from: Square,
    to: Square,
    promotion: Option<Role>,
    san: &str,
) -> Result<(), ReplayError> {
    let placed = if role == Role::Pawn && to.rank() == back_rank(!color) {
        let promoted = promotion.ok_or_else(|| ReplayError::MissingPromotion(san.to_string()))?;
        Piece { color, role: promoted }
    } else {
        Piece { color, role }
    };

    // En passant: diagonal pawn move onto an empty square takes the pawn beside it.
    if role == Role::Pawn && from.file() != to.file() && board.piece_at(to).is_none() {
        let passed = Square::from_coords(to.file(), from.rank());
        if board.piece_at(passed) == Some(Piece { color: !color, role: Role::Pawn }) {
            board.discard_piece_at(passed);
        }
    }

    board.discard_piece_at(from);
    board.set_piece_at(to, placed);
    Ok(())
}
