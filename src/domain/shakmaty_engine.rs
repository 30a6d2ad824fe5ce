//! Rules engine backed by shakmaty.
//!
//! shakmaty owns move generation and position validation. This type adds the
//! bookkeeping the board controller relies on: a ply counter whose parity is
//! the side to move, a cleared-board state, and per-piece move sets that are
//! rebuilt in discrete steps.

use std::collections::HashMap;

use shakmaty::fen::Fen;
use shakmaty::{
    Bitboard, ByColor, CastlingMode, Chess, Color as SColor, EnPassantMode, File, Move, Position,
    PositionError, Role, Square, attacks,
};
use tracing::{debug, warn};

use crate::domain::chess::{
    LogicalSquare, Piece, PieceColor, PromotionPiece, from_square, promotion_role,
    shakmaty_to_piece, to_shakmaty_color, to_square,
};
use crate::domain::rules::{EngineError, RulesEngine};

/// Piece placement of the standard starting position
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Everything recomputed by the refresh primitives
#[derive(Debug, Clone, Default)]
struct DerivedState {
    /// Destinations per piece before check is considered
    raw: HashMap<Square, Bitboard>,
    /// Squares attacked by each side
    attacked: ByColor<Bitboard>,
    in_check: ByColor<bool>,
    /// Destinations per piece after self-check filtering and pin resolution
    legal: HashMap<Square, Bitboard>,
    pinned: Bitboard,
    aggregated: ByColor<Bitboard>,
    move_counts: ByColor<usize>,
}

#[derive(Debug, Clone)]
pub struct ShakmatyEngine {
    /// `None` is a cleared board
    position: Option<Chess>,
    move_count: u32,
    derived: DerivedState,
}

impl ShakmatyEngine {
    /// Engine holding the standard starting position (derived state not yet computed)
    pub fn new() -> Self {
        Self {
            position: Some(Chess::default()),
            move_count: 0,
            derived: DerivedState::default(),
        }
    }

    pub fn position(&self) -> Option<&Chess> {
        self.position.as_ref()
    }

    /// Squares holding pieces that may not leave their line to the king
    pub fn pinned_squares(&self) -> Vec<LogicalSquare> {
        self.derived.pinned.into_iter().map(from_square).collect()
    }

    /// Normalise user input to a full FEN with `active` as the side to move.
    /// Missing trailing fields get neutral defaults.
    fn full_fen(text: &str, active: PieceColor) -> String {
        let fields: Vec<&str> = text.split_whitespace().collect();
        let placement = fields.first().copied().unwrap_or_default();
        let castling = fields.get(2).copied().unwrap_or("-");
        let ep = fields.get(3).copied().unwrap_or("-");
        let halfmoves = fields.get(4).copied().unwrap_or("0");
        let fullmoves = fields.get(5).copied().unwrap_or("1");
        let turn = match active {
            PieceColor::White => "w",
            PieceColor::Black => "b",
        };
        format!("{placement} {turn} {castling} {ep} {halfmoves} {fullmoves}")
    }

    /// Destinations of a piece ignoring check: attacks onto empty or enemy
    /// squares, plus pawn pushes.
    fn pseudo_destinations(chess: &Chess, from: Square, piece: shakmaty::Piece) -> Bitboard {
        let board = chess.board();
        let occupied = board.occupied();
        let own = board.by_color(piece.color);
        let enemy = board.by_color(!piece.color);

        if piece.role != Role::Pawn {
            return attacks::attacks(from, piece, occupied) & !own;
        }

        let mut targets = attacks::pawn_attacks(piece.color, from) & enemy;
        let step = piece.color.fold_wb(8, -8);
        if let Some(single) = from.offset(step).filter(|sq| !occupied.contains(*sq)) {
            targets.add(single);
            let home_rank = piece.color.fold_wb(1, 6);
            if from.rank().to_u32() == home_rank {
                if let Some(double) = single.offset(step).filter(|sq| !occupied.contains(*sq)) {
                    targets.add(double);
                }
            }
        }
        targets
    }

    /// Legal moves of the side to move, keyed by origin. Castling is keyed
    /// by the king's destination square.
    fn side_to_move_moves(chess: &Chess) -> HashMap<Square, Bitboard> {
        let mut by_origin: HashMap<Square, Bitboard> = HashMap::new();
        for m in &chess.legal_moves() {
            let Some((from, to)) = Self::click_squares(m) else {
                continue;
            };
            by_origin.entry(from).or_default().add(to);
        }
        by_origin
    }

    /// The (origin, destination) pair a user clicks to play `m`
    fn click_squares(m: &Move) -> Option<(Square, Square)> {
        match m {
            Move::Normal { from, to, .. } => Some((*from, *to)),
            Move::EnPassant { from, to } => Some((*from, *to)),
            Move::Castle { king, rook } => {
                let king_dest = if rook.file() > king.file() {
                    Square::from_coords(File::G, rook.rank())
                } else {
                    Square::from_coords(File::C, rook.rank())
                };
                Some((*king, king_dest))
            }
            Move::Put { .. } => None,
        }
    }

    /// Whether moving `piece` from `from` to `to` leaves its own king attacked
    fn exposes_king(chess: &Chess, from: Square, to: Square, piece: shakmaty::Piece) -> bool {
        let mut board = chess.board().clone();
        board.discard_piece_at(from);
        board.set_piece_at(to, piece);
        match board.king_of(piece.color) {
            Some(king) => board
                .attacks_to(king, !piece.color, board.occupied())
                .any(),
            None => false,
        }
    }
}

impl Default for ShakmatyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for ShakmatyEngine {
    fn piece_at(&self, square: LogicalSquare) -> Option<Piece> {
        self.position
            .as_ref()?
            .board()
            .piece_at(to_square(square))
            .map(shakmaty_to_piece)
    }

    fn legal_destinations(&self, square: LogicalSquare) -> Vec<LogicalSquare> {
        self.derived
            .legal
            .get(&to_square(square))
            .map(|targets| targets.into_iter().map(from_square).collect())
            .unwrap_or_default()
    }

    fn move_piece(&mut self, from: LogicalSquare, to: LogicalSquare, promotion: PromotionPiece) {
        let Some(position) = &self.position else {
            return;
        };
        let from_sq = to_square(from);
        let to_sq = to_square(to);
        let wanted_role = promotion_role(promotion);

        let chosen = position.legal_moves().into_iter().find(|m| {
            if Self::click_squares(m) != Some((from_sq, to_sq)) {
                return false;
            }
            match m.promotion() {
                Some(role) => role == wanted_role,
                None => true,
            }
        });

        let Some(m) = chosen else {
            debug!(%from, %to, "engine rejected move");
            return;
        };

        match position.clone().play(m) {
            Ok(next) => {
                self.position = Some(next);
                self.move_count += 1;
                debug!(%from, %to, move_count = self.move_count, "move played");
            }
            Err(err) => warn!(%from, %to, %err, "legal move could not be played"),
        }
    }

    fn move_count(&self) -> u32 {
        self.move_count
    }

    fn set_move_count(&mut self, count: u32) {
        self.move_count = count;
    }

    fn clear_board(&mut self) {
        self.position = None;
        self.derived = DerivedState::default();
    }

    fn load_position(&mut self, text: &str, active: PieceColor) -> Result<(), EngineError> {
        let fen_text = Self::full_fen(text, active);
        let fen: Fen = fen_text.parse().map_err(|err: shakmaty::fen::ParseFenError| {
            EngineError::InvalidFen {
                fen: text.to_string(),
                reason: err.to_string(),
            }
        })?;
        let chess: Chess = fen
            .into_position(CastlingMode::Standard)
            .or_else(PositionError::ignore_invalid_castling_rights)
            .or_else(PositionError::ignore_invalid_ep_square)
            .map_err(|err| EngineError::IllegalPosition {
                fen: text.to_string(),
                reason: err.to_string(),
            })?;

        self.position = Some(chess);
        self.move_count = match active {
            PieceColor::White => 0,
            PieceColor::Black => 1,
        };
        debug!(fen = %fen_text, "position loaded");
        Ok(())
    }

    fn clear_derived_state(&mut self) {
        self.derived = DerivedState::default();
    }

    fn compute_raw_moves(&mut self) {
        let Some(chess) = &self.position else {
            return;
        };
        let board = chess.board();
        for (sq, piece) in board.iter() {
            let targets = Self::pseudo_destinations(chess, sq, piece);
            self.derived.raw.insert(sq, targets);
            let reach = attacks::attacks(sq, piece, board.occupied());
            *self.derived.attacked.get_mut(piece.color) |= reach;
        }
    }

    fn compute_check_status(&mut self) {
        let Some(chess) = &self.position else {
            return;
        };
        for color in [SColor::White, SColor::Black] {
            let attacked = *self.derived.attacked.get(!color);
            *self.derived.in_check.get_mut(color) = chess
                .board()
                .king_of(color)
                .is_some_and(|king| attacked.contains(king));
        }
    }

    fn filter_self_check(&mut self) {
        let Some(chess) = &self.position else {
            return;
        };
        let turn = chess.turn();
        let mut legal = Self::side_to_move_moves(chess);

        // The side not to move gets its raw moves filtered by simulation.
        for (&from, &targets) in &self.derived.raw {
            let Some(piece) = chess.board().piece_at(from) else {
                continue;
            };
            if piece.color == turn {
                continue;
            }
            let kept = targets
                .into_iter()
                .filter(|&to| !Self::exposes_king(chess, from, to, piece))
                .fold(Bitboard::EMPTY, |acc, to| acc.with(to));
            legal.insert(from, kept);
        }

        self.derived.legal = legal;
    }

    fn resolve_pins_and_aggregate(&mut self) {
        let Some(chess) = &self.position else {
            return;
        };
        let board = chess.board();
        let occupied = board.occupied();

        for color in [SColor::White, SColor::Black] {
            let Some(king) = board.king_of(color) else {
                continue;
            };
            let checkers_before = board.attacks_to(king, !color, occupied);
            let candidates = board.by_color(color).without(king);
            for sq in candidates {
                let exposed = board.attacks_to(king, !color, occupied.without(sq));
                if (exposed & !checkers_before).any() {
                    self.derived.pinned.add(sq);
                    if let Some(targets) = self.derived.legal.get_mut(&sq) {
                        *targets &= attacks::ray(king, sq);
                    }
                }
            }
        }

        for (&from, &targets) in &self.derived.legal {
            let Some(color) = board.color_at(from) else {
                continue;
            };
            *self.derived.aggregated.get_mut(color) |= targets;
            *self.derived.move_counts.get_mut(color) += targets.count();
        }
        debug!(
            white_moves = self.derived.move_counts.white,
            black_moves = self.derived.move_counts.black,
            pinned = self.derived.pinned.count(),
            "derived state refreshed"
        );
    }

    fn is_checkmated(&self, king: PieceColor) -> bool {
        let color = to_shakmaty_color(king);
        self.position.as_ref().is_some_and(|chess| chess.turn() == color)
            && *self.derived.in_check.get(color)
            && *self.derived.move_counts.get(color) == 0
    }

    fn is_stalemate(&self, king: PieceColor) -> bool {
        let color = to_shakmaty_color(king);
        self.position.as_ref().is_some_and(|chess| {
            chess.turn() == color && chess.board().king_of(color).is_some()
        }) && !*self.derived.in_check.get(color)
            && *self.derived.move_counts.get(color) == 0
    }

    fn is_in_check(&self, king: PieceColor) -> bool {
        *self.derived.in_check.get(to_shakmaty_color(king))
    }

    fn legal_move_count(&self, color: PieceColor) -> usize {
        *self.derived.move_counts.get(to_shakmaty_color(color))
    }

    fn fen(&self) -> String {
        self.position
            .as_ref()
            .map(|chess| Fen::from_position(chess, EnPassantMode::Legal).to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chess::PieceKind;

    fn sq(name: &str) -> LogicalSquare {
        LogicalSquare::from_algebraic(name).unwrap()
    }

    fn refreshed(mut engine: ShakmatyEngine) -> ShakmatyEngine {
        engine.clear_derived_state();
        engine.compute_raw_moves();
        engine.compute_check_status();
        engine.filter_self_check();
        engine.resolve_pins_and_aggregate();
        engine
    }

    fn loaded(fen: &str, active: PieceColor) -> ShakmatyEngine {
        let mut engine = ShakmatyEngine::new();
        engine.clear_board();
        engine.load_position(fen, active).unwrap();
        refreshed(engine)
    }

    #[test]
    fn test_start_position_has_twenty_moves_each() {
        let engine = refreshed(ShakmatyEngine::new());
        assert_eq!(engine.legal_move_count(PieceColor::White), 20);
        assert_eq!(engine.legal_move_count(PieceColor::Black), 20);
        let mut e2 = engine.legal_destinations(sq("e2"));
        e2.sort();
        assert_eq!(e2, vec![sq("e3"), sq("e4")]);
    }

    #[test]
    fn test_illegal_move_is_silently_rejected() {
        let mut engine = refreshed(ShakmatyEngine::new());
        let before = engine.fen();
        engine.move_piece(sq("e2"), sq("e5"), PromotionPiece::Queen);
        assert_eq!(engine.fen(), before);
        assert_eq!(engine.move_count(), 0);
    }

    #[test]
    fn test_move_advances_counter() {
        let mut engine = refreshed(ShakmatyEngine::new());
        engine.move_piece(sq("e2"), sq("e4"), PromotionPiece::Queen);
        assert_eq!(engine.move_count(), 1);
        assert_eq!(
            engine.piece_at(sq("e4")),
            Some(Piece::new(PieceKind::Pawn, PieceColor::White))
        );
        assert_eq!(engine.piece_at(sq("e2")), None);
    }

    #[test]
    fn test_placement_only_fen_uses_override_color() {
        let engine = loaded(STARTING_PLACEMENT, PieceColor::Black);
        assert_eq!(engine.move_count(), 1);
        assert!(engine.fen().contains(" b "));
    }

    #[test]
    fn test_override_replaces_color_field() {
        let engine = loaded(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1",
            PieceColor::Black,
        );
        assert!(engine.fen().contains(" b KQkq"));
    }

    #[test]
    fn test_malformed_fen_is_reported() {
        let mut engine = ShakmatyEngine::new();
        engine.clear_board();
        let err = engine.load_position("not a fen", PieceColor::White).unwrap_err();
        assert!(matches!(err, EngineError::InvalidFen { .. }));
        assert_eq!(engine.fen(), "");
    }

    #[test]
    fn test_position_without_kings_is_illegal() {
        let mut engine = ShakmatyEngine::new();
        engine.clear_board();
        let err = engine.load_position("8/8/8/8/8/8/8/8", PieceColor::White).unwrap_err();
        assert!(matches!(err, EngineError::IllegalPosition { .. }));
    }

    #[test]
    fn test_cleared_board_is_inert() {
        let mut engine = ShakmatyEngine::new();
        engine.clear_board();
        let engine = refreshed(engine);
        assert!(LogicalSquare::all().all(|s| engine.piece_at(s).is_none()));
        assert!(!engine.is_checkmated(PieceColor::White));
        assert!(!engine.is_stalemate(PieceColor::White));
        assert_eq!(engine.legal_move_count(PieceColor::White), 0);
    }

    #[test]
    fn test_checkmate_predicates() {
        // Fool's mate
        let engine = loaded(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR",
            PieceColor::White,
        );
        assert!(engine.is_in_check(PieceColor::White));
        assert!(engine.is_checkmated(PieceColor::White));
        assert!(!engine.is_checkmated(PieceColor::Black));
        assert!(!engine.is_stalemate(PieceColor::White));
    }

    #[test]
    fn test_stalemate_predicates() {
        let engine = loaded("7k/5Q2/6K1/8/8/8/8/8", PieceColor::Black);
        assert!(engine.is_stalemate(PieceColor::Black));
        assert!(!engine.is_in_check(PieceColor::Black));
        assert!(!engine.is_checkmated(PieceColor::Black));
        assert!(!engine.is_stalemate(PieceColor::White));
    }

    #[test]
    fn test_pinned_piece_keeps_only_its_line() {
        // White bishop on e2 pinned by the rook on e8 against the king on e1
        let engine = loaded("4r2k/8/8/8/8/8/4B3/4K3", PieceColor::White);
        assert_eq!(engine.pinned_squares(), vec![sq("e2")]);
        assert!(engine.legal_destinations(sq("e2")).is_empty());
    }

    #[test]
    fn test_castling_is_addressed_by_king_destination() {
        let mut engine = loaded("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", PieceColor::White);
        assert!(engine.legal_destinations(sq("e1")).contains(&sq("g1")));
        engine.move_piece(sq("e1"), sq("g1"), PromotionPiece::Queen);
        assert_eq!(engine.move_count(), 1);
        assert_eq!(
            engine.piece_at(sq("f1")),
            Some(Piece::new(PieceKind::Rook, PieceColor::White))
        );
    }

    #[test]
    fn test_promotion_uses_requested_piece() {
        let mut engine = loaded("7k/P7/8/8/8/8/8/K7", PieceColor::White);
        engine.move_piece(sq("a7"), sq("a8"), PromotionPiece::Knight);
        assert_eq!(
            engine.piece_at(sq("a8")),
            Some(Piece::new(PieceKind::Knight, PieceColor::White))
        );
    }
}
