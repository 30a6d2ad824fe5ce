//! Contract between the board controller and a chess rules engine.
//!
//! The controller never decides legality itself. It reads pieces, asks the
//! engine to move them, and drives the engine's recomputation of derived
//! state in a fixed order after every mutation.

use thiserror::Error;

use crate::domain::chess::{LogicalSquare, Piece, PieceColor, PromotionPiece};

/// Failures reported by a rules engine while loading a position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("could not parse FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("FEN {fen:?} describes an illegal position: {reason}")]
    IllegalPosition { fen: String, reason: String },
}

pub trait RulesEngine {
    fn piece_at(&self, square: LogicalSquare) -> Option<Piece>;

    /// Post-filter legal destinations of the piece on `square`.
    /// Empty when the square is empty or the piece cannot move.
    fn legal_destinations(&self, square: LogicalSquare) -> Vec<LogicalSquare>;

    /// Attempt a move. Illegal attempts leave the board untouched.
    fn move_piece(&mut self, from: LogicalSquare, to: LogicalSquare, promotion: PromotionPiece);

    /// Plies played since the position was loaded; parity gives the side to move.
    fn move_count(&self) -> u32;

    fn set_move_count(&mut self, count: u32);

    fn clear_board(&mut self);

    /// Load a FEN-like position with `active` to move regardless of the
    /// colour field of `text`.
    fn load_position(&mut self, text: &str, active: PieceColor) -> Result<(), EngineError>;

    // Refresh primitives. The controller always calls all five, in this order.

    /// Drop legal-move sets, blocking squares, attacker counts and attacked flags.
    fn clear_derived_state(&mut self);
    /// Destinations for every piece, ignoring check.
    fn compute_raw_moves(&mut self);
    /// Whether each king is currently attacked.
    fn compute_check_status(&mut self);
    /// Remove moves that leave the mover's king in check.
    fn filter_self_check(&mut self);
    /// Constrain pinned pieces and build the per-colour aggregate move set.
    fn resolve_pins_and_aggregate(&mut self);

    fn is_checkmated(&self, king: PieceColor) -> bool;
    fn is_stalemate(&self, king: PieceColor) -> bool;
    fn is_in_check(&self, king: PieceColor) -> bool;

    /// Size of the aggregated legal-move set for `color`
    fn legal_move_count(&self, color: PieceColor) -> usize;

    /// Current position as FEN, or an empty string for a cleared board
    fn fen(&self) -> String;
}
