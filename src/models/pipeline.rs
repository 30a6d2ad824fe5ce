//! Refresh sequence run after every board mutation, and the game status
//! derived from it.

use tracing::{debug, warn};

use crate::domain::{LogicalSquare, PieceColor, PromotionPiece, RulesEngine};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Checkmate {
        winner: PieceColor,
    },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// Text of the game-over notice
    pub fn message(&self) -> Option<&'static str> {
        match self {
            GameStatus::Ongoing => None,
            GameStatus::Checkmate {
                winner: PieceColor::White,
            } => Some("White wins by Checkmate!"),
            GameStatus::Checkmate {
                winner: PieceColor::Black,
            } => Some("Black wins by Checkmate!"),
            GameStatus::Stalemate => Some("Draw by Stalemate!"),
        }
    }
}

/// Result of one submitted move
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveReport {
    /// Whether the engine played the move
    pub accepted: bool,
    pub status: GameStatus,
}

/// Recompute all derived engine state. Check status has to be known before
/// filtering, and pins are resolved against the filtered sets.
pub fn refresh<E: RulesEngine + ?Sized>(engine: &mut E) {
    engine.clear_derived_state();
    engine.compute_raw_moves();
    engine.compute_check_status();
    engine.filter_self_check();
    engine.resolve_pins_and_aggregate();
}

/// Combine the engine's king predicates into a status
pub fn derive_status<E: RulesEngine + ?Sized>(engine: &E) -> GameStatus {
    let turn = PieceColor::from_move_count(engine.move_count());
    let mover_moves = engine.legal_move_count(turn);

    debug!(
        white_checkmated = engine.is_checkmated(PieceColor::White),
        black_checkmated = engine.is_checkmated(PieceColor::Black),
        white_stalemate = engine.is_stalemate(PieceColor::White),
        black_stalemate = engine.is_stalemate(PieceColor::Black),
        white_in_check = engine.is_in_check(PieceColor::White),
        black_in_check = engine.is_in_check(PieceColor::Black),
        black_moves = engine.legal_move_count(PieceColor::Black),
        side_to_move = turn.label(),
        mover_moves,
        "checking game over"
    );

    let status = if engine.is_checkmated(PieceColor::White) {
        GameStatus::Checkmate {
            winner: PieceColor::Black,
        }
    } else if engine.is_checkmated(PieceColor::Black) {
        GameStatus::Checkmate {
            winner: PieceColor::White,
        }
    } else if engine.is_stalemate(PieceColor::White) || engine.is_stalemate(PieceColor::Black) {
        GameStatus::Stalemate
    } else {
        GameStatus::Ongoing
    };

    if status == GameStatus::Ongoing && mover_moves == 0 {
        warn!(
            side_to_move = turn.label(),
            "side to move has no legal moves but no game end was reported"
        );
    }
    status
}

/// Refresh and derive the status without mutating the board
pub fn run<E: RulesEngine + ?Sized>(engine: &mut E) -> GameStatus {
    refresh(engine);
    derive_status(engine)
}

/// Hand a move to the engine, then refresh unconditionally. A rejected move
/// is a no-op on the board and still gets a full refresh.
pub fn submit_move<E: RulesEngine + ?Sized>(
    engine: &mut E,
    from: LogicalSquare,
    to: LogicalSquare,
    promotion: PromotionPiece,
) -> MoveReport {
    let before = engine.move_count();
    engine.move_piece(from, to, promotion);
    let accepted = engine.move_count() != before;
    let status = run(engine);
    MoveReport { accepted, status }
}
