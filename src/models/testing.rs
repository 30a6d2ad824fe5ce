//! Recording rules engine for controller tests.

use std::collections::HashMap;

use crate::domain::{
    EngineError, LogicalSquare, Piece, PieceColor, PieceKind, PromotionPiece, RulesEngine,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Call {
    Move(LogicalSquare, LogicalSquare, PromotionPiece),
    SetMoveCount(u32),
    ClearBoard,
    Load(PieceColor),
    ClearDerived,
    RawMoves,
    CheckStatus,
    FilterSelfCheck,
    PinsAndAggregate,
}

#[derive(Debug)]
pub struct FakeEngine {
    pub pieces: HashMap<LogicalSquare, Piece>,
    pub move_count: u32,
    pub accept_moves: bool,
    pub checkmated: Option<PieceColor>,
    pub stalemated: Option<PieceColor>,
    pub calls: Vec<Call>,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self {
            pieces: HashMap::new(),
            move_count: 0,
            accept_moves: true,
            checkmated: None,
            stalemated: None,
            calls: Vec::new(),
        }
    }
}

impl FakeEngine {
    pub fn with_piece(mut self, square: &str, kind: PieceKind, color: PieceColor) -> Self {
        let square = LogicalSquare::from_algebraic(square).unwrap();
        self.pieces.insert(square, Piece::new(kind, color));
        self
    }

    pub fn mutations(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::Move(..) | Call::SetMoveCount(_) | Call::ClearBoard | Call::Load(_)
                )
            })
            .count()
    }
}

impl RulesEngine for FakeEngine {
    fn piece_at(&self, square: LogicalSquare) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    fn legal_destinations(&self, _square: LogicalSquare) -> Vec<LogicalSquare> {
        Vec::new()
    }

    fn move_piece(&mut self, from: LogicalSquare, to: LogicalSquare, promotion: PromotionPiece) {
        self.calls.push(Call::Move(from, to, promotion));
        if !self.accept_moves {
            return;
        }
        if let Some(mut piece) = self.pieces.remove(&from) {
            if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row() {
                piece.kind = promotion.kind();
            }
            self.pieces.insert(to, piece);
            self.move_count += 1;
        }
    }

    fn move_count(&self) -> u32 {
        self.move_count
    }

    fn set_move_count(&mut self, count: u32) {
        self.calls.push(Call::SetMoveCount(count));
        self.move_count = count;
    }

    fn clear_board(&mut self) {
        self.calls.push(Call::ClearBoard);
        self.pieces.clear();
    }

    fn load_position(&mut self, _text: &str, active: PieceColor) -> Result<(), EngineError> {
        self.calls.push(Call::Load(active));
        self.move_count = match active {
            PieceColor::White => 0,
            PieceColor::Black => 1,
        };
        Ok(())
    }

    fn clear_derived_state(&mut self) {
        self.calls.push(Call::ClearDerived);
    }

    fn compute_raw_moves(&mut self) {
        self.calls.push(Call::RawMoves);
    }

    fn compute_check_status(&mut self) {
        self.calls.push(Call::CheckStatus);
    }

    fn filter_self_check(&mut self) {
        self.calls.push(Call::FilterSelfCheck);
    }

    fn resolve_pins_and_aggregate(&mut self) {
        self.calls.push(Call::PinsAndAggregate);
    }

    fn is_checkmated(&self, king: PieceColor) -> bool {
        self.checkmated == Some(king)
    }

    fn is_stalemate(&self, king: PieceColor) -> bool {
        self.stalemated == Some(king)
    }

    fn is_in_check(&self, king: PieceColor) -> bool {
        self.checkmated == Some(king)
    }

    fn legal_move_count(&self, _color: PieceColor) -> usize {
        1
    }

    fn fen(&self) -> String {
        String::new()
    }
}
