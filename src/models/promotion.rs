//! Promotion choice for pawns reaching the far rank.

use crate::domain::{LogicalSquare, Piece, PieceColor, PieceKind, PromotionPiece};

/// A move attempt paused until the user picks a promotion piece
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PendingPromotion {
    pub from: LogicalSquare,
    pub to: LogicalSquare,
    pub color: PieceColor,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PromotionResolution {
    Continue(PromotionPiece),
    Abort,
}

/// A prompt is needed when a pawn targets its colour's far rank. Legality of
/// the move itself is left to the engine.
pub fn pending_for(
    moving: Option<Piece>,
    from: LogicalSquare,
    to: LogicalSquare,
) -> Option<PendingPromotion> {
    let piece = moving?;
    (piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row()).then_some(
        PendingPromotion {
            from,
            to,
            color: piece.color,
        },
    )
}

/// `None` is a closed prompt.
pub fn resolve(choice: Option<PromotionPiece>) -> PromotionResolution {
    match choice {
        Some(piece) => PromotionResolution::Continue(piece),
        None => PromotionResolution::Abort,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> LogicalSquare {
        LogicalSquare::from_algebraic(name).unwrap()
    }

    fn pawn(color: PieceColor) -> Option<Piece> {
        Some(Piece::new(PieceKind::Pawn, color))
    }

    #[test]
    fn test_white_pawn_to_eighth_rank() {
        let pending = pending_for(pawn(PieceColor::White), sq("a7"), sq("a8")).unwrap();
        assert_eq!(pending.color, PieceColor::White);
        assert_eq!(pending.to, sq("a8"));
    }

    #[test]
    fn test_black_pawn_to_first_rank() {
        assert!(pending_for(pawn(PieceColor::Black), sq("b2"), sq("b1")).is_some());
        assert!(pending_for(pawn(PieceColor::Black), sq("b2"), sq("b8")).is_none());
    }

    #[test]
    fn test_no_prompt_for_other_pieces_or_ranks() {
        let rook = Some(Piece::new(PieceKind::Rook, PieceColor::White));
        assert!(pending_for(rook, sq("a7"), sq("a8")).is_none());
        assert!(pending_for(pawn(PieceColor::White), sq("e2"), sq("e4")).is_none());
        assert!(pending_for(None, sq("a7"), sq("a8")).is_none());
    }

    #[test]
    fn test_resolution() {
        assert_eq!(resolve(None), PromotionResolution::Abort);
        assert_eq!(
            resolve(Some(PromotionPiece::Rook)),
            PromotionResolution::Continue(PromotionPiece::Rook)
        );
    }
}
