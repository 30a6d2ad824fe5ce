//! Select → move → deselect interaction state.

use crate::domain::{LogicalSquare, Piece, PieceColor};

/// At most one square is selected at any time
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Selection {
    #[default]
    Idle,
    PieceSelected(LogicalSquare),
}

/// What a click means for the current selection
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClickIntent {
    /// Empty square or opponent piece while idle
    Ignore,
    Select(LogicalSquare),
    Deselect,
    AttemptMove {
        from: LogicalSquare,
        to: LogicalSquare,
    },
}

impl Selection {
    pub fn selected(&self) -> Option<LogicalSquare> {
        match self {
            Selection::Idle => None,
            Selection::PieceSelected(square) => Some(*square),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    /// Decide what a click on `clicked` does. Any click away from the
    /// selected square is a move attempt, whatever it lands on.
    pub fn interpret(
        &self,
        clicked: LogicalSquare,
        occupant: Option<Piece>,
        turn: PieceColor,
    ) -> ClickIntent {
        match self {
            Selection::Idle => match occupant {
                Some(piece) if piece.color == turn => ClickIntent::Select(clicked),
                _ => ClickIntent::Ignore,
            },
            Selection::PieceSelected(from) if *from == clicked => ClickIntent::Deselect,
            Selection::PieceSelected(from) => ClickIntent::AttemptMove {
                from: *from,
                to: clicked,
            },
        }
    }

    pub fn select(&mut self, square: LogicalSquare) {
        *self = Selection::PieceSelected(square);
    }

    pub fn clear(&mut self) {
        *self = Selection::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PieceKind;

    fn sq(name: &str) -> LogicalSquare {
        LogicalSquare::from_algebraic(name).unwrap()
    }

    const WHITE_PAWN: Piece = Piece {
        kind: PieceKind::Pawn,
        color: PieceColor::White,
    };
    const BLACK_KNIGHT: Piece = Piece {
        kind: PieceKind::Knight,
        color: PieceColor::Black,
    };

    #[test]
    fn test_idle_selects_own_piece() {
        let intent = Selection::Idle.interpret(sq("e2"), Some(WHITE_PAWN), PieceColor::White);
        assert_eq!(intent, ClickIntent::Select(sq("e2")));
    }

    #[test]
    fn test_idle_ignores_empty_and_opponent_squares() {
        let idle = Selection::Idle;
        assert_eq!(
            idle.interpret(sq("e4"), None, PieceColor::White),
            ClickIntent::Ignore
        );
        assert_eq!(
            idle.interpret(sq("g8"), Some(BLACK_KNIGHT), PieceColor::White),
            ClickIntent::Ignore
        );
    }

    #[test]
    fn test_reclick_deselects() {
        let selected = Selection::PieceSelected(sq("e2"));
        assert_eq!(
            selected.interpret(sq("e2"), Some(WHITE_PAWN), PieceColor::White),
            ClickIntent::Deselect
        );
    }

    #[test]
    fn test_other_square_is_move_attempt() {
        let selected = Selection::PieceSelected(sq("e2"));
        assert_eq!(
            selected.interpret(sq("g8"), Some(BLACK_KNIGHT), PieceColor::White),
            ClickIntent::AttemptMove {
                from: sq("e2"),
                to: sq("g8")
            }
        );
    }

    #[test]
    fn test_select_and_clear() {
        let mut selection = Selection::default();
        assert!(selection.is_idle());
        selection.select(sq("d2"));
        assert_eq!(selection.selected(), Some(sq("d2")));
        selection.clear();
        assert_eq!(selection, Selection::Idle);
    }
}
