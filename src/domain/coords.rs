//! Mapping between screen order and the engine's logical addressing.

use crate::domain::chess::{LogicalSquare, PieceColor, VisualSquare};

/// Orientation of the rendered grid relative to logical coordinates
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Perspective {
    /// White at the bottom: the top-left cell is a8.
    #[default]
    Normal,
    /// Black at the bottom: the top-left cell is h1.
    Flipped,
}

impl Perspective {
    /// Flipped only when auto-rotation is on and Black is to move.
    pub fn for_turn(auto_rotate: bool, turn: PieceColor) -> Self {
        if auto_rotate && turn == PieceColor::Black {
            Perspective::Flipped
        } else {
            Perspective::Normal
        }
    }
}

// Both directions are the same reflection.
fn reflect(a: u8, b: u8, perspective: Perspective) -> (u8, u8) {
    match perspective {
        Perspective::Normal => (7 - a, b),
        Perspective::Flipped => (a, 7 - b),
    }
}

pub fn to_logical(visual: VisualSquare, perspective: Perspective) -> LogicalSquare {
    let (row, col) = reflect(visual.row(), visual.col(), perspective);
    LogicalSquare::masked(col, row)
}

pub fn to_visual(logical: LogicalSquare, perspective: Perspective) -> VisualSquare {
    let (row, col) = reflect(logical.row(), logical.col(), perspective);
    VisualSquare::masked(row, col)
}
