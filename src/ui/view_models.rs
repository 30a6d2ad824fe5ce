//! View models for rendering the board.
//!
//! These types are snapshots of game state prepared for display. They live
//! in the UI layer and carry no references back into the model.

use crate::domain::{LogicalSquare, Perspective, Piece, PromotionPiece, VisualSquare};
use crate::models::PendingPromotion;

/// Display data for one cell of the grid, in visual order
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RenderedSquare {
    pub visual: VisualSquare,
    /// The square a click on this cell is dispatched to
    pub logical: LogicalSquare,
    pub piece: Option<Piece>,
    pub is_light: bool,
    pub is_selected: bool,
    /// Legal destination of the selected piece
    pub is_legal_target: bool,
}

/// Display data for the promotion prompt
#[derive(Clone, Debug)]
pub struct PromotionPrompt {
    pub pending: PendingPromotion,
    pub choices: [PromotionPiece; 4],
}

/// Everything the board view needs for one frame
#[derive(Clone, Debug)]
pub struct BoardRender {
    pub perspective: Perspective,
    pub auto_rotate: bool,
    /// 64 cells, row-major from the top-left of the screen
    pub cells: Vec<RenderedSquare>,
    pub turn_label: String,
    pub game_over: Option<&'static str>,
    pub promotion: Option<PromotionPrompt>,
}

impl BoardRender {
    pub fn cell(&self, visual: VisualSquare) -> Option<&RenderedSquare> {
        self.cells
            .get(usize::from(visual.row()) * 8 + usize::from(visual.col()))
    }

    /// Logical square behind a clicked cell
    pub fn dispatch(&self, visual: VisualSquare) -> Option<LogicalSquare> {
        self.cell(visual).map(|cell| cell.logical)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[RenderedSquare]> {
        self.cells.chunks(8)
    }
}
