//! Board layout calculations - handles sizing and hit testing.

use crate::domain::VisualSquare;
use crate::ui::theme::{BOARD_PADDING, MIN_SQUARE_SIZE, PIECE_SCALE};

/// Handles all layout calculations for the chess board
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BoardLayout {
    pub panel_width: f32,
    pub panel_height: f32,
}

impl BoardLayout {
    pub fn new(panel_width: f32, panel_height: f32) -> Self {
        Self {
            panel_width,
            panel_height,
        }
    }

    /// Calculate square size from measured panel dimensions
    pub fn square_size(&self) -> f32 {
        let available_width = self.panel_width - BOARD_PADDING * 2.0;
        let available_height = self.panel_height - BOARD_PADDING * 2.0;
        (available_width.min(available_height) / 8.0).max(MIN_SQUARE_SIZE)
    }

    /// Font size of a piece glyph
    pub fn piece_size(&self) -> f32 {
        self.square_size() * PIECE_SCALE
    }

    /// Convert a position relative to the board panel to a visual square
    pub fn pos_to_square(&self, x: f32, y: f32) -> Option<VisualSquare> {
        let board_x = x - BOARD_PADDING;
        let board_y = y - BOARD_PADDING;

        if board_x < 0.0 || board_y < 0.0 {
            return None;
        }

        let square_size = self.square_size();
        let col = (board_x / square_size) as usize;
        let row = (board_y / square_size) as usize;

        if row < 8 && col < 8 {
            VisualSquare::new(row as u8, col as u8)
        } else {
            None
        }
    }

    /// Get the total size of the board (8 squares)
    pub fn board_total_size(&self) -> f32 {
        self.square_size() * 8.0
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(600.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_size_uses_smaller_side() {
        let layout = BoardLayout::new(840.0, 440.0);
        assert_eq!(layout.square_size(), 50.0);
        assert_eq!(layout.board_total_size(), 400.0);
    }

    #[test]
    fn test_square_size_has_a_floor() {
        let layout = BoardLayout::new(100.0, 100.0);
        assert_eq!(layout.square_size(), MIN_SQUARE_SIZE);
    }

    #[test]
    fn test_hit_testing() {
        let layout = BoardLayout::new(440.0, 440.0);
        assert_eq!(layout.pos_to_square(21.0, 21.0), VisualSquare::new(0, 0));
        assert_eq!(layout.pos_to_square(419.0, 21.0), VisualSquare::new(0, 7));
        assert_eq!(layout.pos_to_square(75.0, 125.0), VisualSquare::new(2, 1));
        assert_eq!(layout.pos_to_square(10.0, 100.0), None);
        assert_eq!(layout.pos_to_square(100.0, 421.0), None);
    }
}
