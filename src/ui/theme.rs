//! Theme constants and colors for the chess UI.

use crate::domain::PieceColor;

// Layout constants
pub const BOARD_PADDING: f32 = 20.0;
pub const PIECE_SCALE: f32 = 0.8; // glyph size relative to square
pub const MIN_SQUARE_SIZE: f32 = 30.0;
pub const HINT_SCALE: f32 = 0.3; // legal-move dot relative to square

// Initial panel sizes
pub const INITIAL_LEFT_PANEL: f32 = 700.0;
pub const INITIAL_RIGHT_PANEL: f32 = 320.0;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xEFD9B5;
pub const DARK_SQUARE: u32 = 0xB48764;
pub const SELECTED_SQUARE: u32 = 0xF6F669;
pub const LEGAL_HINT: u32 = 0x5C7A4A;

// Piece colors
pub const WHITE_PIECE: u32 = 0xFFFFFF;
pub const BLACK_PIECE: u32 = 0x111111;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;
pub const CONFIG_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;
pub const OVERLAY_BG: u32 = 0x000000;

/// Get the color for a board square
pub fn square_color(is_light: bool, is_selected: bool) -> u32 {
    match (is_selected, is_light) {
        (true, _) => SELECTED_SQUARE,
        (false, true) => LIGHT_SQUARE,
        (false, false) => DARK_SQUARE,
    }
}

pub fn piece_color(color: PieceColor) -> u32 {
    match color {
        PieceColor::White => WHITE_PIECE,
        PieceColor::Black => BLACK_PIECE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_overrides_square_color() {
        assert_eq!(square_color(true, false), LIGHT_SQUARE);
        assert_eq!(square_color(false, false), DARK_SQUARE);
        assert_eq!(square_color(false, true), SELECTED_SQUARE);
    }
}
