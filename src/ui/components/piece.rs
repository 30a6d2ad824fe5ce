//! Piece rendering component.

use gpui::{div, prelude::*, px, rgb};

use crate::domain::Piece;
use crate::ui::theme::piece_color;

/// Render a chess piece glyph centered in its container
pub fn render_piece(piece: Piece, piece_size: f32) -> impl IntoElement {
    div()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .text_size(px(piece_size))
        .text_color(rgb(piece_color(piece.color)))
        .child(piece.symbol())
}
