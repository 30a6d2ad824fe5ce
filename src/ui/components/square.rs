//! Square rendering component.

use gpui::{div, prelude::*, px, rgb};

use crate::ui::components::render_piece;
use crate::ui::theme::{HINT_SCALE, LEGAL_HINT, square_color};
use crate::ui::view_models::RenderedSquare;

/// Render a single board square with its piece and move hint
pub fn render_square(cell: &RenderedSquare, square_size: f32, piece_size: f32) -> impl IntoElement {
    let hint_size = square_size * HINT_SCALE;
    div()
        .flex_shrink_0() // never shrink - maintain aspect ratio
        .relative()
        .size(px(square_size))
        .bg(rgb(square_color(cell.is_light, cell.is_selected)))
        .flex()
        .items_center()
        .justify_center()
        .when_some(cell.piece, |el, piece| el.child(render_piece(piece, piece_size)))
        .when(cell.is_legal_target, |el| {
            el.child(
                div()
                    .absolute()
                    .top(px((square_size - hint_size) / 2.0))
                    .left(px((square_size - hint_size) / 2.0))
                    .size(px(hint_size))
                    .rounded_full()
                    .opacity(0.6)
                    .bg(rgb(LEGAL_HINT)),
            )
        })
}
