//! Display generation for the board.
//!
//! This module transforms game state into display-ready view models.
//! It lives in the UI layer and depends on domain + models, not vice versa.

use crate::domain::{PromotionPiece, RulesEngine, VisualSquare, to_logical};
use crate::models::GameModel;
use crate::ui::view_models::{BoardRender, PromotionPrompt, RenderedSquare};

/// Snapshot the board in visual order. Two calls without an intervening
/// state change produce the same output.
pub fn render_board<E: RulesEngine>(game: &GameModel<E>) -> BoardRender {
    let perspective = game.perspective();
    let selected = game.selection().selected();
    let targets = game.legal_targets();

    let cells = VisualSquare::all()
        .map(|visual| {
            let logical = to_logical(visual, perspective);
            RenderedSquare {
                visual,
                logical,
                piece: game.engine().piece_at(logical),
                is_light: (logical.row() + logical.col()) % 2 == 1,
                is_selected: selected == Some(logical),
                is_legal_target: targets.contains(&logical),
            }
        })
        .collect();

    BoardRender {
        perspective,
        auto_rotate: game.auto_rotate(),
        cells,
        turn_label: game.turn_label(),
        game_over: game.game_over_message(),
        promotion: game.pending_promotion().map(|pending| PromotionPrompt {
            pending,
            choices: PromotionPiece::ALL,
        }),
    }
}
