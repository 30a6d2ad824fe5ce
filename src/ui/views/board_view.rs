//! Chess board view - the click-driven board with its modal prompts.

use gpui::{
    Context, Entity, MouseButton, MouseDownEvent, Pixels, SharedString, Subscription, Window,
    canvas, div, prelude::*, px, rgb,
};
use gpui_component::button::{Button, ButtonVariants};
use gpui_component::resizable::{h_resizable, resizable_panel};
use tracing::{debug, warn};

use crate::domain::{PieceColor, PromotionPiece};
use crate::models::{ClickOutcome, GameModel};
use crate::ui::BoardLayout;
use crate::ui::components::render_square;
use crate::ui::theme::{
    BOARD_PADDING, BORDER_COLOR, CONFIG_BG, INITIAL_LEFT_PANEL, INITIAL_RIGHT_PANEL, OVERLAY_BG,
    PANEL_BG, TEXT_PRIMARY,
};
use crate::ui::view_models::PromotionPrompt;
use crate::ui::views::render_side_panel;

/// View-local state of the configuration panel
#[derive(Clone, Debug)]
pub struct ConfigState {
    pub open: bool,
    /// Side to move applied to the next loaded position
    pub load_color: PieceColor,
    /// Feedback from the last load attempt
    pub note: Option<SharedString>,
    /// Model revision at which the game-over notice was closed
    pub dismissed_at: Option<u64>,
}

/// The main chess board view that observes a GameModel
pub struct ChessBoardView {
    model: Entity<GameModel>,
    layout: BoardLayout,
    config: ConfigState,
    _subscription: Subscription,
}

impl ChessBoardView {
    pub fn new(model: Entity<GameModel>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&model, |_, _, cx| cx.notify());
        Self {
            model,
            layout: BoardLayout::default(),
            config: ConfigState {
                open: false,
                load_color: PieceColor::White,
                note: None,
                dismissed_at: None,
            },
            _subscription,
        }
    }

    pub fn toggle_config(&mut self) {
        self.config.open = !self.config.open;
    }

    pub fn set_load_color(&mut self, color: PieceColor) {
        self.config.load_color = color;
    }

    /// Load a position from text with the selected side to move
    pub fn load_position(&mut self, text: &str, cx: &mut Context<Self>) {
        let color = self.config.load_color;
        let result = self.model.update(cx, |game, cx| {
            let result = game.load_fen(text, color);
            cx.notify();
            result
        });
        self.config.note = match result {
            Ok(_) if text.trim().is_empty() => Some("Clipboard is empty".into()),
            Ok(_) => Some(format!("Loaded, {} to move", color.label()).into()),
            Err(err) => Some(err.to_string().into()),
        };
    }

    pub fn new_game(&mut self, cx: &mut Context<Self>) {
        self.config.note = None;
        self.model.update(cx, |game, cx| {
            game.reset();
            cx.notify();
        });
    }
}

impl Render for ChessBoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let view = cx.entity().clone();
        let view_measure = view.clone();
        let model_down = self.model.clone();
        let layout = self.layout;

        let game = self.model.read(cx);
        let render = game.render();
        let revision = game.revision();
        let square_size = layout.square_size();
        let piece_size = layout.piece_size();
        let board_total_size = layout.board_total_size();

        let board = div()
            .flex_shrink_0()
            .flex()
            .flex_col()
            .w(px(board_total_size))
            .h(px(board_total_size))
            .overflow_hidden()
            .rounded_md()
            .children(render.rows().map(|row| {
                div()
                    .flex()
                    .flex_shrink_0()
                    .children(row.iter().map(|cell| render_square(cell, square_size, piece_size)))
            }));

        let cells = render.clone();
        let board_panel_content = div()
            .id("board-panel")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(rgb(PANEL_BG))
            .p(px(BOARD_PADDING))
            .child(board)
            // Clicks are hit-tested against the layout and dispatched to
            // the logical square behind the cell
            .on_mouse_down(
                MouseButton::Left,
                move |ev: &MouseDownEvent, _window, cx| {
                    let pos = ev.position;
                    let Some(visual) = layout.pos_to_square(pos.x.into(), pos.y.into()) else {
                        return;
                    };
                    let Some(square) = cells.dispatch(visual) else {
                        return;
                    };
                    model_down.update(cx, |game, cx| {
                        let outcome = game.click(square);
                        debug!(%square, ?outcome, "board click");
                        if outcome != ClickOutcome::Ignored {
                            cx.notify();
                        }
                    });
                },
            );

        // Canvas to measure actual panel size
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                view_measure.update(cx, |this, cx| {
                    let measured =
                        BoardLayout::new(bounds.size.width.into(), bounds.size.height.into());
                    if this.layout != measured {
                        this.layout = measured;
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        let board_panel_with_measure = div()
            .relative()
            .size_full()
            .child(measure_canvas)
            .child(board_panel_content);

        let side_panel = render_side_panel(&view, &self.model, &render, &self.config);

        let promotion_overlay = render
            .promotion
            .clone()
            .map(|prompt| render_promotion_prompt(prompt, self.model.clone()));
        let game_over_overlay = render
            .game_over
            .filter(|_| self.config.dismissed_at != Some(revision))
            .map(|message| render_game_over(message, revision, view.clone()));

        div()
            .relative()
            .size_full()
            .child(
                h_resizable("chess-layout")
                    .child(
                        resizable_panel()
                            .size(px(INITIAL_LEFT_PANEL))
                            .size_range(px(320.)..px(1400.))
                            .child(board_panel_with_measure),
                    )
                    .child(
                        resizable_panel()
                            .size(px(INITIAL_RIGHT_PANEL))
                            .size_range(px(200.)..Pixels::MAX)
                            .child(side_panel),
                    ),
            )
            .when_some(promotion_overlay, |el, overlay| el.child(overlay))
            .when_some(game_over_overlay, |el, overlay| el.child(overlay))
    }
}

/// Full-window backdrop holding a centered dialog
fn modal(id: &'static str, dialog: impl IntoElement) -> impl IntoElement {
    div()
        .id(id)
        .absolute()
        .top_0()
        .left_0()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .bg(gpui::rgba((OVERLAY_BG << 8) | 0x99))
        // swallow clicks so the board stays inert behind the dialog
        .on_mouse_down(MouseButton::Left, |_, _, cx| cx.stop_propagation())
        .child(
            div()
                .flex()
                .flex_col()
                .items_center()
                .gap_3()
                .p_6()
                .rounded_md()
                .bg(rgb(CONFIG_BG))
                .border_1()
                .border_color(rgb(BORDER_COLOR))
                .text_color(rgb(TEXT_PRIMARY))
                .child(dialog),
        )
}

fn render_promotion_prompt(prompt: PromotionPrompt, model: Entity<GameModel>) -> impl IntoElement {
    let choices = prompt.choices.into_iter().map(|piece| {
        let model = model.clone();
        Button::new(SharedString::from(format!("promote-{}", piece.label())))
            .label(format!("{} {}", piece.kind().symbol(), piece.label()))
            .primary()
            .on_click(move |_, _, cx| resolve(&model, Some(piece), cx))
    });

    let model_cancel = model.clone();
    modal(
        "promotion-modal",
        div()
            .flex()
            .flex_col()
            .items_center()
            .gap_3()
            .child(format!(
                "Promote pawn on {} to:",
                prompt.pending.to
            ))
            .child(div().flex().gap_2().children(choices))
            .child(
                Button::new("promote-cancel")
                    .label("Cancel")
                    .danger()
                    .compact()
                    .on_click(move |_, _, cx| resolve(&model_cancel, None, cx)),
            ),
    )
}

fn resolve(model: &Entity<GameModel>, choice: Option<PromotionPiece>, cx: &mut gpui::App) {
    model.update(cx, |game, cx| {
        let outcome = game.resolve_promotion(choice);
        if let ClickOutcome::MoveAttempted { accepted: false, .. } = outcome {
            warn!(?choice, "promotion move was rejected");
        }
        cx.notify();
    });
}

fn render_game_over(
    message: &'static str,
    revision: u64,
    view: Entity<ChessBoardView>,
) -> impl IntoElement {
    let view_close = view.clone();
    modal(
        "game-over-modal",
        div()
            .flex()
            .flex_col()
            .items_center()
            .gap_3()
            .child(div().text_xl().child(message))
            .child(
                div()
                    .flex()
                    .gap_2()
                    .child(
                        Button::new("game-over-new-game")
                            .label("New Game")
                            .primary()
                            .on_click(move |_, _, cx| {
                                view.update(cx, |this, cx| {
                                    this.new_game(cx);
                                    cx.notify();
                                });
                            }),
                    )
                    .child(
                        Button::new("game-over-close")
                            .label("Close")
                            .compact()
                            .on_click(move |_, _, cx| {
                                view_close.update(cx, |this, cx| {
                                    this.config.dismissed_at = Some(revision);
                                    cx.notify();
                                });
                            }),
                    ),
            ),
    )
}
