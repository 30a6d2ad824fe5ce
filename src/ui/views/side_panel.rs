//! Side panel - turn indicator, configuration and the New Game control.

use gpui::{Div, Entity, div, prelude::*, px, rgb};
use gpui_component::button::{Button, ButtonVariants};

use crate::domain::PieceColor;
use crate::models::GameModel;
use crate::ui::theme::{
    BOARD_PADDING, BORDER_COLOR, CONFIG_BG, PANEL_BG, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::ui::view_models::BoardRender;
use crate::ui::views::{ChessBoardView, ConfigState};

/// Render the side panel for the board view.
pub fn render_side_panel(
    view: &Entity<ChessBoardView>,
    model: &Entity<GameModel>,
    render: &BoardRender,
    config: &ConfigState,
) -> Div {
    let view_toggle = view.clone();
    let view_new_game = view.clone();

    let header = div()
        .flex()
        .items_center()
        .justify_between()
        .p_4()
        .pb_2()
        .border_b_1()
        .border_color(rgb(BORDER_COLOR))
        .child(
            div()
                .text_color(rgb(TEXT_PRIMARY))
                .text_xl()
                .child(render.turn_label.clone()),
        )
        .child(
            Button::new("toggle-config")
                .label(if config.open { "Close" } else { "Configure" })
                .compact()
                .on_click(move |_, _, cx| {
                    view_toggle.update(cx, |this, cx| {
                        this.toggle_config();
                        cx.notify();
                    });
                }),
        );

    let content = div()
        .id("side-panel-scroll")
        .flex_1()
        .overflow_y_scroll()
        .p_4()
        .pt_2()
        .flex()
        .flex_col()
        .gap_3()
        .when(config.open, |el| {
            el.child(render_config_section(view, model, render, config))
        });

    let footer = div()
        .flex()
        .items_center()
        .justify_center()
        .p_3()
        .border_t_1()
        .border_color(rgb(BORDER_COLOR))
        .child(
            Button::new("new-game")
                .label("New Game")
                .primary()
                .on_click(move |_, _, cx| {
                    view_new_game.update(cx, |this, cx| {
                        this.new_game(cx);
                        cx.notify();
                    });
                }),
        );

    div()
        .size_full()
        .flex()
        .flex_col()
        .bg(rgb(PANEL_BG))
        .p(px(BOARD_PADDING))
        .child(
            div()
                .flex_1()
                .flex()
                .flex_col()
                .bg(rgb(CONFIG_BG))
                .border_1()
                .border_color(rgb(BORDER_COLOR))
                .rounded_md()
                .overflow_hidden()
                .child(header)
                .child(content)
                .child(footer),
        )
}

fn render_config_section(
    view: &Entity<ChessBoardView>,
    model: &Entity<GameModel>,
    render: &BoardRender,
    config: &ConfigState,
) -> impl IntoElement {
    let view_load = view.clone();
    let model_rotate = model.clone();

    let color_buttons = [PieceColor::White, PieceColor::Black].map(|color| {
        let view = view.clone();
        let button = Button::new(color.label())
            .label(color.label())
            .compact()
            .on_click(move |_, _, cx| {
                view.update(cx, |this, cx| {
                    this.set_load_color(color);
                    cx.notify();
                });
            });
        if config.load_color == color {
            button.primary()
        } else {
            button
        }
    });

    div()
        .flex()
        .flex_col()
        .gap_2()
        .text_color(rgb(TEXT_PRIMARY))
        .child(div().text_color(rgb(TEXT_SECONDARY)).child("Side to move"))
        .child(div().flex().gap_2().children(color_buttons))
        .child(
            Button::new("load-fen")
                .label("Load FEN from clipboard")
                .on_click(move |_, _, cx| {
                    let text = cx
                        .read_from_clipboard()
                        .and_then(|item| item.text())
                        .unwrap_or_default();
                    view_load.update(cx, |this, cx| {
                        this.load_position(&text, cx);
                        cx.notify();
                    });
                }),
        )
        .when_some(config.note.clone(), |el, note| {
            el.child(div().text_sm().text_color(rgb(TEXT_SECONDARY)).child(note))
        })
        .child(
            Button::new("auto-rotate")
                .label(if render.auto_rotate {
                    "Auto-rotate: On"
                } else {
                    "Auto-rotate: Off"
                })
                .compact()
                .on_click(move |_, _, cx| {
                    model_rotate.update(cx, |game, cx| {
                        game.set_auto_rotate(!game.auto_rotate());
                        cx.notify();
                    });
                }),
        )
}
