//! Application setup and window creation.

use anyhow::Result;
use gpui::{App, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;
use tracing::{info, warn};

use crate::models::GameModel;
use crate::settings::Settings;
use crate::ui::views::ChessBoardView;

/// Build the game model described by the settings
pub fn initial_model(settings: &Settings) -> GameModel {
    let mut model = GameModel::new();
    model.set_auto_rotate(settings.auto_rotate);
    if let Err(err) = model.load_fen(&settings.start_fen, settings.start_color.into()) {
        warn!(%err, "configured start position rejected, starting a new game");
        model.reset();
    }
    model
}

/// Initialize and run the chess application
pub fn run(cx: &mut App, settings: Settings) -> Result<()> {
    gpui_component::init(cx);

    let model = cx.new(|_| initial_model(&settings));

    let bounds = Bounds::centered(
        None,
        size(px(settings.window_width), px(settings.window_height)),
        cx,
    );
    cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| ChessBoardView::new(model, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    )?;
    info!("window opened");
    Ok(())
}
