use anyhow::{Context, Result};
use gpui::{App, Application};
use tracing::error;
use tracing_subscriber::EnvFilter;

use chess_board::app;
use chess_board::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::load().context("loading settings")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Application::new().run(move |cx: &mut App| {
        if let Err(err) = app::run(cx, settings) {
            error!("failed to start: {err:#}");
            cx.quit();
        }
    });
    Ok(())
}
