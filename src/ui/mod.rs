pub mod board_layout;
pub mod display;
pub mod theme;
pub mod view_models;

#[cfg(feature = "gui")]
pub mod components;
#[cfg(feature = "gui")]
pub mod views;

pub use board_layout::BoardLayout;
pub use view_models::{BoardRender, PromotionPrompt, RenderedSquare};
