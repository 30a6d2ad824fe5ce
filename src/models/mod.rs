pub mod game;
pub mod pipeline;
pub mod promotion;
pub mod selection;
#[cfg(test)]
pub mod testing;

pub use game::{ClickOutcome, GameModel};
pub use pipeline::{GameStatus, MoveReport};
pub use promotion::{PendingPromotion, PromotionResolution};
pub use selection::{ClickIntent, Selection};
