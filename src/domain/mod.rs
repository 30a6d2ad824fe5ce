pub mod chess;
pub mod coords;
pub mod rules;
pub mod shakmaty_engine;

pub use chess::{
    LogicalSquare, Piece, PieceColor, PieceKind, PromotionPiece, VisualSquare, from_square,
    shakmaty_to_piece, to_square,
};
pub use coords::{Perspective, to_logical, to_visual};
pub use rules::{EngineError, RulesEngine};
pub use shakmaty_engine::{STARTING_PLACEMENT, ShakmatyEngine};
