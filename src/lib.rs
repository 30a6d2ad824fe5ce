//! Interactive chess board controller: maps clicks on a rendered board to
//! moves on a rules engine and keeps the view in sync with the game state.

pub mod domain;
pub mod models;
pub mod settings;
pub mod ui;

#[cfg(feature = "gui")]
pub mod app;
