//! Game state model - the interaction controller between the board view and
//! the rules engine.
//!
//! The model owns the engine and every piece of UI-facing state: the current
//! selection, a move paused on a promotion prompt, the derived game status
//! and the interaction lock that follows a finished game.

use tracing::{debug, info, warn};

use crate::domain::{
    EngineError, LogicalSquare, Perspective, PieceColor, PromotionPiece, RulesEngine,
    STARTING_PLACEMENT, ShakmatyEngine,
};
use crate::models::pipeline::{self, GameStatus};
use crate::models::promotion::{self, PendingPromotion, PromotionResolution};
use crate::models::selection::{ClickIntent, Selection};
use crate::ui::display::render_board;
use crate::ui::view_models::BoardRender;

/// What a click (or a promotion answer) did
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClickOutcome {
    /// Nothing changed
    Ignored,
    Selected(LogicalSquare),
    Deselected,
    /// The move is paused until [`GameModel::resolve_promotion`] is called
    PromotionRequired(PendingPromotion),
    PromotionCancelled,
    MoveAttempted { accepted: bool, status: GameStatus },
}

/// The main game model containing all chess game state
pub struct GameModel<E: RulesEngine = ShakmatyEngine> {
    engine: E,
    selection: Selection,
    pending_promotion: Option<PendingPromotion>,
    status: GameStatus,
    /// Set once the game is decided; clicks are ignored until reset or load
    game_ended: bool,
    auto_rotate: bool,
    /// Bumped on every state change so hosts know when to repaint
    revision: u64,
}

impl GameModel<ShakmatyEngine> {
    pub fn new() -> Self {
        Self::with_engine(ShakmatyEngine::new())
    }
}

impl Default for GameModel<ShakmatyEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RulesEngine> GameModel<E> {
    /// Wrap an engine that already holds a position and compute its derived state
    pub fn with_engine(mut engine: E) -> Self {
        let status = pipeline::run(&mut engine);
        Self {
            engine,
            selection: Selection::Idle,
            pending_promotion: None,
            status,
            game_ended: status.is_over(),
            auto_rotate: false,
            revision: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_ended(&self) -> bool {
        self.game_ended
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        if self.auto_rotate != enabled {
            self.auto_rotate = enabled;
            self.touch();
        }
    }

    /// Side to move, from the engine's move counter
    pub fn turn(&self) -> PieceColor {
        PieceColor::from_move_count(self.engine.move_count())
    }

    pub fn perspective(&self) -> Perspective {
        Perspective::for_turn(self.auto_rotate, self.turn())
    }

    pub fn turn_label(&self) -> String {
        if self.game_ended {
            "Game Over".to_string()
        } else {
            format!("{}'s Turn", self.turn().label())
        }
    }

    pub fn game_over_message(&self) -> Option<&'static str> {
        self.status.message()
    }

    /// Legal destinations of the selected piece, for move hints
    pub fn legal_targets(&self) -> Vec<LogicalSquare> {
        self.selection
            .selected()
            .map(|square| self.engine.legal_destinations(square))
            .unwrap_or_default()
    }

    /// Snapshot of the board for the view
    pub fn render(&self) -> BoardRender {
        render_board(self)
    }

    /// Handle a click on a logical square
    pub fn click(&mut self, square: LogicalSquare) -> ClickOutcome {
        if self.game_ended || self.pending_promotion.is_some() {
            return ClickOutcome::Ignored;
        }

        let intent = self
            .selection
            .interpret(square, self.engine.piece_at(square), self.turn());

        match intent {
            ClickIntent::Ignore => ClickOutcome::Ignored,
            ClickIntent::Select(square) => {
                self.selection.select(square);
                self.touch();
                ClickOutcome::Selected(square)
            }
            ClickIntent::Deselect => {
                self.selection.clear();
                self.touch();
                ClickOutcome::Deselected
            }
            ClickIntent::AttemptMove { from, to } => {
                let moving = self.engine.piece_at(from);
                match promotion::pending_for(moving, from, to) {
                    Some(pending) => {
                        debug!(%from, %to, "awaiting promotion choice");
                        self.pending_promotion = Some(pending);
                        self.touch();
                        ClickOutcome::PromotionRequired(pending)
                    }
                    None => self.finish_move(from, to, PromotionPiece::default()),
                }
            }
        }
    }

    /// Resume a move paused on a promotion prompt. `None` cancels the move.
    pub fn resolve_promotion(&mut self, choice: Option<PromotionPiece>) -> ClickOutcome {
        let Some(pending) = self.pending_promotion.take() else {
            return ClickOutcome::Ignored;
        };

        match promotion::resolve(choice) {
            PromotionResolution::Continue(piece) => self.finish_move(pending.from, pending.to, piece),
            PromotionResolution::Abort => {
                debug!(from = %pending.from, to = %pending.to, "promotion cancelled");
                self.selection.clear();
                self.touch();
                ClickOutcome::PromotionCancelled
            }
        }
    }

    /// Start a new game from the standard position
    pub fn reset(&mut self) -> GameStatus {
        self.engine.clear_board();
        self.engine.set_move_count(0);
        if let Err(err) = self.engine.load_position(STARTING_PLACEMENT, PieceColor::White) {
            warn!(%err, "engine rejected the starting position");
        }
        info!("new game");
        self.reinitialize()
    }

    /// Load a position with an explicit side to move. Blank input does nothing.
    ///
    /// A rejected position still leaves the model reinitialised around
    /// whatever the engine holds after clearing; the error is returned so the
    /// host can tell the user.
    pub fn load_fen(&mut self, text: &str, active: PieceColor) -> Result<GameStatus, EngineError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(self.status);
        }

        self.engine.clear_board();
        let loaded = self.engine.load_position(text, active);
        let status = self.reinitialize();
        match loaded {
            Ok(()) => {
                info!(fen = text, active = active.label(), ?status, "position loaded");
                Ok(status)
            }
            Err(err) => {
                warn!(%err, "position rejected");
                Err(err)
            }
        }
    }

    fn finish_move(
        &mut self,
        from: LogicalSquare,
        to: LogicalSquare,
        piece: PromotionPiece,
    ) -> ClickOutcome {
        let report = pipeline::submit_move(&mut self.engine, from, to, piece);
        self.selection.clear();
        self.apply_status(report.status);
        self.touch();
        ClickOutcome::MoveAttempted {
            accepted: report.accepted,
            status: report.status,
        }
    }

    fn reinitialize(&mut self) -> GameStatus {
        self.selection.clear();
        self.pending_promotion = None;
        self.game_ended = false;
        let status = pipeline::run(&mut self.engine);
        self.apply_status(status);
        self.touch();
        status
    }

    fn apply_status(&mut self, status: GameStatus) {
        self.status = status;
        if status.is_over() {
            self.game_ended = true;
            info!(?status, "game over");
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
