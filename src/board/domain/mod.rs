//! Pure domain logic for the board.

mod drag;
mod projection;

pub use drag::{BoardEntityId, DragOutcome, MoveIntent, classify_drag};
pub use projection::{BoardColumn, BoardView, project_board};
