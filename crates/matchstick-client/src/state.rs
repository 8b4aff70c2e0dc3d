//! Shared board state for the components.

use std::cell::RefCell;
use std::rc::Rc;

use matchstick_core::{InteractionController, Surface};

use crate::surface::CanvasSurface;

/// Interaction controller bound to the page canvas.
pub type Board = InteractionController<CanvasSurface>;

/// Shared handle to the board, empty until the canvas has mounted.
///
/// Components borrow the board only for the duration of one event handler.
#[derive(Clone, Default)]
pub struct BoardHandle(Rc<RefCell<Option<Board>>>);

impl PartialEq for BoardHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl BoardHandle {
    /// Installs a freshly created board, replacing any previous one.
    pub fn attach(&self, board: Board) {
        *self.0.borrow_mut() = Some(board);
    }

    /// Runs `f` on the board. Returns `None` while no canvas is mounted.
    pub fn with<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R> {
        self.0.borrow_mut().as_mut().map(f)
    }

    pub fn status(&self) -> BoardStatus {
        self.0
            .borrow()
            .as_ref()
            .map(BoardStatus::of)
            .unwrap_or_default()
    }
}

/// Snapshot of the board shown in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardStatus {
    pub count: usize,
    /// Z-order index of the selected match.
    pub selected: Option<usize>,
    pub selected_rotated: bool,
    pub dragging: bool,
}

impl BoardStatus {
    pub fn of<S: Surface>(board: &InteractionController<S>) -> Self {
        let manager = board.manager();
        Self {
            count: manager.len(),
            selected: manager.selected_index(),
            selected_rotated: manager.selected().is_some_and(|m| m.is_rotated()),
            dragging: board.is_tracking(),
        }
    }

    /// Human-readable one-line summary.
    pub fn summary(&self) -> String {
        let noun = if self.count == 1 { "match" } else { "matches" };
        match self.selected {
            Some(index) => format!(
                "{} {noun} - #{} selected{}",
                self.count,
                index + 1,
                if self.selected_rotated { " (rotated)" } else { "" }
            ),
            None => format!("{} {noun}", self.count),
        }
    }
}
