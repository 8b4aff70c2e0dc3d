//! Pointer and keyboard interaction.
//!
//! [`InteractionController`] turns raw input events into scene mutations.
//! It runs a two-state drag machine:
//!
//! - `Idle`: pointer-down selects and tries to start a drag. On a hit the
//!   controller moves to `Dragging`.
//! - `Dragging`: pointer-move drags, pointer-up drops and returns to `Idle`.
//!   Further pointer-downs are ignored until then.
//!
//! Rotation (context menu or `R`) and deletion (`Delete`) work in either state.
//!
//! Hosts attach their pointer-move/pointer-up listeners only while
//! [`InteractionController::is_tracking`] is true.

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::geometry::Point;
use crate::manager::MatchesManager;
use crate::storage::KeyValueStore;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Keyboard bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    RotateSelected,
    DeleteSelected,
}

impl KeyCommand {
    /// Maps a `KeyboardEvent.key` value to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "r" | "R" => Some(Self::RotateSelected),
            "Delete" => Some(Self::DeleteSelected),
            _ => None,
        }
    }
}

/// What the host should do with the input event after it was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// The controller acted on the event.
    pub handled: bool,
    /// The platform default (e.g. the context menu) must be suppressed.
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const IGNORED: EventOutcome = EventOutcome {
        handled: false,
        prevent_default: false,
    };

    pub const fn handled(handled: bool) -> Self {
        Self {
            handled,
            prevent_default: false,
        }
    }

    pub const fn suppress(handled: bool) -> Self {
        Self {
            handled,
            prevent_default: true,
        }
    }
}

/// Routes input events to a [`MatchesManager`].
#[derive(Debug)]
pub struct InteractionController<S> {
    manager: MatchesManager<S>,
    state: DragState,
}

impl<S: Surface> InteractionController<S> {
    pub fn new(surface: S, config: SceneConfig) -> Self {
        Self::with_manager(MatchesManager::new(surface, config))
    }

    pub fn with_manager(manager: MatchesManager<S>) -> Self {
        Self {
            manager,
            state: DragState::Idle,
        }
    }

    pub fn manager(&self) -> &MatchesManager<S> {
        &self.manager
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// True while a drag session needs pointer-move/pointer-up events.
    pub fn is_tracking(&self) -> bool {
        self.state == DragState::Dragging
    }

    pub fn pointer_down(&mut self, point: Point) -> EventOutcome {
        if self.state == DragState::Dragging {
            return EventOutcome::IGNORED;
        }
        let selected = self.manager.select_match_at(point);
        if self.manager.begin_drag(point) {
            tracing::debug!(x = point.x, y = point.y, "drag started");
            self.state = DragState::Dragging;
        }
        EventOutcome::handled(selected)
    }

    pub fn pointer_move(&mut self, point: Point) -> EventOutcome {
        if self.state != DragState::Dragging {
            return EventOutcome::IGNORED;
        }
        EventOutcome::handled(self.manager.update_drag(point))
    }

    pub fn pointer_up(&mut self) -> EventOutcome {
        if self.state != DragState::Dragging {
            return EventOutcome::IGNORED;
        }
        let dropped = self.manager.end_drag();
        self.state = DragState::Idle;
        tracing::debug!("drag ended");
        EventOutcome::handled(dropped)
    }

    /// Secondary click: rotates the selection and always suppresses the
    /// platform menu.
    pub fn context_menu(&mut self) -> EventOutcome {
        EventOutcome::suppress(self.manager.rotate_selected())
    }

    pub fn key_down(&mut self, key: &str) -> EventOutcome {
        match KeyCommand::from_key(key) {
            Some(command) => self.command(command),
            None => EventOutcome::IGNORED,
        }
    }

    /// Runs a bound keyboard command.
    pub fn command(&mut self, command: KeyCommand) -> EventOutcome {
        let handled = match command {
            KeyCommand::RotateSelected => self.manager.rotate_selected(),
            KeyCommand::DeleteSelected => {
                let removed = self.manager.delete_selected().is_some();
                self.sync_drag_state();
                removed
            }
        };
        if handled {
            EventOutcome::suppress(true)
        } else {
            EventOutcome::IGNORED
        }
    }

    pub fn add_matches(&mut self, count: usize) -> usize {
        self.manager.add_matches(count)
    }

    pub fn clear(&mut self) {
        self.manager.clear();
        self.state = DragState::Idle;
    }

    pub fn save<K: KeyValueStore + ?Sized>(&self, store: &mut K) -> Result<usize, SceneError> {
        self.manager.save(store)
    }

    pub fn load<K: KeyValueStore + ?Sized>(&mut self, store: &K) -> Result<bool, SceneError> {
        let loaded = self.manager.load(store)?;
        self.sync_drag_state();
        Ok(loaded)
    }

    /// Repaints the whole scene, e.g. after the host recreated its surface.
    pub fn redraw(&mut self) {
        self.manager.redraw();
    }

    fn sync_drag_state(&mut self) {
        if self.manager.dragged().is_none() {
            self.state = DragState::Idle;
        }
    }
}
