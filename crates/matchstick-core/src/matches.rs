//! Match entity: a draggable, rotatable rectangle with a drawn head.

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::geometry::{Point, Size};
use crate::surface::Surface;

/// Default match dimensions in surface pixels.
pub const DEFAULT_MATCH_SIZE: Size = Size::new(10.0, 150.0);

/// The head strip is this fraction (1/n) of the match length.
pub const HEAD_FRACTION: f64 = 12.0;

/// Colours and line width used when painting matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchStyle {
    pub fill: String,
    pub stroke: String,
    pub selected_stroke: String,
    pub head: String,
    pub line_width: f64,
}

impl Default for MatchStyle {
    fn default() -> Self {
        Self {
            fill: "yellow".to_string(),
            stroke: "black".to_string(),
            selected_stroke: "red".to_string(),
            head: "brown".to_string(),
            line_width: 1.0,
        }
    }
}

/// A single match in the scene.
///
/// `size` always holds the current orientation: rotating swaps width and
/// height, so there is no separate angle. Selection and drag flags are only
/// mutated by [`MatchesManager`](crate::MatchesManager), which keeps at most
/// one match selected and at most one dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    position: Point,
    size: Size,
    rotated: bool,
    selected: bool,
    dragged: bool,
    drag_offset: Point,
}

impl Match {
    /// Creates an unrotated match with its top-left corner at `position`.
    pub fn new(position: Point, size: Size) -> Result<Self, SceneError> {
        if !size.is_valid() {
            return Err(SceneError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        Ok(Self::new_unchecked(position, size))
    }

    /// Caller guarantees `size` is valid.
    pub(crate) fn new_unchecked(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            rotated: false,
            selected: false,
            dragged: false,
            drag_offset: Point::ORIGIN,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Current bounding box, already swapped when rotated.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Dimensions in the unrotated orientation.
    pub fn base_size(&self) -> Size {
        if self.rotated {
            self.size.swapped()
        } else {
            self.size
        }
    }

    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_dragged(&self) -> bool {
        self.dragged
    }

    /// Pointer-to-origin offset captured at drag start; origin when idle.
    pub fn drag_offset(&self) -> Point {
        self.drag_offset
    }

    /// Toggles the orientation and swaps width and height.
    pub fn rotate(&mut self) {
        self.rotated = !self.rotated;
        self.size = self.size.swapped();
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.size.width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.height
    }

    /// Paints the body, its outline and the head strip.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, style: &MatchStyle) {
        let Point { x, y } = self.position;
        let Size { width, height } = self.size;

        surface.set_fill_style(&style.fill);
        surface.fill_rect(x, y, width, height);
        surface.set_line_width(style.line_width);
        surface.set_stroke_style(if self.selected {
            &style.selected_stroke
        } else {
            &style.stroke
        });
        surface.stroke_rect(x, y, width, height);

        let head = self.head_size();
        surface.set_fill_style(&style.head);
        surface.fill_rect(x, y, head.width, head.height);
    }

    /// Head strip anchored at `position`, spanning the short side.
    fn head_size(&self) -> Size {
        if self.rotated {
            Size::new(self.size.width / HEAD_FRACTION, self.size.height)
        } else {
            Size::new(self.size.width, self.size.height / HEAD_FRACTION)
        }
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn start_drag(&mut self, grab: Point) {
        self.drag_offset = grab - self.position;
        self.dragged = true;
    }

    pub(crate) fn stop_drag(&mut self) {
        self.drag_offset = Point::ORIGIN;
        self.dragged = false;
    }

    pub(crate) fn move_to(&mut self, position: Point) {
        self.position = position;
    }
}
