//! UI Components for the matchstick-board client.

mod board_canvas;
mod toolbar;

pub use board_canvas::BoardCanvas;
pub use toolbar::Toolbar;
