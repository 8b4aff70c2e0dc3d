//! Matchstick Board Core Library
//!
//! Scene model and interaction state machine for arranging match rectangles
//! on a 2D drawing surface.
//!
//! The drawing surface ([`Surface`]) and the durable storage ([`KeyValueStore`])
//! are traits so the same scene logic runs in the browser client and in native
//! tests.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod manager;
pub mod matches;
pub mod record;
pub mod storage;
pub mod surface;

pub use config::{DragMode, RotatedLoad, SceneConfig};
pub use controller::{DragState, EventOutcome, InteractionController, KeyCommand};
pub use error::{SceneError, StorageError};
pub use geometry::{Point, Size};
pub use manager::MatchesManager;
pub use matches::{DEFAULT_MATCH_SIZE, Match, MatchStyle};
pub use record::MatchRecord;
pub use storage::{KeyValueStore, MemoryStore};
pub use surface::{DrawCommand, RecordingSurface, Surface};
