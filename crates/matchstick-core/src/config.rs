//! Scene configuration.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};
use crate::matches::{DEFAULT_MATCH_SIZE, MatchStyle};

/// Default drawing surface size in pixels.
pub const DEFAULT_SURFACE_SIZE: Size = Size::new(1000.0, 500.0);

/// Offset between consecutively added matches.
pub const DEFAULT_SPAWN_OFFSET: Point = Point::new(5.0, 5.0);

/// Storage key holding the saved scene.
pub const DEFAULT_STORAGE_KEY: &str = "matches";

/// How a dragged match follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// Keep the grab point under the pointer.
    #[default]
    Offset,
    /// Move the match's top-left corner to the pointer.
    Snap,
}

/// How rotated records are rebuilt on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotatedLoad {
    /// Restore the saved dimensions and orientation exactly. Matches the
    /// current save format, which stores the rotated dimensions.
    #[default]
    Restore,
    /// Apply the saved dimensions, then rotate. Use this for saves that
    /// stored the unrotated dimensions next to `r: true`: such a record
    /// comes back horizontal here, but vertical under `Restore`.
    Legacy,
}

/// Scene configuration. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Size of the drawing surface the host should create.
    pub surface: Size,
    /// Dimensions of newly added matches.
    pub match_size: Size,
    pub spawn_offset: Point,
    pub storage_key: String,
    pub drag_mode: DragMode,
    pub rotated_load: RotatedLoad,
    pub style: MatchStyle,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            surface: DEFAULT_SURFACE_SIZE,
            match_size: DEFAULT_MATCH_SIZE,
            spawn_offset: DEFAULT_SPAWN_OFFSET,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            drag_mode: DragMode::default(),
            rotated_load: RotatedLoad::default(),
            style: MatchStyle::default(),
        }
    }
}

impl SceneConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the configuration to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.surface, Size::new(1000.0, 500.0));
        assert_eq!(config.match_size, Size::new(10.0, 150.0));
        assert_eq!(config.spawn_offset, Point::new(5.0, 5.0));
        assert_eq!(config.storage_key, "matches");
        assert_eq!(config.drag_mode, DragMode::Offset);
        assert_eq!(config.rotated_load, RotatedLoad::Restore);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "drag_mode": "snap", "storage_key": "board" }"#;
        let config = SceneConfig::from_json(json).expect("Failed to parse JSON");

        assert_eq!(config.drag_mode, DragMode::Snap);
        assert_eq!(config.storage_key, "board");
        assert_eq!(config.surface, DEFAULT_SURFACE_SIZE);
        assert_eq!(config.style, MatchStyle::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SceneConfig {
            rotated_load: RotatedLoad::Legacy,
            ..SceneConfig::default()
        };
        let json = config.to_json().expect("Failed to serialize");
        let loaded = SceneConfig::from_json(&json).expect("Failed to deserialize");

        assert_eq!(loaded, config);
    }
}
