//! Persisted scene format.
//!
//! A saved scene is a JSON array with one object per match in z-order:
//!
//! ```json
//! [{ "x": 500, "y": 250, "w": 10, "h": 150, "r": false }]
//! ```
//!
//! `w` and `h` are the current, possibly swapped, dimensions and `r` is the
//! rotated flag.

use serde::{Deserialize, Serialize};

use crate::config::RotatedLoad;
use crate::error::SceneError;
use crate::geometry::{Point, Size};
use crate::matches::Match;

/// One saved match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub r: bool,
}

impl MatchRecord {
    pub fn from_match(m: &Match) -> Self {
        let position = m.position();
        let size = m.size();
        Self {
            x: position.x,
            y: position.y,
            w: size.width,
            h: size.height,
            r: m.is_rotated(),
        }
    }

    /// Rebuilds the match this record describes.
    pub fn restore(&self, mode: RotatedLoad) -> Result<Match, SceneError> {
        let saved = Size::new(self.w, self.h);
        let assigned = match mode {
            RotatedLoad::Restore if self.r => saved.swapped(),
            RotatedLoad::Restore | RotatedLoad::Legacy => saved,
        };

        let mut m = Match::new(Point::new(self.x, self.y), assigned)?;
        if self.r {
            m.rotate();
        }
        Ok(m)
    }

    /// Encodes records as a JSON array.
    pub fn encode_all(records: &[MatchRecord]) -> Result<String, SceneError> {
        serde_json::to_string(records).map_err(SceneError::Encode)
    }

    /// Decodes a JSON array of records, rejecting non-positive sizes.
    pub fn decode_all(json: &str) -> Result<Vec<MatchRecord>, SceneError> {
        let records: Vec<MatchRecord> = serde_json::from_str(json).map_err(SceneError::Decode)?;
        if let Some(bad) = records.iter().find(|r| !Size::new(r.w, r.h).is_valid()) {
            return Err(SceneError::InvalidSize {
                width: bad.w,
                height: bad.h,
            });
        }
        Ok(records)
    }
}
