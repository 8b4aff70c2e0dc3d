//! Scene store: the ordered collection of matches and the surface they are
//! painted on.
//!
//! Order is z-order. Later matches are drawn on top and are hit first. Every
//! mutation ends with a full clear and repaint of the surface.

use crate::config::{DragMode, SceneConfig};
use crate::error::SceneError;
use crate::geometry::Point;
use crate::matches::{DEFAULT_MATCH_SIZE, Match};
use crate::record::MatchRecord;
use crate::storage::KeyValueStore;
use crate::surface::Surface;

/// Owns the matches and is the only writer of their selection/drag flags.
#[derive(Debug)]
pub struct MatchesManager<S> {
    matches: Vec<Match>,
    surface: S,
    config: SceneConfig,
}

impl<S: Surface> MatchesManager<S> {
    /// Creates an empty scene painting onto `surface`.
    ///
    /// An invalid `match_size` in `config` is replaced by the default size.
    pub fn new(surface: S, mut config: SceneConfig) -> Self {
        if !config.match_size.is_valid() {
            tracing::warn!(size = ?config.match_size, "invalid match size, using default");
            config.match_size = DEFAULT_MATCH_SIZE;
        }
        Self {
            matches: Vec::new(),
            surface,
            config,
        }
    }

    /// Matches in z-order, bottom first.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Clears the surface and paints every match in z-order.
    pub fn redraw(&mut self) {
        self.surface.clear();
        for m in &self.matches {
            m.draw(&mut self.surface, &self.config.style);
        }
    }

    /// Appends `count` matches, each offset from the previous last one.
    ///
    /// A count of zero adds one. The first match of an empty scene spawns at
    /// the surface centre. Returns the number of matches added.
    pub fn add_matches(&mut self, count: usize) -> usize {
        let count = count.max(1);
        for _ in 0..count {
            let position = self.spawn_point();
            self.matches
                .push(Match::new_unchecked(position, self.config.match_size));
        }
        tracing::debug!(count, total = self.matches.len(), "added matches");
        self.redraw();
        count
    }

    fn spawn_point(&self) -> Point {
        match self.matches.last() {
            Some(last) => last.position() + self.config.spawn_offset,
            None => self.surface.size().center(),
        }
    }

    /// Index of the topmost match containing `point`.
    pub fn index_at(&self, point: Point) -> Option<usize> {
        self.matches.iter().rposition(|m| m.contains(point))
    }

    /// Topmost match containing `point`.
    pub fn match_at(&self, point: Point) -> Option<&Match> {
        self.index_at(point).map(|index| &self.matches[index])
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.matches.iter().position(Match::is_selected)
    }

    pub fn selected(&self) -> Option<&Match> {
        self.matches.iter().find(|m| m.is_selected())
    }

    pub fn dragged_index(&self) -> Option<usize> {
        self.matches.iter().position(Match::is_dragged)
    }

    pub fn dragged(&self) -> Option<&Match> {
        self.matches.iter().find(|m| m.is_dragged())
    }

    /// Selects the topmost match under `point`.
    ///
    /// Leaves the current selection untouched when nothing is hit. Returns
    /// whether a match was selected.
    pub fn select_match_at(&mut self, point: Point) -> bool {
        let Some(index) = self.index_at(point) else {
            return false;
        };
        for (i, m) in self.matches.iter_mut().enumerate() {
            m.set_selected(i == index);
        }
        self.redraw();
        true
    }

    /// Rotates the selected match. No-op without a selection.
    pub fn rotate_selected(&mut self) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        self.matches[index].rotate();
        tracing::debug!(index, "rotated selected match");
        self.redraw();
        true
    }

    /// Removes the selected match. No-op without a selection.
    ///
    /// Removing a match that is being dragged also ends that drag.
    pub fn delete_selected(&mut self) -> Option<Match> {
        let index = self.selected_index()?;
        let removed = self.matches.remove(index);
        tracing::debug!(index, remaining = self.matches.len(), "deleted selected match");
        self.redraw();
        Some(removed)
    }

    /// Starts dragging the topmost match under `point`, remembering where it
    /// was grabbed. Returns whether a drag started.
    pub fn begin_drag(&mut self, point: Point) -> bool {
        let Some(index) = self.index_at(point) else {
            return false;
        };
        for m in self.matches.iter_mut().filter(|m| m.is_dragged()) {
            m.stop_drag();
        }
        self.matches[index].start_drag(point);
        true
    }

    /// Moves the dragged match to follow `point`. No-op when nothing is
    /// dragged.
    pub fn update_drag(&mut self, point: Point) -> bool {
        let Some(index) = self.dragged_index() else {
            return false;
        };
        let m = &mut self.matches[index];
        let position = match self.config.drag_mode {
            DragMode::Offset => point - m.drag_offset(),
            DragMode::Snap => point,
        };
        m.move_to(position);
        self.redraw();
        true
    }

    /// Drops the dragged match. No-op when nothing is dragged.
    pub fn end_drag(&mut self) -> bool {
        let Some(index) = self.dragged_index() else {
            return false;
        };
        self.matches[index].stop_drag();
        true
    }

    /// Removes every match and clears the surface. Storage is untouched.
    pub fn clear(&mut self) {
        self.matches.clear();
        self.surface.clear();
    }

    /// Writes the scene to `store` under the configured key, replacing any
    /// previous save. Returns the number of matches written.
    pub fn save<K: KeyValueStore + ?Sized>(&self, store: &mut K) -> Result<usize, SceneError> {
        let records: Vec<MatchRecord> = self.matches.iter().map(MatchRecord::from_match).collect();
        let json = MatchRecord::encode_all(&records)?;
        store.set(&self.config.storage_key, &json)?;
        tracing::info!(count = records.len(), key = %self.config.storage_key, "saved scene");
        Ok(records.len())
    }

    /// Replaces the scene with the one saved in `store`.
    ///
    /// Returns `Ok(false)` and leaves the scene alone when nothing is saved.
    /// Saved data is fully decoded before the current scene is cleared, so a
    /// corrupt save leaves the scene unchanged.
    pub fn load<K: KeyValueStore + ?Sized>(&mut self, store: &K) -> Result<bool, SceneError> {
        let Some(json) = store.get(&self.config.storage_key)? else {
            tracing::debug!(key = %self.config.storage_key, "no saved scene");
            return Ok(false);
        };
        let restored = MatchRecord::decode_all(&json)?
            .iter()
            .map(|record| record.restore(self.config.rotated_load))
            .collect::<Result<Vec<_>, _>>()?;

        self.clear();
        self.matches = restored;
        tracing::info!(count = self.matches.len(), key = %self.config.storage_key, "loaded scene");
        self.redraw();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RotatedLoad;
    use crate::error::StorageError;
    use crate::geometry::Size;
    use crate::storage::MemoryStore;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn manager() -> MatchesManager<RecordingSurface> {
        manager_with(SceneConfig::default())
    }

    fn manager_with(config: SceneConfig) -> MatchesManager<RecordingSurface> {
        MatchesManager::new(RecordingSurface::new(config.surface), config)
    }

    fn positions(manager: &MatchesManager<RecordingSurface>) -> Vec<Point> {
        manager.matches().iter().map(Match::position).collect()
    }

    fn selected_count(manager: &MatchesManager<RecordingSurface>) -> usize {
        manager.matches().iter().filter(|m| m.is_selected()).count()
    }

    /// Store whose backend always fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_string(),
                reason: "quota".to_string(),
            })
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "quota".to_string(),
            })
        }
    }

    #[test]
    fn test_add_three_from_center() {
        let mut manager = manager();
        manager.add_matches(3);

        assert_eq!(
            positions(&manager),
            vec![
                Point::new(500.0, 250.0),
                Point::new(505.0, 255.0),
                Point::new(510.0, 260.0)
            ]
        );
        assert!(manager
            .matches()
            .iter()
            .all(|m| m.size() == Size::new(10.0, 150.0)));
    }

    #[test]
    fn test_add_accumulates_across_calls() {
        let mut manager = manager();
        manager.add_matches(2);
        manager.add_matches(1);
        manager.add_matches(4);

        assert_eq!(manager.len(), 7);
        let positions = positions(&manager);
        for pair in positions.windows(2) {
            assert_eq!(pair[1], pair[0] + Point::new(5.0, 5.0));
        }
    }

    #[test]
    fn test_add_zero_adds_one() {
        let mut manager = manager();
        assert_eq!(manager.add_matches(0), 1);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_add_redraws_every_match() {
        let mut manager = manager();
        manager.add_matches(2);

        let frame = manager.surface().last_frame();
        assert_eq!(
            frame[0],
            DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 1000.0,
                height: 500.0
            }
        );
        let bodies = frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeRect { .. }))
            .count();
        assert_eq!(bodies, 2);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut manager = manager();
        manager.add_matches(3);

        // (510, 300) lies inside all three overlapping matches.
        assert_eq!(manager.index_at(Point::new(510.0, 300.0)), Some(2));
        // (507, 300) misses the third, so the second is topmost there.
        assert_eq!(manager.index_at(Point::new(507.0, 300.0)), Some(1));
        // Only the first match covers (501, 251).
        assert_eq!(manager.index_at(Point::new(501.0, 251.0)), Some(0));
        assert!(manager.match_at(Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_select_worked_example() {
        let mut manager = manager();
        manager.add_matches(3);

        assert!(manager.select_match_at(Point::new(512.0, 262.0)));
        let selected = manager.selected().expect("a match is selected");
        assert_eq!(selected.position(), Point::new(510.0, 260.0));

        assert!(manager.rotate_selected());
        let selected = manager.selected().unwrap();
        assert!(selected.is_rotated());
        assert_eq!(selected.size(), Size::new(150.0, 10.0));
    }

    #[test]
    fn test_second_selection_replaces_first() {
        let mut manager = manager();
        manager.add_matches(1);
        manager.add_matches(1);
        // Spread them so they are disjoint.
        assert!(manager.begin_drag(Point::new(506.0, 256.0)));
        manager.update_drag(Point::new(106.0, 56.0));
        manager.end_drag();

        assert!(manager.select_match_at(Point::new(505.0, 300.0)));
        assert!(manager.select_match_at(Point::new(105.0, 100.0)));

        assert_eq!(selected_count(&manager), 1);
        assert_eq!(manager.selected_index(), Some(1));
    }

    #[test]
    fn test_select_miss_keeps_selection() {
        let mut manager = manager();
        manager.add_matches(1);
        manager.select_match_at(Point::new(505.0, 300.0));

        assert!(!manager.select_match_at(Point::new(0.0, 0.0)));
        assert_eq!(manager.selected_index(), Some(0));
    }

    #[test]
    fn test_selected_match_drawn_with_selection_stroke() {
        let mut manager = manager();
        manager.add_matches(1);
        manager.select_match_at(Point::new(505.0, 300.0));

        assert!(manager
            .surface()
            .last_frame()
            .contains(&DrawCommand::StrokeStyle("red".into())));
    }

    #[test]
    fn test_rotate_and_delete_without_selection_are_noops() {
        let mut manager = manager();
        manager.add_matches(3);
        let before = manager.matches().to_vec();

        assert!(!manager.rotate_selected());
        assert!(manager.delete_selected().is_none());
        assert_eq!(manager.matches(), before.as_slice());
    }

    #[test]
    fn test_delete_selected_keeps_order() {
        let mut manager = manager();
        manager.add_matches(3);
        manager.select_match_at(Point::new(506.0, 256.0));
        assert_eq!(manager.selected_index(), Some(1));

        let removed = manager.delete_selected().expect("selection removed");
        assert_eq!(removed.position(), Point::new(505.0, 255.0));
        assert_eq!(
            positions(&manager),
            vec![Point::new(500.0, 250.0), Point::new(510.0, 260.0)]
        );
        assert!(manager.selected().is_none());
    }

    #[test]
    fn test_drag_preserves_grab_offset() {
        let mut manager = manager();
        manager.add_matches(1);

        assert!(manager.begin_drag(Point::new(503.0, 260.0)));
        assert_eq!(manager.dragged().unwrap().drag_offset(), Point::new(3.0, 10.0));

        assert!(manager.update_drag(Point::new(103.0, 60.0)));
        assert_eq!(manager.dragged().unwrap().position(), Point::new(100.0, 50.0));

        assert!(manager.end_drag());
        assert!(manager.dragged().is_none());
        assert_eq!(manager.matches()[0].drag_offset(), Point::ORIGIN);
        assert_eq!(manager.matches()[0].position(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_snap_drag_moves_origin_to_pointer() {
        let mut manager = manager_with(SceneConfig {
            drag_mode: DragMode::Snap,
            ..SceneConfig::default()
        });
        manager.add_matches(1);

        manager.begin_drag(Point::new(503.0, 260.0));
        manager.update_drag(Point::new(103.0, 60.0));

        assert_eq!(manager.matches()[0].position(), Point::new(103.0, 60.0));
    }

    #[test]
    fn test_drag_without_hit_is_noop() {
        let mut manager = manager();
        manager.add_matches(1);

        assert!(!manager.begin_drag(Point::new(0.0, 0.0)));
        assert!(!manager.update_drag(Point::new(50.0, 50.0)));
        assert!(!manager.end_drag());
        assert_eq!(manager.matches()[0].position(), Point::new(500.0, 250.0));
    }

    #[test]
    fn test_single_drag_invariant() {
        let mut manager = manager();
        manager.add_matches(1);
        manager.begin_drag(Point::new(505.0, 300.0));
        manager.update_drag(Point::new(105.0, 100.0));
        manager.add_matches(1);

        // A second begin without an end still leaves one dragged match.
        manager.begin_drag(Point::new(108.0, 100.0));
        let dragged = manager.matches().iter().filter(|m| m.is_dragged()).count();
        assert_eq!(dragged, 1);
        assert_eq!(manager.dragged_index(), Some(1));
    }

    #[test]
    fn test_clear_empties_scene_but_not_storage() {
        let mut manager = manager();
        let mut store = MemoryStore::new();
        manager.add_matches(2);
        manager.save(&mut store).unwrap();

        manager.clear();
        assert!(manager.is_empty());
        assert!(matches!(
            manager.surface().commands().last(),
            Some(DrawCommand::ClearRect { .. })
        ));
        assert!(store.get("matches").unwrap().is_some());
    }

    #[test]
    fn test_save_clear_load_roundtrip() {
        let mut manager = manager();
        let mut store = MemoryStore::new();
        manager.add_matches(3);
        manager.select_match_at(Point::new(512.0, 262.0));
        manager.rotate_selected();
        let saved: Vec<(Point, Size, bool)> = manager
            .matches()
            .iter()
            .map(|m| (m.position(), m.size(), m.is_rotated()))
            .collect();

        assert_eq!(manager.save(&mut store).unwrap(), 3);
        manager.clear();
        assert!(manager.load(&store).unwrap());

        let loaded: Vec<(Point, Size, bool)> = manager
            .matches()
            .iter()
            .map(|m| (m.position(), m.size(), m.is_rotated()))
            .collect();
        assert_eq!(loaded, saved);
        assert!(manager.selected().is_none());
    }

    #[test]
    fn test_legacy_load_swaps_rotated_dimensions_back() {
        let mut manager = manager_with(SceneConfig {
            rotated_load: RotatedLoad::Legacy,
            ..SceneConfig::default()
        });
        let mut store = MemoryStore::new();
        manager.add_matches(2);
        manager.select_match_at(Point::new(506.0, 256.0));
        manager.rotate_selected();
        manager.save(&mut store).unwrap();

        manager.clear();
        manager.load(&store).unwrap();

        let unrotated = &manager.matches()[0];
        assert!(!unrotated.is_rotated());
        assert_eq!(unrotated.size(), Size::new(10.0, 150.0));

        let rotated = &manager.matches()[1];
        assert!(rotated.is_rotated());
        assert_eq!(rotated.size(), Size::new(10.0, 150.0));
    }

    #[test]
    fn test_load_without_save_is_noop() {
        let mut manager = manager();
        manager.add_matches(2);

        assert!(!manager.load(&MemoryStore::new()).unwrap());
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_load_replaces_current_scene() {
        let mut manager = manager();
        let mut store = MemoryStore::new();
        manager.add_matches(1);
        manager.save(&mut store).unwrap();
        manager.add_matches(4);

        manager.load(&store).unwrap();
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_corrupt_save_leaves_scene_untouched() {
        let mut manager = manager();
        let mut store = MemoryStore::new();
        store.set("matches", "{ not a list").unwrap();
        manager.add_matches(2);

        let err = manager.load(&store).unwrap_err();
        assert!(matches!(err, SceneError::Decode(_)));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_storage_failures_surface_as_errors() {
        let mut manager = manager();
        manager.add_matches(1);

        assert!(matches!(
            manager.save(&mut BrokenStore),
            Err(SceneError::Storage(StorageError::Write { .. }))
        ));
        assert!(matches!(
            manager.load(&BrokenStore),
            Err(SceneError::Storage(StorageError::Read { .. }))
        ));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_invalid_match_size_falls_back_to_default() {
        let mut manager = manager_with(SceneConfig {
            match_size: Size::new(-1.0, 0.0),
            ..SceneConfig::default()
        });
        manager.add_matches(1);

        assert_eq!(manager.matches()[0].size(), DEFAULT_MATCH_SIZE);
    }

    #[test]
    fn test_custom_storage_key() {
        let mut manager = manager_with(SceneConfig {
            storage_key: "board".to_string(),
            ..SceneConfig::default()
        });
        let mut store = MemoryStore::new();
        manager.add_matches(1);
        manager.save(&mut store).unwrap();

        assert!(store.get("board").unwrap().is_some());
        assert!(store.get("matches").unwrap().is_none());
    }
}
