use crate::models::Tile;

use super::grid::GridGenerator;

/// Tracks the tile path of the current drag gesture
#[derive(Debug, Clone, Default)]
pub struct PathTracker {
    path: Vec<Tile>,
    dragging: bool,
}

impl PathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[Tile] {
        &self.path
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The word spelled by the current path
    pub fn current_word(&self) -> String {
        self.path.iter().map(|tile| tile.letter).collect()
    }

    /// Begin a new path at `tile`. Callers only invoke this while a game is running.
    pub fn start(&mut self, tile: Tile) {
        self.dragging = true;
        self.path = vec![tile];
    }

    /// Extend the path with `tile` if it is unused and adjacent to the last tile.
    /// Returns whether the path grew.
    pub fn extend(&mut self, tile: Tile) -> bool {
        if !self.dragging || self.path.iter().any(|t| t.id == tile.id) {
            return false;
        }

        match self.path.last() {
            Some(last) if GridGenerator::are_adjacent(last, &tile) => {
                self.path.push(tile);
                true
            }
            _ => false,
        }
    }

    /// Finish the gesture. Returns the spelled word when there is one to submit;
    /// the path is cleared either way.
    pub fn finish(&mut self) -> Option<String> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;

        let word = (!self.path.is_empty()).then(|| self.current_word());
        self.path.clear();
        word
    }

    /// Drop any in-progress gesture without submitting
    pub fn reset(&mut self) {
        self.dragging = false;
        self.path.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_spells_word() {
        let mut tracker = PathTracker::new();
        tracker.start(Tile::new(0, 0, 'C'));
        assert!(tracker.extend(Tile::new(0, 1, 'A')));
        assert!(tracker.extend(Tile::new(1, 2, 'T')));

        assert_eq!(tracker.current_word(), "CAT");
        assert_eq!(tracker.finish().as_deref(), Some("CAT"));
        assert!(tracker.path().is_empty());
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_non_adjacent_and_repeated_tiles_ignored() {
        let mut tracker = PathTracker::new();
        tracker.start(Tile::new(2, 2, 'A'));

        assert!(!tracker.extend(Tile::new(4, 4, 'B')));
        assert!(!tracker.extend(Tile::new(2, 2, 'A')));
        assert!(tracker.extend(Tile::new(3, 3, 'C')));
        // Back onto the first tile is a repeat even though it is adjacent
        assert!(!tracker.extend(Tile::new(2, 2, 'A')));

        assert_eq!(tracker.path().len(), 2);
    }

    #[test]
    fn test_idle_tracker_is_noop() {
        let mut tracker = PathTracker::new();
        assert!(!tracker.extend(Tile::new(0, 0, 'A')));
        assert_eq!(tracker.finish(), None);
    }

    #[test]
    fn test_reset_discards_path() {
        let mut tracker = PathTracker::new();
        tracker.start(Tile::new(0, 0, 'A'));
        tracker.reset();
        assert_eq!(tracker.finish(), None);
    }
}
