//! Undo/redo history over full snapshots.
//!
//! Each recorded mutation stores a deep copy of the annotation set. A cursor
//! points at the snapshot matching the live state; undo and redo move the
//! cursor and hand back the snapshot to restore.

use crate::constants::MAX_HISTORY;

/// Configuration for the history
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of snapshots to keep
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_HISTORY,
        }
    }
}

/// Bounded snapshot history with a cursor.
///
/// Invariant: when non-empty, `cursor < snapshots.len()` and
/// `snapshots.len() <= max_depth`.
#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: Vec<T>,
    cursor: usize,
    config: HistoryConfig,
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::with_config(HistoryConfig::default())
    }
}

impl<T: Clone> History<T> {
    /// Create a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration. A depth of zero is raised to one so
    /// the current state always has a snapshot.
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            config: HistoryConfig {
                max_depth: config.max_depth.max(1),
            },
        }
    }

    /// Drop everything and start over from a single snapshot.
    pub fn reset(&mut self, initial: T) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
        log::debug!("History reset");
    }

    /// Record a snapshot of the state after a mutation.
    ///
    /// Snapshots past the cursor (the redo branch) are discarded. When the
    /// depth limit is exceeded the oldest snapshot goes first.
    pub fn record(&mut self, snapshot: T) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push(snapshot);

        let overflow = self.snapshots.len().saturating_sub(self.config.max_depth);
        if overflow > 0 {
            self.snapshots.drain(..overflow);
        }
        self.cursor = self.snapshots.len() - 1;

        log::debug!(
            "History: recorded snapshot {}/{}",
            self.cursor + 1,
            self.snapshots.len()
        );
    }

    /// Step back one snapshot. Returns the snapshot to restore, or `None` at
    /// the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("⏪ Undo to snapshot {}", self.cursor + 1);
        self.snapshots.get(self.cursor)
    }

    /// Step forward one snapshot. Returns the snapshot to restore, or `None`
    /// at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("⏩ Redo to snapshot {}", self.cursor + 1);
        self.snapshots.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> Option<&T> {
        self.snapshots.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.config.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_basic() {
        let mut history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());

        history.reset(0);
        history.record(1);
        history.record(2);
        assert_eq!(history.cursor(), 2);
        assert!(history.can_undo());

        assert_eq!(history.undo(), Some(&1));
        assert_eq!(history.undo(), Some(&0));
        assert_eq!(history.undo(), None);
        assert_eq!(history.cursor(), 0);

        assert_eq!(history.redo(), Some(&1));
        assert_eq!(history.redo(), Some(&2));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_record_clears_redo_branch() {
        let mut history = History::new();
        history.reset("a");
        history.record("b");
        history.undo();
        assert!(history.can_redo());

        history.record("c");
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(&"c"));
    }

    #[test]
    fn test_max_depth() {
        let mut history = History::with_config(HistoryConfig { max_depth: 3 });
        history.reset(0);
        for i in 1..=5 {
            history.record(i);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.undo(), Some(&4));
        assert_eq!(history.undo(), Some(&3));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_record_into_empty_history() {
        let mut history = History::new();
        history.record(7);
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current(), Some(&7));
    }
}
