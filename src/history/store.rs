use super::snapshot::Snapshot;
use tracing::{debug, trace};

pub const CAPACITY: usize = 10;

/// Result of stepping back through history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Undo {
    Snapshot(Snapshot),
    /// No recorded state is active any more; the host restores its defaults.
    Baseline,
}

/// Result of stepping forward through history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redo {
    Snapshot(Snapshot),
    /// Already at the newest entry; the caller must not apply anything.
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Current {
    Snapshot(Snapshot),
    Baseline,
}

/// Bounded snapshot stack addressed by a cursor.
///
/// `cursor == None` is the baseline: no recorded change is active. Otherwise
/// the cursor indexes the entry the host is currently showing. Entries after
/// the cursor form the redo branch.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: Vec<Snapshot>,
    cursor: Option<usize>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            cursor: None,
            capacity,
        }
    }

    /// Records a snapshot as the newest state, dropping the redo branch and
    /// evicting the oldest entries beyond capacity.
    pub fn push(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        if keep < self.entries.len() {
            debug!(discarded = self.entries.len() - keep, "truncated redo branch");
            self.entries.truncate(keep);
        }

        self.entries.push(snapshot);

        if self.entries.len() > self.capacity {
            let overflow = self.entries.len() - self.capacity;
            self.entries.drain(..overflow);
            debug!(evicted = overflow, "history at capacity");
        }

        self.cursor = Some(self.entries.len() - 1);
        debug!(%snapshot, len = self.entries.len(), "pushed snapshot");
        self.check_invariants();
    }

    pub fn undo(&mut self) -> Undo {
        let result = match self.cursor {
            Some(0) => {
                self.cursor = None;
                Undo::Baseline
            }
            Some(c) => {
                self.cursor = Some(c - 1);
                Undo::Snapshot(self.entries[c - 1])
            }
            None => Undo::Baseline,
        };
        trace!(cursor = ?self.cursor, ?result, "undo");
        self.check_invariants();
        result
    }

    pub fn redo(&mut self) -> Redo {
        let next = self.cursor.map_or(0, |c| c + 1);
        let result = match self.entries.get(next) {
            Some(snapshot) => {
                self.cursor = Some(next);
                Redo::Snapshot(*snapshot)
            }
            None => Redo::Nothing,
        };
        trace!(cursor = ?self.cursor, ?result, "redo");
        self.check_invariants();
        result
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!(dropped = self.entries.len(), "cleared history");
        }
        self.entries.clear();
        self.cursor = None;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |c| c + 1) < self.entries.len()
    }

    pub fn current(&self) -> Current {
        match self.cursor {
            Some(c) => Current::Snapshot(self.entries[c]),
            None => Current::Baseline,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn check_invariants(&self) {
        debug_assert!(self.entries.len() <= self.capacity);
        debug_assert!(self.cursor.is_none_or(|c| c < self.entries.len()));
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::snapshot::Preset;
    use proptest::prelude::*;

    fn state(n: i32) -> Snapshot {
        Snapshot::new(n, 0, 128, Preset::Auto)
    }

    #[test]
    fn test_new_store_is_at_baseline() {
        let store = HistoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.cursor(), None);
        assert_eq!(store.current(), Current::Baseline);
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_push_moves_cursor_to_top() {
        let mut store = HistoryStore::new();
        store.push(state(1));
        store.push(state(2));
        assert_eq!(store.cursor(), Some(1));
        assert_eq!(store.current(), Current::Snapshot(state(2)));
        assert!(store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_push_does_not_filter_duplicates() {
        let mut store = HistoryStore::new();
        store.push(state(1));
        store.push(state(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_undo_redo_scenario() {
        let mut store = HistoryStore::new();
        let first = Snapshot::new(1, 0, 128, Preset::Auto);
        let second = Snapshot::new(1, 5, 128, Preset::Auto);
        store.push(first);
        store.push(second);

        assert_eq!(store.undo(), Undo::Snapshot(first));
        assert!(store.can_redo());
        assert_eq!(store.redo(), Redo::Snapshot(second));
        assert!(!store.can_redo());
    }

    #[test]
    fn test_undo_from_first_entry_reaches_baseline() {
        let mut store = HistoryStore::new();
        store.push(state(1));
        assert!(store.can_undo());

        assert_eq!(store.undo(), Undo::Baseline);
        assert_eq!(store.cursor(), None);
        assert!(!store.can_undo());
        assert!(store.can_redo());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_undo_at_baseline_is_idempotent() {
        let mut store = HistoryStore::new();
        store.push(state(1));
        store.undo();

        for _ in 0..5 {
            assert_eq!(store.undo(), Undo::Baseline);
            assert_eq!(store.cursor(), None);
            assert_eq!(store.len(), 1);
        }
    }

    #[test]
    fn test_undo_on_empty_store() {
        let mut store = HistoryStore::new();
        assert_eq!(store.undo(), Undo::Baseline);
        assert_eq!(store.cursor(), None);
    }

    #[test]
    fn test_redo_from_baseline_returns_first_entry() {
        let mut store = HistoryStore::new();
        store.push(state(1));
        store.undo();
        assert_eq!(store.redo(), Redo::Snapshot(state(1)));
        assert_eq!(store.cursor(), Some(0));
    }

    #[test]
    fn test_redo_at_top_does_nothing() {
        let mut store = HistoryStore::new();
        assert_eq!(store.redo(), Redo::Nothing);

        store.push(state(1));
        assert_eq!(store.redo(), Redo::Nothing);
        assert_eq!(store.cursor(), Some(0));
    }

    #[test]
    fn test_push_after_undo_truncates_branch() {
        let mut store = HistoryStore::new();
        let (a, b, c, d) = (state(1), state(2), state(3), state(4));
        store.push(a);
        store.push(b);
        store.push(c);

        store.undo();
        store.undo();
        assert_eq!(store.current(), Current::Snapshot(a));

        store.push(d);
        assert_eq!(store.entries(), &[a, d]);
        assert_eq!(store.cursor(), Some(1));
        assert!(!store.can_redo());
    }

    #[test]
    fn test_push_from_baseline_discards_everything() {
        let mut store = HistoryStore::new();
        store.push(state(1));
        store.push(state(2));
        store.undo();
        store.undo();

        store.push(state(9));
        assert_eq!(store.entries(), &[state(9)]);
        assert_eq!(store.cursor(), Some(0));
    }

    #[test]
    fn test_capacity_eviction() {
        let mut store = HistoryStore::new();
        for n in 0..15 {
            store.push(state(n));
        }

        let expected: Vec<Snapshot> = (5..15).map(state).collect();
        assert_eq!(store.entries(), expected.as_slice());
        assert_eq!(store.cursor(), Some(9));

        for n in (5..14).rev() {
            assert_eq!(store.undo(), Undo::Snapshot(state(n)));
        }
        assert_eq!(store.current(), Current::Snapshot(state(5)));
        assert_eq!(store.undo(), Undo::Baseline);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = HistoryStore::new();
        store.push(state(1));
        store.push(state(2));
        store.undo();

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.cursor(), None);
        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert_eq!(store.redo(), Redo::Nothing);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut store = HistoryStore::with_capacity(0);
        store.push(state(1));
        store.push(state(2));
        assert_eq!(store.entries(), &[state(2)]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(i8),
        Undo,
        Redo,
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (-100i8..=100).prop_map(Op::Push),
            3 => Just(Op::Undo),
            3 => Just(Op::Redo),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_bounds_hold_for_any_sequence(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut store = HistoryStore::new();
            for op in ops {
                match op {
                    Op::Push(b) => store.push(state(b as i32)),
                    Op::Undo => { store.undo(); }
                    Op::Redo => { store.redo(); }
                    Op::Clear => store.clear(),
                }
                prop_assert!(store.len() <= CAPACITY);
                if let Some(c) = store.cursor() {
                    prop_assert!(c < store.len());
                }
                prop_assert_eq!(store.can_undo(), store.cursor().is_some());
            }
        }

        #[test]
        fn prop_undo_then_redo_returns_pushed(values in prop::collection::vec(-100i8..=100, 1..30)) {
            let mut store = HistoryStore::new();
            for v in &values {
                store.push(state(*v as i32));
            }
            let top = state(*values.last().unwrap() as i32);

            store.undo();
            prop_assert_eq!(store.redo(), Redo::Snapshot(top));
            prop_assert!(!store.can_redo());
        }

        #[test]
        fn prop_undo_at_rest_never_changes_state(pushes in 0usize..20, extra in 1usize..10) {
            let mut store = HistoryStore::new();
            for n in 0..pushes {
                store.push(state(n as i32));
            }
            while store.can_undo() {
                store.undo();
            }
            let len = store.len();
            for _ in 0..extra {
                prop_assert_eq!(store.undo(), Undo::Baseline);
                prop_assert_eq!(store.cursor(), None);
                prop_assert_eq!(store.len(), len);
            }
        }
    }
}
