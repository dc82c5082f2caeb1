use super::snapshot::Snapshot;
use super::store::{Current, HistoryStore};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Recorded,
    Unchanged,
}

/// Decides whether a settled host state is a new change worth recording.
///
/// The decision is a plain value comparison against whatever the store
/// considers current (or the baseline at the sentinel). A restore leaves
/// the host showing exactly that value, so the settle it triggers compares
/// equal and is dropped no matter when it arrives.
#[derive(Debug, Clone)]
pub struct ChangeCapture {
    baseline: Snapshot,
}

impl ChangeCapture {
    pub fn new(baseline: Snapshot) -> Self {
        Self { baseline }
    }

    pub fn baseline(&self) -> Snapshot {
        self.baseline
    }

    pub fn set_baseline(&mut self, baseline: Snapshot) {
        self.baseline = baseline;
    }

    pub fn on_settled(&self, store: &mut HistoryStore, state: Snapshot) -> Capture {
        let target = match store.current() {
            Current::Snapshot(snapshot) => snapshot,
            Current::Baseline => self.baseline,
        };

        if state == target {
            trace!(%state, "settled state matches current entry");
            return Capture::Unchanged;
        }

        debug!(from = %target, to = %state, "capturing settled change");
        store.push(state);
        Capture::Recorded
    }
}
