use super::snapshot::Snapshot;
use super::store::{HistoryStore, Redo, Undo};
use anyhow::Result;
use tracing::info;

/// Host side of a restore. Each call must replace all four live values in
/// one step.
pub trait RestoreTarget {
    fn apply_baseline(&mut self) -> Result<()>;
    fn apply_snapshot(&mut self, snapshot: Snapshot) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restored {
    Snapshot(Snapshot),
    Baseline,
    Nothing,
}

pub struct RestoreCoordinator;

impl RestoreCoordinator {
    /// Steps the store back, then hands the result to the host. A host error
    /// is returned after the cursor has already moved.
    pub fn apply_undo<T: RestoreTarget + ?Sized>(
        store: &mut HistoryStore,
        target: &mut T,
    ) -> Result<Restored> {
        match store.undo() {
            Undo::Baseline => {
                info!("undo to baseline");
                target.apply_baseline()?;
                Ok(Restored::Baseline)
            }
            Undo::Snapshot(snapshot) => {
                info!(%snapshot, "undo");
                target.apply_snapshot(snapshot)?;
                Ok(Restored::Snapshot(snapshot))
            }
        }
    }

    pub fn apply_redo<T: RestoreTarget + ?Sized>(
        store: &mut HistoryStore,
        target: &mut T,
    ) -> Result<Restored> {
        match store.redo() {
            Redo::Nothing => Ok(Restored::Nothing),
            Redo::Snapshot(snapshot) => {
                info!(%snapshot, "redo");
                target.apply_snapshot(snapshot)?;
                Ok(Restored::Snapshot(snapshot))
            }
        }
    }
}
