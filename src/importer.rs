//! Import orchestration.
//!
//! Sequences the whole run: ensure the root node once, then issue the six
//! per-record upserts in a fixed order, each as its own retried write
//! transaction. The first fatal fault aborts the rest of the run;
//! already-committed upserts stay in the graph, so re-running the whole
//! import after a fix is safe.

use tracing::info;

use crate::driver::{GraphStore, WriteSession};
use crate::errors::{is_coordination_fault, Result};
use crate::ops::UpsertOp;
use crate::records::SubjectRecord;
use crate::retry::retry_once_if;

/// Single-writer, single-pass importer over a [`GraphStore`].
pub struct Importer<S: GraphStore> {
    store: S,
}

impl<S: GraphStore> Importer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one full import. Opens a single session for the whole run and
    /// closes it whether the run completes or fails.
    pub async fn import(&self, records: &[SubjectRecord]) -> Result<()> {
        let mut session = self.store.open_session().await?;
        let outcome = self.run(&mut session, records).await;
        let closed = session.close().await;
        outcome.and(closed)
    }

    async fn run(&self, session: &mut S::Session, records: &[SubjectRecord]) -> Result<()> {
        self.apply(session, &UpsertOp::EnsureMain).await?;

        for record in records {
            for op in UpsertOp::for_record(record) {
                self.apply(session, &op).await?;
            }
        }

        info!(records = records.len(), "import complete");
        Ok(())
    }

    /// One write transaction, retried once on a fresh session if the
    /// server rejects the session's bookmark. The fresh session exists only
    /// for the retried attempt; subsequent operations continue on the
    /// original session.
    async fn apply(&self, session: &mut S::Session, op: &UpsertOp) -> Result<()> {
        retry_once_if(
            || session.run_write(op),
            is_coordination_fault,
            || self.retry_on_fresh_session(op),
        )
        .await
    }

    async fn retry_on_fresh_session(&self, op: &UpsertOp) -> Result<()> {
        let mut fresh = self.store.open_fresh_session().await?;
        let outcome = fresh.run_write(op).await;
        let _ = fresh.close().await;
        outcome
    }
}
