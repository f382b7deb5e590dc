//! Graph database driver abstraction.
//!
//! Defines the [`GraphStore`] and [`WriteSession`] traits the importer is
//! written against, plus the Neo4j implementation. Tests substitute an
//! in-memory implementation to exercise the import protocol without a
//! running server.

pub mod neo4j;

use crate::errors::Result;
use crate::ops::UpsertOp;

/// A transactional graph store that can open write sessions.
#[allow(async_fn_in_trait)]
pub trait GraphStore: Send + Sync {
    type Session: WriteSession;

    /// Open a session that carries causal ordering across its transactions.
    async fn open_session(&self) -> Result<Self::Session>;

    /// Open a session with no causal-ordering token, so the server imposes
    /// no bookmark precondition on its first transaction. Used only for the
    /// single compensating retry after a coordination fault.
    async fn open_fresh_session(&self) -> Result<Self::Session>;

    /// Health check — verify connectivity to the database.
    async fn ping(&self) -> Result<()>;

    /// Close the connection pool.
    async fn close(&self) -> Result<()>;
}

/// One logical session. Each [`WriteSession::run_write`] call is a single
/// write transaction; transactions on the same session observe the effects
/// of their predecessors.
#[allow(async_fn_in_trait)]
pub trait WriteSession {
    /// Execute `op` as one write transaction.
    async fn run_write(&mut self, op: &UpsertOp) -> Result<()>;

    /// Release the session.
    async fn close(self) -> Result<()>;
}
