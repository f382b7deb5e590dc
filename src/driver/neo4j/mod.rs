//! Neo4j graph driver implementation.
//!
//! Uses `neo4rs` 0.8 for async, pooled Bolt connections. Each
//! [`WriteSession::run_write`] is one explicit transaction
//! (begin → run → commit).

use neo4rs::{query, Graph};

use crate::config::Config;
use crate::driver::{GraphStore, WriteSession};
use crate::errors::{ImportError, Result};
use crate::ops::UpsertOp;

/// Marker the server embeds in the error text when a session's bookmark is
/// rejected. This is the one fault class the importer retries.
const INVALID_BOOKMARK: &str = "InvalidBookmark";

/// Connection-pooled Neo4j store.
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Connect to the server described by `config`.
    pub async fn connect(config: &Config) -> Result<Self> {
        let graph = Graph::new(
            config.neo4j_uri.as_str(),
            config.neo4j_user.as_str(),
            config.neo4j_password.as_str(),
        )
        .await
        .map_err(classify_driver_error)?;

        Ok(Self { graph })
    }
}

impl GraphStore for Neo4jStore {
    type Session = Neo4jSession;

    async fn open_session(&self) -> Result<Neo4jSession> {
        // `Graph` is a cheap handle onto the shared connection pool; the
        // session's causal ordering is carried by the server per connection.
        Ok(Neo4jSession {
            graph: self.graph.clone(),
        })
    }

    async fn open_fresh_session(&self) -> Result<Neo4jSession> {
        // A fresh session starts with no bookmark: it is simply a session
        // that has run no prior transaction.
        Ok(Neo4jSession {
            graph: self.graph.clone(),
        })
    }

    async fn ping(&self) -> Result<()> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(classify_driver_error)
    }

    async fn close(&self) -> Result<()> {
        // Pooled connections are torn down when the last `Graph` handle
        // drops; there is no explicit shutdown call in neo4rs.
        Ok(())
    }
}

/// A write session over the shared pool.
pub struct Neo4jSession {
    graph: Graph,
}

impl WriteSession for Neo4jSession {
    async fn run_write(&mut self, op: &UpsertOp) -> Result<()> {
        let mut txn = self.graph.start_txn().await.map_err(classify_driver_error)?;

        let mut q = query(op.cypher());
        for (name, value) in op.params() {
            q = q.param(name, value);
        }

        txn.run(q).await.map_err(classify_driver_error)?;
        txn.commit().await.map_err(classify_driver_error)
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}

/// Split driver failures into the retryable coordination fault and
/// everything else. The server names the bookmark rejection in the error
/// text, so classification is a substring match.
fn classify_driver_error(err: neo4rs::Error) -> ImportError {
    let text = err.to_string();
    if is_bookmark_rejection(&text) {
        ImportError::Coordination(text)
    } else {
        ImportError::Driver(text)
    }
}

fn is_bookmark_rejection(text: &str) -> bool {
    text.contains(INVALID_BOOKMARK)
}
