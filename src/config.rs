//! Connection configuration loaded from environment variables.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Neo4j connection parameters.
///
/// Connection parameters are configuration, not part of the import
/// contract: the importer itself only sees a connected store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Neo4j connection URI (e.g. `bolt://localhost:7687`). Env: `NEO4J_URI`.
    #[validate(length(min = 1))]
    pub neo4j_uri: String,

    /// Neo4j username. Env: `NEO4J_USER`, default `neo4j`.
    pub neo4j_user: String,

    /// Neo4j password. Env: `NEO4J_PASSWORD`, required.
    #[validate(length(min = 1))]
    pub neo4j_password: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` first (non-fatal if `.env` is absent),
    /// then reads each variable from the process environment. The required
    /// `NEO4J_PASSWORD` returns a [`crate::ImportError::Validation`] error
    /// when absent or empty.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let neo4j_uri =
            std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string());

        let neo4j_user = std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());

        let neo4j_password = std::env::var("NEO4J_PASSWORD").map_err(|_| {
            crate::ImportError::Validation("NEO4J_PASSWORD is required".to_string())
        })?;

        let config = Self {
            neo4j_uri,
            neo4j_user,
            neo4j_password,
        };

        config
            .validate()
            .map_err(|e| crate::ImportError::Validation(e.to_string()))?;

        Ok(config)
    }
}
