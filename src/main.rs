use std::path::PathBuf;

use tracing::{error, info};

use syllabus_import::{
    config::Config,
    driver::{neo4j::Neo4jStore, GraphStore},
    importer::Importer,
    records,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Tracing ───────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("syllabus_import=info".parse()?),
        )
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let config = Config::from_env().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;

    let input: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("usage: syllabus-import <records.csv>"))?;

    // ── Records ───────────────────────────────────────────────────────────────
    // The file precondition is checked before any graph activity begins.
    let records = records::read_records(&input).map_err(|e| {
        error!("{}", e);
        e
    })?;

    info!(
        path = %input.display(),
        records = records.len(),
        "input file parsed"
    );

    // ── Import ────────────────────────────────────────────────────────────────
    let store = Neo4jStore::connect(&config).await.map_err(|e| {
        error!("Cannot connect to {}: {}", config.neo4j_uri, e);
        e
    })?;
    store.ping().await?;

    let importer = Importer::new(store);
    let outcome = importer.import(&records).await;
    let _ = importer.store().close().await;

    match outcome {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Import failed: {}", e);
            Err(e.into())
        }
    }
}
