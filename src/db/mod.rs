//! Database module — embedded SurrealDB

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use repository::{RepoError, RepoResult};

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the embedded database at `path` and ensure the schema exists
    pub async fn new(path: &str) -> RepoResult<Self> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to open database: {e}")))?;
        db.use_ns("maitred").use_db("bookings").await?;

        Self::define_schema(&db).await?;
        tracing::info!("Database ready at {path}");

        Ok(Self { db })
    }

    /// Table and index definitions. Documents stay schemaless; bookings are
    /// looked up by their shared event-group id.
    async fn define_schema(db: &Surreal<Db>) -> RepoResult<()> {
        db.query("DEFINE TABLE IF NOT EXISTS waiter SCHEMALESS")
            .await?
            .check()?;
        db.query("DEFINE TABLE IF NOT EXISTS booking SCHEMALESS")
            .await?
            .check()?;
        db.query("DEFINE INDEX IF NOT EXISTS booking_event_idx ON booking FIELDS event_id")
            .await?
            .check()?;
        Ok(())
    }
}
