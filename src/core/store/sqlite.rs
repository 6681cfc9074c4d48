use std::{path::Path, str::FromStr};

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::{debug, info};

use crate::{
    error::BoardError,
    models::{LatLng, Marker},
};

use super::MarkerStore;

/// Marker store kept in a local sqlite database, for working without the
/// backend.
#[derive(Debug, Clone)]
pub struct SqliteMarkerStore {
    pool: SqlitePool,
}

impl SqliteMarkerStore {
    pub async fn open<P: AsRef<Path>>(db_file: P) -> Result<Self, BoardError> {
        let connect_opts = SqliteConnectOptions::new()
            .filename(db_file.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_opts)
            .await?;
        info!(path = ?db_file.as_ref(), "opened local marker store");
        Self::migrated(pool).await
    }

    /// A private database that lives as long as the store.
    pub async fn in_memory() -> Result<Self, BoardError> {
        let connect_opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // every in-memory connection is its own database, so keep exactly one alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_opts)
            .await?;
        Self::migrated(pool).await
    }

    async fn migrated(pool: SqlitePool) -> Result<Self, BoardError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn count(&self) -> Result<u64, BoardError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM marker")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl MarkerStore for SqliteMarkerStore {
    async fn list(&self) -> Result<Vec<Marker>, BoardError> {
        let rows: Vec<(f64, f64, String)> =
            sqlx::query_as("SELECT lat, lng, content FROM marker ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(lat, lng, content)| Marker::new(LatLng::new(lat, lng), content))
            .collect())
    }

    async fn create(&self, marker: &Marker) -> Result<(), BoardError> {
        debug!(position = %marker.position, "storing marker locally");
        sqlx::query("INSERT INTO marker (lat, lng, content) VALUES ($1, $2, $3)")
            .bind(marker.position.lat)
            .bind(marker.position.lng)
            .bind(&marker.content)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), BoardError> {
        let result = sqlx::query("DELETE FROM marker")
            .execute(&self.pool)
            .await?;
        info!(deleted = result.rows_affected(), "cleared local markers");
        Ok(())
    }
}
