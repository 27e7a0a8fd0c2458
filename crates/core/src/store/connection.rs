//! Database connection management with pragma configuration.
//!
//! This module handles opening the SQLite database, applying required pragmas
//! for performance, concurrency (WAL mode) and referential integrity, and
//! running migrations.

use super::migrations;
use crate::Error;
use serde::Serialize;
use std::path::Path;
use tokio_rusqlite::Connection;

const PRAGMAS: &str = "PRAGMA journal_mode=WAL;
     PRAGMA synchronous=NORMAL;
     PRAGMA temp_store=MEMORY;
     PRAGMA foreign_keys=ON;";

/// Store handle shared by every lookup.
///
/// Wraps a tokio-rusqlite Connection that runs database operations
/// on a background thread. Clones share the same connection, so calls from
/// concurrent requests are serialized by that thread.
#[derive(Clone, Debug)]
pub struct Store {
    pub(crate) conn: Connection,
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub locations: u64,
    pub weathers: u64,
    pub restaurants: u64,
}

impl Store {
    /// Open a database at the specified path.
    ///
    /// Creates the file if it doesn't exist, applies pragmas,
    /// and runs any pending migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let conn = Connection::open(path).await.map_err(|e| Error::Database(e.into()))?;
        Self::init(conn).await
    }

    /// Open an in-memory database for testing.
    pub async fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| Error::Database(e.into()))?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self, Error> {
        conn.call(|conn| {
            conn.execute_batch(PRAGMAS)?;
            Ok(())
        })
        .await
        .map_err(Error::Database)?;

        migrations::run(&conn).await?;

        Ok(Self { conn })
    }

    /// Close the underlying connection.
    ///
    /// Other clones of this handle fail with `ConnectionClosed` afterwards.
    pub async fn close(self) -> Result<(), Error> {
        self.conn.close().await.map_err(Error::Database)
    }

    /// Count rows in each table.
    pub async fn counts(&self) -> Result<StoreCounts, Error> {
        self.conn
            .call(|conn| -> Result<StoreCounts, Error> {
                let count = |table: &str| -> Result<u64, Error> {
                    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
                    Ok(n as u64)
                };
                Ok(StoreCounts {
                    locations: count("locations")?,
                    weathers: count("weathers")?,
                    restaurants: count("yelps")?,
                })
            })
            .await
            .map_err(Error::from)
    }
}
