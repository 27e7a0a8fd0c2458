//! Location rows.
//!
//! Locations are never updated or expired. `search_query` is unique, so two
//! racing misses for the same query settle on whichever row landed first.

use super::connection::Store;
use crate::Error;
use crate::model::{Location, NewLocation};
use tokio_rusqlite::{params, rusqlite};

const SELECT_BY_QUERY: &str = "SELECT search_query, formatted_query, latitude, longitude, id
     FROM locations WHERE search_query = ?1 ORDER BY id LIMIT 1";

const SELECT_BY_ID: &str = "SELECT search_query, formatted_query, latitude, longitude, id
     FROM locations WHERE id = ?1";

fn row_to_location(row: &rusqlite::Row<'_>) -> rusqlite::Result<Location> {
    Ok(Location {
        search_query: row.get(0)?,
        formatted_query: row.get(1)?,
        latitude: row.get(2)?,
        longitude: row.get(3)?,
        id: row.get(4)?,
    })
}

impl Store {
    /// Get the location cached under `search_query`.
    ///
    /// Returns None if the query has never been geocoded.
    pub async fn find_location(&self, search_query: &str) -> Result<Option<Location>, Error> {
        let search_query = search_query.to_string();
        self.conn
            .call(move |conn| -> Result<Option<Location>, Error> {
                let mut stmt = conn.prepare(SELECT_BY_QUERY)?;

                match stmt.query_row(params![search_query], row_to_location) {
                    Ok(location) => Ok(Some(location)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Get a location by its generated id.
    pub async fn location_by_id(&self, id: i64) -> Result<Option<Location>, Error> {
        self.conn
            .call(move |conn| -> Result<Option<Location>, Error> {
                match conn.query_row(SELECT_BY_ID, params![id], row_to_location) {
                    Ok(location) => Ok(Some(location)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert a location and return it with its generated id.
    ///
    /// If a row for the same `search_query` already exists, nothing is
    /// written and the existing row is returned.
    pub async fn insert_location(&self, location: &NewLocation) -> Result<Location, Error> {
        let location = location.clone();
        self.conn
            .call(move |conn| -> Result<Location, Error> {
                let inserted = conn.execute(
                    "INSERT INTO locations (search_query, formatted_query, latitude, longitude)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(search_query) DO NOTHING",
                    params![&location.search_query, &location.formatted_query, location.latitude, location.longitude],
                )?;

                if inserted == 1 {
                    return Ok(location.with_id(conn.last_insert_rowid()));
                }

                tracing::debug!(search_query = %location.search_query, "location already stored by a concurrent miss");
                conn.query_row(SELECT_BY_QUERY, params![&location.search_query], row_to_location)
                    .map_err(Error::from)
            })
            .await
            .map_err(Error::from)
    }
}
