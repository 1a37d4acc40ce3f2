//! The store itself.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use matchmaker_core::{
    AmenityCounts, AmenityKind, AmenityStore, Coordinate, CoordinateError, DirectoryError,
    Neighborhood, NeighborhoodDirectory, NeighborhoodId, ParseAmenityKindError, StoreError,
};
use rusqlite::{Connection, params};
use thiserror::Error;

use super::schema::SCHEMA;

const SELECT_NEIGHBORHOODS: &str = "SELECT id, name, city, lat, lon FROM neighborhoods";

/// Error raised by [`SqliteNeighborhoodStore`].
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored row held coordinates outside the valid range.
    #[error("neighborhood {id} has an invalid location: {source}")]
    InvalidLocation {
        /// Offending neighborhood.
        id: NeighborhoodId,
        /// Validation failure.
        #[source]
        source: CoordinateError,
    },
    /// A cached amenity row named an unknown kind.
    #[error("neighborhood {id} has an unreadable amenity row: {source}")]
    UnknownAmenityKind {
        /// Offending neighborhood.
        id: NeighborhoodId,
        /// Parse failure.
        #[source]
        source: ParseAmenityKindError,
    },
    /// The blocking task running the query did not complete.
    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    /// Generic SQLite error.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl SqliteStoreError {
    fn into_directory_error(self, operation: &'static str) -> DirectoryError {
        match self {
            Self::InvalidLocation { id, source } => DirectoryError::InvalidLocation { id, source },
            other => DirectoryError::Query {
                operation,
                message: other.to_string(),
            },
        }
    }
}

/// Neighborhood directory and amenity cache over one SQLite connection.
///
/// Clones share the connection. Queries run on the blocking thread pool.
#[derive(Clone)]
pub struct SqliteNeighborhoodStore {
    connection: Arc<Mutex<Connection>>,
}

impl fmt::Debug for SqliteNeighborhoodStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteNeighborhoodStore")
            .finish_non_exhaustive()
    }
}

impl SqliteNeighborhoodStore {
    /// Open or create the database at `path` and apply the schema.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError::OpenDatabase`] when the file cannot be
    /// opened, or a database error when the schema cannot be applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqliteStoreError> {
        let location = path.as_ref();
        let connection =
            Connection::open(location).map_err(|source| SqliteStoreError::OpenDatabase {
                path: location.to_path_buf(),
                source,
            })?;
        Self::from_connection(connection)
    }

    /// Create a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns a database error when the schema cannot be applied.
    pub fn open_in_memory() -> Result<Self, SqliteStoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> Result<Self, SqliteStoreError> {
        connection.execute_batch(SCHEMA)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Insert or replace `neighborhood`, including any cached amenity counts.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub async fn insert_neighborhood(
        &self,
        neighborhood: &Neighborhood,
    ) -> Result<(), SqliteStoreError> {
        let record = neighborhood.clone();
        self.with_connection(move |connection| {
            let tx = connection.transaction()?;
            tx.execute(
                "INSERT INTO neighborhoods (id, name, city, lat, lon)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (id) DO UPDATE SET
                     name = excluded.name,
                     city = excluded.city,
                     lat = excluded.lat,
                     lon = excluded.lon",
                params![
                    record.id,
                    record.name,
                    record.city,
                    record.location.lat(),
                    record.location.lon()
                ],
            )?;
            if let Some(counts) = &record.amenities {
                write_counts(&tx, record.id, counts)?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
    }

    /// Names of every stored neighborhood ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn neighborhood_names(&self) -> Result<Vec<String>, SqliteStoreError> {
        self.with_connection(|connection| {
            let mut statement = connection.prepare("SELECT name FROM neighborhoods ORDER BY id")?;
            let names = statement
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(names)
        })
        .await
    }

    async fn with_connection<T, F>(&self, work: F) -> Result<T, SqliteStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, SqliteStoreError> + Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        tokio::task::spawn_blocking(move || {
            let mut guard = connection.lock().unwrap_or_else(PoisonError::into_inner);
            work(&mut guard)
        })
        .await?
    }
}

struct NeighborhoodRow {
    id: NeighborhoodId,
    name: String,
    city: String,
    lat: f64,
    lon: f64,
}

impl NeighborhoodRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            city: row.get(2)?,
            lat: row.get(3)?,
            lon: row.get(4)?,
        })
    }

    fn load(self, connection: &Connection) -> Result<Neighborhood, SqliteStoreError> {
        let location =
            Coordinate::new(self.lat, self.lon).map_err(|source| SqliteStoreError::InvalidLocation {
                id: self.id,
                source,
            })?;
        let cached = read_counts(connection, self.id)?;
        let neighborhood = Neighborhood::new(self.id, self.name, self.city, location);
        Ok(if cached.is_empty() {
            neighborhood
        } else {
            neighborhood.with_amenities(cached)
        })
    }
}

fn select_neighborhoods(
    connection: &Connection,
    filter: &str,
    value: &str,
) -> Result<Vec<Neighborhood>, SqliteStoreError> {
    let sql = format!("{SELECT_NEIGHBORHOODS} WHERE {filter} = ?1 ORDER BY id");
    let mut statement = connection.prepare_cached(&sql)?;
    let rows = statement
        .query_map([value], NeighborhoodRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(|row| row.load(connection)).collect()
}

fn read_counts(
    connection: &Connection,
    id: NeighborhoodId,
) -> Result<AmenityCounts, SqliteStoreError> {
    let mut statement = connection.prepare_cached(
        "SELECT kind, count FROM neighborhood_amenities WHERE neighborhood_id = ?1",
    )?;
    let rows = statement
        .query_map([id], |row| Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter()
        .map(|(name, count)| {
            let kind = name
                .parse::<AmenityKind>()
                .map_err(|source| SqliteStoreError::UnknownAmenityKind { id, source })?;
            Ok((kind, count))
        })
        .collect()
}

fn write_counts(
    connection: &Connection,
    id: NeighborhoodId,
    counts: &AmenityCounts,
) -> Result<(), SqliteStoreError> {
    let mut statement = connection.prepare_cached(
        "INSERT INTO neighborhood_amenities (neighborhood_id, kind, count)
         VALUES (?1, ?2, ?3)
         ON CONFLICT (neighborhood_id, kind) DO UPDATE SET count = excluded.count",
    )?;
    for (kind, count) in counts.iter() {
        statement.execute(params![id, kind.as_str(), count])?;
    }
    Ok(())
}

#[async_trait]
impl NeighborhoodDirectory for SqliteNeighborhoodStore {
    async fn list_by_city(&self, city: &str) -> Result<Vec<Neighborhood>, DirectoryError> {
        let wanted = city.to_owned();
        self.with_connection(move |connection| select_neighborhoods(connection, "city", &wanted))
            .await
            .map_err(|err| err.into_directory_error("list_by_city"))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Neighborhood>, DirectoryError> {
        let wanted = name.to_owned();
        self.with_connection(move |connection| {
            let matches = select_neighborhoods(connection, "name", &wanted)?;
            Ok(matches.into_iter().next())
        })
        .await
        .map_err(|err| err.into_directory_error("find_by_name"))
    }
}

#[async_trait]
impl AmenityStore for SqliteNeighborhoodStore {
    async fn persist(
        &self,
        neighborhood: NeighborhoodId,
        counts: &AmenityCounts,
    ) -> Result<(), StoreError> {
        let snapshot = counts.clone();
        self.with_connection(move |connection| {
            let tx = connection.transaction()?;
            write_counts(&tx, neighborhood, &snapshot)?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(|err| StoreError::Write {
            neighborhood,
            message: err.to_string(),
        })
    }
}
