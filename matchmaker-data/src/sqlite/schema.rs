//! Database schema.

/// Statements creating the tables the store reads and writes.
///
/// Every statement is idempotent, so the schema is applied on each open.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS neighborhoods (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    city TEXT NOT NULL,
    lat  REAL NOT NULL,
    lon  REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS neighborhoods_by_city ON neighborhoods (city);
CREATE INDEX IF NOT EXISTS neighborhoods_by_name ON neighborhoods (name);

CREATE TABLE IF NOT EXISTS neighborhood_amenities (
    neighborhood_id INTEGER NOT NULL
        REFERENCES neighborhoods (id) ON DELETE CASCADE,
    kind            TEXT NOT NULL,
    count           INTEGER NOT NULL CHECK (count >= 0),
    PRIMARY KEY (neighborhood_id, kind)
);
";

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rusqlite::Connection;

    #[rstest]
    fn schema_applies_twice() {
        let connection = Connection::open_in_memory().expect("open in-memory database");
        connection.execute_batch(SCHEMA).expect("first apply");
        connection.execute_batch(SCHEMA).expect("second apply");
        let tables: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .expect("count tables");
        assert_eq!(tables, 2);
    }
}
