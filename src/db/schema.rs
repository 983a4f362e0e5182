//! Database schema
//!
//! The database holds a single key-value table. Collections are stored as
//! whole JSON arrays, so there is nothing to migrate beyond creating it.

use rusqlite::Connection;

use super::connection::DbResult;

/// Create the key-value table if it does not exist yet
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;
    Ok(())
}

/// Number of keys currently stored
pub fn key_count(conn: &Connection) -> DbResult<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_schema_is_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        assert_eq!(key_count(&conn).unwrap(), 0);
    }
}
