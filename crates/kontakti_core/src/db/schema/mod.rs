//! Contact table schema and its idempotent bootstrap.
//!
//! # Responsibility
//! - Create the `Contacts` table (and its name index) when missing.
//! - Describe the columns every repository expects to find.
//!
//! # Invariants
//! - Bootstrap only uses `IF NOT EXISTS` DDL, so it is safe on any store
//!   that already carries the table.
//! - There is no schema versioning; the table layout is fixed.

use crate::db::DbResult;
use rusqlite::Connection;

const CONTACTS_SQL: &str = include_str!("contacts.sql");

/// Table holding one row per contact.
pub const CONTACTS_TABLE: &str = "Contacts";

/// Columns of [`CONTACTS_TABLE`] in declaration order.
pub const CONTACTS_COLUMNS: &[&str] = &[
    "Id",
    "Name",
    "Email",
    "PhoneNumber",
    "AddressLine1",
    "AddressLine2",
];

/// Ensures the contacts schema exists on the provided connection.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CONTACTS_SQL)?;
    Ok(())
}

/// Returns whether `table` exists in the connected database.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns the column names of `table` as reported by `PRAGMA table_info`.
pub fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
