//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and search APIs over the `Contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Contact::validate()` before SQL mutations.
//! - Each API call runs exactly one SQL statement.
//! - Search results are ordered by `Name COLLATE NOCASE, Id`.

use crate::db::schema::{table_columns, table_exists, CONTACTS_COLUMNS, CONTACTS_TABLE};
use crate::db::DbError;
use crate::model::contact::{Contact, ContactId, ContactValidationError};
use crate::search::filter::{build_search_sql, ContactSearch};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    Id,
    Name,
    Email,
    PhoneNumber,
    AddressLine1,
    AddressLine2
FROM Contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// The caller passed a contact that cannot be written.
    InvalidArgument(ContactValidationError),
    /// Any failure reported by the storage engine, unmodified.
    Storage(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::InvalidArgument(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

/// Repository interface for contact CRUD and search.
pub trait ContactRepository {
    /// Inserts `contact` and returns the id assigned by the store.
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId>;
    /// Returns every contact in insertion (id) order.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Overwrites all mutable fields; `false` when no row has `contact.id`.
    fn update_contact(&self, contact: &Contact) -> RepoResult<bool>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<bool>;
    fn search_contacts(&self, search: &ContactSearch) -> RepoResult<Vec<Contact>>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository after checking the connection carries the
    /// `Contacts` table with every expected column.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_contacts_schema(conn)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId> {
        contact.validate()?;

        self.conn.execute(
            "INSERT INTO Contacts (
                Name,
                Email,
                PhoneNumber,
                AddressLine1,
                AddressLine2
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                contact.name.as_str(),
                contact.email.as_str(),
                contact.phone_number.as_deref(),
                contact.address_line1.as_deref(),
                contact.address_line2.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY Id;"))?;
        let contacts = stmt
            .query_map([], parse_contact_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE Id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn update_contact(&self, contact: &Contact) -> RepoResult<bool> {
        let id = contact.require_id()?;
        contact.validate()?;

        let changed = self.conn.execute(
            "UPDATE Contacts
             SET
                Name = ?1,
                Email = ?2,
                PhoneNumber = ?3,
                AddressLine1 = ?4,
                AddressLine2 = ?5
             WHERE Id = ?6;",
            params![
                contact.name.as_str(),
                contact.email.as_str(),
                contact.phone_number.as_deref(),
                contact.address_line1.as_deref(),
                contact.address_line2.as_deref(),
                id,
            ],
        )?;

        Ok(changed > 0)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM Contacts WHERE Id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn search_contacts(&self, search: &ContactSearch) -> RepoResult<Vec<Contact>> {
        let (sql, bind_values) = build_search_sql(CONTACT_SELECT_SQL, search);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }
}

fn ensure_contacts_schema(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, CONTACTS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(CONTACTS_TABLE));
    }

    let columns = table_columns(conn, CONTACTS_TABLE)?;
    for &column in CONTACTS_COLUMNS {
        if !columns.iter().any(|existing| existing == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: CONTACTS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn parse_contact_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: Some(row.get("Id")?),
        name: row.get("Name")?,
        email: row.get("Email")?,
        phone_number: row.get("PhoneNumber")?,
        address_line1: row.get("AddressLine1")?,
        address_line2: row.get("AddressLine2")?,
    })
}
