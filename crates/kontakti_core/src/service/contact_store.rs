//! Contact store service.
//!
//! # Responsibility
//! - Bootstrap the contact database once at construction.
//! - Expose CRUD and search as blocking calls for presentation layers.
//!
//! # Invariants
//! - File stores hold no connection across operations; every call opens its
//!   own and drops it before returning.
//! - In-memory stores run every call on their one held connection, one call
//!   at a time.
//! - There is no process-wide instance; callers construct and share one
//!   `ContactStore` explicitly.
//! - Log lines carry ids and counts only, never contact field values.

use crate::db::{connect, default_db_path, open_bootstrapped, DbLocation};
use crate::model::contact::{Contact, ContactId};
use crate::repo::contact_repo::{ContactRepository, RepoResult, SqliteContactRepository};
use crate::search::filter::ContactSearch;
use log::{debug, info};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Durable contact storage backed by a single SQLite table.
pub struct ContactStore {
    location: DbLocation,
    // Owns the shared-memory database; its lock serializes operations.
    memory_conn: Option<Mutex<Connection>>,
}

impl ContactStore {
    /// Opens (creating if absent) the SQLite file at `path`.
    ///
    /// # Errors
    /// - Returns `RepoError::Storage` when the file cannot be opened or the
    ///   schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let location = DbLocation::File(path.as_ref().to_path_buf());
        open_bootstrapped(&location)?;
        Ok(Self {
            location,
            memory_conn: None,
        })
    }

    /// Opens `contacts.db` in the directory of the running executable.
    pub fn open_default() -> RepoResult<Self> {
        Self::open(default_db_path()?)
    }

    /// Creates an isolated in-memory store, dropped with the returned value.
    pub fn open_in_memory() -> RepoResult<Self> {
        let name = format!("kontakti-{}", Uuid::new_v4().simple());
        let location = DbLocation::SharedMemory(name);
        let conn = open_bootstrapped(&location)?;
        Ok(Self {
            location,
            memory_conn: Some(Mutex::new(conn)),
        })
    }

    /// Returns where this store persists its rows.
    pub fn location(&self) -> &DbLocation {
        &self.location
    }

    /// Inserts `contact` and returns the id assigned by the store.
    ///
    /// Any id already set on `contact` is ignored.
    pub fn create(&self, contact: &Contact) -> RepoResult<ContactId> {
        let id = self.with_repo(|repo| repo.create_contact(contact))?;
        info!("event=contact_create module=store status=ok id={id}");
        Ok(id)
    }

    /// Returns every stored contact in insertion order.
    pub fn get_all(&self) -> RepoResult<Vec<Contact>> {
        let contacts = self.with_repo(|repo| repo.list_contacts())?;
        debug!(
            "event=contact_list module=store status=ok count={}",
            contacts.len()
        );
        Ok(contacts)
    }

    /// Returns the contact with `id`, or `None` when no such row exists.
    pub fn get_by_id(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let contact = self.with_repo(|repo| repo.get_contact(id))?;
        debug!(
            "event=contact_get module=store status=ok id={id} found={}",
            contact.is_some()
        );
        Ok(contact)
    }

    /// Overwrites every mutable field of the row matching `contact.id`.
    ///
    /// Returns `false` when no row has that id.
    pub fn update(&self, contact: &Contact) -> RepoResult<bool> {
        let updated = self.with_repo(|repo| repo.update_contact(contact))?;
        info!(
            "event=contact_update module=store status=ok id={} updated={updated}",
            contact.id.unwrap_or_default()
        );
        Ok(updated)
    }

    /// Removes the row with `id`; returns whether a row was removed.
    pub fn delete(&self, id: ContactId) -> RepoResult<bool> {
        let deleted = self.with_repo(|repo| repo.delete_contact(id))?;
        info!("event=contact_delete module=store status=ok id={id} deleted={deleted}");
        Ok(deleted)
    }

    /// Filters, orders and pages contacts according to `search`.
    pub fn search(&self, search: &ContactSearch) -> RepoResult<Vec<Contact>> {
        let contacts = self.with_repo(|repo| repo.search_contacts(search))?;
        debug!(
            "event=contact_search module=store status=ok exact={} count={}",
            search.exact,
            contacts.len()
        );
        Ok(contacts)
    }

    fn with_repo<T>(
        &self,
        op: impl FnOnce(&SqliteContactRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        if let Some(memory_conn) = &self.memory_conn {
            // Shared-cache table locks surface as SQLITE_LOCKED, which the
            // busy timeout does not cover.
            let conn = memory_conn.lock().unwrap_or_else(PoisonError::into_inner);
            let repo = SqliteContactRepository::try_new(&conn)?;
            return op(&repo);
        }

        let conn = connect(&self.location)?;
        let repo = SqliteContactRepository::try_new(&conn)?;
        op(&repo)
    }
}

#[cfg(test)]
mod tests {
    use super::ContactStore;
    use crate::db::DbLocation;
    use crate::model::contact::Contact;

    #[test]
    fn in_memory_stores_are_isolated_from_each_other() {
        let first = ContactStore::open_in_memory().unwrap();
        let second = ContactStore::open_in_memory().unwrap();
        assert_ne!(first.location(), second.location());

        first.create(&Contact::new("Alice", "a@x.com")).unwrap();

        assert_eq!(first.get_all().unwrap().len(), 1);
        assert!(second.get_all().unwrap().is_empty());
    }

    #[test]
    fn in_memory_store_keeps_rows_between_operations() {
        let store = ContactStore::open_in_memory().unwrap();
        assert!(matches!(store.location(), DbLocation::SharedMemory(_)));

        let id = store.create(&Contact::new("Alice", "a@x.com")).unwrap();
        let loaded = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(loaded.name, "Alice");
    }

    #[test]
    fn store_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContactStore>();
    }
}
