#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use parking_lot::Mutex;
use rolodex::contact::{filter_contacts, ContactId, ContactPatch, ContactRecord};
use rolodex::error::{into_backend_error, StoreError, StoreResult};
use rolodex::store::ContactStore;
use thiserror::Error;

pub mod contact;

mod schema;

embed_migrations!("migrations");

const MAX_ID_ATTEMPTS: usize = 16;

macro_rules! trace_query {
    ($query:expr) => {{
        log::trace!(
            "{}",
            diesel::debug_query::<diesel::sqlite::Sqlite, _>(&$query)
        );
        $query
    }};
}

#[derive(Debug, Error)]
pub enum SqliteError {
    #[error("failed to open database: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("failed to run migrations: {0}")]
    Migration(#[from] diesel_migrations::RunMigrationsError),
    #[error("query failed: {0}")]
    Query(#[from] DieselError),
}

fn query_error(error: DieselError) -> StoreError {
    into_backend_error(SqliteError::Query(error))
}

/// Contacts in a single SQLite database. The connection is shared behind a
/// lock, so calls are serialized.
pub struct SqliteStore {
    conn: Mutex<SqliteConnection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `url` and brings its schema up to date.
    pub fn connect(url: &str) -> Result<Self, SqliteError> {
        let conn = SqliteConnection::establish(url)?;
        embedded_migrations::run(&conn)?;
        log::info!("opened contact database at {}", url);
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    fn insert_blank(conn: &SqliteConnection) -> StoreResult<ContactRecord> {
        use schema::contacts::dsl;

        let mut rng = rand::thread_rng();
        let created_at = Utc::now().naive_utc();
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = ContactId::generate(&mut rng);
            let inserted = diesel::insert_into(dsl::contacts)
                .values(&contact::NewContact {
                    id: id.as_str(),
                    created_at: &created_at,
                })
                .execute(conn);

            match inserted {
                Ok(_) => return Ok(ContactRecord::blank(id, created_at)),
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                    log::debug!("contact id {} already taken, drawing another", id);
                }
                Err(e) => return Err(query_error(e)),
            }
        }

        Err(StoreError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }

    fn find(conn: &SqliteConnection, id: &ContactId) -> Result<Option<ContactRecord>, DieselError> {
        use schema::contacts::dsl;

        dsl::contacts
            .find(id.as_str())
            .first::<contact::Contact>(conn)
            .optional()
            .map(|contact| contact.map(ContactRecord::from))
    }
}

impl ContactStore for SqliteStore {
    fn list(&self, query: Option<&str>) -> StoreResult<Vec<ContactRecord>> {
        use schema::contacts::dsl;

        let conn = self.conn.lock();
        let contacts = dsl::contacts
            .order((dsl::created_at.asc(), dsl::id.asc()))
            .load::<contact::Contact>(&*conn)
            .map_err(query_error)?
            .into_iter()
            .map(ContactRecord::from)
            .collect();

        // SQLite's LIKE only folds ASCII case, so match in Rust like every other store.
        Ok(filter_contacts(contacts, query))
    }

    fn get(&self, id: &ContactId) -> StoreResult<ContactRecord> {
        let conn = self.conn.lock();
        Self::find(&conn, id)
            .map_err(query_error)?
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn create_blank(&self) -> StoreResult<ContactRecord> {
        let conn = self.conn.lock();
        let contact = Self::insert_blank(&conn)?;
        log::debug!("created contact {}", contact.id);
        Ok(contact)
    }

    fn update(&self, id: &ContactId, patch: &ContactPatch) -> StoreResult<ContactRecord> {
        use schema::contacts::dsl;

        let conn = self.conn.lock();
        let updated = conn
            .transaction::<_, DieselError, _>(|| {
                // diesel refuses an empty SET clause
                if !patch.is_empty() {
                    let changes = contact::UpdateContact::from(patch);
                    let affected = trace_query!(
                        diesel::update(dsl::contacts.find(id.as_str())).set(&changes)
                    )
                    .execute(&*conn)?;
                    if affected == 0 {
                        return Ok(None);
                    }
                }
                Self::find(&conn, id)
            })
            .map_err(query_error)?;

        log::debug!("updated contact {}", id);
        updated.ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn delete(&self, id: &ContactId) -> StoreResult<()> {
        use schema::contacts::dsl;

        let conn = self.conn.lock();
        let affected = diesel::delete(dsl::contacts.find(id.as_str()))
            .execute(&*conn)
            .map_err(query_error)?;
        if affected == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }

        log::debug!("deleted contact {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        SqliteStore::connect(":memory:").unwrap()
    }

    fn named(store: &SqliteStore, first: Option<&str>, last: Option<&str>) -> ContactRecord {
        let blank = store.create_blank().unwrap();
        let patch = ContactPatch {
            first: first.map(Into::into),
            last: last.map(Into::into),
            ..ContactPatch::default()
        };
        store.update(&blank.id, &patch).unwrap()
    }

    #[test]
    fn blank_contact_is_listed() {
        let store = store();
        let contact = store.create_blank().unwrap();
        assert!(!contact.id.as_str().is_empty());
        assert_eq!(contact.name(), None);
        assert!(!contact.favorite);

        let listed = store.list(None).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, contact.id);
        assert_eq!(store.get(&contact.id).unwrap().id, contact.id);
    }

    #[test]
    fn search_is_unicode_case_insensitive() {
        let store = store();
        let ada = named(&store, Some("Ada"), None);
        let lovelace = named(&store, None, Some("Lovelace"));
        let erdos = named(&store, Some("Pál"), Some("ERDŐS"));

        let ids = |query: Option<&str>| -> Vec<ContactId> {
            store
                .list(query)
                .unwrap()
                .into_iter()
                .map(|contact| contact.id)
                .collect()
        };
        assert_eq!(ids(Some("lov")), vec![lovelace.id.clone()]);
        assert_eq!(ids(Some("erdő")), vec![erdos.id.clone()]);
        let in_creation_order = vec![ada.id.clone(), lovelace.id.clone(), erdos.id.clone()];
        assert_eq!(ids(Some("")), in_creation_order);
        assert_eq!(ids(None), in_creation_order);
    }

    #[test]
    fn listing_orders_by_creation_time_then_id() {
        use chrono::NaiveDate;
        use schema::contacts::dsl;

        let store = store();
        let early = NaiveDate::from_ymd(2024, 1, 1).and_hms(0, 0, 0);
        let late = NaiveDate::from_ymd(2024, 6, 1).and_hms(0, 0, 0);
        {
            let conn = store.conn.lock();
            for (id, created_at) in &[("bbbbbbb", &late), ("zzzzzzz", &early), ("aaaaaaa", &late)] {
                diesel::insert_into(dsl::contacts)
                    .values(&contact::NewContact {
                        id: *id,
                        created_at: *created_at,
                    })
                    .execute(&*conn)
                    .unwrap();
            }
        }

        let listed: Vec<_> = store
            .list(None)
            .unwrap()
            .into_iter()
            .map(|contact| contact.id)
            .collect();
        assert_eq!(
            listed,
            vec![
                ContactId::from("zzzzzzz"),
                ContactId::from("aaaaaaa"),
                ContactId::from("bbbbbbb"),
            ]
        );
    }

    #[test]
    fn update_writes_only_given_fields() {
        let store = store();
        let contact = named(&store, Some("Ada"), Some("Lovelace"));

        let patch = ContactPatch {
            twitter: Some("@ada".into()),
            notes: Some("analytical engine".into()),
            ..ContactPatch::default()
        };
        let updated = store.update(&contact.id, &patch).unwrap();
        assert_eq!(updated.first.as_deref(), Some("Ada"));
        assert_eq!(updated.twitter.as_deref(), Some("ada"));

        let cleared = store
            .update(
                &contact.id,
                &ContactPatch {
                    notes: Some(String::new()),
                    ..ContactPatch::default()
                },
            )
            .unwrap();
        assert_eq!(cleared.notes, None);
        assert_eq!(cleared.twitter.as_deref(), Some("ada"));
        assert_eq!(store.get(&contact.id).unwrap(), cleared);
    }

    #[test]
    fn toggling_favorite_twice_restores_it() {
        let store = store();
        let contact = store.create_blank().unwrap();
        let on = store.update(&contact.id, &ContactPatch::favorite(true)).unwrap();
        assert!(on.favorite);
        let off = store.update(&contact.id, &ContactPatch::favorite(false)).unwrap();
        assert_eq!(off.favorite, contact.favorite);
    }

    #[test]
    fn empty_patch_on_missing_contact_is_not_found() {
        let store = store();
        let missing = ContactId::from("missing");
        assert!(store
            .update(&missing, &ContactPatch::default())
            .unwrap_err()
            .is_not_found());
        assert!(store
            .update(&missing, &ContactPatch::favorite(true))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn deleted_contact_is_gone() {
        let store = store();
        let contact = store.create_blank().unwrap();
        store.delete(&contact.id).unwrap();

        assert!(store.get(&contact.id).unwrap_err().is_not_found());
        assert!(store.delete(&contact.id).unwrap_err().is_not_found());
        assert!(store.list(None).unwrap().is_empty());
    }

    #[test]
    fn contacts_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.sqlite3");
        let path = path.to_str().unwrap();

        let id = {
            let store = SqliteStore::connect(path).unwrap();
            named(&store, Some("Grace"), Some("Hopper")).id
        };

        let store = SqliteStore::connect(path).unwrap();
        assert_eq!(
            store.get(&id).unwrap().display_name(),
            "Grace Hopper".to_owned()
        );
    }
}
