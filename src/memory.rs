use crate::contact::{filter_contacts, ContactId, ContactPatch, ContactRecord};
use crate::error::{StoreError, StoreResult};
use crate::store::ContactStore;
use chrono::Utc;
use parking_lot::RwLock;

const MAX_ID_ATTEMPTS: usize = 16;

/// Keeps contacts in a `Vec` in insertion order; listing sorts them by
/// creation time, ties keeping insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contacts: RwLock<Vec<ContactRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes records as given; callers are responsible for unique ids.
    pub fn from_records(contacts: Vec<ContactRecord>) -> Self {
        MemoryStore {
            contacts: RwLock::new(contacts),
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.read().is_empty()
    }

    fn fresh_id(contacts: &[ContactRecord]) -> StoreResult<ContactId> {
        let mut rng = rand::thread_rng();
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = ContactId::generate(&mut rng);
            if contacts.iter().all(|contact| contact.id != id) {
                return Ok(id);
            }
        }

        Err(StoreError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }
}

impl ContactStore for MemoryStore {
    fn list(&self, query: Option<&str>) -> StoreResult<Vec<ContactRecord>> {
        let mut contacts = self.contacts.read().clone();
        // stable, so equal timestamps stay in insertion order
        contacts.sort_by_key(|contact| contact.created_at);
        Ok(filter_contacts(contacts, query))
    }

    fn get(&self, id: &ContactId) -> StoreResult<ContactRecord> {
        self.contacts
            .read()
            .iter()
            .find(|contact| &contact.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn create_blank(&self) -> StoreResult<ContactRecord> {
        let mut contacts = self.contacts.write();
        let id = Self::fresh_id(&contacts)?;
        let contact = ContactRecord::blank(id, Utc::now().naive_utc());
        log::debug!("created contact {}", contact.id);
        contacts.push(contact.clone());
        Ok(contact)
    }

    fn update(&self, id: &ContactId, patch: &ContactPatch) -> StoreResult<ContactRecord> {
        let mut contacts = self.contacts.write();
        let contact = contacts
            .iter_mut()
            .find(|contact| &contact.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        patch.apply_to(contact);
        log::debug!("updated contact {}", id);
        Ok(contact.clone())
    }

    fn delete(&self, id: &ContactId) -> StoreResult<()> {
        let mut contacts = self.contacts.write();
        let index = contacts
            .iter()
            .position(|contact| &contact.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        contacts.remove(index);
        log::debug!("deleted contact {}", id);
        Ok(())
    }
}
