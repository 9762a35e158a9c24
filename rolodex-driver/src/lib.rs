use rolodex::contact::{ContactId, ContactPatch, ContactRecord};
use rolodex::error::StoreError;
use rolodex::seed_if_empty;
use rolodex::store::ContactStore;
use thiserror::Error;

pub mod config;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to parse {0}")]
    ParseFail(String),
    #[error("contact {0} not found")]
    NotFound(ContactId),
    #[error("contact store: {0}")]
    Store(StoreError),
}

impl From<StoreError> for DriverError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => DriverError::NotFound(id),
            error => DriverError::Store(error),
        }
    }
}

pub type DriverResult<A> = Result<A, DriverError>;

/// Favorite form values are the strings `"true"` and `"false"`; nothing else
/// is accepted.
pub fn parse_favorite(value: &str) -> DriverResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(DriverError::ParseFail(format!(
            "favorite value {:?}, expected \"true\" or \"false\"",
            other
        ))),
    }
}

// Everything the front ends do goes through here; they never touch a store directly.
pub struct Driver<S> {
    store: S,
}

impl<S> Driver<S>
where
    S: ContactStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list_contacts(&self, query: Option<&str>) -> DriverResult<Vec<ContactRecord>> {
        Ok(self.store.list(query)?)
    }

    pub fn find_contact(&self, id: &ContactId) -> DriverResult<ContactRecord> {
        Ok(self.store.get(id)?)
    }

    pub fn create_contact(&self) -> DriverResult<ContactRecord> {
        let contact = self.store.create_blank()?;
        log::info!("created contact {}", contact.id);
        Ok(contact)
    }

    pub fn edit_contact(&self, id: &ContactId, patch: &ContactPatch) -> DriverResult<ContactRecord> {
        Ok(self.store.update(id, patch)?)
    }

    pub fn set_favorite(&self, id: &ContactId, favorite: bool) -> DriverResult<ContactRecord> {
        self.edit_contact(id, &ContactPatch::favorite(favorite))
    }

    /// Applies a submitted favorite form value.
    pub fn submit_favorite(&self, id: &ContactId, value: &str) -> DriverResult<ContactRecord> {
        let favorite = parse_favorite(value)?;
        self.set_favorite(id, favorite)
    }

    pub fn toggle_favorite(&self, id: &ContactId) -> DriverResult<ContactRecord> {
        let contact = self.find_contact(id)?;
        self.set_favorite(id, !contact.favorite)
    }

    /// Callers must have confirmed with the user before getting here.
    pub fn delete_contact(&self, id: &ContactId) -> DriverResult<()> {
        self.store.delete(id)?;
        log::info!("deleted contact {}", id);
        Ok(())
    }

    pub fn seed(&self) -> DriverResult<usize> {
        Ok(seed_if_empty(&self.store)?.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rolodex::MemoryStore;

    fn driver() -> Driver<MemoryStore> {
        Driver::new(MemoryStore::new())
    }

    #[test]
    fn favorite_values_parse_strictly() {
        assert!(parse_favorite("true").unwrap());
        assert!(!parse_favorite("false").unwrap());
        assert!(matches!(parse_favorite("yes"), Err(DriverError::ParseFail(_))));
        assert!(matches!(parse_favorite(""), Err(DriverError::ParseFail(_))));
    }

    #[test]
    fn missing_contact_maps_to_not_found() {
        let driver = driver();
        let missing = ContactId::from("nope");
        assert!(matches!(
            driver.find_contact(&missing),
            Err(DriverError::NotFound(ref id)) if id == &missing
        ));
        assert!(matches!(
            driver.toggle_favorite(&missing),
            Err(DriverError::NotFound(_))
        ));
        assert!(matches!(
            driver.delete_contact(&missing),
            Err(DriverError::NotFound(_))
        ));
    }

    #[test]
    fn toggle_twice_restores_favorite() {
        let driver = driver();
        let contact = driver.create_contact().unwrap();
        assert!(driver.toggle_favorite(&contact.id).unwrap().favorite);
        assert!(!driver.toggle_favorite(&contact.id).unwrap().favorite);
    }

    #[test]
    fn submitted_favorite_is_stored() {
        let driver = driver();
        let contact = driver.create_contact().unwrap();
        driver.submit_favorite(&contact.id, "true").unwrap();
        assert!(driver.find_contact(&contact.id).unwrap().favorite);

        assert!(driver.submit_favorite(&contact.id, "maybe").is_err());
        assert!(driver.find_contact(&contact.id).unwrap().favorite);
    }

    #[test]
    fn works_through_a_boxed_store() {
        let driver = Driver::new(MemoryStore::new().boxed());
        assert_eq!(driver.seed().unwrap(), 7);
        assert_eq!(driver.list_contacts(Some("hop")).unwrap().len(), 1);
        assert_eq!(driver.seed().unwrap(), 0);
    }
}
