use crate::contact::{ContactId, ContactPatch, ContactRecord};
use crate::error::StoreResult;
use std::sync::Arc;

pub type BoxedStore<'a> = Box<dyn ContactStore + Send + Sync + 'a>;

/// Where contact records live.
///
/// Every method runs to completion before returning; concurrent writers to the
/// same contact are last-write-wins.
pub trait ContactStore {
    fn boxed<'a>(self) -> BoxedStore<'a>
    where
        Self: Sized + Send + Sync + 'a,
    {
        Box::new(self)
    }

    // Read
    /// All contacts ordered by creation time, narrowed to those whose name
    /// contains `query` when one is given.
    fn list(&self, query: Option<&str>) -> StoreResult<Vec<ContactRecord>>;
    /// Fails with `StoreError::NotFound` for unknown (or deleted) ids.
    fn get(&self, id: &ContactId) -> StoreResult<ContactRecord>;

    // Update
    /// Inserts a contact with a fresh id and no other fields set.
    fn create_blank(&self) -> StoreResult<ContactRecord>;
    /// Writes only the fields present in `patch` and returns the stored record.
    fn update(&self, id: &ContactId, patch: &ContactPatch) -> StoreResult<ContactRecord>;
    /// Deleting an id that does not exist fails with `StoreError::NotFound`.
    fn delete(&self, id: &ContactId) -> StoreResult<()>;
}

impl<'a, T: ContactStore + ?Sized> ContactStore for &'a T {
    fn list(&self, query: Option<&str>) -> StoreResult<Vec<ContactRecord>> {
        (**self).list(query)
    }

    fn get(&self, id: &ContactId) -> StoreResult<ContactRecord> {
        (**self).get(id)
    }

    fn create_blank(&self) -> StoreResult<ContactRecord> {
        (**self).create_blank()
    }

    fn update(&self, id: &ContactId, patch: &ContactPatch) -> StoreResult<ContactRecord> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: &ContactId) -> StoreResult<()> {
        (**self).delete(id)
    }
}

impl<T: ContactStore + ?Sized> ContactStore for Box<T> {
    fn list(&self, query: Option<&str>) -> StoreResult<Vec<ContactRecord>> {
        (**self).list(query)
    }

    fn get(&self, id: &ContactId) -> StoreResult<ContactRecord> {
        (**self).get(id)
    }

    fn create_blank(&self) -> StoreResult<ContactRecord> {
        (**self).create_blank()
    }

    fn update(&self, id: &ContactId, patch: &ContactPatch) -> StoreResult<ContactRecord> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: &ContactId) -> StoreResult<()> {
        (**self).delete(id)
    }
}

impl<T: ContactStore + ?Sized> ContactStore for Arc<T> {
    fn list(&self, query: Option<&str>) -> StoreResult<Vec<ContactRecord>> {
        (**self).list(query)
    }

    fn get(&self, id: &ContactId) -> StoreResult<ContactRecord> {
        (**self).get(id)
    }

    fn create_blank(&self) -> StoreResult<ContactRecord> {
        (**self).create_blank()
    }

    fn update(&self, id: &ContactId, patch: &ContactPatch) -> StoreResult<ContactRecord> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: &ContactId) -> StoreResult<()> {
        (**self).delete(id)
    }
}
