#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod contact;
pub mod error;
pub mod favorite;
pub mod memory;
pub mod seed;
pub mod store;

pub use contact::{ContactId, ContactPatch, ContactRecord, UNNAMED};
pub use error::{into_backend_error, StoreError, StoreResult};
pub use favorite::OptimisticFavorite;
pub use memory::MemoryStore;
pub use seed::seed_if_empty;
pub use store::{BoxedStore, ContactStore};
