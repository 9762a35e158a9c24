use crate::contact::ContactId;
use std::error::Error;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no contact with id {0}")]
    NotFound(ContactId),
    #[error("failed to allocate an unused contact id after {0} attempts")]
    IdSpaceExhausted(usize),
    #[error("store backend: {0}")]
    Backend(BoxedError),
}

pub type StoreResult<T> = Result<T, StoreError>;

// Lets backends hand us their own error types without the core crate knowing about them.
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn Error + Send + Sync + 'static>);

pub fn into_backend_error<E: Error + Send + Sync + 'static>(error: E) -> StoreError {
    StoreError::Backend(BoxedError(Box::new(error)))
}

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Error for BoxedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.0)
    }
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[test]
    fn backend_error_stays_in_the_source_chain() {
        let error = into_backend_error(DiskError);
        let boxed = match &error {
            StoreError::Backend(boxed) => boxed,
            other => panic!("expected a backend error, got {:?}", other),
        };
        let source = boxed.source().expect("wrapped error");
        assert!(source.downcast_ref::<DiskError>().is_some());
        assert_eq!(error.to_string(), "store backend: disk on fire");
    }
}
