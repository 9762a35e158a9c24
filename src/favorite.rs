//! The favorite button shows the requested value while the write is in
//! flight, then settles on whatever the store reports.

use crate::contact::ContactRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimisticFavorite {
    committed: bool,
    pending: Option<bool>,
}

impl OptimisticFavorite {
    pub fn new(committed: bool) -> Self {
        OptimisticFavorite {
            committed,
            pending: None,
        }
    }

    pub fn from_contact(contact: &ContactRecord) -> Self {
        Self::new(contact.favorite)
    }

    pub fn displayed(&self) -> bool {
        self.pending.unwrap_or(self.committed)
    }

    pub fn committed(&self) -> bool {
        self.committed
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Value a click should submit: the opposite of what is on screen.
    pub fn next(&self) -> bool {
        !self.displayed()
    }

    pub fn submit(&mut self, favorite: bool) {
        self.pending = Some(favorite);
    }

    /// On success the store's record is authoritative; on failure the
    /// pre-submit value comes back.
    pub fn settle<E>(&mut self, outcome: Result<&ContactRecord, E>) -> Result<bool, E> {
        self.pending = None;
        let contact = outcome?;
        self.committed = contact.favorite;
        Ok(self.committed)
    }
}
