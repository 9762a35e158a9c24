use crate::schema::*;
use chrono::naive::NaiveDateTime;
use rolodex::contact::{ContactPatch, ContactRecord};

#[derive(Queryable)]
pub struct Contact {
    pub id: String,
    pub first: Option<String>,
    pub last: Option<String>,
    pub twitter: Option<String>,
    pub avatar: Option<String>,
    pub notes: Option<String>,
    pub favorite: bool,
    pub created_at: NaiveDateTime,
}

impl From<Contact> for ContactRecord {
    fn from(contact: Contact) -> Self {
        ContactRecord {
            id: contact.id.into(),
            first: contact.first,
            last: contact.last,
            twitter: contact.twitter,
            avatar: contact.avatar,
            notes: contact.notes,
            favorite: contact.favorite,
            created_at: contact.created_at,
        }
    }
}

#[derive(Insertable)]
#[table_name = "contacts"]
pub struct NewContact<'a> {
    pub id: &'a str,
    pub created_at: &'a NaiveDateTime,
}

// `None` skips the column; `Some(None)` writes NULL.
#[derive(AsChangeset)]
#[table_name = "contacts"]
pub struct UpdateContact {
    pub first: Option<Option<String>>,
    pub last: Option<Option<String>>,
    pub twitter: Option<Option<String>>,
    pub avatar: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub favorite: Option<bool>,
}

impl From<&ContactPatch> for UpdateContact {
    fn from(patch: &ContactPatch) -> Self {
        let changes = patch.text_changes();
        UpdateContact {
            first: changes.first,
            last: changes.last,
            twitter: changes.twitter,
            avatar: changes.avatar,
            notes: changes.notes,
            favorite: patch.favorite,
        }
    }
}
