//! Contact records and the partial updates applied to them.

use chrono::naive::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown wherever a contact has neither a first nor a last name.
pub const UNNAMED: &str = "No Name";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        ContactId(id.into())
    }

    /// Draws a short base-36 id. Uniqueness is the store's job.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let id = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0, ID_ALPHABET.len())] as char)
            .collect();
        ContactId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(id: &str) -> Self {
        ContactId(id.to_owned())
    }
}

impl From<String> for ContactId {
    fn from(id: String) -> Self {
        ContactId(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: ContactId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// Handle without the leading `@`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    pub created_at: NaiveDateTime,
}

impl ContactRecord {
    pub fn blank(id: ContactId, created_at: NaiveDateTime) -> Self {
        ContactRecord {
            id,
            first: None,
            last: None,
            twitter: None,
            avatar: None,
            notes: None,
            favorite: false,
            created_at,
        }
    }

    /// First and last name joined by a space, or `None` for an unnamed contact.
    pub fn name(&self) -> Option<String> {
        match (self.first.as_deref(), self.last.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(name), None) | (None, Some(name)) => Some(name.to_owned()),
            (None, None) => None,
        }
    }

    pub fn display_name(&self) -> String {
        self.name().unwrap_or_else(|| UNNAMED.to_owned())
    }

    /// Case-insensitive substring match against the full name. An empty query
    /// matches everything.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }

        match self.name() {
            Some(name) => name.to_lowercase().contains(&query.to_lowercase()),
            None => false,
        }
    }
}

/// Keeps the records matching `query`, preserving their order.
pub fn filter_contacts(contacts: Vec<ContactRecord>, query: Option<&str>) -> Vec<ContactRecord> {
    match query {
        Some(query) if !query.is_empty() => contacts
            .into_iter()
            .filter(|contact| contact.matches(query))
            .collect(),
        _ => contacts,
    }
}

/// Blank (after trimming) text clears the field.
pub fn normalize_text(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

pub fn normalize_handle(value: &str) -> Option<String> {
    let value = value.trim();
    normalize_text(value.strip_prefix('@').unwrap_or(value))
}

/// A partial update. `None` leaves a field untouched; for text fields,
/// `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl ContactPatch {
    pub fn favorite(favorite: bool) -> Self {
        ContactPatch {
            favorite: Some(favorite),
            ..ContactPatch::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
            && self.last.is_none()
            && self.twitter.is_none()
            && self.avatar.is_none()
            && self.notes.is_none()
            && self.favorite.is_none()
    }

    /// The normalized value each present text field will be stored as.
    pub fn text_changes(&self) -> TextChanges {
        TextChanges {
            first: self.first.as_deref().map(normalize_text),
            last: self.last.as_deref().map(normalize_text),
            twitter: self.twitter.as_deref().map(normalize_handle),
            avatar: self.avatar.as_deref().map(normalize_text),
            notes: self.notes.as_deref().map(normalize_text),
        }
    }

    pub fn apply_to(&self, contact: &mut ContactRecord) {
        let changes = self.text_changes();
        if let Some(first) = changes.first {
            contact.first = first;
        }
        if let Some(last) = changes.last {
            contact.last = last;
        }
        if let Some(twitter) = changes.twitter {
            contact.twitter = twitter;
        }
        if let Some(avatar) = changes.avatar {
            contact.avatar = avatar;
        }
        if let Some(notes) = changes.notes {
            contact.notes = notes;
        }
        if let Some(favorite) = self.favorite {
            contact.favorite = favorite;
        }
    }
}

/// Outer `Option`: whether the field is written at all. Inner: the new value,
/// `None` meaning cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextChanges {
    pub first: Option<Option<String>>,
    pub last: Option<Option<String>>,
    pub twitter: Option<Option<String>>,
    pub avatar: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}
