//! Page templates and the flattened view models they render.

use askama::Template;
use rolodex::contact::{ContactId, ContactRecord};
use rolodex::OptimisticFavorite;

pub struct ContactRow {
    pub id: String,
    pub name: String,
    pub named: bool,
    pub favorite: bool,
    pub active: bool,
}

pub struct Sidebar {
    /// Echoed back into the search field.
    pub q: String,
    pub contacts: Vec<ContactRow>,
}

impl Sidebar {
    pub fn new(q: Option<&str>, contacts: &[ContactRecord], active: Option<&ContactId>) -> Self {
        let contacts = contacts
            .iter()
            .map(|contact| ContactRow {
                id: contact.id.to_string(),
                name: contact.display_name(),
                named: contact.name().is_some(),
                favorite: contact.favorite,
                active: Some(&contact.id) == active,
            })
            .collect();

        Sidebar {
            q: q.unwrap_or_default().to_owned(),
            contacts,
        }
    }
}

/// Absent fields become empty strings so templates only test `is_empty`.
pub struct ContactView {
    pub id: String,
    pub name: String,
    pub named: bool,
    pub first: String,
    pub last: String,
    pub twitter: String,
    pub avatar: String,
    pub notes: String,
    pub star: &'static str,
    pub next_favorite: &'static str,
    pub favorite_label: &'static str,
}

impl From<&ContactRecord> for ContactView {
    fn from(contact: &ContactRecord) -> Self {
        let favorite = OptimisticFavorite::from_contact(contact);
        let text = |field: &Option<String>| field.clone().unwrap_or_default();

        ContactView {
            id: contact.id.to_string(),
            name: contact.display_name(),
            named: contact.name().is_some(),
            first: text(&contact.first),
            last: text(&contact.last),
            twitter: text(&contact.twitter),
            avatar: text(&contact.avatar),
            notes: text(&contact.notes),
            star: if favorite.displayed() { "★" } else { "☆" },
            next_favorite: if favorite.next() { "true" } else { "false" },
            favorite_label: if favorite.displayed() {
                "Remove from favorites"
            } else {
                "Add to favorites"
            },
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub sidebar: Sidebar,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactPage {
    pub sidebar: Sidebar,
    pub contact: ContactView,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditPage {
    pub sidebar: Sidebar,
    pub contact: ContactView,
}

#[derive(Template)]
#[template(path = "destroy.html")]
pub struct DestroyPage {
    pub sidebar: Sidebar,
    pub contact: ContactView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status: u16,
    pub message: String,
}
