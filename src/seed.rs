use crate::contact::{ContactPatch, ContactRecord};
use crate::error::StoreResult;
use crate::store::ContactStore;

// (first, last, twitter, notes)
const SAMPLES: &[(&str, &str, &str, &str)] = &[
    ("Ada", "Lovelace", "@ada", "Wrote the first published algorithm."),
    ("Grace", "Hopper", "@grace", "Found the first actual bug."),
    ("Alan", "Turing", "", ""),
    ("Edsger", "Dijkstra", "", "Shortest paths, semaphores, and strong opinions."),
    ("Barbara", "Liskov", "@liskov", ""),
    ("Margaret", "Hamilton", "", "Apollo flight software."),
    ("Donald", "Knuth", "", ""),
];

/// Loads the sample contacts, but only into an empty store.
pub fn seed_if_empty<S: ContactStore + ?Sized>(store: &S) -> StoreResult<Vec<ContactRecord>> {
    if !store.list(None)?.is_empty() {
        return Ok(Vec::new());
    }

    let mut created = Vec::with_capacity(SAMPLES.len());
    for (first, last, twitter, notes) in SAMPLES {
        let blank = store.create_blank()?;
        let patch = ContactPatch {
            first: Some(first.to_string()),
            last: Some(last.to_string()),
            twitter: Some(twitter.to_string()),
            notes: Some(notes.to_string()),
            ..ContactPatch::default()
        };
        created.push(store.update(&blank.id, &patch)?);
    }
    log::info!("seeded {} sample contacts", created.len());

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn seeds_only_once() {
        let store = MemoryStore::new();
        let created = seed_if_empty(&store).unwrap();
        assert_eq!(created.len(), SAMPLES.len());
        assert_eq!(created[0].twitter.as_deref(), Some("ada"));
        assert_eq!(created[2].notes, None);

        assert!(seed_if_empty(&store).unwrap().is_empty());
        assert_eq!(store.len(), SAMPLES.len());
    }
}
