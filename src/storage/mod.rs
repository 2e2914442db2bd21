//! Persistence boundary for notes.
//!
//! [`NoteStore`] is the contract the service layer depends on. Two backends
//! implement it: [`SqliteStore`] for durable storage and [`MemoryStore`] for
//! ephemeral servers and tests.

mod memory_store;
mod sqlite_store;

pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

use crate::entity::{Note, NoteDraft, NoteId};
use crate::error::Result;

/// CRUD operations over persisted notes.
///
/// Each call is a single atomic operation against the backend; there are no
/// transactions spanning calls. Concurrent saves to the same id are
/// last-write-wins.
pub trait NoteStore: Send + Sync {
    /// All notes, ordered by ascending id.
    fn find_all(&self) -> Result<Vec<Note>>;

    fn find_by_id(&self, id: NoteId) -> Result<Option<Note>>;

    /// Insert a draft without an id (assigning one), or write a draft with an
    /// id over any existing record with that id.
    fn save(&self, draft: NoteDraft) -> Result<Note>;

    fn exists_by_id(&self, id: NoteId) -> Result<bool>;

    /// Remove the note with `id`. Absent ids are a no-op.
    fn delete_by_id(&self, id: NoteId) -> Result<()>;

    fn delete_all(&self) -> Result<()>;

    fn count(&self) -> Result<u64>;
}

/// Behavioural checks shared by every backend's test module.
#[cfg(test)]
pub(crate) mod contract {
    use super::*;

    pub fn save_assigns_sequential_ids(store: &dyn NoteStore) {
        let first = store.save(NoteDraft::new("A", "B")).unwrap();
        let second = store.save(NoteDraft::new("C", "D")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.title, "A");
        assert_eq!(first.content, "B");
    }

    pub fn find_by_id_round_trip(store: &dyn NoteStore) {
        let saved = store.save(NoteDraft::new("Title", "Body")).unwrap();

        let found = store.find_by_id(saved.id).unwrap();
        assert_eq!(found, Some(saved));
        assert_eq!(store.find_by_id(999).unwrap(), None);
    }

    pub fn save_with_id_overwrites(store: &dyn NoteStore) {
        let saved = store.save(NoteDraft::new("Old", "Body")).unwrap();

        let mut draft = NoteDraft::from(saved.clone());
        draft.title = "New".to_string();
        let updated = store.save(draft).unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.title, "New");
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.find_by_id(saved.id).unwrap(), Some(updated));
    }

    pub fn find_all_is_ordered_by_id(store: &dyn NoteStore) {
        for i in 0..3 {
            store
                .save(NoteDraft::new(format!("t{i}"), format!("c{i}")))
                .unwrap();
        }
        let ids: Vec<NoteId> = store.find_all().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    pub fn delete_by_id(store: &dyn NoteStore) {
        let keep = store.save(NoteDraft::new("keep", "x")).unwrap();
        let drop = store.save(NoteDraft::new("drop", "y")).unwrap();

        assert!(store.exists_by_id(drop.id).unwrap());
        store.delete_by_id(drop.id).unwrap();
        assert!(!store.exists_by_id(drop.id).unwrap());
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.exists_by_id(keep.id).unwrap());

        // Absent id: no-op
        store.delete_by_id(42).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    pub fn delete_all_does_not_reuse_ids(store: &dyn NoteStore) {
        store.save(NoteDraft::new("a", "b")).unwrap();
        store.save(NoteDraft::new("c", "d")).unwrap();

        store.delete_all().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.find_all().unwrap().is_empty());

        let next = store.save(NoteDraft::new("e", "f")).unwrap();
        assert_eq!(next.id, 3);
    }
}
