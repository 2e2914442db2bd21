use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::NoteStore;
use crate::entity::{Note, NoteDraft, NoteId};
use crate::error::{NoteError, Result};

#[derive(Debug)]
struct MemoryState {
    notes: BTreeMap<NoteId, Note>,
    next_id: NoteId,
}

/// In-process note store. Contents are lost when the process exits.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                notes: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| NoteError::Storage("memory store lock poisoned".to_string()))
    }
}

impl NoteStore for MemoryStore {
    fn find_all(&self) -> Result<Vec<Note>> {
        Ok(self.state()?.notes.values().cloned().collect())
    }

    fn find_by_id(&self, id: NoteId) -> Result<Option<Note>> {
        Ok(self.state()?.notes.get(&id).cloned())
    }

    fn save(&self, draft: NoteDraft) -> Result<Note> {
        let mut state = self.state()?;

        let id = match draft.id {
            Some(id) => id,
            None => state.next_id,
        };
        state.next_id = state.next_id.max(id + 1);

        let note = Note {
            id,
            title: draft.title,
            content: draft.content,
        };
        state.notes.insert(id, note.clone());
        Ok(note)
    }

    fn exists_by_id(&self, id: NoteId) -> Result<bool> {
        Ok(self.state()?.notes.contains_key(&id))
    }

    fn delete_by_id(&self, id: NoteId) -> Result<()> {
        self.state()?.notes.remove(&id);
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        self.state()?.notes.clear();
        Ok(())
    }

    fn count(&self) -> Result<u64> {
        Ok(self.state()?.notes.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::contract;

    #[test]
    fn test_save_assigns_sequential_ids() {
        contract::save_assigns_sequential_ids(&MemoryStore::new());
    }

    #[test]
    fn test_find_by_id() {
        contract::find_by_id_round_trip(&MemoryStore::new());
    }

    #[test]
    fn test_save_with_id_overwrites() {
        contract::save_with_id_overwrites(&MemoryStore::new());
    }

    #[test]
    fn test_find_all_ordered() {
        contract::find_all_is_ordered_by_id(&MemoryStore::new());
    }

    #[test]
    fn test_delete_by_id() {
        contract::delete_by_id(&MemoryStore::new());
    }

    #[test]
    fn test_delete_all() {
        contract::delete_all_does_not_reuse_ids(&MemoryStore::new());
    }

    #[test]
    fn test_explicit_id_advances_sequence() {
        let store = MemoryStore::new();
        let mut draft = NoteDraft::new("a", "b");
        draft.id = Some(10);
        store.save(draft).unwrap();

        let next = store.save(NoteDraft::new("c", "d")).unwrap();
        assert_eq!(next.id, 11);
    }
}
