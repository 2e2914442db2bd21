//! Note service: forwards to the store and merges partial updates.

use std::sync::Arc;

use crate::entity::{Note, NoteDraft, NoteId, NoteUpdate};
use crate::error::Result;
use crate::storage::NoteStore;

/// Orchestration layer between the HTTP handlers and the [`NoteStore`].
///
/// The service applies no validation of its own; callers are expected to
/// check input before creating notes.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// All notes, ordered by id.
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        let notes = self.store.find_all()?;
        tracing::debug!(count = notes.len(), "listed notes");
        Ok(notes)
    }

    pub fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        let note = self.store.find_by_id(id)?;
        tracing::debug!(id, found = note.is_some(), "looked up note");
        Ok(note)
    }

    /// Persist a new note and return it with its assigned id.
    pub fn create_note(&self, title: String, content: String) -> Result<Note> {
        let note = self.store.save(NoteDraft::new(title, content))?;
        tracing::info!(id = note.id, "created note");
        Ok(note)
    }

    /// Merge `update` into the note with `id`.
    ///
    /// Returns `Ok(None)` without touching the store if no such note exists.
    pub fn update_note(&self, id: NoteId, update: NoteUpdate) -> Result<Option<Note>> {
        let Some(mut note) = self.store.find_by_id(id)? else {
            tracing::debug!(id, "update skipped, note not found");
            return Ok(None);
        };

        if update.is_empty() {
            tracing::debug!(id, "update carries no fields");
        }
        update.apply_to(&mut note);

        let saved = self.store.save(NoteDraft::from(note))?;
        tracing::info!(id, "updated note");
        Ok(Some(saved))
    }

    /// Delete the note with `id`. Returns whether a note was removed.
    pub fn delete_note(&self, id: NoteId) -> Result<bool> {
        if !self.store.exists_by_id(id)? {
            tracing::debug!(id, "delete skipped, note not found");
            return Ok(false);
        }
        self.store.delete_by_id(id)?;
        tracing::info!(id, "deleted note");
        Ok(true)
    }

    pub fn delete_all_notes(&self) -> Result<()> {
        self.store.delete_all()?;
        tracing::info!("deleted all notes");
        Ok(())
    }

    pub fn count_notes(&self) -> Result<u64> {
        self.store.count()
    }
}
