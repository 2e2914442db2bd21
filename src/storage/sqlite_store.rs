use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::NoteStore;
use crate::entity::{Note, NoteDraft, NoteId};
use crate::error::{NoteError, Result};

/// SQLite-backed note store.
///
/// The connection is shared behind a mutex so the store can be used from
/// the blocking thread pool of the HTTP server.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open or create the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;

        let store = Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let store = Self {
            conn: Mutex::new(conn),
            path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Path of the backing file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init_schema(&self) -> Result<()> {
        // AUTOINCREMENT keeps ids from being reused after deletes
        self.conn()?.execute(
            "CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| NoteError::Storage("connection lock poisoned".to_string()))
    }

    fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
        Ok(Note {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
        })
    }
}

impl NoteStore for SqliteStore {
    fn find_all(&self) -> Result<Vec<Note>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, title, content FROM notes ORDER BY id")?;
        let notes = stmt
            .query_map([], Self::row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn find_by_id(&self, id: NoteId) -> Result<Option<Note>> {
        let note = self
            .conn()?
            .query_row(
                "SELECT id, title, content FROM notes WHERE id = ?1",
                [id],
                Self::row_to_note,
            )
            .optional()?;
        Ok(note)
    }

    fn save(&self, draft: NoteDraft) -> Result<Note> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO notes (id, title, content) VALUES (?1, ?2, ?3)",
            params![draft.id, draft.title, draft.content],
        )?;
        let id = draft.id.unwrap_or_else(|| conn.last_insert_rowid());

        Ok(Note {
            id,
            title: draft.title,
            content: draft.content,
        })
    }

    fn exists_by_id(&self, id: NoteId) -> Result<bool> {
        let exists: bool = self.conn()?.query_row(
            "SELECT EXISTS(SELECT 1 FROM notes WHERE id = ?1)",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn delete_by_id(&self, id: NoteId) -> Result<()> {
        self.conn()?
            .execute("DELETE FROM notes WHERE id = ?1", [id])?;
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        self.conn()?.execute("DELETE FROM notes", [])?;
        Ok(())
    }

    fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::contract;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_db() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.db");
        let store = SqliteStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), Some(path.as_path()));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/notes.db");
        SqliteStore::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_notes_persist_across_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.db");

        let saved = {
            let store = SqliteStore::open(&path).unwrap();
            store.save(NoteDraft::new("Persist", "me")).unwrap()
        };

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.find_by_id(saved.id).unwrap(), Some(saved));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_save_assigns_sequential_ids() {
        contract::save_assigns_sequential_ids(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn test_find_by_id() {
        contract::find_by_id_round_trip(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn test_save_with_id_overwrites() {
        contract::save_with_id_overwrites(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn test_find_all_ordered() {
        contract::find_all_is_ordered_by_id(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn test_delete_by_id() {
        contract::delete_by_id(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn test_delete_all() {
        contract::delete_all_does_not_reuse_ids(&SqliteStore::open_in_memory().unwrap());
    }
}
