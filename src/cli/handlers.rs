use std::path::Path;
use std::sync::Arc;

use crate::config::{ServerConfig, StorageConfig};
use crate::error::{NoteError, Result};
use crate::http;
use crate::service::NoteService;
use crate::storage::SqliteStore;
use crate::Note;

fn open_service(db: &Path) -> Result<NoteService> {
    let store = SqliteStore::open(db)?;
    Ok(NoteService::new(Arc::new(store)))
}

fn print_note(note: &Note) {
    println!("{:03} {}", note.id, note.title);
    for line in note.content.lines() {
        println!("    {}", line);
    }
}

pub fn handle_serve(db: &Path, bind: std::net::SocketAddr, in_memory: bool) -> Result<()> {
    let storage = if in_memory {
        StorageConfig::Memory
    } else {
        StorageConfig::Sqlite {
            path: db.to_path_buf(),
        }
    };
    let config = ServerConfig { bind, storage };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(http::serve(&config))
}

pub fn handle_list(db: &Path, json: bool) -> Result<()> {
    let notes = open_service(db)?.list_notes()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes found.");
    } else {
        for note in &notes {
            print_note(note);
        }
    }

    Ok(())
}

pub fn handle_get(db: &Path, id: i64, json: bool) -> Result<()> {
    let note = open_service(db)?
        .get_note(id)?
        .ok_or(NoteError::NotFound(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        print_note(&note);
    }

    Ok(())
}

pub fn handle_count(db: &Path) -> Result<()> {
    println!("{}", open_service(db)?.count_notes()?);
    Ok(())
}
