pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod http;
pub mod logging;
pub mod service;
pub mod storage;

pub use config::{ServerConfig, StorageConfig};
pub use entity::{Note, NoteDraft, NoteId, NoteUpdate};
pub use error::{NoteError, Result};
pub use service::NoteService;
pub use storage::{MemoryStore, NoteStore, SqliteStore};
