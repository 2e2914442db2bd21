//! Notes API endpoints under `/api/notes`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::AppState;
use crate::entity::{Note, NoteId, NoteUpdate};
use crate::error::{NoteError, Result};
use crate::service::NoteService;

/// Request payload for creating a note. Any `id` in the body is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl CreateNoteRequest {
    /// Both fields must be present and non-empty.
    pub fn validate(self) -> Result<(String, String)> {
        let title = required("title", self.title)?;
        let content = required("content", self.content)?;
        Ok((title, content))
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        Some(_) => Err(NoteError::Validation(format!("{field} must not be empty"))),
        None => Err(NoteError::Validation(format!("{field} is required"))),
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Run a service call on the blocking pool.
async fn run_blocking<T, F>(state: &AppState, op: F) -> std::result::Result<T, ApiError>
where
    F: FnOnce(&NoteService) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let service = state.service.clone();
    tokio::task::spawn_blocking(move || op(&service))
        .await
        .map_err(|e| ApiError::Internal(format!("task failed: {e}")))?
        .map_err(ApiError::from)
}

/// GET /api/notes
pub(crate) async fn list(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<Vec<Note>>, ApiError> {
    let notes = run_blocking(&state, |service| service.list_notes()).await?;
    Ok(Json(notes))
}

/// GET /api/notes/count
pub(crate) async fn count(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<CountResponse>, ApiError> {
    let count = run_blocking(&state, |service| service.count_notes()).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/notes/{id}
pub(crate) async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<NoteId>,
) -> std::result::Result<Json<Note>, ApiError> {
    run_blocking(&state, move |service| service.get_note(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// POST /api/notes
pub(crate) async fn create(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CreateNoteRequest>, JsonRejection>,
) -> std::result::Result<(StatusCode, Json<Note>), ApiError> {
    let Json(payload) = payload?;
    let (title, content) = payload.validate()?;

    let note = run_blocking(&state, move |service| service.create_note(title, content)).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /api/notes/{id}
pub(crate) async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<NoteId>,
    payload: std::result::Result<Json<NoteUpdate>, JsonRejection>,
) -> std::result::Result<Json<Note>, ApiError> {
    let Json(update) = payload?;

    run_blocking(&state, move |service| service.update_note(id, update))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// DELETE /api/notes/{id}
pub(crate) async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<NoteId>,
) -> std::result::Result<StatusCode, ApiError> {
    if run_blocking(&state, move |service| service.delete_note(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// DELETE /api/notes
pub(crate) async fn delete_all(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<StatusCode, ApiError> {
    run_blocking(&state, |service| service.delete_all_notes()).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: Option<&str>, content: Option<&str>) -> CreateNoteRequest {
        CreateNoteRequest {
            title: title.map(str::to_string),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_accepts_filled_fields() {
        let (title, content) = request(Some("A"), Some("B")).validate().unwrap();
        assert_eq!(title, "A");
        assert_eq!(content, "B");
    }

    #[test]
    fn test_validate_rejects_missing_or_empty() {
        for req in [
            request(None, Some("B")),
            request(Some(""), Some("B")),
            request(Some("A"), None),
            request(Some("A"), Some("")),
            CreateNoteRequest::default(),
        ] {
            assert!(matches!(req.validate(), Err(NoteError::Validation(_))));
        }
    }

    #[test]
    fn test_validate_accepts_whitespace() {
        assert!(request(Some(" "), Some(" ")).validate().is_ok());
    }
}
