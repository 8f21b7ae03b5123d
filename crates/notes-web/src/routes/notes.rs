use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use notes_store::{Note, NoteQuery};
use serde::{Deserialize, Serialize};

use super::Data;
use crate::pagination::{PageQuery, PageRequest};
use crate::services::store::AppState;
use crate::WebError;

const NOTES_PATH: &str = "/notes/";

pub fn notes_routes() -> Router<AppState> {
    Router::new()
        .route("/notes/", get(list_notes))
        .route("/notes/search/", get(search_notes))
        .route("/notes/random/", get(random_note))
        .route("/notes/by-folder/{name}", get(notes_by_folder))
}

#[derive(Debug, Serialize)]
struct NotesPage {
    results: Vec<Note>,
    count: u64,
    next: Option<String>,
    previous: Option<String>,
}

#[derive(Debug, Serialize)]
struct FolderNotesPage {
    results: Vec<Note>,
    count: u64,
    folder: String,
    next: Option<String>,
    previous: Option<String>,
}

async fn list_notes(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<NotesPage>, WebError> {
    let Query(query) = query?;
    let request = PageRequest::from_query(&query)?;

    let filter = NoteQuery::all();
    let count = state.store.count(&filter).await?;
    let results = state.store.find(&filter, Some(request.window())).await?;
    let links = request.links(NOTES_PATH, count);

    Ok(Json(NotesPage {
        results,
        count,
        next: links.next,
        previous: links.previous,
    }))
}

#[derive(Debug, Deserialize)]
struct SearchNotesQuery {
    q: Option<String>,
    folder: Option<String>,
}

/// `q` must be present and non-empty
pub(super) fn required_search_term(q: Option<String>) -> Result<String, WebError> {
    match q {
        Some(q) if !q.is_empty() => Ok(q),
        Some(_) => Err(WebError::Validation(
            "q must be at least 1 character long".to_string(),
        )),
        None => Err(WebError::Validation("q is required".to_string())),
    }
}

async fn search_notes(
    State(state): State<AppState>,
    query: Result<Query<SearchNotesQuery>, QueryRejection>,
) -> Result<Json<Data<Vec<Note>>>, WebError> {
    let Query(query) = query?;
    let mut filter = NoteQuery::matching(required_search_term(query.q)?);
    // An empty folder parameter means no folder filter
    if let Some(folder) = query.folder.filter(|f| !f.is_empty()) {
        filter = filter.with_folder(folder);
    }

    let notes = state.store.find(&filter, None).await?;
    Ok(Json(Data::new(notes)))
}

async fn random_note(State(state): State<AppState>) -> Result<Json<Data<Note>>, WebError> {
    let note = state
        .store
        .sample()
        .await?
        .ok_or_else(|| WebError::NotFound("No notes found".to_string()))?;

    Ok(Json(Data::new(note)))
}

async fn notes_by_folder(
    State(state): State<AppState>,
    Path(name): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<FolderNotesPage>, WebError> {
    let Query(query) = query?;
    let request = PageRequest::from_query(&query)?;

    let filter = NoteQuery::in_folder(name.clone());
    let count = state.store.count(&filter).await?;
    if count == 0 {
        return Err(super::folders::folder_not_found());
    }

    let results = state.store.find(&filter, Some(request.window())).await?;
    let base_path = format!("/notes/by-folder/{}", urlencoding::encode(&name));
    let links = request.links(&base_path, count);

    Ok(Json(FolderNotesPage {
        results,
        count,
        folder: name,
        next: links.next,
        previous: links.previous,
    }))
}
