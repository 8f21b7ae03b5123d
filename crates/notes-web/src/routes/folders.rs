use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use notes_store::{FolderCount, FolderName, Note, NoteQuery};
use serde::{Deserialize, Serialize};

use super::notes::required_search_term;
use super::Data;
use crate::services::store::AppState;
use crate::WebError;

pub fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders/", get(list_folders))
        .route("/folders/search/", get(search_folders))
        .route("/folders/{name}", get(folder_with_notes))
}

pub(super) fn folder_not_found() -> WebError {
    WebError::NotFound("Folder not found or no notes in folder".to_string())
}

#[derive(Debug, Serialize)]
struct FolderDetail {
    folder_name: String,
    note_count: u64,
    notes: Vec<Note>,
}

async fn list_folders(
    State(state): State<AppState>,
) -> Result<Json<Data<Vec<FolderCount>>>, WebError> {
    let folders = state.store.folder_counts().await?;
    Ok(Json(Data::new(folders)))
}

#[derive(Debug, Deserialize)]
struct SearchFoldersQuery {
    q: Option<String>,
}

async fn search_folders(
    State(state): State<AppState>,
    query: Result<Query<SearchFoldersQuery>, QueryRejection>,
) -> Result<Json<Data<Vec<FolderName>>>, WebError> {
    let Query(query) = query?;
    let needle = required_search_term(query.q)?;

    let folders = state.store.search_folders(&needle).await?;
    Ok(Json(Data::new(folders)))
}

/// A folder with no notes is indistinguishable from one that does not exist
async fn folder_with_notes(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Data<FolderDetail>>, WebError> {
    let notes = state
        .store
        .find(&NoteQuery::in_folder(name.clone()), None)
        .await?;
    if notes.is_empty() {
        return Err(folder_not_found());
    }

    Ok(Json(Data::new(FolderDetail {
        folder_name: name,
        note_count: notes.len() as u64,
        notes,
    })))
}
