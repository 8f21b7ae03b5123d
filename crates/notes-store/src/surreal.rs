//! SurrealDB note store
//!
//! Wraps the SurrealDB Rust SDK through the `any` engine, so the same code
//! serves a remote server and an embedded database:
//!
//! - `ws://host:8000` / `wss://...`: WebSocket connection to a server
//! - `http://host:8000` / `https://...`: HTTP connection to a server
//! - `mem://`: embedded in-memory database for development and testing
//!
//! ## Usage
//!
//! ```no_run
//! use notes_config::DatabaseConfig;
//! use notes_store::{NoteQuery, NoteStore, SurrealNoteStore};
//!
//! # async fn run() -> notes_store::StoreResult<()> {
//! let store = SurrealNoteStore::connect(&DatabaseConfig::default()).await?;
//! let total = store.count(&NoteQuery::all()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Every query is parameterised. The table name is bound as `$table` and read
//! through `type::table`, so it never gets spliced into the statement text.

use async_trait::async_trait;
use notes_config::DatabaseConfig;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use surrealdb::opt::QueryResult;
use surrealdb::Surreal;
use tracing::{debug, info};

use crate::store::{sort_by_count_desc, sort_by_name};
use crate::{
    FolderCount, FolderName, Note, NoteQuery, NoteStore, StoreError, StoreResult, Window,
};

/// Projection used for every note-returning query. The record key is cast to
/// a string so numeric and string keys both come back as `note_id`.
const NOTE_FIELDS: &str = "<string> meta::id(id) AS note_id, title, body, folder";

const TEXT_CONDITION: &str = "(string::contains(string::lowercase(title ?? ''), $needle) \
     OR string::contains(string::lowercase(body ?? ''), $needle))";

const FOLDER_CONDITION: &str = "folder = $folder";

/// Largest `START` SurrealDB accepts
const MAX_START: u64 = u32::MAX as u64;

/// Note store backed by a SurrealDB table
///
/// Cloning is cheap: the SDK client is reference counted and shares one
/// connection.
#[derive(Clone)]
pub struct SurrealNoteStore {
    db: Surreal<Any>,
    table: String,
}

impl std::fmt::Debug for SurrealNoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurrealNoteStore")
            .field("table", &self.table)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct NoteRow {
    note_id: String,
    title: Option<String>,
    body: Option<String>,
    folder: Option<String>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.note_id,
            title: row.title,
            body: row.body,
            folder: row.folder,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

#[derive(Debug, Deserialize)]
struct FolderCountRow {
    folder: Option<String>,
    note_count: u64,
}

#[derive(Debug, Deserialize)]
struct FolderRow {
    folder: Option<String>,
}

impl SurrealNoteStore {
    /// Connect, sign in if credentials are configured, and select the
    /// namespace and database
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let db = any::connect(config.url.as_str()).await.map_err(|e| {
            StoreError::connection(format!("Failed to connect to {}: {e}", config.url))
        })?;

        if let Some((username, password)) = config.credentials() {
            db.signin(Root { username, password })
                .await
                .map_err(|e| StoreError::connection(format!("Sign-in as '{username}' failed: {e}")))?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| {
                StoreError::connection(format!(
                    "Failed to use namespace '{}' and database '{}': {e}",
                    config.namespace, config.database
                ))
            })?;

        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            table = %config.table,
            "Connected to SurrealDB"
        );

        Ok(Self::from_client(db, config.table.clone()))
    }

    /// Wrap an already configured client
    pub fn from_client(db: Surreal<Any>, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
        }
    }

    /// The underlying SDK client
    pub fn client(&self) -> &Surreal<Any> {
        &self.db
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Run one statement with `$table`, plus `$needle` and `$folder` when
    /// `query` uses them, and decode its first result set
    async fn run<T>(&self, sql: String, query: &NoteQuery) -> StoreResult<T>
    where
        T: DeserializeOwned + Send,
        usize: QueryResult<T>,
    {
        debug!(%sql, "Executing query");
        let mut request = self.db.query(sql).bind(("table", self.table.clone()));
        if let Some(text) = &query.text {
            request = request.bind(("needle", text.to_lowercase()));
        }
        if let Some(folder) = &query.folder {
            request = request.bind(("folder", folder.clone()));
        }

        let response = request
            .await
            .map_err(|e| StoreError::query(format!("Query execution failed: {e}")))?;
        let mut response = response
            .check()
            .map_err(|e| StoreError::query(format!("Query returned error: {e}")))?;
        response
            .take(0)
            .map_err(|e| StoreError::decode(format!("Failed to decode query results: {e}")))
    }
}

/// ` WHERE ...` for `query`, or nothing when it matches everything
fn filter_clause(query: &NoteQuery) -> String {
    let mut conditions = Vec::new();
    if query.text.is_some() {
        conditions.push(TEXT_CONDITION);
    }
    if query.folder.is_some() {
        conditions.push(FOLDER_CONDITION);
    }
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

fn window_clause(window: Option<Window>) -> String {
    match window {
        Some(Window { skip, limit }) => format!(" LIMIT {limit} START {skip}"),
        None => String::new(),
    }
}

fn find_sql(query: &NoteQuery, window: Option<Window>) -> String {
    format!(
        "SELECT {NOTE_FIELDS} FROM type::table($table){}{}",
        filter_clause(query),
        window_clause(window)
    )
}

fn count_sql(query: &NoteQuery) -> String {
    format!(
        "SELECT count() AS total FROM type::table($table){} GROUP ALL",
        filter_clause(query)
    )
}

#[async_trait]
impl NoteStore for SurrealNoteStore {
    async fn find(&self, query: &NoteQuery, window: Option<Window>) -> StoreResult<Vec<Note>> {
        // The server rejects a START beyond u32 range
        if let Some(Window { skip, .. }) = window.filter(|w| w.skip > MAX_START) {
            debug!(skip, "Window starts past any result");
            return Ok(Vec::new());
        }
        let rows: Vec<NoteRow> = self.run(find_sql(query, window), query).await?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn count(&self, query: &NoteQuery) -> StoreResult<u64> {
        // GROUP ALL over zero matching records yields no row at all
        let row: Option<CountRow> = self.run(count_sql(query), query).await?;
        Ok(row.map_or(0, |row| row.total))
    }

    async fn sample(&self) -> StoreResult<Option<Note>> {
        let sql = format!("SELECT {NOTE_FIELDS} FROM type::table($table) ORDER BY rand() LIMIT 1");
        let row: Option<NoteRow> = self.run(sql, &NoteQuery::all()).await?;
        Ok(row.map(Note::from))
    }

    async fn folder_counts(&self) -> StoreResult<Vec<FolderCount>> {
        let sql = "SELECT folder, count() AS note_count FROM type::table($table) GROUP BY folder";
        let rows: Vec<FolderCountRow> = self.run(sql.to_string(), &NoteQuery::all()).await?;

        let mut folders: Vec<FolderCount> = rows
            .into_iter()
            .map(|row| FolderCount {
                name: row.folder,
                note_count: row.note_count,
            })
            .collect();
        sort_by_count_desc(&mut folders);
        Ok(folders)
    }

    async fn search_folders(&self, needle: &str) -> StoreResult<Vec<FolderName>> {
        let sql = "SELECT folder FROM type::table($table) \
             WHERE string::contains(string::lowercase(folder ?? ''), $needle) \
             GROUP BY folder";
        let rows: Vec<FolderRow> = self
            .run(sql.to_string(), &NoteQuery::matching(needle))
            .await?;

        let mut folders: Vec<FolderName> = rows
            .into_iter()
            .filter_map(|row| row.folder)
            .map(|name| FolderName { name: Some(name) })
            .collect();
        sort_by_name(&mut folders);
        Ok(folders)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db
            .health()
            .await
            .map_err(|e| StoreError::connection(format!("Health check failed: {e}")))
    }
}
