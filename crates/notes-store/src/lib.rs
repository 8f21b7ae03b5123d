//! Document store access for the notes API
//!
//! The HTTP layer only talks to [`NoteStore`]. Two backends implement it:
//!
//! - [`SurrealNoteStore`]: SurrealDB via the `any` engine (`ws://`, `http://`, `mem://`)
//! - [`MemoryNoteStore`]: a fixed in-process snapshot, for tests and demos

pub mod error;
pub mod memory;
pub mod store;
pub mod surreal;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryNoteStore;
pub use store::NoteStore;
pub use surreal::SurrealNoteStore;
pub use types::{FolderCount, FolderName, Note, NoteQuery, Window};
