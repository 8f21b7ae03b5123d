pub mod pagination;
pub mod routes;
pub mod server;
pub mod services;

mod error;

pub use error::{Result, WebError};
pub use pagination::PageRequest;
pub use server::{build_router, start_server};
pub use services::store::AppState;
