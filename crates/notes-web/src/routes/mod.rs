mod folders;
mod health;
mod notes;
mod root;

pub use folders::folder_routes;
pub use health::health_routes;
pub use notes::notes_routes;
pub use root::root_routes;

use serde::Serialize;

/// `{"data": ...}` envelope used by the non-paginated endpoints
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
