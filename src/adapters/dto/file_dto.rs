use serde::Deserialize;
use uuid::Uuid;

/// `?file_id=` query parameter on the single-file routes.
#[derive(Debug, Deserialize)]
pub struct FileQuery {
    pub file_id: Uuid,
}
