use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw upload payload extracted from a multipart request.
#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: String, content_type: String) -> Self {
        Self {
            content,
            filename,
            content_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// One entry of a product's embedded file list. Serialized field names match
/// the persisted document layout, so the same struct serves BSON and JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub file_id: Uuid,
    /// Storage key the blob lives under.
    pub url: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}
