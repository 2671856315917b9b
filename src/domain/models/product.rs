use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::file::FileMetadata;

/// Product document as persisted:
/// `{_id, name, type, stock, image: [{file_id, url, name, size, type}]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub stock: u32,
    #[serde(rename = "image", default)]
    pub files: Vec<FileMetadata>,
}

impl Product {
    pub fn new(name: String, kind: String, stock: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            kind,
            stock,
            files: Vec::new(),
        }
    }

    pub fn file_entry(&self, file_id: Uuid) -> Option<&FileMetadata> {
        self.files.iter().find(|f| f.file_id == file_id)
    }
}
