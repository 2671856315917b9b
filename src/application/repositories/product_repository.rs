use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::{dto::product_dto::ProductUpdate, error::ApplicationError},
    domain::models::{file::FileMetadata, product::Product},
};

/// CRUD over product documents, including the embedded file-metadata list.
///
/// Absence is a value here, not an error: `find_*` return `Option`, the
/// mutation methods return the modified/deleted count so callers can tell
/// "matched but nothing changed" from "not found". `ApplicationError` is
/// reserved for driver/transport faults.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApplicationError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ApplicationError>;

    async fn find_all(&self) -> Result<Vec<Product>, ApplicationError>;

    /// Inserts the product; `Conflict` if the name is already taken.
    async fn insert(&self, product: Product) -> Result<Uuid, ApplicationError>;

    /// Applies the non-null fields of `update`, returning the modified count.
    async fn update_fields(&self, id: Uuid, update: ProductUpdate)
        -> Result<u64, ApplicationError>;

    /// Appends a file entry (add-if-absent), returning the modified count.
    async fn append_file_metadata(
        &self,
        id: Uuid,
        metadata: FileMetadata,
    ) -> Result<u64, ApplicationError>;

    /// Replaces the list entry matching both the product and file id.
    async fn replace_file_metadata(
        &self,
        id: Uuid,
        file_id: Uuid,
        metadata: FileMetadata,
    ) -> Result<u64, ApplicationError>;

    /// Removes the list entry matching the file id.
    async fn remove_file_metadata(&self, id: Uuid, file_id: Uuid)
        -> Result<u64, ApplicationError>;

    /// Deletes the product document, returning the deleted count.
    async fn delete(&self, id: Uuid) -> Result<u64, ApplicationError>;

    /// Resolves a single file entry, used to learn a blob's current storage
    /// key before mutating it.
    async fn get_file_entry(
        &self,
        id: Uuid,
        file_id: Uuid,
    ) -> Result<Option<FileMetadata>, ApplicationError>;
}
