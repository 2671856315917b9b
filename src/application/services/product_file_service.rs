use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    application::{
        error::ApplicationError,
        repositories::product_repository::ProductRepository,
        services::FileStorage,
    },
    domain::models::{
        file::{FileData, FileMetadata},
        product::Product,
    },
};

/// Orchestrates file upload, replacement and deletion against both the blob
/// store and the product document, keeping the two consistent: a file entry
/// exists in a product's list iff its blob exists at the recorded key.
///
/// Mutations write storage before metadata on creation and metadata before
/// storage on removal, so the only reachable inconsistent state is a
/// stored-but-unlinked blob, which the compensation paths delete again.
/// A per-product lock serializes the read-check-mutate sequences, so two
/// concurrent mutations on the same product cannot race past each other's
/// existence checks.
pub struct ProductFileService {
    repository: Arc<dyn ProductRepository>,
    storage: Arc<dyn FileStorage>,
    locks: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl ProductFileService {
    pub fn new(repository: Arc<dyn ProductRepository>, storage: Arc<dyn FileStorage>) -> Self {
        Self {
            repository,
            storage,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn lock_product(&self, product_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap();
            // Entries nobody else holds a clone of belong to finished
            // operations; drop them so the map stays bounded by live work.
            locks.retain(|id, lock| *id == product_id || Arc::strong_count(lock) > 1);
            locks
                .entry(product_id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    async fn require_product(&self, product_id: Uuid) -> Result<Product, ApplicationError> {
        self.repository
            .find_by_id(product_id)
            .await?
            .ok_or(ApplicationError::NotFound)
    }

    /// Stores the upload and links it to the product. If linking fails, the
    /// just-stored blob is deleted before the error is returned, so a failed
    /// upload leaves no orphan behind.
    pub async fn upload(
        &self,
        product_id: Uuid,
        file: FileData,
    ) -> Result<FileMetadata, ApplicationError> {
        let _guard = self.lock_product(product_id).await;
        self.require_product(product_id).await?;

        let file_id = Uuid::new_v4();
        let metadata = self.store_blob(file_id, &file).await?;
        let blob = StoredBlob::new(self.storage.clone(), metadata.url.clone());

        match self
            .repository
            .append_file_metadata(product_id, metadata.clone())
            .await
        {
            Ok(0) => {
                blob.discard().await;
                Err(ApplicationError::BadRequest(
                    "File could not be saved".to_string(),
                ))
            }
            Ok(_) => {
                blob.commit();
                info!(%product_id, %file_id, "file uploaded");
                Ok(metadata)
            }
            Err(e) => {
                blob.discard().await;
                Err(e)
            }
        }
    }

    /// Replaces the blob behind an existing file entry, keeping the file id.
    /// The old blob is only deleted once the document update is confirmed;
    /// on failure the new blob is deleted and the old entry stays linked.
    pub async fn replace(
        &self,
        product_id: Uuid,
        file_id: Uuid,
        file: FileData,
    ) -> Result<FileMetadata, ApplicationError> {
        let _guard = self.lock_product(product_id).await;
        self.require_product(product_id).await?;

        let old = self
            .repository
            .get_file_entry(product_id, file_id)
            .await?
            .ok_or(ApplicationError::NotFound)?;

        let metadata = self.store_blob(file_id, &file).await?;
        let blob = StoredBlob::new(self.storage.clone(), metadata.url.clone());

        match self
            .repository
            .replace_file_metadata(product_id, file_id, metadata.clone())
            .await
        {
            Ok(0) => {
                blob.discard().await;
                Err(ApplicationError::NotFound)
            }
            Ok(_) => {
                blob.commit();
                self.storage.delete(&old.url).await;
                info!(%product_id, %file_id, "file replaced");
                Ok(metadata)
            }
            Err(e) => {
                blob.discard().await;
                Err(e)
            }
        }
    }

    /// Unlinks the file entry, then deletes its blob. Storage is never
    /// touched unless the document update confirmed the removal, so a
    /// silently no-op'd removal cannot delete a blob that is still linked.
    pub async fn delete(&self, product_id: Uuid, file_id: Uuid) -> Result<(), ApplicationError> {
        let _guard = self.lock_product(product_id).await;
        self.require_product(product_id).await?;

        let entry = self
            .repository
            .get_file_entry(product_id, file_id)
            .await?
            .ok_or(ApplicationError::NotFound)?;

        let modified = self
            .repository
            .remove_file_metadata(product_id, file_id)
            .await?;
        if modified == 0 {
            return Err(ApplicationError::NotFound);
        }

        self.storage.delete(&entry.url).await;
        info!(%product_id, %file_id, "file deleted");
        Ok(())
    }

    pub async fn list(&self, product_id: Uuid) -> Result<Vec<FileMetadata>, ApplicationError> {
        let product = self.require_product(product_id).await?;
        Ok(product.files)
    }

    pub async fn get(
        &self,
        product_id: Uuid,
        file_id: Uuid,
    ) -> Result<FileMetadata, ApplicationError> {
        self.require_product(product_id).await?;
        self.repository
            .get_file_entry(product_id, file_id)
            .await?
            .ok_or(ApplicationError::NotFound)
    }

    async fn store_blob(
        &self,
        file_id: Uuid,
        file: &FileData,
    ) -> Result<FileMetadata, ApplicationError> {
        // Every store gets a key derived from a fresh token: unrelated
        // uploads sharing a filename cannot clobber each other, and a
        // replacement never lands on the key of the blob it replaces, so a
        // compensating delete of the new blob cannot take a linked blob with
        // it. The file id lives only in the metadata entry.
        let storage_name = format!("{}-{}", Uuid::new_v4(), file.filename);
        let key = self.storage.store(&file.content, &storage_name).await?;

        Ok(FileMetadata {
            file_id,
            url: key,
            name: file.filename.clone(),
            size: file.size(),
            content_type: file.content_type.clone(),
        })
    }
}

/// Scope guard for a blob that has been stored but not yet linked to a
/// product. Explicit failure paths call `discard`, which awaits the delete so
/// compensation finishes before the error surfaces; if the task is cancelled
/// between store and link, `Drop` spawns the same delete instead.
struct StoredBlob {
    storage: Arc<dyn FileStorage>,
    key: Option<String>,
}

impl StoredBlob {
    fn new(storage: Arc<dyn FileStorage>, key: String) -> Self {
        Self {
            storage,
            key: Some(key),
        }
    }

    /// The blob is linked now; leave it alone.
    fn commit(mut self) {
        self.key = None;
    }

    /// Compensate: delete the unlinked blob before returning the error.
    async fn discard(mut self) {
        if let Some(key) = self.key.take() {
            warn!(key, "compensating: deleting unlinked blob");
            self.storage.delete(&key).await;
        }
    }
}

impl Drop for StoredBlob {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            warn!(key, "request aborted with unlinked blob, scheduling delete");
            let storage = self.storage.clone();
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move { storage.delete(&key).await });
            }
        }
    }
}
