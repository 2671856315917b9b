use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use uuid::Uuid;

use crate::{
    application::{
        dto::product_dto::ProductUpdate, error::ApplicationError,
        repositories::product_repository::ProductRepository,
    },
    domain::models::{file::FileMetadata, product::Product},
};

pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("products"),
        }
    }

    /// Creates the unique index on `name`; the document store enforces name
    /// uniqueness so insert maps a duplicate-key fault to `Conflict` instead
    /// of racing a check-then-insert.
    pub async fn ensure_indexes(&self) -> Result<(), ApplicationError> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn metadata_document(metadata: &FileMetadata) -> Result<Document, ApplicationError> {
        match to_bson(metadata) {
            Ok(mongodb::bson::Bson::Document(doc)) => Ok(doc),
            Ok(_) => Err(ApplicationError::InternalError(
                "file metadata did not serialize to a document".to_string(),
            )),
            Err(e) => Err(ApplicationError::InternalError(e.to_string())),
        }
    }

    fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
        if let ErrorKind::Write(WriteFailure::WriteError(ref write_error)) = *error.kind {
            write_error.code == 11000
        } else {
            false
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApplicationError> {
        self.collection
            .find_one(doc! { "_id": id.to_string() })
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ApplicationError> {
        self.collection
            .find_one(doc! { "name": name })
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Product>, ApplicationError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))
    }

    async fn insert(&self, product: Product) -> Result<Uuid, ApplicationError> {
        let id = product.id;
        self.collection.insert_one(&product).await.map_err(|e| {
            if Self::is_duplicate_key(&e) {
                ApplicationError::Conflict
            } else {
                ApplicationError::DatabaseError(e.to_string())
            }
        })?;
        Ok(id)
    }

    async fn update_fields(
        &self,
        id: Uuid,
        update: ProductUpdate,
    ) -> Result<u64, ApplicationError> {
        let mut set = Document::new();
        if let Some(name) = update.name {
            set.insert("name", name);
        }
        if let Some(kind) = update.kind {
            set.insert("type", kind);
        }
        if let Some(stock) = update.stock {
            set.insert("stock", stock as i64);
        }

        if set.is_empty() {
            return Ok(0);
        }

        let result = self
            .collection
            .update_one(doc! { "_id": id.to_string() }, doc! { "$set": set })
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(result.modified_count)
    }

    async fn append_file_metadata(
        &self,
        id: Uuid,
        metadata: FileMetadata,
    ) -> Result<u64, ApplicationError> {
        let entry = Self::metadata_document(&metadata)?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.to_string() },
                doc! { "$addToSet": { "image": entry } },
            )
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(result.modified_count)
    }

    async fn replace_file_metadata(
        &self,
        id: Uuid,
        file_id: Uuid,
        metadata: FileMetadata,
    ) -> Result<u64, ApplicationError> {
        let entry = Self::metadata_document(&metadata)?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.to_string(), "image.file_id": file_id.to_string() },
                doc! { "$set": { "image.$": entry } },
            )
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(result.modified_count)
    }

    async fn remove_file_metadata(
        &self,
        id: Uuid,
        file_id: Uuid,
    ) -> Result<u64, ApplicationError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.to_string() },
                doc! { "$pull": { "image": { "file_id": file_id.to_string() } } },
            )
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(result.modified_count)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ApplicationError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(result.deleted_count)
    }

    async fn get_file_entry(
        &self,
        id: Uuid,
        file_id: Uuid,
    ) -> Result<Option<FileMetadata>, ApplicationError> {
        let product = self.find_by_id(id).await?;
        Ok(product.and_then(|p| p.file_entry(file_id).cloned()))
    }
}
