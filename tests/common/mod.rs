#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use axum::Router;
use tempfile::TempDir;
use uuid::Uuid;

use product_service::{
    adapters::state::AppState,
    application::{
        dto::product_dto::ProductUpdate,
        error::ApplicationError,
        repositories::product_repository::ProductRepository,
        services::{FileStorage, ProductFileService},
    },
    domain::models::{file::FileMetadata, product::Product},
    router,
    services::LocalFileStorage,
};

/// In-memory stand-in for the document store, with the same outcome
/// semantics: absence is `None`/zero counts, duplicate names are `Conflict`.
#[derive(Default)]
pub struct MemoryProductRepository {
    products: Mutex<HashMap<Uuid, Product>>,
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApplicationError> {
        Ok(self.products.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ApplicationError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .values()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, ApplicationError> {
        Ok(self.products.lock().unwrap().values().cloned().collect())
    }

    async fn insert(&self, product: Product) -> Result<Uuid, ApplicationError> {
        let mut products = self.products.lock().unwrap();
        if products.values().any(|p| p.name == product.name) {
            return Err(ApplicationError::Conflict);
        }
        let id = product.id;
        products.insert(id, product);
        Ok(id)
    }

    async fn update_fields(
        &self,
        id: Uuid,
        update: ProductUpdate,
    ) -> Result<u64, ApplicationError> {
        let mut products = self.products.lock().unwrap();
        let Some(product) = products.get_mut(&id) else {
            return Ok(0);
        };

        let mut modified = false;
        if let Some(name) = update.name {
            modified |= product.name != name;
            product.name = name;
        }
        if let Some(kind) = update.kind {
            modified |= product.kind != kind;
            product.kind = kind;
        }
        if let Some(stock) = update.stock {
            modified |= product.stock != stock;
            product.stock = stock;
        }
        Ok(modified as u64)
    }

    async fn append_file_metadata(
        &self,
        id: Uuid,
        metadata: FileMetadata,
    ) -> Result<u64, ApplicationError> {
        let mut products = self.products.lock().unwrap();
        let Some(product) = products.get_mut(&id) else {
            return Ok(0);
        };
        if product.files.contains(&metadata) {
            return Ok(0);
        }
        product.files.push(metadata);
        Ok(1)
    }

    async fn replace_file_metadata(
        &self,
        id: Uuid,
        file_id: Uuid,
        metadata: FileMetadata,
    ) -> Result<u64, ApplicationError> {
        let mut products = self.products.lock().unwrap();
        let Some(product) = products.get_mut(&id) else {
            return Ok(0);
        };
        match product.files.iter_mut().find(|f| f.file_id == file_id) {
            Some(entry) => {
                *entry = metadata;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove_file_metadata(
        &self,
        id: Uuid,
        file_id: Uuid,
    ) -> Result<u64, ApplicationError> {
        let mut products = self.products.lock().unwrap();
        let Some(product) = products.get_mut(&id) else {
            return Ok(0);
        };
        let before = product.files.len();
        product.files.retain(|f| f.file_id != file_id);
        Ok((before - product.files.len()) as u64)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ApplicationError> {
        Ok(self.products.lock().unwrap().remove(&id).is_some() as u64)
    }

    async fn get_file_entry(
        &self,
        id: Uuid,
        file_id: Uuid,
    ) -> Result<Option<FileMetadata>, ApplicationError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .get(&id)
            .and_then(|p| p.file_entry(file_id).cloned()))
    }
}

/// Delegating repository that injects faults into the list mutations, for
/// exercising the compensation paths.
pub struct FailingRepository {
    pub inner: Arc<MemoryProductRepository>,
    pub fail_append: AtomicBool,
    pub fail_replace: AtomicBool,
    /// Makes `remove_file_metadata` report zero modifications while leaving
    /// the entry in place (a silently no-op'd removal).
    pub noop_remove: AtomicBool,
}

impl FailingRepository {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryProductRepository::default()),
            fail_append: AtomicBool::new(false),
            fail_replace: AtomicBool::new(false),
            noop_remove: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ProductRepository for FailingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApplicationError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ApplicationError> {
        self.inner.find_by_name(name).await
    }

    async fn find_all(&self) -> Result<Vec<Product>, ApplicationError> {
        self.inner.find_all().await
    }

    async fn insert(&self, product: Product) -> Result<Uuid, ApplicationError> {
        self.inner.insert(product).await
    }

    async fn update_fields(
        &self,
        id: Uuid,
        update: ProductUpdate,
    ) -> Result<u64, ApplicationError> {
        self.inner.update_fields(id, update).await
    }

    async fn append_file_metadata(
        &self,
        id: Uuid,
        metadata: FileMetadata,
    ) -> Result<u64, ApplicationError> {
        if self.fail_append.load(Ordering::SeqCst) {
            return Err(ApplicationError::DatabaseError("injected fault".to_string()));
        }
        self.inner.append_file_metadata(id, metadata).await
    }

    async fn replace_file_metadata(
        &self,
        id: Uuid,
        file_id: Uuid,
        metadata: FileMetadata,
    ) -> Result<u64, ApplicationError> {
        if self.fail_replace.load(Ordering::SeqCst) {
            return Err(ApplicationError::DatabaseError("injected fault".to_string()));
        }
        self.inner.replace_file_metadata(id, file_id, metadata).await
    }

    async fn remove_file_metadata(
        &self,
        id: Uuid,
        file_id: Uuid,
    ) -> Result<u64, ApplicationError> {
        if self.noop_remove.load(Ordering::SeqCst) {
            return Ok(0);
        }
        self.inner.remove_file_metadata(id, file_id).await
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ApplicationError> {
        self.inner.delete(id).await
    }

    async fn get_file_entry(
        &self,
        id: Uuid,
        file_id: Uuid,
    ) -> Result<Option<FileMetadata>, ApplicationError> {
        self.inner.get_file_entry(id, file_id).await
    }
}

pub fn storage(dir: &TempDir) -> Arc<dyn FileStorage> {
    Arc::new(LocalFileStorage::new(dir.path()))
}

pub fn service(repository: Arc<dyn ProductRepository>, dir: &TempDir) -> ProductFileService {
    ProductFileService::new(repository, storage(dir))
}

/// Full in-process application over the in-memory repository.
pub fn app(dir: &TempDir) -> (Router, Arc<dyn ProductRepository>) {
    let repository = Arc::new(MemoryProductRepository::default()) as Arc<dyn ProductRepository>;
    let state = AppState {
        product_repository: repository.clone(),
        product_files: Arc::new(ProductFileService::new(repository.clone(), storage(dir))),
    };
    (router(state), repository)
}

pub fn blob_count(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Builds a multipart body carrying a single `file` part.
pub fn multipart_body(filename: &str, content_type: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}
