use std::sync::Arc;

use axum::extract::FromRef;

use crate::application::{
    repositories::product_repository::ProductRepository, services::ProductFileService,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub product_repository: Arc<dyn ProductRepository>,
    pub product_files: Arc<ProductFileService>,
}
