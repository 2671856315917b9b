use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    adapters::dto::product_dto::{CreateProductRequest, DetailResponse, StatusResponse},
    application::{
        dto::product_dto::ProductUpdate, error::ApplicationError,
        repositories::product_repository::ProductRepository,
    },
    domain::models::product::Product,
};

pub struct ProductController;

impl ProductController {
    /// POST /products
    pub async fn create_product(
        State(repo): State<Arc<dyn ProductRepository>>,
        Json(body): Json<CreateProductRequest>,
    ) -> Result<Json<String>, ApplicationError> {
        let product = Product::new(body.name, body.kind, body.stock);
        let id = repo.insert(product).await?;
        info!(%id, "product created");
        Ok(Json(id.to_string()))
    }

    /// GET /products
    pub async fn get_all_products(
        State(repo): State<Arc<dyn ProductRepository>>,
    ) -> Result<Json<Vec<Product>>, ApplicationError> {
        let products = repo.find_all().await?;
        Ok(Json(products))
    }

    /// GET /products/{product_id}
    pub async fn get_product(
        State(repo): State<Arc<dyn ProductRepository>>,
        Path(product_id): Path<Uuid>,
    ) -> Result<Json<Product>, ApplicationError> {
        let product = repo
            .find_by_id(product_id)
            .await?
            .ok_or(ApplicationError::NotFound)?;
        Ok(Json(product))
    }

    /// PATCH /products/{product_id}
    pub async fn update_product(
        State(repo): State<Arc<dyn ProductRepository>>,
        Path(product_id): Path<Uuid>,
        Json(body): Json<ProductUpdate>,
    ) -> Result<Json<StatusResponse>, ApplicationError> {
        repo.find_by_id(product_id)
            .await?
            .ok_or(ApplicationError::NotFound)?;

        if body.is_empty() {
            return Err(ApplicationError::NothingUpdated);
        }

        let modified = repo.update_fields(product_id, body).await?;
        if modified == 0 {
            return Err(ApplicationError::NothingUpdated);
        }

        info!(%product_id, "product updated");
        Ok(Json(StatusResponse::ok("Product updated successfully")))
    }

    /// DELETE /products/{product_id}
    ///
    /// Blobs referenced by the product are left in storage; deleting a
    /// product releases only the document, matching the established API
    /// behavior.
    pub async fn delete_product(
        State(repo): State<Arc<dyn ProductRepository>>,
        Path(product_id): Path<Uuid>,
    ) -> Result<Json<DetailResponse>, ApplicationError> {
        let deleted = repo.delete(product_id).await?;
        if deleted == 0 {
            return Err(ApplicationError::NotFound);
        }

        info!(%product_id, "product deleted");
        Ok(Json(DetailResponse::new("Product deleted successfully")))
    }
}
