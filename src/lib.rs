pub mod adapters;
pub mod application;
pub mod domain;
pub mod services;

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::{
    controllers::{file_controller::FileController, product_controller::ProductController},
    state::AppState,
};

/// Builds the full route table over the given state. Exposed so tests can
/// drive the service in-process without binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/products",
            post(ProductController::create_product).get(ProductController::get_all_products),
        )
        .route(
            "/products/{product_id}",
            get(ProductController::get_product)
                .patch(ProductController::update_product)
                .delete(ProductController::delete_product),
        )
        .route("/files/all/{product_id}", get(FileController::get_all_files))
        .route("/files/single/{product_id}", get(FileController::get_file))
        .route(
            "/files/{product_id}",
            post(FileController::upload_file)
                .patch(FileController::update_file)
                .delete(FileController::delete_file),
        )
        .with_state(state)
}
