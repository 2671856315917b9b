use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    adapters::dto::{file_dto::FileQuery, product_dto::StatusResponse},
    application::{error::ApplicationError, services::ProductFileService},
    domain::models::file::{FileData, FileMetadata},
};

pub struct FileController;

impl FileController {
    /// GET /files/all/{product_id}
    pub async fn get_all_files(
        State(service): State<Arc<ProductFileService>>,
        Path(product_id): Path<Uuid>,
    ) -> Result<Json<Vec<FileMetadata>>, ApplicationError> {
        let files = service.list(product_id).await?;
        Ok(Json(files))
    }

    /// GET /files/single/{product_id}?file_id=
    pub async fn get_file(
        State(service): State<Arc<ProductFileService>>,
        Path(product_id): Path<Uuid>,
        Query(query): Query<FileQuery>,
    ) -> Result<Json<FileMetadata>, ApplicationError> {
        let file = service.get(product_id, query.file_id).await?;
        Ok(Json(file))
    }

    /// POST /files/{product_id}
    pub async fn upload_file(
        State(service): State<Arc<ProductFileService>>,
        Path(product_id): Path<Uuid>,
        multipart: Multipart,
    ) -> Result<Json<StatusResponse>, ApplicationError> {
        let file = read_file_field(multipart).await?;
        service.upload(product_id, file).await?;
        Ok(Json(StatusResponse::ok("File saved successfully")))
    }

    /// PATCH /files/{product_id}?file_id=
    pub async fn update_file(
        State(service): State<Arc<ProductFileService>>,
        Path(product_id): Path<Uuid>,
        Query(query): Query<FileQuery>,
        multipart: Multipart,
    ) -> Result<Json<StatusResponse>, ApplicationError> {
        let file = read_file_field(multipart).await?;
        service.replace(product_id, query.file_id, file).await?;
        Ok(Json(StatusResponse::ok("File updated successfully")))
    }

    /// DELETE /files/{product_id}?file_id=
    pub async fn delete_file(
        State(service): State<Arc<ProductFileService>>,
        Path(product_id): Path<Uuid>,
        Query(query): Query<FileQuery>,
    ) -> Result<Json<StatusResponse>, ApplicationError> {
        service.delete(product_id, query.file_id).await?;
        Ok(Json(StatusResponse::ok("File deleted successfully")))
    }
}

/// Pulls the `file` part out of a multipart body, keeping its filename and
/// declared content type.
async fn read_file_field(mut multipart: Multipart) -> Result<FileData, ApplicationError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Invalid multipart data: {}", e);
        ApplicationError::BadRequest("Invalid request format".to_string())
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| {
                warn!("Cannot read file bytes: {}", e);
                ApplicationError::BadRequest("Invalid file data".to_string())
            })?
            .to_vec();

        return Ok(FileData::new(content, filename, content_type));
    }

    warn!("Missing required 'file' field in upload");
    Err(ApplicationError::BadRequest(
        "Missing required field".to_string(),
    ))
}
