use std::sync::Arc;

use product_service::{
    adapters::{repositories::MongoProductRepository, state::AppState},
    application::{
        repositories::product_repository::ProductRepository,
        services::{FileStorage, ProductFileService},
    },
    router,
    services::LocalFileStorage,
};
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let mongodb_url = std::env::var("MONGODB_URL")
        .expect("ERROR: MONGODB_URL environment variable must be set");

    let database_name = std::env::var("MONGODB_DB").unwrap_or_else(|_| "products".to_string());

    let file_dir = std::env::var("FILE_DIR").unwrap_or_else(|_| "file".to_string());

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid u16");

    // Configure CORS
    let cors = if let Ok(allowed_origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
        // Parse comma-separated origins
        let origins: Vec<_> = allowed_origins
            .split(',')
            .map(|s| s.trim().parse().expect("Invalid CORS origin"))
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Allow all origins if not specified (only for development)
        CorsLayer::permissive()
    };

    tracing::info!("Connecting to document store...");
    let client = mongodb::Client::with_uri_str(&mongodb_url)
        .await
        .expect("ERROR: Failed to connect to MongoDB. Check MONGODB_URL and network connectivity.");
    let database = client.database(&database_name);

    let repository = MongoProductRepository::new(&database);
    repository
        .ensure_indexes()
        .await
        .expect("Failed to create product indexes");
    tracing::info!("Document store connection established");

    std::fs::create_dir_all(&file_dir).expect("Failed to create file storage directory");

    let repository = Arc::new(repository) as Arc<dyn ProductRepository>;
    let storage = Arc::new(LocalFileStorage::new(&file_dir)) as Arc<dyn FileStorage>;

    let app_state = AppState {
        product_repository: repository.clone(),
        product_files: Arc::new(ProductFileService::new(repository, storage)),
    };

    let router = router(app_state).layer(cors);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
