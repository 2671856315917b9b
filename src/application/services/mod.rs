pub mod file_storage;
pub mod product_file_service;

pub use file_storage::FileStorage;
pub use product_file_service::ProductFileService;
