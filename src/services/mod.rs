mod error;
mod local_file_storage;

pub use error::StorageError;
pub use local_file_storage::LocalFileStorage;
