use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, error};

use crate::{application::services::FileStorage, services::error::StorageError};

/// Filesystem-backed blob store. Blobs live directly under `base_path`;
/// the returned key is the full path as a string.
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn derive_key(&self, name: &str) -> PathBuf {
        // Flatten path separators and shell-hostile characters out of the
        // name so a key can never escape the base directory.
        let safe_name = name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect::<String>();
        self.base_path.join(safe_name)
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, content: &[u8], name: &str) -> Result<String, StorageError> {
        let path = self.derive_key(name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&path).await?;
        file.write_all(content).await?;
        file.flush().await?;

        debug!("stored {} bytes at {:?}", content.len(), path);
        Ok(path.to_string_lossy().into_owned())
    }

    async fn delete(&self, key: &str) {
        match fs::remove_file(Path::new(key)).await {
            Ok(()) => debug!("deleted blob at {}", key),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => error!("failed to delete blob at {}: {}", key, e),
        }
    }
}
