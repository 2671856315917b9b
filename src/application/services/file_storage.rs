use async_trait::async_trait;

use crate::services::StorageError;

/// Raw blob persistence. Keys are derived deterministically from `name`,
/// so callers control collision behavior through the name they pass in.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Writes `content` under a key derived from `name` and returns that key.
    async fn store(&self, content: &[u8], name: &str) -> Result<String, StorageError>;

    /// Removes the blob at `key`. A missing blob is a no-op and unexpected
    /// faults are logged and swallowed, so a delete can never block a
    /// mutation that already committed elsewhere.
    async fn delete(&self, key: &str);
}
