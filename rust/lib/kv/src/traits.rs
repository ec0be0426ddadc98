use crate::error::KVError;

/// KVStore provides the minimal key-value interface the workflow layer
/// persists through.
///
/// Keys are unprefixed record names (`users`, `pendingItems`, ...); each
/// value is the full JSON serialization of that record. Writers replace the
/// whole value, readers take the latest committed one.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value whole.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), KVError>;
}
