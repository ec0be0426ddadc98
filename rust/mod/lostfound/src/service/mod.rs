pub mod claims;
pub mod identity;
pub mod policy;
pub mod query;
pub mod workflow;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use lostfound_core::ServiceError;
use lostfound_kv::KVStore;

/// Workflow service error type.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Missing or malformed required input.
    #[error("{0}")]
    Validation(String),

    /// Unauthenticated, or the session's role does not permit the action.
    #[error("{0}")]
    Auth(String),

    /// Restricted-category posting violation.
    #[error("{0}")]
    Policy(String),

    /// Referenced item id is absent from the expected collection.
    #[error("{0}")]
    NotFound(String),

    /// Write to the backing store failed.
    #[error("{0}")]
    Storage(String),
}

impl From<WorkflowError> for ServiceError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::Validation(m) => ServiceError::Validation(m),
            WorkflowError::Auth(m) => ServiceError::Unauthorized(m),
            WorkflowError::Policy(m) => ServiceError::PermissionDenied(m),
            WorkflowError::NotFound(m) => ServiceError::NotFound(m),
            WorkflowError::Storage(m) => ServiceError::Storage(m),
        }
    }
}

/// Fold a username (or other case-insensitive key) for comparison.
/// Unicode-aware: "Émile" and "émile" are the same account.
pub(crate) fn norm_user(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Store key for each persisted record. Five independent keys; every value
/// is the full JSON serialization of its collection.
pub mod keys {
    pub const USERS: &str = "users";
    pub const CURRENT_USER: &str = "currentUser";
    pub const PENDING_ITEMS: &str = "pendingItems";
    pub const APPROVED_ITEMS: &str = "approvedItems";
    pub const CLAIMS: &str = "claims";
}

/// Lost-and-found workflow service — holds the KV store and provides all
/// business logic. Every operation is a full read-modify-write cycle
/// against the store; no entity is cached across calls.
pub struct LostFoundService {
    pub(crate) kv: Arc<dyn KVStore>,
}

impl LostFoundService {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    // ── Store helpers ──

    /// Read and deserialize a key, degrading to `fallback` on a missing
    /// key, corrupt bytes, or a backend error. Reads never fail the caller;
    /// they only log.
    pub(crate) fn load_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let bytes = match self.kv.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return fallback,
            Err(e) => {
                tracing::warn!(key, error = %e, "store read failed, using fallback");
                return fallback;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt record, using fallback");
                fallback
            }
        }
    }

    /// Serialize and replace a key's value whole.
    pub(crate) fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), WorkflowError> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| WorkflowError::Storage(format!("serialize {}: {}", key, e)))?;
        self.kv
            .set(key, &bytes)
            .map_err(|e| WorkflowError::Storage(format!("write {}: {}", key, e)))
    }

    pub(crate) fn delete_key(&self, key: &str) -> Result<(), WorkflowError> {
        self.kv
            .delete(key)
            .map_err(|e| WorkflowError::Storage(format!("delete {}: {}", key, e)))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::test_service;
    use super::*;
    use crate::model::User;

    #[test]
    fn load_or_falls_back_on_missing_key() {
        let svc = test_service();
        let users: Vec<User> = svc.load_or(keys::USERS, Vec::new());
        assert!(users.is_empty());
    }

    #[test]
    fn load_or_falls_back_on_corrupt_bytes() {
        let svc = test_service();
        svc.kv.set(keys::USERS, b"{not json").unwrap();
        let users: Vec<User> = svc.load_or(keys::USERS, Vec::new());
        assert!(users.is_empty());
    }

    #[test]
    fn state_survives_store_reopen() {
        use lostfound_kv::RedbStore;

        let tmp = tempfile::NamedTempFile::new().unwrap();
        {
            let kv = Arc::new(RedbStore::open(tmp.path()).unwrap());
            let svc = LostFoundService::new(kv);
            svc.sign_up("j.lee", "pw", crate::model::Role::Finder).unwrap();
        }
        let kv = Arc::new(RedbStore::open(tmp.path()).unwrap());
        let svc = LostFoundService::new(kv);
        let users: Vec<User> = svc.load_or(keys::USERS, Vec::new());
        assert_eq!(users.len(), 1);
        assert!(svc.log_in("j.lee", "pw").is_ok());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let svc = test_service();
        let users = vec![User {
            username: "j.lee".into(),
            password: "pw".into(),
            role: crate::model::Role::Finder,
        }];
        svc.save(keys::USERS, &users).unwrap();
        let back: Vec<User> = svc.load_or(keys::USERS, Vec::new());
        assert_eq!(back, users);
    }
}
