//! # Storage Layer
//!
//! The board persists to a plain string-keyed key-value medium. [`StorageBackend`]
//! is that medium: synchronous `read`/`write`/`remove` of whole string values, no
//! transactions, no change notification.
//!
//! ## Layout
//!
//! Each collection lives under its own key, namespaced so several boards can share
//! one medium:
//!
//! | Key                            | Value                               |
//! |--------------------------------|-------------------------------------|
//! | `{ns}-jobs`                    | JSON array of `JobPosting`          |
//! | `{ns}-applications`            | JSON array of `Application`         |
//! | `{ns}-favorites`               | JSON array of job ids               |
//! | `{ns}-pinned`                  | JSON array of job ids               |
//! | `{ns}-session`                 | JSON `Session` (identity provider)  |
//!
//! The default namespace is `faculty-connect`.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key, atomic writes. Production.
//! - [`mem_backend::MemBackend`]: a `HashMap` behind a `RefCell`. Testing.
//!
//! ## The Store
//!
//! [`job_store::JobStore`] sits on top of a backend and owns the in-memory
//! collections. It is the only writer of the collection keys.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod fs_backend;
pub mod job_store;
pub mod mem_backend;

pub const DEFAULT_NAMESPACE: &str = "faculty-connect";

/// Abstract interface for the persistent key-value medium.
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) when nothing is stored; Err only on actual I/O failure.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Human-readable description of where values live.
    fn location(&self) -> String;
}

/// The fixed entries the board keeps in the medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Jobs,
    Applications,
    Favorites,
    Pinned,
    Session,
}

impl StorageKey {
    fn suffix(self) -> &'static str {
        match self {
            StorageKey::Jobs => "jobs",
            StorageKey::Applications => "applications",
            StorageKey::Favorites => "favorites",
            StorageKey::Pinned => "pinned",
            StorageKey::Session => "session",
        }
    }
}

/// Maps [`StorageKey`]s to concrete key strings for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    namespace: String,
}

impl Default for Keyspace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl Keyspace {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self, key: StorageKey) -> String {
        format!("{}-{}", self.namespace, key.suffix())
    }
}

/// Read and decode a JSON value. A missing key decodes to `None`.
pub fn read_json<B, T>(backend: &B, key: &str) -> Result<Option<T>>
where
    B: StorageBackend + ?Sized,
    T: DeserializeOwned,
{
    match backend.read(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn write_json<B, T>(backend: &B, key: &str, value: &T) -> Result<()>
where
    B: StorageBackend + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    backend.write(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn keys_are_namespaced() {
        let keys = Keyspace::default();
        assert_eq!(keys.key(StorageKey::Jobs), "faculty-connect-jobs");
        assert_eq!(keys.key(StorageKey::Pinned), "faculty-connect-pinned");

        let custom = Keyspace::new("staging");
        assert_eq!(custom.key(StorageKey::Applications), "staging-applications");
    }

    #[test]
    fn read_json_missing_key_is_none() {
        let backend = MemBackend::new();
        let value: Option<Vec<String>> = read_json(&backend, "nope").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn read_json_rejects_malformed_value() {
        let backend = MemBackend::new();
        backend.set_raw("bad", "{not json");
        let value: Result<Option<Vec<String>>> = read_json(&backend, "bad");
        assert!(value.is_err());
    }

    #[test]
    fn write_then_read_json() {
        let backend = MemBackend::new();
        write_json(&backend, "ids", &vec!["a".to_string(), "b".to_string()]).unwrap();
        let value: Option<Vec<String>> = read_json(&backend, "ids").unwrap();
        assert_eq!(value, Some(vec!["a".to_string(), "b".to_string()]));
    }
}
