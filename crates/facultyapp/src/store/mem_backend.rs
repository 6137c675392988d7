use super::StorageBackend;
use crate::error::{FacultyError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the board is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` without paying for a lock.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Test helper to plant a value directly, bypassing write error simulation.
    pub fn set_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Test helper returning the raw stored value.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(FacultyError::Store("Simulated read error".to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(FacultyError::Store("Simulated write error".to_string()));
        }
        self.set_raw(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(FacultyError::Store("Simulated write error".to_string()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn location(&self) -> String {
        "memory://".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_leaves_previous_value() {
        let backend = MemBackend::new();
        backend.write("k", "v1").unwrap();
        backend.set_simulate_write_error(true);
        assert!(backend.write("k", "v2").is_err());
        assert_eq!(backend.raw("k").as_deref(), Some("v1"));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let backend = MemBackend::new();
        assert!(backend.remove("missing").is_ok());
    }
}
