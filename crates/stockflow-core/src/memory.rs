//! [`MemoryStore`]: a process-local [`KeyValueStore`].
//!
//! Nothing survives the process. Used by tests and by `stockflow --memory`.

use std::{
  collections::HashMap,
  convert::Infallible,
  sync::{Mutex, MutexGuard, PoisonError},
};

use crate::store::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Pre-populate `key` with raw text, which need not be valid JSON.
  pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.entries().insert(key.into(), value.into());
    self
  }

  /// The raw text currently stored under `key`.
  pub fn raw(&self, key: &str) -> Option<String> { self.entries().get(key).cloned() }

  fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
    Ok(self.entries().get(key).cloned())
  }

  async fn put(&self, key: &str, value: String) -> Result<(), Infallible> {
    self.entries().insert(key.to_owned(), value);
    Ok(())
  }
}
