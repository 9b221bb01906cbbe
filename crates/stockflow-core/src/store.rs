//! The `KeyValueStore` port and the typed load/save helpers built on it.
//!
//! The port is implemented by storage backends (e.g. `stockflow-store-sqlite`,
//! or [`MemoryStore`](crate::memory::MemoryStore) for tests). Collections are
//! stored whole, as JSON text, under two fixed keys.
//!
//! Loading never fails on bad data: an absent or unparseable value is
//! replaced by a fallback and tagged as such in [`Loaded`]. Only backend I/O
//! errors are reported.

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result, catalog::Catalog, ledger::Ledger};

/// Key holding the serialised [`Catalog`].
pub const PRODUCTS_KEY: &str = "stockflow_products";

/// Key holding the serialised [`Ledger`].
pub const SALES_KEY: &str = "stockflow_sales";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a local text key-value store.
///
/// `put` replaces any previous value for the key in full.
pub trait KeyValueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value under `key`. Returns `None` if the key was never written.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Write `value` under `key`, overwriting what was there.
  fn put<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── Tagged load result ──────────────────────────────────────────────────────

/// Why a fallback value was used instead of stored data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
  /// Nothing was stored under the key.
  Missing,
  /// Something was stored but it did not parse; carries the parse error.
  Corrupt(String),
}

/// The outcome of a load: either the stored value or the fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
  Stored(T),
  Defaulted { value: T, reason: FallbackReason },
}

impl<T> Loaded<T> {
  pub fn value(&self) -> &T {
    match self {
      Self::Stored(value) | Self::Defaulted { value, .. } => value,
    }
  }

  pub fn into_inner(self) -> T {
    match self {
      Self::Stored(value) | Self::Defaulted { value, .. } => value,
    }
  }

  pub fn is_defaulted(&self) -> bool { matches!(self, Self::Defaulted { .. }) }

  pub fn fallback_reason(&self) -> Option<&FallbackReason> {
    match self {
      Self::Stored(_) => None,
      Self::Defaulted { reason, .. } => Some(reason),
    }
  }
}

/// Parse `raw` as JSON, or fall back when it is absent or malformed.
pub fn parse_or_default<T: DeserializeOwned>(
  raw: Option<&str>,
  fallback: impl FnOnce() -> T,
) -> Loaded<T> {
  let Some(raw) = raw else {
    return Loaded::Defaulted { value: fallback(), reason: FallbackReason::Missing };
  };
  match serde_json::from_str(raw) {
    Ok(value) => Loaded::Stored(value),
    Err(e) => Loaded::Defaulted {
      value:  fallback(),
      reason: FallbackReason::Corrupt(e.to_string()),
    },
  }
}

// ─── Typed helpers ───────────────────────────────────────────────────────────

/// Load the collection under `key`, substituting `fallback()` if needed.
pub async fn load<S, T>(store: &S, key: &str, fallback: impl FnOnce() -> T) -> Result<Loaded<T>>
where
  S: KeyValueStore,
  T: DeserializeOwned,
{
  let raw = store.get(key).await.map_err(Error::store)?;
  let loaded = parse_or_default(raw.as_deref(), fallback);
  if let Some(FallbackReason::Corrupt(reason)) = loaded.fallback_reason() {
    tracing::warn!(key, %reason, "stored value is unreadable, using default");
  }
  Ok(loaded)
}

/// Serialise `value` and overwrite whatever is stored under `key`.
pub async fn save<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
  S: KeyValueStore,
  T: Serialize + ?Sized,
{
  let json = serde_json::to_string(value)?;
  store.put(key, json).await.map_err(Error::store)
}

pub async fn load_catalog<S: KeyValueStore>(store: &S) -> Result<Loaded<Catalog>> {
  load(store, PRODUCTS_KEY, Catalog::seed).await
}

pub async fn save_catalog<S: KeyValueStore>(store: &S, catalog: &Catalog) -> Result<()> {
  save(store, PRODUCTS_KEY, catalog).await
}

pub async fn load_ledger<S: KeyValueStore>(store: &S) -> Result<Loaded<Ledger>> {
  load(store, SALES_KEY, Ledger::default).await
}

pub async fn save_ledger<S: KeyValueStore>(store: &S, ledger: &Ledger) -> Result<()> {
  save(store, SALES_KEY, ledger).await
}
