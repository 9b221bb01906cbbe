//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use stockflow_core::{
  catalog::Catalog,
  inventory::{Inventory, LoadReport},
  store::{
    FallbackReason, KeyValueStore, Loaded, PRODUCTS_KEY, SALES_KEY, load_catalog, load_ledger,
    save_catalog,
  },
};

use tempfile::TempDir;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// A scratch directory for on-disk databases, removed on drop.
fn temp_dir() -> TempDir { TempDir::new().expect("temp dir") }

// ─── Raw entries ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_key_returns_none() {
  let s = store().await;
  assert_eq!(s.get(PRODUCTS_KEY).await.unwrap(), None);
  assert_eq!(s.updated_at(PRODUCTS_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn put_then_get() {
  let s = store().await;
  s.put("alpha", "[1,2,3]".into()).await.unwrap();

  assert_eq!(s.get("alpha").await.unwrap().as_deref(), Some("[1,2,3]"));
  let written = s.updated_at("alpha").await.unwrap().expect("timestamp");
  assert!(chrono::DateTime::parse_from_rfc3339(&written).is_ok());
}

#[tokio::test]
async fn put_overwrites_in_full() {
  let s = store().await;
  s.put("alpha", "a long first value".into()).await.unwrap();
  s.put("alpha", "b".into()).await.unwrap();

  assert_eq!(s.get("alpha").await.unwrap().as_deref(), Some("b"));
  assert_eq!(s.keys().await.unwrap(), vec!["alpha".to_string()]);
}

#[tokio::test]
async fn keys_are_independent() {
  let s = store().await;
  s.put(SALES_KEY, "[]".into()).await.unwrap();
  s.put(PRODUCTS_KEY, "[]".into()).await.unwrap();

  assert_eq!(
    s.keys().await.unwrap(),
    vec![PRODUCTS_KEY.to_string(), SALES_KEY.to_string()]
  );
}

// ─── Typed collections ───────────────────────────────────────────────────────

#[tokio::test]
async fn catalog_roundtrip() {
  let s = store().await;
  let catalog = Catalog::seed();

  save_catalog(&s, &catalog).await.unwrap();
  assert_eq!(load_catalog(&s).await.unwrap(), Loaded::Stored(catalog));
}

#[tokio::test]
async fn corrupt_entries_fall_back() {
  let s = store().await;
  s.put(PRODUCTS_KEY, "not json".into()).await.unwrap();
  s.put(SALES_KEY, "{}".into()).await.unwrap();

  let catalog = load_catalog(&s).await.unwrap();
  assert!(matches!(catalog.fallback_reason(), Some(FallbackReason::Corrupt(_))));
  assert_eq!(catalog.into_inner(), Catalog::seed());

  let ledger = load_ledger(&s).await.unwrap();
  assert!(ledger.is_defaulted());
  assert!(ledger.value().is_empty());
}

// ─── Durability ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn inventory_survives_reopen() {
  let dir = temp_dir();
  let path = dir.path().join("stockflow.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    let mut inventory = Inventory::open(s).await.unwrap();
    inventory.register_sale(1, 5).await.unwrap();
    inventory.register_sale(3, 2).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let inventory = Inventory::open(s).await.unwrap();

  assert_eq!(inventory.load_report(), &LoadReport::default());
  assert_eq!(inventory.catalog().get(1).unwrap().stock, 35);
  assert_eq!(inventory.catalog().get(3).unwrap().stock, 28);
  assert_eq!(inventory.ledger().len(), 2);

  let metrics = inventory.metrics();
  assert_eq!(metrics.total_units, 7);
  assert_eq!(metrics.total_revenue, 1150.0);
}

#[tokio::test]
async fn newer_schema_is_refused() {
  let dir = temp_dir();
  let path = dir.path().join("stockflow.db");

  {
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 99;").unwrap();
  }

  let err = SqliteStore::open(&path).await.err().expect("open should fail");
  assert!(matches!(err, crate::Error::SchemaVersion { found: 99, supported: 1 }));
}
