//! SQL schema for the StockFlow SQLite store.
//!
//! Executed once at connection startup. The version is tracked with
//! `PRAGMA user_version`; a file written by a newer schema is refused.

/// Version written by [`SCHEMA`].
pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per key. Values are whole JSON documents, replaced on every write.
CREATE TABLE IF NOT EXISTS entries (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL   -- RFC 3339 UTC
);

PRAGMA user_version = 1;
";
