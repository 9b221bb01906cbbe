//! Core types and operations for the StockFlow inventory tracker.
//!
//! This crate holds the catalog and ledger model, the sale-registration rule,
//! the metrics projection and the [`store::KeyValueStore`] port. It has no
//! database or terminal dependencies; backends and front-ends depend on it.

// Native `async fn` in traits; the port spells out its `Send` bounds.
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod memory;
pub mod metrics;
pub mod registration;
pub mod store;

pub use error::{Error, Result};
