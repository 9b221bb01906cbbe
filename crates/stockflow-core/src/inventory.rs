//! [`Inventory`]: the application state and the store it is mirrored to.
//!
//! The controller owns the current catalog and ledger. Every successful sale
//! replaces both and then writes both back through the injected
//! [`KeyValueStore`]. Taking `&mut self` for registration means two sales can
//! never interleave.

use chrono::{DateTime, Local};

use crate::{
  Result,
  catalog::{Catalog, ProductId},
  ledger::{Ledger, Sale},
  metrics::{Metrics, SaleRow, sale_rows},
  registration::{Registration, Rejection, register_sale},
  store::{FallbackReason, KeyValueStore, load_catalog, load_ledger, save_catalog, save_ledger},
};

/// Which collections were replaced by defaults while opening.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
  pub catalog: Option<FallbackReason>,
  pub ledger:  Option<FallbackReason>,
}

impl LoadReport {
  pub fn any_defaulted(&self) -> bool { self.catalog.is_some() || self.ledger.is_some() }
}

/// What [`Inventory::register_sale`] did with an accepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleOutcome {
  Recorded(Sale),
  /// The selected product no longer exists; nothing happened.
  Ignored,
}

pub struct Inventory<S> {
  store:   S,
  catalog: Catalog,
  ledger:  Ledger,
  report:  LoadReport,
}

impl<S> Inventory<S> {
  pub fn catalog(&self) -> &Catalog { &self.catalog }

  pub fn ledger(&self) -> &Ledger { &self.ledger }

  pub fn load_report(&self) -> &LoadReport { &self.report }

  pub fn store(&self) -> &S { &self.store }

  pub fn metrics(&self) -> Metrics { Metrics::project(&self.catalog, &self.ledger) }

  pub fn sale_rows(&self) -> Vec<SaleRow<'_>> { sale_rows(&self.catalog, &self.ledger) }
}

impl<S: KeyValueStore> Inventory<S> {
  /// Load both collections from `store`, falling back to the seeds.
  ///
  /// If either fell back, the resulting state is written back immediately so
  /// the store mirrors what is on screen.
  pub async fn open(store: S) -> Result<Self> {
    let catalog = load_catalog(&store).await?;
    let ledger = load_ledger(&store).await?;

    let report = LoadReport {
      catalog: catalog.fallback_reason().cloned(),
      ledger:  ledger.fallback_reason().cloned(),
    };

    let inventory = Self {
      store,
      catalog: catalog.into_inner(),
      ledger: ledger.into_inner(),
      report,
    };

    if inventory.report.any_defaulted() {
      tracing::info!(report = ?inventory.report, "initialising store with defaults");
      inventory.persist().await?;
    }

    tracing::debug!(
      products = inventory.catalog.len(),
      sales = inventory.ledger.len(),
      "inventory loaded"
    );
    Ok(inventory)
  }

  /// Register a sale stamped with the current local time.
  pub async fn register_sale(
    &mut self,
    product_id: ProductId,
    quantity: i64,
  ) -> Result<SaleOutcome, Rejection> {
    self.register_sale_at(product_id, quantity, Local::now()).await
  }

  /// Register a sale stamped with `now`.
  ///
  /// The in-memory state is committed before anything is written. A failed
  /// write is logged and leaves the committed state in place; the next
  /// successful write catches the store up, since every write is a full
  /// snapshot.
  pub async fn register_sale_at(
    &mut self,
    product_id: ProductId,
    quantity: i64,
    now: DateTime<Local>,
  ) -> Result<SaleOutcome, Rejection> {
    let registration = register_sale(&self.catalog, &self.ledger, product_id, quantity, now)
      .inspect_err(|rejection| {
        tracing::debug!(product_id, quantity, %rejection, "sale rejected");
      })?;

    let Registration::Recorded { catalog, ledger, sale } = registration else {
      tracing::debug!(product_id, "sale for unknown product ignored");
      return Ok(SaleOutcome::Ignored);
    };

    self.catalog = catalog;
    self.ledger = ledger;
    tracing::info!(sale_id = sale.id, product_id, quantity = sale.quantity, "sale recorded");

    if let Err(e) = self.persist().await {
      tracing::error!(error = %e, "failed to persist inventory");
    }

    Ok(SaleOutcome::Recorded(sale))
  }

  /// Write both collections to the store, catalog first.
  pub async fn persist(&self) -> Result<()> {
    save_catalog(&self.store, &self.catalog).await?;
    save_ledger(&self.store, &self.ledger).await?;
    Ok(())
  }
}
