//! Sales and the append-only ledger.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::ProductId;

/// Unique identity of a sale.
pub type SaleId = i64;

/// `chrono` format used for [`Sale::date`], e.g. `19/10/2026, 14:03:12`.
pub const DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// A recorded sale of some units of one product.
///
/// `product_id` referenced an existing product when the sale was recorded.
/// Nothing keeps it valid afterwards, so readers must tolerate orphans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
  pub id:         SaleId,
  pub product_id: ProductId,
  pub quantity:   u32,
  /// Local creation time for display; not meant to be parsed back.
  pub date:       String,
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// Ordered, append-only sequence of [`Sale`]s.
///
/// Any well-typed stored array loads as-is. Ids handed out by
/// [`Ledger::next_id`] are always fresh, but a stored ledger may already
/// repeat one; nothing here depends on stored ids being distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger(Vec<Sale>);

impl Ledger {
  pub fn new(sales: Vec<Sale>) -> Self { Self(sales) }

  pub fn iter(&self) -> std::slice::Iter<'_, Sale> { self.0.iter() }

  pub fn as_slice(&self) -> &[Sale] { &self.0 }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Pick an id for a sale created at `now_millis` (Unix epoch, ms).
  ///
  /// The timestamp is used as-is unless an existing sale already holds it or
  /// a later one, in which case the id is one past the current maximum. If
  /// the maximum is `i64::MAX`, the highest id not yet taken is used instead.
  pub fn next_id(&self, now_millis: i64) -> SaleId {
    let Some(max) = self.0.iter().map(|s| s.id).max() else {
      return now_millis;
    };
    if max < now_millis {
      return now_millis;
    }
    if let Some(id) = max.checked_add(1) {
      return id;
    }

    // The ledger holds far fewer than 2^64 sales, so the scan ends within
    // `len + 1` steps.
    let taken: HashSet<SaleId> = self.0.iter().map(|s| s.id).collect();
    (SaleId::MIN..SaleId::MAX)
      .rev()
      .find(|id| !taken.contains(id))
      .unwrap_or(SaleId::MIN)
  }

  /// A copy of this ledger with `sale` appended.
  pub(crate) fn appended(&self, sale: Sale) -> Self {
    let mut sales = Vec::with_capacity(self.0.len() + 1);
    sales.extend_from_slice(&self.0);
    sales.push(sale);
    Self(sales)
  }
}

impl From<Vec<Sale>> for Ledger {
  fn from(sales: Vec<Sale>) -> Self { Self(sales) }
}

impl From<Ledger> for Vec<Sale> {
  fn from(ledger: Ledger) -> Self { ledger.0 }
}

impl<'a> IntoIterator for &'a Ledger {
  type IntoIter = std::slice::Iter<'a, Sale>;
  type Item = &'a Sale;

  fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}
