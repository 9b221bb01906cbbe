//! Read models derived from the catalog and ledger. Never stored, always
//! recomputed from scratch.

use crate::{
  catalog::Catalog,
  ledger::{Ledger, Sale, SaleId},
};

/// Aggregate counters shown above the sales table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
  pub total_sales:   usize,
  pub total_units:   u64,
  /// Sum of `price * quantity`, priced at the product's current price.
  /// Sales whose product is gone contribute nothing.
  pub total_revenue: f64,
}

impl Metrics {
  pub fn project(catalog: &Catalog, ledger: &Ledger) -> Self {
    ledger.iter().fold(Self::default(), |acc, sale| Self {
      total_sales:   acc.total_sales + 1,
      total_units:   acc.total_units + u64::from(sale.quantity),
      total_revenue: acc.total_revenue + line_total(catalog, sale),
    })
  }
}

/// One line of the sales table: a sale joined with its product.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRow<'a> {
  pub sale_id:      SaleId,
  pub date:         &'a str,
  /// `None` when the product has been removed from the catalog.
  pub product_name: Option<&'a str>,
  pub quantity:     u32,
  pub total:        f64,
}

/// Join every sale with its product, in ledger order.
pub fn sale_rows<'a>(catalog: &'a Catalog, ledger: &'a Ledger) -> Vec<SaleRow<'a>> {
  ledger
    .iter()
    .map(|sale| SaleRow {
      sale_id:      sale.id,
      date:         &sale.date,
      product_name: catalog.get(sale.product_id).map(|p| p.name.as_str()),
      quantity:     sale.quantity,
      total:        line_total(catalog, sale),
    })
    .collect()
}

fn line_total(catalog: &Catalog, sale: &Sale) -> f64 {
  catalog
    .get(sale.product_id)
    .map_or(0.0, |p| p.price * f64::from(sale.quantity))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::Product;

  fn sale(id: SaleId, product_id: u64, quantity: u32) -> Sale {
    Sale { id, product_id, quantity, date: format!("sale {id}") }
  }

  #[test]
  fn empty_ledger_is_all_zero() {
    assert_eq!(Metrics::project(&Catalog::seed(), &Ledger::default()), Metrics::default());
  }

  #[test]
  fn single_sale() {
    let catalog = Catalog::new(vec![Product::new(1, "Caja", 100.0, 10)]);
    let ledger = Ledger::new(vec![sale(1, 1, 3)]);

    let metrics = Metrics::project(&catalog, &ledger);
    assert_eq!(metrics.total_sales, 1);
    assert_eq!(metrics.total_units, 3);
    assert_eq!(metrics.total_revenue, 300.0);
  }

  #[test]
  fn orphaned_sale_counts_but_earns_nothing() {
    let catalog = Catalog::new(vec![Product::new(1, "Caja", 100.0, 10)]);
    let ledger = Ledger::new(vec![sale(1, 1, 2), sale(2, 42, 7)]);

    let metrics = Metrics::project(&catalog, &ledger);
    assert_eq!(metrics.total_sales, 2);
    assert_eq!(metrics.total_units, 9);
    assert_eq!(metrics.total_revenue, 200.0);
  }

  #[test]
  fn rows_join_products_in_ledger_order() {
    let catalog = Catalog::seed();
    let ledger = Ledger::new(vec![sale(5, 3, 1), sale(6, 77, 4), sale(7, 1, 2)]);

    let rows = sale_rows(&catalog, &ledger);
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].sale_id, 5);
    assert_eq!(rows[0].product_name, Some("Cubrebocas caja 50 pzas"));
    assert_eq!(rows[0].total, 200.0);

    assert_eq!(rows[1].product_name, None);
    assert_eq!(rows[1].quantity, 4);
    assert_eq!(rows[1].total, 0.0);

    assert_eq!(rows[2].date, "sale 7");
    assert_eq!(rows[2].total, 300.0);
  }
}
