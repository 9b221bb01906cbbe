//! Sale registration: the one state transition of the system.
//!
//! [`register_sale`] is pure. It reads the current catalog and ledger and
//! returns both successors together, so a caller can never commit the new
//! ledger without the matching stock decrement or vice versa.

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::{
  catalog::{Catalog, ProductId},
  ledger::{DATE_FORMAT, Ledger, Sale},
};

/// A sale request the user must correct before resubmitting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
  #[error("quantity must be greater than 0")]
  NonPositiveQuantity { requested: i64 },

  #[error("not enough stock for this sale ({available} available)")]
  InsufficientStock { requested: i64, available: u32 },
}

/// The accepted result of [`register_sale`].
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
  /// The sale was valid; `catalog` and `ledger` replace the previous state.
  Recorded { catalog: Catalog, ledger: Ledger, sale: Sale },
  /// The product no longer exists in the catalog. Nothing changes and
  /// nothing is reported.
  Ignored,
}

/// Validate a sale of `quantity` units of `product_id` recorded at `now`.
///
/// The product lookup happens first: an unknown product is ignored even if
/// the quantity is also invalid.
pub fn register_sale(
  catalog: &Catalog,
  ledger: &Ledger,
  product_id: ProductId,
  quantity: i64,
  now: DateTime<Local>,
) -> Result<Registration, Rejection> {
  let Some(product) = catalog.get(product_id) else {
    return Ok(Registration::Ignored);
  };

  if quantity <= 0 {
    return Err(Rejection::NonPositiveQuantity { requested: quantity });
  }

  let units = match u32::try_from(quantity) {
    Ok(units) if units <= product.stock => units,
    _ => {
      return Err(Rejection::InsufficientStock {
        requested: quantity,
        available: product.stock,
      });
    }
  };

  let sale = Sale {
    id: ledger.next_id(now.timestamp_millis()),
    product_id,
    quantity: units,
    date: now.format(DATE_FORMAT).to_string(),
  };

  Ok(Registration::Recorded {
    catalog: catalog.with_stock_taken(product_id, units),
    ledger:  ledger.appended(sale.clone()),
    sale,
  })
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::catalog::Product;

  fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 10, 19, 14, 3, 12).unwrap()
  }

  fn recorded(result: Result<Registration, Rejection>) -> (Catalog, Ledger, Sale) {
    match result {
      Ok(Registration::Recorded { catalog, ledger, sale }) => (catalog, ledger, sale),
      other => panic!("expected a recorded sale, got {other:?}"),
    }
  }

  #[test]
  fn valid_sale_appends_and_decrements() {
    let catalog = Catalog::seed();
    let ledger = Ledger::default();

    let (catalog, ledger, sale) = recorded(register_sale(&catalog, &ledger, 2, 5, now()));

    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.as_slice()[0], sale);
    assert_eq!(sale.product_id, 2);
    assert_eq!(sale.quantity, 5);
    assert_eq!(sale.date, "19/10/2026, 14:03:12");
    assert_eq!(sale.id, now().timestamp_millis());

    assert_eq!(catalog.get(1).unwrap().stock, 40);
    assert_eq!(catalog.get(2).unwrap().stock, 20);
    assert_eq!(catalog.get(3).unwrap().stock, 30);
  }

  #[test]
  fn whole_stock_can_be_sold() {
    let (catalog, ..) =
      recorded(register_sale(&Catalog::seed(), &Ledger::default(), 2, 25, now()));
    assert_eq!(catalog.get(2).unwrap().stock, 0);
  }

  #[test]
  fn non_positive_quantity_is_rejected() {
    let catalog = Catalog::seed();
    let ledger = Ledger::default();

    for quantity in [0, -1, i64::MIN] {
      let err = register_sale(&catalog, &ledger, 1, quantity, now()).unwrap_err();
      assert_eq!(err, Rejection::NonPositiveQuantity { requested: quantity });
    }
    assert_eq!(
      Rejection::NonPositiveQuantity { requested: 0 }.to_string(),
      "quantity must be greater than 0"
    );
  }

  #[test]
  fn excess_quantity_is_rejected() {
    let catalog = Catalog::seed();
    let ledger = Ledger::default();

    for quantity in [41, i64::from(u32::MAX) + 1, i64::MAX] {
      let err = register_sale(&catalog, &ledger, 1, quantity, now()).unwrap_err();
      assert_eq!(err, Rejection::InsufficientStock { requested: quantity, available: 40 });
    }
  }

  #[test]
  fn unknown_product_is_ignored() {
    let catalog = Catalog::seed();
    let ledger = Ledger::default();

    assert_eq!(register_sale(&catalog, &ledger, 99, 1, now()), Ok(Registration::Ignored));
    // Lookup precedes quantity validation.
    assert_eq!(register_sale(&catalog, &ledger, 99, -3, now()), Ok(Registration::Ignored));
  }

  #[test]
  fn sold_out_product_rejects_any_quantity() {
    let catalog = Catalog::new(vec![Product::new(1, "Agotado", 10.0, 0)]);
    let err = register_sale(&catalog, &Ledger::default(), 1, 1, now()).unwrap_err();
    assert_eq!(err, Rejection::InsufficientStock { requested: 1, available: 0 });
  }

  #[test]
  fn consecutive_sales_get_distinct_ids() {
    let (catalog, ledger, first) =
      recorded(register_sale(&Catalog::seed(), &Ledger::default(), 1, 1, now()));
    let (_, ledger, second) = recorded(register_sale(&catalog, &ledger, 1, 1, now()));

    assert_ne!(first.id, second.id);
    assert_eq!(ledger.len(), 2);
  }
}
