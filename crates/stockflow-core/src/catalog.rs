//! Products and the catalog that holds them.
//!
//! The catalog is an ordered list of products. Its only mutation is a stock
//! decrement performed by sale registration, which produces a new catalog
//! rather than editing in place.

use serde::{Deserialize, Serialize};

/// Stable identity of a product within the catalog.
pub type ProductId = u64;

/// A sellable item with its unit price and units on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id:    ProductId,
  pub name:  String,
  /// Unit price in the store's single currency.
  pub price: f64,
  pub stock: u32,
}

impl Product {
  pub fn new(id: ProductId, name: impl Into<String>, price: f64, stock: u32) -> Self {
    Self { id, name: name.into(), price, stock }
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Ordered sequence of [`Product`]s.
///
/// Serialises as a plain JSON array. Any well-typed array loads, including
/// one that repeats an id; lookups then see the first match while stock
/// decrements apply to every match. A negative stock is not well-typed and
/// fails to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Product>);

impl Catalog {
  pub fn new(products: Vec<Product>) -> Self { Self(products) }

  /// The catalog used when nothing usable is stored.
  pub fn seed() -> Self {
    Self(vec![
      Product::new(1, "Caja de guantes", 150.0, 40),
      Product::new(2, "Gel antibacterial 1L", 90.0, 25),
      Product::new(3, "Cubrebocas caja 50 pzas", 200.0, 30),
    ])
  }

  pub fn get(&self, id: ProductId) -> Option<&Product> {
    self.0.iter().find(|p| p.id == id)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Product> { self.0.iter() }

  pub fn as_slice(&self) -> &[Product] { &self.0 }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// A copy of this catalog with `quantity` units removed from product `id`.
  ///
  /// Callers must have checked `quantity <= stock`; the subtraction saturates
  /// so stock can never wrap below zero.
  pub(crate) fn with_stock_taken(&self, id: ProductId, quantity: u32) -> Self {
    Self(
      self
        .0
        .iter()
        .map(|p| {
          if p.id == id {
            Product { stock: p.stock.saturating_sub(quantity), ..p.clone() }
          } else {
            p.clone()
          }
        })
        .collect(),
    )
  }
}

impl From<Vec<Product>> for Catalog {
  fn from(products: Vec<Product>) -> Self { Self(products) }
}

impl From<Catalog> for Vec<Product> {
  fn from(catalog: Catalog) -> Self { catalog.0 }
}

impl<'a> IntoIterator for &'a Catalog {
  type IntoIter = std::slice::Iter<'a, Product>;
  type Item = &'a Product;

  fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn seed_has_three_products() {
    let seed = Catalog::seed();
    assert_eq!(seed.len(), 3);
    assert_eq!(seed.get(1).map(|p| p.stock), Some(40));
    assert_eq!(seed.get(2).map(|p| p.price), Some(90.0));
    assert_eq!(seed.get(3).map(|p| p.name.as_str()), Some("Cubrebocas caja 50 pzas"));
  }

  #[test]
  fn serialises_as_plain_array() {
    let catalog = Catalog::new(vec![Product::new(7, "Guantes", 12.5, 3)]);
    let json = serde_json::to_value(&catalog).unwrap();
    assert_eq!(
      json,
      serde_json::json!([{ "id": 7, "name": "Guantes", "price": 12.5, "stock": 3 }])
    );
  }

  #[test]
  fn accepts_integer_prices() {
    let catalog: Catalog =
      serde_json::from_str(r#"[{"id":1,"name":"Caja","price":150,"stock":40}]"#).unwrap();
    assert_eq!(catalog.get(1).unwrap().price, 150.0);
  }

  #[test]
  fn loads_repeated_ids_as_stored() {
    let catalog: Catalog = serde_json::from_str(
      r#"[{"id":1,"name":"a","price":1,"stock":5},{"id":1,"name":"b","price":2,"stock":7}]"#,
    )
    .unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(1).map(|p| p.name.as_str()), Some("a"));

    let taken = catalog.with_stock_taken(1, 3);
    assert_eq!(taken.iter().map(|p| p.stock).collect::<Vec<_>>(), vec![2, 4]);
  }

  #[test]
  fn negative_stock_does_not_parse() {
    let negative_stock = r#"[{"id":1,"name":"a","price":1,"stock":-4}]"#;
    assert!(serde_json::from_str::<Catalog>(negative_stock).is_err());

    let fractional_stock = r#"[{"id":1,"name":"a","price":1,"stock":2.5}]"#;
    assert!(serde_json::from_str::<Catalog>(fractional_stock).is_err());
  }

  #[test]
  fn stock_taken_only_from_matching_product() {
    let taken = Catalog::seed().with_stock_taken(2, 5);
    assert_eq!(taken.get(1).unwrap().stock, 40);
    assert_eq!(taken.get(2).unwrap().stock, 20);
    assert_eq!(taken.get(3).unwrap().stock, 30);
  }
}
