//! Application state machine and event dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use stockflow_core::{
  catalog::{Product, ProductId},
  inventory::{Inventory, SaleOutcome},
  store::KeyValueStore,
};

/// Longest quantity the input accepts, sign included.
const MAX_QUANTITY_LEN: usize = 9;

// ─── Focus ────────────────────────────────────────────────────────────────────

/// Which form field the arrow keys act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Product,
  Quantity,
}

// ─── Notice ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
  Info,
  Error,
}

/// The message shown in the status bar after a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub kind: NoticeKind,
  pub text: String,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  pub inventory: Inventory<S>,

  /// Current keyboard focus within the form.
  pub focus: Field,

  /// Product chosen in the selector. May go stale if the catalog changes
  /// underneath it; submitting a stale selection does nothing.
  pub selected: Option<ProductId>,

  /// Raw text of the quantity input.
  pub quantity: String,

  /// Result of the last submit, if any.
  pub notice: Option<Notice>,
}

impl<S> App<S> {
  /// The selected product, if it still exists.
  pub fn selected_product(&self) -> Option<&Product> {
    self.selected.and_then(|id| self.inventory.catalog().get(id))
  }

  /// The quantity input as a number. Blank or partial input counts as 0.
  pub fn parsed_quantity(&self) -> i64 { self.quantity.trim().parse().unwrap_or(0) }
}

impl<S: KeyValueStore> App<S> {
  /// Create an [`App`] with the first product selected and a quantity of 1.
  pub fn new(inventory: Inventory<S>) -> Self {
    let selected = inventory.catalog().iter().next().map(|p| p.id);
    Self {
      inventory,
      focus: Field::Product,
      selected,
      quantity: "1".into(),
      notice: None,
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match key.code {
      KeyCode::Esc | KeyCode::Char('q') => return false,

      KeyCode::Tab | KeyCode::BackTab => {
        self.focus = match self.focus {
          Field::Product => Field::Quantity,
          Field::Quantity => Field::Product,
        };
      }

      KeyCode::Up | KeyCode::Char('k') => match self.focus {
        Field::Product => self.move_selection(-1),
        Field::Quantity => self.step_quantity(1),
      },
      KeyCode::Down | KeyCode::Char('j') => match self.focus {
        Field::Product => self.move_selection(1),
        Field::Quantity => self.step_quantity(-1),
      },

      KeyCode::Char(c) if c.is_ascii_digit() || (c == '-' && self.quantity.is_empty()) => {
        if self.quantity.len() < MAX_QUANTITY_LEN {
          self.quantity.push(c);
        }
      }
      KeyCode::Backspace => {
        self.quantity.pop();
      }

      KeyCode::Enter => self.submit().await,

      _ => {}
    }
    true
  }

  /// Register a sale for the current selection and quantity.
  pub async fn submit(&mut self) {
    let Some(product_id) = self.selected else {
      return;
    };
    let quantity = self.parsed_quantity();

    match self.inventory.register_sale(product_id, quantity).await {
      Ok(SaleOutcome::Recorded(sale)) => {
        let name = self
          .inventory
          .catalog()
          .get(sale.product_id)
          .map_or("?", |p| p.name.as_str());
        self.notice = Some(Notice {
          kind: NoticeKind::Info,
          text: format!("Recorded sale: {} × {name}", sale.quantity),
        });
        self.quantity = "1".into();
      }
      Ok(SaleOutcome::Ignored) => {}
      Err(rejection) => {
        self.notice = Some(Notice { kind: NoticeKind::Error, text: rejection.to_string() });
      }
    }
  }

  fn move_selection(&mut self, delta: isize) {
    let products = self.inventory.catalog().as_slice();
    if products.is_empty() {
      self.selected = None;
      return;
    }

    let next = match self.selected.and_then(|id| products.iter().position(|p| p.id == id)) {
      Some(current) => current
        .saturating_add_signed(delta)
        .min(products.len() - 1),
      None => 0,
    };
    self.selected = Some(products[next].id);
  }

  fn step_quantity(&mut self, delta: i64) {
    let next = self.parsed_quantity().saturating_add(delta);
    let text = next.to_string();
    if text.len() <= MAX_QUANTITY_LEN {
      self.quantity = text;
    }
  }
}
