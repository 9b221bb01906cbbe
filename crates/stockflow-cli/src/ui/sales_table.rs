//! Sales history table — the ledger joined with the catalog.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

use crate::{app::App, ui::money};

/// Shown in place of a product whose sale outlived it.
const MISSING_PRODUCT: &str = "N/A";

/// Render the sales table into `area`, scrolled so the newest sale is visible.
pub fn draw<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let rows = app.inventory.sale_rows();

  let block = Block::default()
    .title(format!(" Sales history ({}) ", rows.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if rows.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No sales recorded yet.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  // Borders plus the header row.
  let visible = usize::from(area.height.saturating_sub(3));
  let mut state = TableState::default().with_offset(rows.len().saturating_sub(visible));

  let header = Row::new(["Date", "Product", "Quantity", "Total"]).style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );

  let body = rows.iter().map(|row| {
    Row::new([
      row.date.to_string(),
      row.product_name.unwrap_or(MISSING_PRODUCT).to_string(),
      row.quantity.to_string(),
      money(row.total),
    ])
  });

  let widths = [
    Constraint::Length(22),
    Constraint::Min(20),
    Constraint::Length(10),
    Constraint::Length(12),
  ];

  f.render_stateful_widget(
    Table::new(body, widths).header(header).block(block),
    area,
    &mut state,
  );
}
