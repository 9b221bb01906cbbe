//! Sale form — product selector and quantity input.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Field};

/// Render the form into `area`.
pub fn draw<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
    .split(area);

  draw_product(f, cols[0], app);
  draw_quantity(f, cols[1], app);
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
  let border = if focused { Color::Cyan } else { Color::DarkGray };
  Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border))
}

fn draw_product<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let focused = app.focus == Field::Product;
  let block = field_block("Product", focused);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let products = app.inventory.catalog();
  let line = match app.selected_product() {
    Some(product) => {
      let position = products
        .iter()
        .position(|p| p.id == product.id)
        .map_or(0, |i| i + 1);
      Line::from(vec![
        Span::styled("‹ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
          format!("{} (stock: {})", product.name, product.stock),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ›", Style::default().fg(Color::DarkGray)),
        Span::styled(
          format!("  {position}/{}", products.len()),
          Style::default().fg(Color::DarkGray),
        ),
      ])
    }
    None => Line::from(Span::styled(
      "No product selected.",
      Style::default().fg(Color::DarkGray),
    )),
  };

  f.render_widget(Paragraph::new(line), inner);
}

fn draw_quantity<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let focused = app.focus == Field::Quantity;
  let block = field_block("Quantity", focused);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let cursor = if focused { "_" } else { "" };
  let line = Line::from(vec![
    Span::styled(
      format!("{}{cursor}", app.quantity),
      Style::default().add_modifier(Modifier::BOLD),
    ),
    Span::styled("   Enter to register", Style::default().fg(Color::DarkGray)),
  ]);
  f.render_widget(Paragraph::new(line), inner);
}
