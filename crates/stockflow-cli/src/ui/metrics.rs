//! Metrics strip — three counters above the form.

use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Paragraph},
};

use crate::{app::App, ui::money};

/// Render the sales, units and revenue cards into `area`.
pub fn draw<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let metrics = app.inventory.metrics();

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 3); 3])
    .split(area);

  let cards = [
    ("Sales recorded", metrics.total_sales.to_string()),
    ("Units sold", metrics.total_units.to_string()),
    ("Total revenue", format!("{} MXN", money(metrics.total_revenue))),
  ];

  for ((title, value), col) in cards.into_iter().zip(cols.iter()) {
    draw_card(f, *col, title, value);
  }
}

fn draw_card(f: &mut Frame, area: Rect, title: &str, value: String) {
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(value)
      .alignment(Alignment::Center)
      .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    inner,
  );
}
