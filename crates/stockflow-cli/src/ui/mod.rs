//! TUI rendering — orchestrates all panes.

pub mod metrics;
pub mod sale_form;
pub mod sales_table;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Field, NoticeKind};

/// Render an amount in the store currency, e.g. `$1234.50`.
pub fn money(amount: f64) -> String { format!("${amount:.2}") }

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S>(f: &mut Frame, app: &App<S>) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(4), // metrics
      Constraint::Length(4), // sale form
      Constraint::Min(0),    // sales table
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  metrics::draw(f, rows[1], app);
  sale_form::draw(f, rows[2], app);
  sales_table::draw(f, rows[3], app);
  draw_status(f, rows[4], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " StockFlow  inventory & sales",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let mode_label = match app.focus {
    Field::Product => "PRODUCT",
    Field::Quantity => "QUANTITY",
  };

  let (text, style) = match &app.notice {
    Some(notice) if notice.kind == NoticeKind::Error => {
      (notice.text.clone(), Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    }
    Some(notice) => (notice.text.clone(), Style::default().fg(Color::Green)),
    None => (
      "Tab switch field  ↑↓ change  0-9 quantity  Enter register  q quit".to_string(),
      Style::default().fg(Color::DarkGray),
    ),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let text_span = Span::styled(format!("  {text}"), style);

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, text_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}
