//! TUI rendering. Orchestrates all panes.

pub mod categories;
pub mod inputs;
pub mod region;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::{
  app::{App, Focus},
  view::Region,
};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0]);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

/// Border style for a pane, highlighted when it holds focus.
pub(crate) fn border_style(focused: bool) -> Style {
  if focused {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " jokebook  [Tab] focus  [r] random  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let pad = area
    .width
    .saturating_sub(left.content.len() as u16)
    .saturating_sub(right.content.len() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  // Left: category list. Right: everything else, stacked.
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
    .split(area);

  categories::draw(f, cols[0], app);

  let right = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(5), // random joke
      Constraint::Length(3), // search box
      Constraint::Min(4),    // search results
      Constraint::Length(5), // add form
      Constraint::Min(4),    // add result
    ])
    .split(cols[1]);

  region::draw(f, right[0], Region::RandomJoke, app.region(Region::RandomJoke));
  inputs::draw_search(f, right[1], app);
  region::draw(f, right[2], Region::SearchResults, app.region(Region::SearchResults));
  inputs::draw_form(f, right[3], app);
  region::draw(f, right[4], Region::AddResult, app.region(Region::AddResult));
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.focus {
    Focus::Categories if app.filter_active => (
      "FILTER",
      "Type to filter  Esc cancel  Enter done",
    ),
    Focus::Categories => (
      "CATEGORIES",
      "↑↓/jk move  Enter open  / filter  r random  Tab next  q quit",
    ),
    Focus::Search => ("SEARCH", "Type a category  Enter search  Esc back"),
    Focus::Add(_) => ("ADD", "↑↓ field  Enter submit  Esc back"),
  };

  let status = if app.in_flight > 0 {
    crate::view::LOADING.to_string()
  } else {
    hints.to_string()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}
