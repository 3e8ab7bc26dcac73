//! Category list pane (left panel).

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::{
  app::{App, Focus},
  view::{Display, Region},
};

/// Render the category list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.focus == Focus::Categories;
  let filtered = app.filtered_categories();
  let total = app.categories.len();

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Categories ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Categories ({total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(super::border_style(focused));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Loading and error notices replace the list entirely.
  let contents = app.region(Region::Categories);
  if !contents
    .iter()
    .any(|d| matches!(d, Display::CategoryButton(_)))
  {
    f.render_widget(
      Paragraph::new(super::region::lines(contents)).wrap(Wrap { trim: false }),
      inner_area,
    );
    return;
  }

  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|name| ListItem::new(format!(" {name}")))
    .collect();

  let mut state = ListState::default();
  state.select(if filtered.is_empty() {
    None
  } else {
    Some(app.list_cursor)
  });

  let highlight = if focused {
    Style::default()
      .bg(Color::Blue)
      .fg(Color::White)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default().add_modifier(Modifier::BOLD)
  };

  f.render_stateful_widget(
    List::new(items).highlight_style(highlight).highlight_symbol(""),
    inner_area,
    &mut state,
  );
}
