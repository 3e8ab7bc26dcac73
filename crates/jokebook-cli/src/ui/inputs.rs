//! Text inputs: the category search box and the add-joke form.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Field, Focus};

const FIELDS: [Field; 3] = [Field::Category, Field::Setup, Field::Delivery];

fn input_text(value: &str, focused: bool) -> String {
  if focused {
    format!("{value}_")
  } else {
    value.to_string()
  }
}

pub fn draw_search(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.focus == Focus::Search;
  let block = Block::default()
    .title(" Search category ")
    .borders(Borders::ALL)
    .border_style(super::border_style(focused));

  f.render_widget(
    Paragraph::new(input_text(&app.search_input, focused)).block(block),
    area,
  );
}

pub fn draw_form(f: &mut Frame, area: Rect, app: &App) {
  let focused_field = match app.focus {
    Focus::Add(field) => Some(field),
    _ => None,
  };

  let block = Block::default()
    .title(" Add a joke ")
    .borders(Borders::ALL)
    .border_style(super::border_style(focused_field.is_some()));

  let lines: Vec<Line> = FIELDS
    .iter()
    .map(|&field| {
      let focused = focused_field == Some(field);
      let label_style = if focused {
        Style::default()
          .fg(Color::Yellow)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::DarkGray)
      };
      Line::from(vec![
        Span::styled(format!("{:<9}", format!("{}:", field.label())), label_style),
        Span::raw(input_text(app.form.field(field), focused)),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines).block(block), area);
}
