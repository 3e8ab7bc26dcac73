//! Generic region pane: draws a list of [`Display`] commands.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::view::{Display, Region};

/// Map display commands to styled lines.
pub fn lines(displays: &[Display]) -> Vec<Line<'static>> {
  let mut out = Vec::new();
  for d in displays {
    match d {
      Display::Text(t) => out.push(Line::from(t.clone())),
      Display::Muted(t) => out.push(Line::from(Span::styled(
        t.clone(),
        Style::default()
          .fg(Color::DarkGray)
          .add_modifier(Modifier::ITALIC),
      ))),
      Display::Error(t) => out.push(Line::from(Span::styled(
        t.clone(),
        Style::default().fg(Color::Red),
      ))),
      Display::Success(t) => out.push(Line::from(Span::styled(
        t.clone(),
        Style::default()
          .fg(Color::Green)
          .add_modifier(Modifier::BOLD),
      ))),
      Display::JokeCard { setup, delivery } => {
        out.push(Line::from(Span::styled(
          setup.clone(),
          Style::default().add_modifier(Modifier::BOLD),
        )));
        out.push(Line::from(vec![
          Span::raw("  "),
          Span::styled(delivery.clone(), Style::default().fg(Color::Cyan)),
        ]));
        out.push(Line::from(""));
      }
      Display::CategoryButton(name) => out.push(Line::from(format!("[ {name} ]"))),
    }
  }
  out
}

/// Render `displays` inside a bordered pane titled after `region`.
pub fn draw(f: &mut Frame, area: Rect, region: Region, displays: &[Display]) {
  let block = Block::default()
    .title(format!(" {} ", region.title()))
    .borders(Borders::ALL)
    .border_style(super::border_style(false));

  f.render_widget(
    Paragraph::new(lines(displays))
      .wrap(Wrap { trim: false })
      .block(block),
    area,
  );
}
