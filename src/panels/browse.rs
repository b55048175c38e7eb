//! Pieces shared by the table panels: an inline search box, selection
//! stepping and the detail overlay.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

const MAX_QUERY_LEN: usize = 32;
pub const HIGHLIGHT_BG: Color = Color::Rgb(30, 45, 70);
pub const LABEL: Color = Color::Rgb(120, 120, 140);

/// Typed filter text. While `editing`, the panel owns every key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchBox {
    pub query: String,
    pub editing: bool,
}

impl SearchBox {
    pub fn start(&mut self) {
        self.editing = true;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.editing = false;
    }

    /// Feed a key while editing. Returns true when the query text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                self.editing = false;
                false
            }
            KeyCode::Esc => {
                self.clear();
                true
            }
            KeyCode::Backspace => self.query.pop().is_some(),
            KeyCode::Char(c) => {
                if self.query.chars().count() < MAX_QUERY_LEN && (c.is_ascii_graphic() || c == ' ') {
                    self.query.push(c);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    pub fn line(&self) -> Line<'static> {
        let key_style = Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD);
        let mut spans = vec![Span::styled(" / ", key_style), Span::styled("search: ", Style::default().fg(LABEL))];
        if self.editing {
            spans.push(Span::styled(
                format!("{}_", self.query),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("  Enter done  Esc clear", Style::default().fg(Color::DarkGray)));
        } else if self.query.is_empty() {
            spans.push(Span::styled("(none)", Style::default().fg(Color::DarkGray)));
        } else {
            spans.push(Span::styled(self.query.clone(), Style::default().fg(Color::White)));
        }
        Line::from(spans)
    }
}

/// Move a selection by `delta`, clamped to a list of `len` rows.
pub fn step(selected: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.saturating_add_signed(delta).min(len - 1)
}

/// Data row under a screen row, given where the rows start and the scroll offset.
pub fn row_at(rows_area: Rect, offset: usize, column: u16, row: u16) -> Option<usize> {
    let inside = column >= rows_area.x
        && column < rows_area.right()
        && row >= rows_area.y
        && row < rows_area.bottom();
    inside.then(|| offset + (row - rows_area.y) as usize)
}

pub fn field(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", label), Style::default().fg(LABEL)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

/// Centered modal with a double border, drawn over `area`.
pub fn render_detail(frame: &mut Frame, area: Rect, title: &str, accent: Color, mut lines: Vec<Line<'static>>) {
    let overlay_w = 64u16.min(area.width.saturating_sub(4));
    let overlay_h = (lines.len() as u16 + 5).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(accent))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(10, 14, 24)));

    lines.insert(0, Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Esc close", Style::default().fg(Color::DarkGray))));
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), overlay_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_search_box_editing() {
        let mut search = SearchBox::default();
        search.start();
        for c in "m4 ".chars() {
            assert!(search.handle_key(key(KeyCode::Char(c))));
        }
        assert_eq!(search.query, "m4 ");
        assert!(search.handle_key(key(KeyCode::Backspace)));
        assert!(!search.handle_key(key(KeyCode::Up)));
        assert!(!search.handle_key(key(KeyCode::Enter)));
        assert!(!search.editing);
        assert_eq!(search.query, "m4");

        search.start();
        assert!(search.handle_key(key(KeyCode::Esc)));
        assert!(search.query.is_empty());
        assert!(!search.editing);
    }

    #[test]
    fn test_search_box_caps_length() {
        let mut search = SearchBox::default();
        search.start();
        for _ in 0..40 {
            search.handle_key(key(KeyCode::Char('x')));
        }
        assert_eq!(search.query.len(), MAX_QUERY_LEN);
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, 5, -1), 0);
        assert_eq!(step(3, 5, 1), 4);
        assert_eq!(step(4, 5, 1), 4);
        assert_eq!(step(2, 0, 1), 0);
    }

    #[test]
    fn test_row_at() {
        let rows = Rect::new(2, 5, 30, 4);
        assert_eq!(row_at(rows, 0, 10, 5), Some(0));
        assert_eq!(row_at(rows, 2, 10, 8), Some(5));
        assert_eq!(row_at(rows, 0, 10, 9), None);
        assert_eq!(row_at(rows, 0, 1, 6), None);
    }
}
