use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::browse::{field, render_detail, row_at, step, SearchBox, HIGHLIGHT_BG, LABEL};
use super::{Panel, RadarWorld};
use crate::radar::RadarEvent;
use crate::records::{
    assets, missions, priority_color, search_assets, search_missions, status_color, Asset, Mission,
};

const ACCENT: Color = Color::Rgb(20, 160, 230);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordsView {
    Assets,
    Missions,
}

/// Assets and missions tables with search and a detail overlay.
pub struct RecordsPanel {
    assets: Vec<Asset>,
    missions: Vec<Mission>,
    pub view: RecordsView,
    pub search: SearchBox,
    pub detail_open: bool,
    table: TableState,
    /// Screen rect of the data rows from the last draw.
    rows_area: Option<Rect>,
}

impl RecordsPanel {
    pub fn new() -> Self {
        Self {
            assets: assets(),
            missions: missions(),
            view: RecordsView::Assets,
            search: SearchBox::default(),
            detail_open: false,
            table: TableState::default().with_selected(Some(0)),
            rows_area: None,
        }
    }

    pub fn visible_assets(&self) -> Vec<&Asset> {
        search_assets(&self.assets, &self.search.query)
    }

    pub fn visible_missions(&self) -> Vec<&Mission> {
        search_missions(&self.missions, &self.search.query)
    }

    pub fn visible_count(&self) -> usize {
        match self.view {
            RecordsView::Assets => self.visible_assets().len(),
            RecordsView::Missions => self.visible_missions().len(),
        }
    }

    pub fn selected(&self) -> usize {
        self.table.selected().unwrap_or(0)
    }

    fn select(&mut self, index: usize) {
        let len = self.visible_count();
        self.table.select(Some(step(index, len, 0)));
    }

    fn toggle_view(&mut self) {
        self.view = match self.view {
            RecordsView::Assets => RecordsView::Missions,
            RecordsView::Missions => RecordsView::Assets,
        };
        self.detail_open = false;
        *self.table.offset_mut() = 0;
        self.select(0);
    }

    fn open_detail(&mut self) {
        self.detail_open = self.visible_count() > 0;
    }

    fn asset_table(&self) -> Table<'static> {
        let rows: Vec<Row> = self
            .visible_assets()
            .into_iter()
            .map(|a| {
                Row::new(vec![
                    Cell::from(a.name),
                    Cell::from(Span::styled(a.status, Style::default().fg(status_color(a.status)))),
                    Cell::from(a.clearance),
                    Cell::from(a.department),
                    Cell::from(a.last_seen),
                    Cell::from(a.location),
                ])
            })
            .collect();
        let widths = [
            Constraint::Min(22),
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Length(18),
            Constraint::Length(11),
            Constraint::Min(12),
        ];
        table(rows, widths, ["Agent", "Status", "Clearance", "Department", "Last Seen", "Location"])
    }

    fn mission_table(&self) -> Table<'static> {
        let rows: Vec<Row> = self
            .visible_missions()
            .into_iter()
            .map(|m| {
                Row::new(vec![
                    Cell::from(m.codename),
                    Cell::from(Span::styled(m.status, Style::default().fg(status_color(m.status)))),
                    Cell::from(Span::styled(m.priority, Style::default().fg(priority_color(m.priority)))),
                    Cell::from(m.target),
                    Cell::from(format!("{} \u{2192} {}", m.start_date, m.end_date)),
                    Cell::from(m.location),
                ])
            })
            .collect();
        let widths = [
            Constraint::Min(22),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(23),
            Constraint::Min(12),
        ];
        table(rows, widths, ["Codename", "Status", "Priority", "Target", "Duration", "Location"])
    }

    fn render_detail_overlay(&self, frame: &mut Frame, area: Rect) {
        let index = self.selected();
        match self.view {
            RecordsView::Assets => {
                let Some(a) = self.visible_assets().get(index).copied() else { return };
                let lines = vec![
                    field("Agent Name", a.name.to_string(), Color::White),
                    field("Status", a.status.to_string(), status_color(a.status)),
                    field("Clearance", a.clearance.to_string(), Color::Rgb(202, 65, 34)),
                    field("Department", a.department.to_string(), Color::White),
                    field("Specialty", a.specialty.to_string(), Color::White),
                    field("Last Seen", a.last_seen.to_string(), Color::Gray),
                    field("Location", a.location.to_string(), Color::Gray),
                ];
                render_detail(frame, area, "Asset Details", ACCENT, lines);
            }
            RecordsView::Missions => {
                let Some(m) = self.visible_missions().get(index).copied() else { return };
                let mut lines = vec![
                    field("Codename", m.codename.to_string(), Color::White),
                    field("Status", m.status.to_string(), status_color(m.status)),
                    field("Priority", m.priority.to_string(), priority_color(m.priority)),
                    field("Team Size", format!("{} agents", m.team_size), Color::White),
                    field("Target", m.target.to_string(), Color::White),
                    field("Start Date", m.start_date.to_string(), Color::Gray),
                    field("End Date", m.end_date.to_string(), Color::Gray),
                    field("Location", m.location.to_string(), Color::Gray),
                    Line::from(""),
                ];
                lines.push(Line::from(Span::styled(
                    format!("  {}", m.description),
                    Style::default().fg(Color::Rgb(180, 180, 200)),
                )));
                render_detail(frame, area, "Mission Details", ACCENT, lines);
            }
        }
    }
}

impl Default for RecordsPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn table<const N: usize>(rows: Vec<Row<'static>>, widths: [Constraint; N], headers: [&'static str; N]) -> Table<'static> {
    let header = Row::new(headers.map(Cell::from))
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(HIGHLIGHT_BG).add_modifier(Modifier::BOLD))
        .highlight_symbol("\u{25b6} ")
}

impl Panel for RecordsPanel {
    fn update(&mut self, _world: &RadarWorld) -> Vec<RadarEvent> {
        Vec::new()
    }

    fn captures_input(&self) -> bool {
        self.search.editing
    }

    fn handle_key(&mut self, key: KeyEvent, _world: &RadarWorld) -> Vec<RadarEvent> {
        if self.search.editing {
            if self.search.handle_key(key) {
                self.detail_open = false;
                self.select(0);
            }
            return Vec::new();
        }
        if self.detail_open {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace) {
                self.detail_open = false;
            }
            return Vec::new();
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let next = step(self.selected(), self.visible_count(), -1);
                self.select(next);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let next = step(self.selected(), self.visible_count(), 1);
                self.select(next);
            }
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Left | KeyCode::Right => self.toggle_view(),
            KeyCode::Char('/') => self.search.start(),
            KeyCode::Esc => {
                self.search.clear();
                self.select(0);
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _world: &RadarWorld) -> Vec<RadarEvent> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.detail_open {
            return Vec::new();
        }
        let Some(rows) = self.rows_area else { return Vec::new() };
        if let Some(index) = row_at(rows, self.table.offset(), mouse.column, mouse.row) {
            if index < self.visible_count() {
                self.select(index);
                self.open_detail();
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _world: &RadarWorld) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT))
            .title(" Records Database ")
            .title_style(Style::default().fg(Color::Rgb(130, 220, 255)).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let tab_style = |on: bool| {
            if on {
                Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(LABEL)
            }
        };
        let views = Line::from(vec![
            Span::styled(" Assets ", tab_style(self.view == RecordsView::Assets)),
            Span::styled("\u{2502}", Style::default().fg(Color::Rgb(60, 60, 80))),
            Span::styled(" Missions ", tab_style(self.view == RecordsView::Missions)),
        ]);
        frame.render_widget(Paragraph::new(views), chunks[0]);
        frame.render_widget(Paragraph::new(self.search.line()), chunks[1]);

        let count = self.visible_count();
        self.select(self.selected());
        let table = match self.view {
            RecordsView::Assets => self.asset_table(),
            RecordsView::Missions => self.mission_table(),
        };
        let area = chunks[2];
        if count == 0 {
            self.rows_area = None;
            let empty = Paragraph::new(Line::from(Span::styled(
                " No records match the search",
                Style::default().fg(Color::DarkGray),
            )));
            frame.render_widget(empty, area);
        } else {
            self.rows_area = Some(Rect { y: area.y + 1, height: area.height.saturating_sub(1), ..area });
            frame.render_stateful_widget(table, area, &mut self.table);
        }

        let total = match self.view {
            RecordsView::Assets => format!(" Total: {} agents", count),
            RecordsView::Missions => format!(" Total: {} missions", count),
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(total, Style::default().fg(Color::Gray)))),
            chunks[3],
        );

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" \u{2191}\u{2193} select ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Enter details ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("M assets/missions ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("/ search  Esc clear", Style::default().fg(Color::DarkGray)),
        ]));
        frame.render_widget(help, chunks[4]);

        if self.detail_open {
            self.render_detail_overlay(frame, inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(panel: &mut RecordsPanel, world: &RadarWorld, text: &str) {
        for c in text.chars() {
            panel.handle_key(key(KeyCode::Char(c)), world);
        }
    }

    fn screen(panel: &mut RecordsPanel, world: &RadarWorld) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 24)).unwrap();
        terminal.draw(|f| panel.render(f, f.area(), world)).unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_search_narrows_and_captures_keys() {
        let mut panel = RecordsPanel::new();
        let world = RadarWorld::default();
        assert_eq!(panel.visible_count(), 5);

        panel.handle_key(key(KeyCode::Char('/')), &world);
        assert!(panel.captures_input());
        // 'm' is text while typing, not the view toggle
        type_text(&mut panel, &world, "moscow");
        assert_eq!(panel.view, RecordsView::Assets);
        assert_eq!(panel.visible_count(), 1);

        panel.handle_key(key(KeyCode::Enter), &world);
        assert!(!panel.captures_input());
        panel.handle_key(key(KeyCode::Enter), &world);
        assert!(panel.detail_open);
        let text = screen(&mut panel, &world);
        assert!(text.contains("Asset Details"));
        assert!(text.contains("Combat Operations"));

        panel.handle_key(key(KeyCode::Esc), &world);
        assert!(!panel.detail_open);
        panel.handle_key(key(KeyCode::Esc), &world);
        assert_eq!(panel.visible_count(), 5);
    }

    #[test]
    fn test_selection_and_view_toggle() {
        let mut panel = RecordsPanel::new();
        let world = RadarWorld::default();
        for _ in 0..10 {
            panel.handle_key(key(KeyCode::Down), &world);
        }
        assert_eq!(panel.selected(), 4);

        panel.handle_key(key(KeyCode::Char('m')), &world);
        assert_eq!(panel.view, RecordsView::Missions);
        assert_eq!(panel.selected(), 0);
        panel.handle_key(key(KeyCode::Down), &world);
        panel.handle_key(key(KeyCode::Enter), &world);
        let text = screen(&mut panel, &world);
        assert!(text.contains("Mission Details"));
        assert!(text.contains("6 agents"));
        assert!(text.contains("Extraction of defector"));
    }

    #[test]
    fn test_empty_search_never_opens_detail() {
        let mut panel = RecordsPanel::new();
        let world = RadarWorld::default();
        panel.handle_key(key(KeyCode::Char('/')), &world);
        type_text(&mut panel, &world, "zzz");
        panel.handle_key(key(KeyCode::Enter), &world);
        panel.handle_key(key(KeyCode::Enter), &world);
        assert!(!panel.detail_open);
        assert!(screen(&mut panel, &world).contains("No records match"));
    }

    #[test]
    fn test_click_row_opens_detail() {
        let mut panel = RecordsPanel::new();
        let world = RadarWorld::default();
        let text = screen(&mut panel, &world);
        assert!(text.contains("Total: 5 agents"));
        let rows = panel.rows_area.unwrap();

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rows.x + 4,
            row: rows.y + 2,
            modifiers: KeyModifiers::NONE,
        };
        panel.handle_mouse(click, &world);
        assert_eq!(panel.selected(), 2);
        assert!(panel.detail_open);
        assert!(screen(&mut panel, &world).contains("Elena Petrov"));
    }
}
