use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tracing::debug;

use super::browse::{field, render_detail, row_at, step, SearchBox, HIGHLIGHT_BG, LABEL};
use super::{Panel, RadarWorld};
use crate::armory::{
    calculate_stats, catalog, cycle_option, filter_weapons, format_price, sort_weapons, Category, SortKey,
    SortOrder, StockStatus, Weapon, WeaponFilter, WeaponStats,
};
use crate::radar::RadarEvent;

const ACCENT: Color = Color::Rgb(202, 65, 34);
const SEP: Color = Color::Rgb(60, 60, 80);

/// Inventory browser: stats strip, filter bar, sortable table, detail overlay.
pub struct ArmoryPanel {
    catalog: Vec<Weapon>,
    /// Computed over the whole catalog, not the filtered view.
    stats: WeaponStats,
    pub filter: WeaponFilter,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub search: SearchBox,
    pub detail_open: bool,
    table: TableState,
    rows_area: Option<Rect>,
}

impl ArmoryPanel {
    pub fn new() -> Self {
        let catalog = catalog();
        let stats = calculate_stats(&catalog);
        Self {
            catalog,
            stats,
            filter: WeaponFilter::default(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            search: SearchBox::default(),
            detail_open: false,
            table: TableState::default().with_selected(Some(0)),
            rows_area: None,
        }
    }

    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }

    /// Filtered then sorted rows, as shown.
    pub fn visible(&self) -> Vec<&Weapon> {
        let mut rows = filter_weapons(&self.catalog, &self.filter);
        sort_weapons(&mut rows, self.sort_key, self.sort_order);
        rows
    }

    pub fn visible_count(&self) -> usize {
        self.visible().len()
    }

    pub fn selected(&self) -> usize {
        self.table.selected().unwrap_or(0)
    }

    fn select(&mut self, index: usize) {
        let len = self.visible_count();
        self.table.select(Some(step(index, len, 0)));
    }

    /// Any change to what is listed resets the cursor to the top.
    fn refilter(&mut self) {
        self.detail_open = false;
        *self.table.offset_mut() = 0;
        self.select(0);
        debug!(filter = ?self.filter, key = ?self.sort_key, order = ?self.sort_order, "armory view changed");
    }

    fn reset(&mut self) {
        self.filter = WeaponFilter::default();
        self.search.clear();
        self.sort_key = SortKey::default();
        self.sort_order = SortOrder::default();
        self.refilter();
    }

    fn stats_line(&self) -> Line<'static> {
        let s = &self.stats;
        let sep = || Span::styled(" \u{2502} ", Style::default().fg(SEP));
        let label = |t: &'static str| Span::styled(t, Style::default().fg(LABEL));
        Line::from(vec![
            label(" Total Weapons "),
            Span::styled(s.total_weapons.to_string(), Style::default().fg(Color::Rgb(20, 160, 230)).add_modifier(Modifier::BOLD)),
            sep(),
            label("Available Stock "),
            Span::styled(s.available_stock.to_string(), Style::default().fg(Color::Rgb(74, 222, 128)).add_modifier(Modifier::BOLD)),
            sep(),
            label("Total Value "),
            Span::styled(format_price(s.total_value), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            sep(),
            label("Categories "),
            Span::styled(s.categories.len().to_string(), Style::default().fg(Color::Rgb(250, 204, 21)).add_modifier(Modifier::BOLD)),
        ])
    }

    fn breakdown_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(" ", Style::default())];
        for (category, n) in &self.stats.categories {
            spans.push(Span::styled(category.label(), Style::default().fg(category.color())));
            spans.push(Span::styled(format!(" {}  ", n), Style::default().fg(Color::White)));
        }
        Line::from(spans)
    }

    fn filter_line(&self) -> Line<'static> {
        let sep = || Span::styled(" \u{2502} ", Style::default().fg(SEP));
        let key = |t: &'static str| Span::styled(t, Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD));
        let value = |t: String| Span::styled(t, Style::default().fg(Color::White));
        Line::from(vec![
            key(" C "),
            value(self.filter.category.map_or("all", |c| c.label()).to_string()),
            sep(),
            key("P "),
            value(self.filter.price.label().to_string()),
            sep(),
            key("T "),
            value(self.filter.status.map_or("all", |s| s.label()).to_string()),
            sep(),
            key("O "),
            value(format!("{} {}", self.sort_key.label(), self.sort_order.arrow())),
        ])
    }

    fn weapon_table(&self) -> Table<'static> {
        let rows: Vec<Row> = self
            .visible()
            .into_iter()
            .map(|w| {
                Row::new(vec![
                    Cell::from(w.name),
                    Cell::from(Span::styled(w.category.label(), Style::default().fg(w.category.color()))),
                    Cell::from(format_price(u64::from(w.price))),
                    Cell::from(w.total_stock.to_string()),
                    Cell::from(Span::styled(w.status.label(), Style::default().fg(w.status.color()))),
                    Cell::from(w.caliber),
                ])
            })
            .collect();
        let widths = [
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(13),
            Constraint::Min(10),
        ];
        let header = Row::new(["Name", "Category", "Price", "Stock", "Status", "Caliber"].map(Cell::from))
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
        Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(Style::default().bg(HIGHLIGHT_BG).add_modifier(Modifier::BOLD))
            .highlight_symbol("\u{25b6} ")
    }

    fn render_detail_overlay(&self, frame: &mut Frame, area: Rect) {
        let Some(w) = self.visible().get(self.selected()).copied() else { return };
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("  {}", w.category.label().to_uppercase()), Style::default().fg(w.category.color()).add_modifier(Modifier::BOLD)),
                Span::styled("  ", Style::default()),
                Span::styled(w.status.label(), Style::default().fg(w.status.color())),
            ]),
            Line::from(""),
            field("Price", format_price(u64::from(w.price)), ACCENT),
            field("Stock", format!("{} units", w.total_stock), Color::White),
            field("Range", w.range.to_string(), Color::White),
            field("Usage", w.usage.to_string(), Color::White),
            field("Weight", w.weight.to_string(), Color::Gray),
            field("Length", w.length.to_string(), Color::Gray),
            field("Fire Rate", w.fire_rate.to_string(), Color::Gray),
            field("Magazine", w.magazine.to_string(), Color::Gray),
            field("Caliber", w.caliber.to_string(), Color::Gray),
            Line::from(""),
            Line::from(Span::styled(format!("  {}", w.description), Style::default().fg(Color::Rgb(180, 180, 200)))),
        ];
        render_detail(frame, area, w.name, ACCENT, lines);
    }
}

impl Default for ArmoryPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ArmoryPanel {
    fn update(&mut self, _world: &RadarWorld) -> Vec<RadarEvent> {
        Vec::new()
    }

    fn captures_input(&self) -> bool {
        self.search.editing
    }

    fn handle_key(&mut self, key: KeyEvent, _world: &RadarWorld) -> Vec<RadarEvent> {
        if self.search.editing {
            if self.search.handle_key(key) {
                self.filter.search = self.search.query.clone();
                self.refilter();
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
            KeyCode::Enter => self.detail_open = self.visible_count() > 0,
            KeyCode::Char('/') => self.search.start(),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.filter.category = cycle_option(self.filter.category, Category::all());
                self.refilter();
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.filter.status = cycle_option(self.filter.status, StockStatus::all());
                self.refilter();
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.filter.price = self.filter.price.next();
                self.refilter();
            }
            KeyCode::Char('o') => {
                self.sort_key = self.sort_key.next();
                self.refilter();
            }
            KeyCode::Char('O') => {
                self.sort_order = self.sort_order.toggle();
                self.refilter();
            }
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Esc => self.reset(),
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
                self.detail_open = true;
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _world: &RadarWorld) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT))
            .title(" Armory ")
            .title_style(Style::default().fg(Color::Rgb(255, 160, 120)).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // stats
                Constraint::Length(1), // category breakdown
                Constraint::Length(1), // filters
                Constraint::Length(1), // search
                Constraint::Min(3),    // table
                Constraint::Length(1), // help
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(self.stats_line()), chunks[0]);
        frame.render_widget(Paragraph::new(self.breakdown_line()), chunks[1]);
        frame.render_widget(Paragraph::new(self.filter_line()), chunks[2]);
        frame.render_widget(Paragraph::new(self.search.line()), chunks[3]);

        self.select(self.selected());
        let table_area = chunks[4];
        if self.visible_count() == 0 {
            self.rows_area = None;
            let empty = Paragraph::new(vec![
                Line::from(Span::styled(" No weapons found", Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(" Adjust the filters or press X to reset", Style::default().fg(Color::DarkGray))),
            ]);
            frame.render_widget(empty, table_area);
        } else {
            self.rows_area = Some(Rect { y: table_area.y + 1, height: table_area.height.saturating_sub(1), ..table_area });
            let table = self.weapon_table();
            frame.render_stateful_widget(table, table_area, &mut self.table);
        }

        let dim = |t: &'static str| Span::styled(t, Style::default().fg(Color::DarkGray));
        let help = Paragraph::new(Line::from(vec![
            dim(" C category  P price  T status  O sort  Shift+O order "),
            Span::styled("| ", Style::default().fg(SEP)),
            dim("Enter details "),
            Span::styled("| ", Style::default().fg(SEP)),
            dim("X reset"),
        ]));
        frame.render_widget(help, chunks[5]);

        if self.detail_open {
            self.render_detail_overlay(frame, inner);
        }
    }
}
