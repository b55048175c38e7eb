use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{Panel, RadarWorld};
use crate::radar::detect::{in_alert_zone, ALERT_RANGE_KM};
use crate::radar::geometry::Point;
use crate::radar::render::{ACCENT, ALERT, PRIMARY};
use crate::radar::scope::format_bearing;
use crate::radar::surface::{BrailleSurface, CanvasLayout};
use crate::radar::threat::{threat_value, ThreatTier};
use crate::radar::{RadarEvent, RadarScope, TargetKind};

const SCOPE_BG: Color = Color::Rgb(4, 10, 18);
const LEGEND_WIDTH: u16 = 26;
const DIM: Color = Color::Rgb(60, 60, 60);

pub struct RadarPanel {
    pub scope: RadarScope,
    /// Screen rect and dot layout of the last drawn canvas.
    canvas: Option<(Rect, CanvasLayout)>,
}

impl RadarPanel {
    pub fn new(seed: u64) -> Self {
        Self {
            scope: RadarScope::new(seed),
            canvas: None,
        }
    }

    pub fn canvas_area(&self) -> Option<Rect> {
        self.canvas.map(|(area, _)| area)
    }

    /// Screen cell to canvas pixel, if the cell lies on the square canvas.
    fn to_canvas(&self, column: u16, row: u16) -> Option<Point> {
        let (area, layout) = self.canvas?;
        if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
            return None;
        }
        let p = layout.cell_to_canvas(column - area.x, row - area.y);
        let on_canvas = (0.0..=layout.side).contains(&p.x) && (0.0..=layout.side).contains(&p.y);
        on_canvas.then_some(p)
    }

    fn render_scope(&mut self, frame: &mut Frame, area: Rect, world: &RadarWorld) {
        let layout = CanvasLayout::fit(area.width as usize, area.height as usize);
        self.scope.set_canvas_size(layout.side);
        self.canvas = Some((area, layout));

        let mut surface = BrailleSurface::new(layout);
        if self.scope.draw(&mut surface, &world.config, &world.targets) {
            frame.render_widget(Paragraph::new(surface.into_lines(SCOPE_BG)), area);
        }
    }

    fn render_legend(&self, frame: &mut Frame, area: Rect, world: &RadarWorld) {
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = |text: &'static str| {
            Line::from(Span::styled(text, Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)))
        };

        let mut lines = vec![header(" CONTACTS")];
        for kind in TargetKind::all() {
            let n = world.targets.iter().filter(|t| t.kind == *kind).count();
            lines.push(Line::from(vec![
                Span::styled(format!(" [{}] ", kind.glyph()), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
                Span::styled(format!("{:<9}", kind.label()), Style::default().fg(Color::Gray)),
                Span::styled(format!("{:>3}", n), Style::default().fg(Color::White)),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(header(" THREAT"));
        for tier in ThreatTier::all() {
            lines.push(Line::from(vec![
                Span::styled(" \u{25cf} ", Style::default().fg(tier.color())),
                Span::styled(tier.label().to_string(), Style::default().fg(Color::Gray)),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled(" \u{25b2} ", Style::default().fg(ALERT)),
            Span::styled(format!("Alert \u{2264} {:.0} km", ALERT_RANGE_KM), Style::default().fg(ALERT)),
        ]));

        lines.push(Line::from(""));
        lines.push(header(" TRACKED"));
        let mut ranked: Vec<_> = world.targets.iter().map(|t| (threat_value(t), t)).collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        let room = (inner.height as usize).saturating_sub(lines.len());
        for (value, t) in ranked.into_iter().take(room) {
            let tier = ThreatTier::from_value(value);
            let marker = if in_alert_zone(t.range_km) {
                Span::styled("!", Style::default().fg(ALERT).add_modifier(Modifier::BOLD))
            } else if t.detected {
                Span::styled("\u{25c9}", Style::default().fg(PRIMARY))
            } else {
                Span::styled(" ", Style::default())
            };
            lines.push(Line::from(vec![
                Span::raw(" "),
                marker,
                Span::styled(format!(" {} ", t.kind.glyph()), Style::default().fg(Color::White)),
                Span::styled(format!("{:>4} ", value), Style::default().fg(tier.color())),
                Span::styled(
                    format!("{:>4} {:>5.1}km", format_bearing(t.bearing_deg), t.range_km),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Whole numbers print without a fraction ("15", "7.5").
fn short_num(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

impl Panel for RadarPanel {
    fn update(&mut self, world: &RadarWorld) -> Vec<RadarEvent> {
        self.scope.tick(&world.config, &world.targets)
    }

    fn handle_key(&mut self, key: KeyEvent, world: &RadarWorld) -> Vec<RadarEvent> {
        let config = &world.config;
        let targets = &world.targets;
        let event = match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => self.scope.toggle_pause(config),
            KeyCode::Char('r') | KeyCode::Char('R') => self.scope.toggle_range(config),
            KeyCode::Char('s') | KeyCode::Char('S') => self.scope.seed_targets(config),
            KeyCode::Char('c') | KeyCode::Char('C') => self.scope.clear_targets(),
            KeyCode::Char('a') => self.scope.add_random_target(TargetKind::Ship, config, targets),
            KeyCode::Char('A') => self.scope.add_random_target(TargetKind::Air, config, targets),
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.scope.add_random_target(TargetKind::Human, config, targets)
            }
            _ => return Vec::new(),
        };
        vec![event]
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, world: &RadarWorld) -> Vec<RadarEvent> {
        let point = self.to_canvas(mouse.column, mouse.row);
        match (mouse.kind, point) {
            (MouseEventKind::Down(MouseButton::Left), Some(p)) => {
                self.scope.pointer_down(p, mouse.modifiers, &world.config, &world.targets)
            }
            (MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved, Some(p)) => {
                self.scope.pointer_move(p, &world.config, &world.targets)
            }
            (MouseEventKind::Up(MouseButton::Left), Some(p)) => {
                self.scope.pointer_up(p, &world.config, &world.targets)
            }
            // off the canvas: drop the drag and any armed click
            (MouseEventKind::Drag(_) | MouseEventKind::Moved | MouseEventKind::Up(_), None) => {
                self.scope.pointer_leave();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, world: &RadarWorld) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(PRIMARY))
            .title(" Advanced Radar System ")
            .title_style(Style::default().fg(Color::Rgb(130, 220, 255)).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(inner);

        let config = &world.config;
        let mut status = vec![
            Span::styled(" \u{25ce} ", Style::default().fg(PRIMARY)),
            Span::styled(
                format!("Range: {}km", short_num(config.range_km)),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Sweep: {}\u{b0}/s", short_num(config.sweep_deg_per_sec)),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Noise: {:.0}%", config.noise * 100.0),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Beam: {}", world.stats.bearing),
                Style::default().fg(Color::Green),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Detected: {}", world.stats.count),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ];
        if config.paused {
            status.push(Span::styled("  PAUSED ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        }
        frame.render_widget(Paragraph::new(Line::from(status)), chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(LEGEND_WIDTH)])
            .split(chunks[1]);
        self.render_scope(frame, body[0], world);
        self.render_legend(frame, body[1], world);

        let pause_label = if config.paused { "P Resume " } else { "P Pause " };
        let help = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {}", pause_label), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("| ", Style::default().fg(DIM)),
            Span::styled("R Range 15/10 ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(DIM)),
            Span::styled("S Seed ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(DIM)),
            Span::styled("C Clear ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(DIM)),
            Span::styled("a/A/h Add ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(DIM)),
            Span::styled("Click ship, Shift air, Ctrl human ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(DIM)),
            Span::styled("Drag move", Style::default().fg(Color::DarkGray)),
        ]));
        frame.render_widget(help, chunks[2]);
    }
}
