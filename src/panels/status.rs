use ratatui::prelude::*;
use ratatui::widgets::*;
use rand::Rng;

use super::{Panel, RadarWorld};
use crate::feeds::{Health, MockFeeds, SIGNAL_AXIS_GHZ, SPECTRUM_BINS};
use crate::radar::RadarEvent;

const BAR_WIDTH: usize = 16;
const EIGHTHS: [char; 9] = [' ', '\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}', '\u{2588}'];

/// Command-center cards fed by the mock telemetry generator.
pub struct StatusPanel<R: Rng> {
    pub feeds: MockFeeds<R>,
}

impl<R: Rng> StatusPanel<R> {
    pub fn new(rng: R, tick_ms: u64) -> Self {
        Self {
            feeds: MockFeeds::new(rng, tick_ms),
        }
    }
}

fn card(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn row(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<16}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

/// Text gauge: `███████░░░░ 64%`.
fn bar(pct: u32, color: Color) -> Line<'static> {
    let filled = (pct.min(100) as usize * BAR_WIDTH + 50) / 100;
    Line::from(vec![
        Span::raw(" "),
        Span::styled("\u{2588}".repeat(filled), Style::default().fg(color)),
        Span::styled("\u{2591}".repeat(BAR_WIDTH - filled), Style::default().fg(Color::Rgb(50, 50, 60))),
        Span::styled(format!(" {:>3}%", pct), Style::default().fg(Color::White)),
    ])
}

/// Vertical bar chart, one column per value, with eighth-block tops.
fn column_chart(columns: &[(f64, Color)], height: usize) -> Vec<Line<'static>> {
    (0..height)
        .map(|row| {
            // eighths of a cell already covered by the rows below this one
            let below = (height - 1 - row) * 8;
            let spans: Vec<Span> = columns
                .iter()
                .map(|(pct, color)| {
                    let level = (pct.clamp(0.0, 100.0) / 100.0 * (height * 8) as f64).round() as usize;
                    let fill = level.saturating_sub(below).min(8);
                    Span::styled(EIGHTHS[fill].to_string(), Style::default().fg(*color))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn percent_color(pct: u32) -> Color {
    if pct >= 80 {
        Health::Online.color()
    } else if pct >= 65 {
        Health::Warning.color()
    } else {
        Health::Error.color()
    }
}

impl<R: Rng> StatusPanel<R> {
    fn render_spectrum(&self, frame: &mut Frame, area: Rect) {
        let block = card(" Spectrum ", Color::Rgb(20, 160, 230));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height < 2 {
            return;
        }

        let spectrum = &self.feeds.spectrum;
        let time = self.feeds.time();
        let width = inner.width as usize;
        let columns: Vec<(f64, Color)> = (0..width)
            .map(|c| {
                let idx = c * SPECTRUM_BINS / width;
                let band = spectrum.bins.get(idx).map_or(Color::DarkGray, |b| b.band.color());
                (spectrum.animated(idx, time), band)
            })
            .collect();
        let mut lines = column_chart(&columns, inner.height as usize - 1);
        lines.push(Line::from(vec![
            Span::styled("0", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:>w$}", "100Hz", w = width.saturating_sub(1)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_signals(&self, frame: &mut Frame, area: Rect) {
        let time = self.feeds.time();
        let mut lines = Vec::with_capacity(self.feeds.signals.len() * 2);
        for (i, signal) in self.feeds.signals.iter().enumerate() {
            let color = signal.kind.color();
            let state = if signal.active {
                Span::styled(format!("{:.1} GHz", signal.frequency_ghz), Style::default().fg(Color::White))
            } else {
                Span::styled("OFF AIR", Style::default().fg(Color::DarkGray))
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {:<13}", signal.kind.label()), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                state,
                Span::styled(
                    format!("  /{:.0}", SIGNAL_AXIS_GHZ),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            if signal.active {
                lines.push(bar(signal.live_strength(i, time).round() as u32, color));
            }
        }
        let block = card(" Signals ", Color::Rgb(34, 197, 94));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl<R: Rng> Panel for StatusPanel<R> {
    fn update(&mut self, _world: &RadarWorld) -> Vec<RadarEvent> {
        self.feeds.tick();
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, world: &RadarWorld) {
        let block = card(" Command Center ", Color::Rgb(100, 200, 255));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(10), Constraint::Length(9)])
            .split(inner);

        let status = &self.feeds.status;
        let headline = Line::from(vec![
            Span::styled(" \u{25c9} SYSTEM ", Style::default().fg(Color::Gray)),
            Span::styled(
                status.overall.label().to_string(),
                Style::default().fg(status.overall.color()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Scope: {} contacts, {} detected", world.targets.len(), world.stats.count),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        frame.render_widget(Paragraph::new(headline), chunks[0]);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(30),
                Constraint::Percentage(40),
            ])
            .split(chunks[1]);

        let subsystems: Vec<Line> = status
            .subsystems()
            .iter()
            .map(|(name, health)| row(name, health.label().to_string(), health.color()))
            .collect();
        let sub_block = card(" Subsystems ", Color::Rgb(74, 222, 128));
        frame.render_widget(Paragraph::new(subsystems).block(sub_block), cols[0]);

        let w = &self.feeds.weather;
        let weather = vec![
            row("condition", w.condition.to_string(), Color::White),
            row("temperature", format!("{}\u{b0}C", w.temperature_c), Color::Rgb(251, 146, 60)),
            row("humidity", format!("{}%", w.humidity_pct), Color::Rgb(96, 165, 250)),
            row("wind", format!("{} km/h {}", w.wind_kmh, w.direction), Color::Rgb(165, 180, 252)),
        ];
        let weather_block = card(" Weather ", Color::Rgb(96, 165, 250));
        frame.render_widget(Paragraph::new(weather).block(weather_block), cols[1]);

        let s = &self.feeds.stats;
        let telemetry = vec![
            row("total targets", s.total_targets.to_string(), Color::White),
            row("detected", s.detected_targets.to_string(), Color::Rgb(74, 222, 128)),
            row("alerts", s.alert_targets.to_string(), Color::Rgb(248, 113, 113)),
            row("core temp", format!("{}\u{b0}C", s.temperature_c), Color::Rgb(251, 146, 60)),
            Line::from(Span::styled(" power", Style::default().fg(Color::Gray))),
            bar(s.power_pct, percent_color(s.power_pct)),
            Line::from(Span::styled(" signal", Style::default().fg(Color::Gray))),
            bar(s.signal_pct, percent_color(s.signal_pct)),
        ];
        let stats_block = card(" Telemetry ", Color::Rgb(250, 204, 21));
        frame.render_widget(Paragraph::new(telemetry).block(stats_block), cols[2]);

        let signal_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);
        self.render_spectrum(frame, signal_row[0]);
        self.render_signals(frame, signal_row[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_bar_fill() {
        let line = bar(50, Color::White);
        assert_eq!(line.spans[1].content.chars().count(), BAR_WIDTH / 2);
        assert_eq!(line.spans[2].content.chars().count(), BAR_WIDTH / 2);
        let full = bar(100, Color::White);
        assert_eq!(full.spans[2].content.chars().count(), 0);
    }

    #[test]
    fn test_update_never_touches_radar() {
        let mut panel = StatusPanel::new(ChaCha8Rng::seed_from_u64(2), 16);
        let world = RadarWorld::default();
        for _ in 0..400 {
            assert!(panel.update(&world).is_empty());
        }
        assert!(panel.feeds.stats.total_targets >= 5);
    }

    #[test]
    fn test_render_shows_weather() {
        let mut panel = StatusPanel::new(ChaCha8Rng::seed_from_u64(2), 16);
        let world = RadarWorld::default();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| panel.render(f, f.area(), &world)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains(panel.feeds.weather.condition));
        assert!(text.contains("OPERATIONAL"));
        assert!(text.contains("Spectrum"));
        assert!(text.contains("RADAR"));
        assert!(text.contains("2.4 GHz"));
        assert!(text.contains("OFF AIR"));
    }

    #[test]
    fn test_column_chart_levels() {
        let lines = column_chart(&[(100.0, Color::White), (50.0, Color::White), (0.0, Color::White)], 2);
        let row = |r: usize| -> Vec<String> { lines[r].spans.iter().map(|s| s.content.to_string()).collect() };
        assert_eq!(row(0), vec!["\u{2588}", " ", " "]);
        assert_eq!(row(1), vec!["\u{2588}", "\u{2588}", " "]);

        // 25% of two rows is half of the bottom cell
        let lines = column_chart(&[(25.0, Color::White)], 2);
        assert_eq!(lines[1].spans[0].content, "\u{2584}");
    }
}
