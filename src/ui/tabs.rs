use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default()
                    .fg(Color::Rgb(255, 220, 80))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(120, 120, 140))
            };
            let mut spans = vec![Span::styled(t.title(), style)];
            spans.push(match t {
                Tab::Radar => Span::styled(
                    format!("[{}] ", app.world.targets.len()),
                    Style::default().fg(Color::Rgb(20, 160, 230)),
                ),
                Tab::Status => {
                    let overall = app.status.feeds.status.overall;
                    Span::styled("\u{25cf} ", Style::default().fg(overall.color()))
                }
                Tab::Records => Span::styled(
                    format!("[{}] ", app.records.visible_count()),
                    Style::default().fg(Color::Rgb(120, 120, 140)),
                ),
                Tab::Tools => Span::styled(
                    format!("[{}] ", app.armory.visible_count()),
                    Style::default().fg(Color::Rgb(120, 120, 140)),
                ),
            });
            Line::from(spans)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(20, 160, 230)))
                .border_type(BorderType::Rounded)
                .title(" \u{25ce} RadarCon ")
                .title_style(
                    Style::default()
                        .fg(Color::Rgb(202, 65, 34))
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" \u{2502} ", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}

/// Live radar readout under the content.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.world.stats;
    let sep = || Span::styled(" \u{2502} ", Style::default().fg(Color::Rgb(60, 60, 80)));
    let line = Line::from(vec![
        Span::styled(" Targets: ", Style::default().fg(Color::Rgb(120, 120, 140))),
        Span::styled(
            stats.count.to_string(),
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled("Scale: ", Style::default().fg(Color::Rgb(120, 120, 140))),
        Span::styled(stats.scale.clone(), Style::default().fg(Color::White)),
        sep(),
        Span::styled("Bearing: ", Style::default().fg(Color::Rgb(120, 120, 140))),
        Span::styled(
            stats.bearing.clone(),
            Style::default().fg(Color::Rgb(74, 222, 128)).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled("Tab/1-4 switch  W welcome  q/Ctrl+C quit", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
