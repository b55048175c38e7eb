use ratatui::prelude::*;
use ratatui::widgets::*;

const OVERLAY_BG: Color = Color::Rgb(8, 14, 24);
const KEY: Color = Color::Rgb(80, 200, 255);
const MUTED: Color = Color::Rgb(100, 100, 130);

fn control(key: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
        Span::styled(what, Style::default().fg(Color::Rgb(180, 180, 200))),
    ])
}

pub fn render_welcome(frame: &mut Frame, area: Rect) {
    let overlay_w = 56u16.min(area.width.saturating_sub(4));
    let overlay_h = 19u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(20, 160, 230)))
        .title(" \u{25ce} Welcome to RadarCon ")
        .title_style(Style::default().fg(Color::Rgb(202, 65, 34)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(OVERLAY_BG));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Simulated command-center radar scope.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        control("click", "place a ship"),
        control("shift+click", "place an aircraft"),
        control("ctrl+click", "place a human"),
        control("drag", "move a contact"),
        control("p / r", "pause sweep / toggle 15-10 km"),
        control("s / c", "reseed / clear contacts"),
        control("a A h", "add ship / air / human"),
        control("tab / 1-4", "switch panels"),
        control("/", "search records and tools"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter", Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
            Span::styled(" start  ", Style::default().fg(MUTED)),
            Span::styled("W", Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
            Span::styled(" show again  ", Style::default().fg(MUTED)),
            // q is swallowed while this overlay is up
            Span::styled("Ctrl+C", Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
            Span::styled(" quit", Style::default().fg(MUTED)),
        ]),
    ];

    let p = Paragraph::new(lines).style(Style::default().bg(OVERLAY_BG));
    frame.render_widget(p, inner);
}
