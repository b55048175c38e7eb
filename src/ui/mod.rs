pub mod tabs;
pub mod welcome;

use ratatui::prelude::*;

use crate::app::{App, Tab};
use crate::panels::Panel;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Stats footer
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    match app.current_tab {
        Tab::Radar => app.radar.render(frame, chunks[1], &app.world),
        Tab::Status => app.status.render(frame, chunks[1], &app.world),
        Tab::Records => app.records.render(frame, chunks[1], &app.world),
        Tab::Tools => app.armory.render(frame, chunks[1], &app.world),
    }

    tabs::render_footer(frame, app, chunks[2]);

    if app.welcome.should_show() {
        welcome::render_welcome(frame, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 36)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_welcome_overlay_until_acknowledged() {
        let mut app = App::new(&AppConfig::default(), 5);
        assert!(screen_text(&mut app).contains("Welcome to RadarCon"));
        app.welcome.acknowledge();
        let text = screen_text(&mut app);
        assert!(!text.contains("Welcome to RadarCon"));
        assert!(text.contains("Advanced Radar System"));
        assert!(text.contains("Range: 15km"));
    }

    #[test]
    fn test_welcome_hint_names_a_working_quit_key() {
        let mut app = App::new(&AppConfig::default(), 5);
        let text = screen_text(&mut app);
        assert!(text.contains("Ctrl+C quit"));
        assert!(!text.contains("Q quit"));

        // the key the overlay advertises really quits past it
        app.on_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!app.should_quit);
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_every_tab_renders() {
        let mut app = App::new(&AppConfig::default(), 5);
        app.welcome.acknowledge();
        for (digit, marker) in [('2', "Command Center"), ('3', "Records Database"), ('4', "Armory")] {
            app.on_key(KeyEvent::new(KeyCode::Char(digit), KeyModifiers::NONE));
            assert!(screen_text(&mut app).contains(marker), "tab {digit}");
        }
        let text = screen_text(&mut app);
        assert!(text.contains("Tools [11]"));
        assert!(text.contains("Records [5]"));
    }

    #[test]
    fn test_footer_shows_stats() {
        let mut app = App::new(&AppConfig::default(), 5);
        app.welcome.acknowledge();
        screen_text(&mut app);
        app.on_tick();
        let text = screen_text(&mut app);
        assert!(text.contains("Bearing: 002\u{b0}"));
        assert!(text.contains("Alerts: 3"));
    }
}
