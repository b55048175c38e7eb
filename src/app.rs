use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::AppConfig;
use crate::panels::armory::ArmoryPanel;
use crate::panels::radar::RadarPanel;
use crate::panels::records::RecordsPanel;
use crate::panels::status::StatusPanel;
use crate::panels::{Panel, RadarWorld};
use crate::radar::types::default_targets;
use crate::radar::RadarEvent;
use crate::session::WelcomeState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tab {
    Radar,
    Status,
    Records,
    Tools,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Radar, Tab::Status, Tab::Records, Tab::Tools]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Radar => " Radar ",
            Tab::Status => " Status ",
            Tab::Records => " Records ",
            Tab::Tools => " Tools ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Radar => 0,
            Tab::Status => 1,
            Tab::Records => 2,
            Tab::Tools => 3,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub world: RadarWorld,
    pub welcome: WelcomeState,
    pub radar: RadarPanel,
    pub status: StatusPanel<ChaCha8Rng>,
    pub records: RecordsPanel,
    pub armory: ArmoryPanel,
}

impl App {
    pub fn new(config: &AppConfig, seed: u64) -> Self {
        let welcome = if config.skip_welcome {
            WelcomeState::already_seen()
        } else {
            WelcomeState::new()
        };
        Self {
            should_quit: false,
            current_tab: Tab::Radar,
            world: RadarWorld::new(config.radar.clone(), default_targets()),
            welcome,
            radar: RadarPanel::new(seed),
            // feeds draw from their own stream so radar input never shifts them
            status: StatusPanel::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)), config.tick_rate_ms),
            records: RecordsPanel::new(),
            armory: ArmoryPanel::new(),
        }
    }

    /// Run `f` against the visible panel and apply what it reports.
    fn with_current_panel<F>(&mut self, f: F)
    where
        F: FnOnce(&mut dyn Panel, &RadarWorld) -> Vec<RadarEvent>,
    {
        let panel: &mut dyn Panel = match self.current_tab {
            Tab::Radar => &mut self.radar,
            Tab::Status => &mut self.status,
            Tab::Records => &mut self.records,
            Tab::Tools => &mut self.armory,
        };
        let events = f(panel, &self.world);
        self.world.apply(events);
    }

    fn current_captures_input(&self) -> bool {
        match self.current_tab {
            Tab::Radar => self.radar.captures_input(),
            Tab::Status => self.status.captures_input(),
            Tab::Records => self.records.captures_input(),
            Tab::Tools => self.armory.captures_input(),
        }
    }

    /// Radar and feeds advance every tick, visible or not. The tables are static.
    pub fn on_tick(&mut self) {
        let events = self.radar.update(&self.world);
        self.world.apply(events);
        let events = self.status.update(&self.world);
        self.world.apply(events);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // The welcome overlay intercepts all input
        if self.welcome.should_show() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.welcome.acknowledge();
                info!("welcome acknowledged");
            }
            return;
        }

        // A panel taking text gets every key, shortcuts included
        if self.current_captures_input() {
            self.with_current_panel(|panel, world| panel.handle_key(key, world));
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                self.welcome.reset();
                return;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Char('1') => {
                self.current_tab = Tab::Radar;
                return;
            }
            KeyCode::Char('2') => {
                self.current_tab = Tab::Status;
                return;
            }
            KeyCode::Char('3') => {
                self.current_tab = Tab::Records;
                return;
            }
            KeyCode::Char('4') => {
                self.current_tab = Tab::Tools;
                return;
            }
            _ => {}
        }

        self.with_current_panel(|panel, world| panel.handle_key(key, world));
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.welcome.should_show() {
            return;
        }
        self.with_current_panel(|panel, world| panel.handle_mouse(mouse, world));
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + 1) % tabs.len()];
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + tabs.len() - 1) % tabs.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(&AppConfig::default(), 11)
    }

    #[test]
    fn test_starts_with_dashboard_defaults() {
        let app = app();
        assert_eq!(app.current_tab, Tab::Radar);
        assert_eq!(app.world.targets.len(), 6);
        assert_eq!(app.world.config.range_km, 15.0);
        assert!(app.welcome.should_show());
    }

    #[test]
    fn test_welcome_swallows_keys_until_acknowledged() {
        let mut app = app();
        app.on_key(key(KeyCode::Char('p')));
        assert!(!app.world.config.paused);
        app.on_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);

        app.on_key(key(KeyCode::Enter));
        assert!(app.welcome.has_seen());
        app.on_key(key(KeyCode::Char('p')));
        assert!(app.world.config.paused);

        app.on_key(key(KeyCode::Char('w')));
        assert!(app.welcome.should_show());
    }

    #[test]
    fn test_ctrl_c_quits_through_overlay() {
        let mut app = app();
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_cycles() {
        let mut config = AppConfig::default();
        config.skip_welcome = true;
        let mut app = App::new(&config, 1);
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Status);
        app.on_key(key(KeyCode::Tab));
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Tools);
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Radar);
        app.on_key(key(KeyCode::BackTab));
        assert_eq!(app.current_tab, Tab::Tools);
        app.on_key(key(KeyCode::Char('2')));
        assert_eq!(app.current_tab, Tab::Status);
        // radar keys are inert off the radar tab
        app.on_key(key(KeyCode::Char('c')));
        assert_eq!(app.world.targets.len(), 6);
    }

    #[test]
    fn test_typing_in_search_bypasses_shortcuts() {
        let mut config = AppConfig::default();
        config.skip_welcome = true;
        let mut app = App::new(&config, 1);
        app.on_key(key(KeyCode::Char('3')));
        assert_eq!(app.current_tab, Tab::Records);

        app.on_key(key(KeyCode::Char('/')));
        for c in "q1w".chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        assert!(!app.should_quit);
        assert_eq!(app.current_tab, Tab::Records);
        assert!(!app.welcome.should_show());
        assert_eq!(app.records.search.query, "q1w");

        // Enter hands shortcuts back
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Char('4')));
        assert_eq!(app.current_tab, Tab::Tools);
        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tick_sweeps_and_reports() {
        let mut app = app();
        app.on_tick();
        // 120 deg/s * 0.016 s
        assert_eq!(app.world.stats.bearing, "002\u{b0}");
        assert!(app.world.stats.scale.starts_with("1 px = ? m"));

        app.world.config.paused = true;
        let before = app.radar.scope.beam_deg();
        app.on_tick();
        assert_eq!(app.radar.scope.beam_deg(), before);
    }
}
