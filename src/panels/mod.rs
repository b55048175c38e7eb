pub mod armory;
pub mod browse;
pub mod radar;
pub mod records;
pub mod status;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::prelude::*;
use tracing::info;

use crate::radar::{RadarConfig, RadarEvent, RadarStats, Target};

/// State the dashboard owns and hands to panels by reference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadarWorld {
    pub config: RadarConfig,
    pub targets: Vec<Target>,
    pub stats: RadarStats,
}

impl RadarWorld {
    pub fn new(config: RadarConfig, targets: Vec<Target>) -> Self {
        Self {
            config,
            targets,
            stats: RadarStats::default(),
        }
    }

    /// Apply radar notifications in order.
    pub fn apply(&mut self, events: impl IntoIterator<Item = RadarEvent>) {
        for event in events {
            match event {
                RadarEvent::TargetsChanged(targets) => self.targets = targets,
                RadarEvent::StatsChanged(stats) => self.stats = stats,
                RadarEvent::ConfigChanged(config) => {
                    info!(
                        range_km = config.range_km,
                        sweep = config.sweep_deg_per_sec,
                        paused = config.paused,
                        "radar config changed"
                    );
                    self.config = config;
                }
            }
        }
    }
}

pub trait Panel {
    fn update(&mut self, world: &RadarWorld) -> Vec<RadarEvent>;
    fn render(&mut self, frame: &mut Frame, area: Rect, world: &RadarWorld);

    fn handle_key(&mut self, _key: KeyEvent, _world: &RadarWorld) -> Vec<RadarEvent> {
        Vec::new()
    }

    fn handle_mouse(&mut self, _mouse: MouseEvent, _world: &RadarWorld) -> Vec<RadarEvent> {
        Vec::new()
    }

    /// True while the panel is taking text, so global shortcuts stand down.
    fn captures_input(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radar::types::default_targets;

    #[test]
    fn test_apply_in_order() {
        let mut world = RadarWorld::new(RadarConfig::default(), default_targets());
        let paused = RadarConfig { paused: true, ..RadarConfig::default() };
        world.apply(vec![
            RadarEvent::TargetsChanged(Vec::new()),
            RadarEvent::ConfigChanged(paused.clone()),
            RadarEvent::StatsChanged(RadarStats { count: 3, ..RadarStats::default() }),
        ]);
        assert!(world.targets.is_empty());
        assert_eq!(world.config, paused);
        assert_eq!(world.stats.count, 3);
    }
}
