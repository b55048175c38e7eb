use crossterm::event::KeyModifiers;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::detect::in_alert_zone;
use super::geometry::{clamp_range, meters_per_pixel, normalize_deg, pixel_to_polar, px_to_km, Point};
use super::integrate::{advance_beam, step_targets};
use super::interact::{hit_test, kind_for_modifiers, seed_population, spawn_target, DragState};
use super::render::{render_scope, ScopeFrame};
use super::surface::Surface;
use super::types::{RadarConfig, RadarEvent, RadarStats, Target, TargetKind};

/// Range toggle offered by the on-screen control.
const RANGE_PRESETS_KM: (f64, f64) = (15.0, 10.0);

/// The radar component: beam state, pointer state and an RNG.
///
/// Targets and config belong to the caller and are passed in by reference.
/// Every mutation comes back as a [`RadarEvent`] for the caller to apply.
pub struct RadarScope {
    beam_deg: f64,
    drag: DragState,
    /// Modifiers of a press that missed every target; placed on release.
    pending_click: Option<KeyModifiers>,
    canvas_size: f64,
    rng: ChaCha8Rng,
}

impl RadarScope {
    pub fn new(seed: u64) -> Self {
        Self {
            beam_deg: 0.0,
            drag: DragState::Idle,
            pending_click: None,
            canvas_size: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn beam_deg(&self) -> f64 {
        self.beam_deg
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn has_pending_click(&self) -> bool {
        self.pending_click.is_some()
    }

    pub fn canvas_size(&self) -> f64 {
        self.canvas_size
    }

    pub fn set_canvas_size(&mut self, side: f64) {
        self.canvas_size = side;
    }

    fn center(&self) -> Point {
        Point::new(self.canvas_size / 2.0, self.canvas_size / 2.0)
    }

    fn mpp(&self, config: &RadarConfig) -> f64 {
        meters_per_pixel(self.canvas_size, config.range_km)
    }

    /// One simulation frame: sweep, integrate, detect, report.
    pub fn tick(&mut self, config: &RadarConfig, targets: &[Target]) -> Vec<RadarEvent> {
        self.beam_deg = advance_beam(self.beam_deg, config);
        let mut events = Vec::with_capacity(2);
        let stats = match step_targets(targets, self.beam_deg, config.range_km) {
            Some(updated) => {
                let stats = self.stats(config, &updated);
                events.push(RadarEvent::TargetsChanged(updated));
                stats
            }
            None => self.stats(config, targets),
        };
        events.push(RadarEvent::StatsChanged(stats));
        events
    }

    pub fn stats(&self, config: &RadarConfig, targets: &[Target]) -> RadarStats {
        let mpp = if self.canvas_size > 0.0 { Some(self.mpp(config)) } else { None };
        compute_stats(targets, self.beam_deg, mpp)
    }

    /// Paint the current state. Skips silently when the canvas is unusable.
    pub fn draw<S: Surface>(&mut self, surface: &mut S, config: &RadarConfig, targets: &[Target]) -> bool {
        let frame = ScopeFrame {
            targets,
            beam_deg: self.beam_deg,
            config,
            canvas_size: self.canvas_size,
        };
        render_scope(surface, &frame, &mut self.rng)
    }

    /// Press on the canvas: grab a target under the pointer, otherwise arm a
    /// click that places a new one on release.
    pub fn pointer_down(
        &mut self,
        p: Point,
        modifiers: KeyModifiers,
        config: &RadarConfig,
        targets: &[Target],
    ) -> Vec<RadarEvent> {
        self.pending_click = None;
        if self.canvas_size <= 0.0 {
            return Vec::new();
        }
        if let Some(hit) = hit_test(targets, p, self.canvas_size, self.mpp(config)) {
            debug!(id = %hit.id, "drag start");
            self.drag = DragState::Dragging(hit.id.clone());
        } else {
            self.pending_click = Some(modifiers);
        }
        Vec::new()
    }

    /// Pointer moved; only meaningful while dragging.
    pub fn pointer_move(&mut self, p: Point, config: &RadarConfig, targets: &[Target]) -> Vec<RadarEvent> {
        let Some(id) = self.drag.dragged_id() else { return Vec::new() };
        if self.canvas_size <= 0.0 {
            return Vec::new();
        }
        let (r_px, bearing) = pixel_to_polar(p.x, p.y, self.center());
        let range_km = clamp_range(px_to_km(r_px, self.mpp(config)), config.range_km);
        let next: Vec<Target> = targets
            .iter()
            .map(|t| {
                if t.id == id {
                    Target { range_km, bearing_deg: bearing, ..t.clone() }
                } else {
                    t.clone()
                }
            })
            .collect();
        vec![RadarEvent::TargetsChanged(next)]
    }

    /// Release at `p`. Ends a drag, or completes an armed click by placing
    /// a target of the pressed kind where the button came up.
    pub fn pointer_up(&mut self, p: Point, config: &RadarConfig, targets: &[Target]) -> Vec<RadarEvent> {
        let pending = self.pending_click.take();
        if let DragState::Dragging(id) = &self.drag {
            debug!(id = %id, "drag end");
            self.drag = DragState::Idle;
            return Vec::new();
        }
        let Some(modifiers) = pending else { return Vec::new() };
        if self.canvas_size <= 0.0 {
            return Vec::new();
        }

        let (r_px, bearing) = pixel_to_polar(p.x, p.y, self.center());
        let kind = kind_for_modifiers(modifiers);
        let range_km = px_to_km(r_px, self.mpp(config));
        let target = spawn_target(&mut self.rng, kind, range_km, bearing, config.range_km);
        info!(id = %target.id, ?kind, range_km = target.range_km, bearing = target.bearing_deg, "target placed");
        let mut next = targets.to_vec();
        next.push(target);
        vec![RadarEvent::TargetsChanged(next)]
    }

    /// Pointer left the canvas: the drag ends and an armed click is dropped.
    pub fn pointer_leave(&mut self) {
        if let DragState::Dragging(id) = &self.drag {
            debug!(id = %id, "drag end");
        }
        self.drag = DragState::Idle;
        self.pending_click = None;
    }

    pub fn add_target(
        &mut self,
        kind: TargetKind,
        range_km: f64,
        bearing_deg: f64,
        config: &RadarConfig,
        targets: &[Target],
    ) -> RadarEvent {
        let target = spawn_target(&mut self.rng, kind, range_km, bearing_deg, config.range_km);
        info!(id = %target.id, ?kind, "target added");
        let mut next = targets.to_vec();
        next.push(target);
        RadarEvent::TargetsChanged(next)
    }

    /// Add a target of `kind` somewhere random inside the scope.
    pub fn add_random_target(&mut self, kind: TargetKind, config: &RadarConfig, targets: &[Target]) -> RadarEvent {
        let range_km = self.rng.gen_range(0.1..=(config.range_km * 0.95).max(0.1));
        let bearing = self.rng.gen_range(0.0..360.0);
        self.add_target(kind, range_km, bearing, config, targets)
    }

    pub fn clear_targets(&mut self) -> RadarEvent {
        info!("targets cleared");
        self.drag = DragState::Idle;
        self.pending_click = None;
        RadarEvent::TargetsChanged(Vec::new())
    }

    pub fn seed_targets(&mut self, config: &RadarConfig) -> RadarEvent {
        let targets = seed_population(&mut self.rng, config.range_km);
        info!(count = targets.len(), "targets reseeded");
        self.drag = DragState::Idle;
        self.pending_click = None;
        RadarEvent::TargetsChanged(targets)
    }

    pub fn toggle_pause(&self, config: &RadarConfig) -> RadarEvent {
        let paused = !config.paused;
        info!(paused, "radar pause toggled");
        RadarEvent::ConfigChanged(RadarConfig { paused, ..config.clone() })
    }

    pub fn toggle_range(&self, config: &RadarConfig) -> RadarEvent {
        let (wide, narrow) = RANGE_PRESETS_KM;
        let range_km = if config.range_km == wide { narrow } else { wide };
        info!(range_km, "radar range toggled");
        RadarEvent::ConfigChanged(RadarConfig { range_km, ..config.clone() })
    }
}

pub fn format_bearing(beam_deg: f64) -> String {
    let deg = (normalize_deg(beam_deg).round() as i64).rem_euclid(360);
    format!("{:03}°", deg)
}

/// Stats record for the surrounding UI. `mpp` is `None` before the first draw.
pub fn compute_stats(targets: &[Target], beam_deg: f64, mpp: Option<f64>) -> RadarStats {
    let count = targets.iter().filter(|t| t.detected).count();
    let alerts = targets.iter().filter(|t| in_alert_zone(t.range_km)).count();
    let scale = match mpp {
        Some(m) => format!("1 px = {:.1} m | Alerts: {}", m, alerts),
        None => format!("1 px = ? m | Alerts: {}", alerts),
    };
    RadarStats {
        bearing: format_bearing(beam_deg),
        count,
        scale,
    }
}
