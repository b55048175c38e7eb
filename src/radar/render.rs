//! Scope painter.
//!
//! Everything is drawn in canvas pixels with the scope centred on a square
//! canvas. Sizes from the 800 px reference layout are scaled down to the
//! actual canvas, with a floor so markers stay legible on small terminals.

use rand::Rng;
use ratatui::style::Color;

use super::detect::{in_alert_zone, BEAM_WIDTH_DEG};
use super::geometry::{km_to_px, meters_per_pixel, polar_to_pixel, Point, DISPLAY_MARGIN, REFERENCE_CANVAS};
use super::integrate::FRAME_DT;
use super::surface::Surface;
use super::threat::{threat_value, ThreatTier};
use super::types::{RadarConfig, Target};

pub const PRIMARY: Color = Color::Rgb(20, 160, 230);
pub const ACCENT: Color = Color::Rgb(202, 65, 34);
pub const FOREGROUND: Color = Color::Rgb(255, 255, 255);
pub const ALERT: Color = Color::Rgb(239, 68, 68);

const RING_COUNT: usize = 5;
/// Below this the canvas cannot hold the scope and the frame is skipped.
pub const MIN_CANVAS: f64 = 16.0;

/// Everything the renderer reads for one frame.
pub struct ScopeFrame<'a> {
    pub targets: &'a [Target],
    pub beam_deg: f64,
    pub config: &'a RadarConfig,
    pub canvas_size: f64,
}

impl ScopeFrame<'_> {
    fn center(&self) -> Point {
        Point::new(self.canvas_size / 2.0, self.canvas_size / 2.0)
    }

    fn radius(&self) -> f64 {
        self.canvas_size / 2.0
    }

    fn scope_radius(&self) -> f64 {
        self.radius() * DISPLAY_MARGIN
    }

    /// Reference-layout size scaled to this canvas.
    fn scaled(&self, px: f64, min: f64) -> f64 {
        (px * self.canvas_size / REFERENCE_CANVAS).max(min)
    }

    fn target_position(&self, target: &Target) -> Point {
        let mpp = meters_per_pixel(self.canvas_size, self.config.range_km);
        polar_to_pixel(km_to_px(target.range_km, mpp), target.bearing_deg, self.center())
    }
}

fn shade(rgb: (u8, u8, u8), alpha: f64) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    Color::Rgb(
        (rgb.0 as f64 * a) as u8,
        (rgb.1 as f64 * a) as u8,
        (rgb.2 as f64 * a) as u8,
    )
}

/// Draw one complete frame. Returns `false` when the canvas is too small.
pub fn render_scope<S: Surface, R: Rng + ?Sized>(
    surface: &mut S,
    frame: &ScopeFrame,
    rng: &mut R,
) -> bool {
    if frame.canvas_size < MIN_CANVAS || !frame.config.range_km.is_finite() || frame.config.range_km <= 0.0 {
        return false;
    }
    draw_grid(surface, frame);
    draw_beam(surface, frame);
    for target in frame.targets {
        if target.detected {
            draw_target(surface, frame, target);
        }
        if in_alert_zone(target.range_km) {
            draw_alert(surface, frame, target);
        }
        if rng.gen::<f64>() < frame.config.noise * FRAME_DT {
            draw_noise_blip(surface, frame, rng);
        }
    }
    true
}

pub fn draw_grid<S: Surface>(surface: &mut S, frame: &ScopeFrame) {
    let center = frame.center();
    let radius = frame.radius();
    let scope = frame.scope_radius();

    // Background glow: sparse dim dots thinning towards the rim
    let r_int = radius as i32;
    for dy in -r_int..=r_int {
        for dx in -r_int..=r_int {
            let d = ((dx * dx + dy * dy) as f64).sqrt();
            if d > radius {
                continue;
            }
            let hash = (((dx + 997) * 7 + (dy + 991) * 13 + 37) * 31).rem_euclid(250);
            let density = (1.0 - d / radius) * 12.0;
            if (hash as f64) < density {
                let p = Point::new(center.x + dx as f64, center.y + dy as f64);
                surface.dot(p, shade((20, 160, 230), 0.15 + 0.2 * (1.0 - d / radius)));
            }
        }
    }

    // Range rings, dashed 2 on / 6 off
    for i in 1..=RING_COUNT {
        let r = scope * i as f64 / RING_COUNT as f64;
        let steps = (std::f64::consts::TAU * r).ceil() as usize;
        for k in 0..steps {
            if k % 8 < 2 {
                let deg = k as f64 * 360.0 / steps as f64;
                surface.dot(polar_to_pixel(r, deg, center), PRIMARY);
            }
        }
    }

    // Cross lines
    for a in [0.0, 90.0] {
        let p1 = polar_to_pixel(scope, a, center);
        let p2 = polar_to_pixel(scope, a + 180.0, center);
        surface.line(p1, p2, ACCENT);
    }

    // Bearing ticks and labels
    for a in (0..360).step_by(30) {
        let deg = a as f64;
        let outer = polar_to_pixel(scope, deg, center);
        let inner = polar_to_pixel(radius * 0.88, deg, center);
        surface.line(inner, outer, PRIMARY);
        let label = polar_to_pixel(radius * 0.80, deg, center);
        surface.text(label, &format!("{:03}°", a), FOREGROUND);
    }

    // Range labels above each ring
    let km_per_ring = frame.config.range_km / RING_COUNT as f64;
    for i in 1..=RING_COUNT {
        let r = scope * i as f64 / RING_COUNT as f64;
        let p = Point::new(center.x, center.y - r - frame.scaled(6.0, 2.0));
        surface.text(p, &format!("{:.0} km", km_per_ring * i as f64), FOREGROUND);
    }
}

/// Beam sector with brightness falling off away from the center.
pub fn draw_beam<S: Surface>(surface: &mut S, frame: &ScopeFrame) {
    let center = frame.center();
    let scope = frame.scope_radius();
    let half = BEAM_WIDTH_DEG / 2.0;

    let mut r = 1.0;
    while r <= scope {
        let falloff = 1.0 - r / scope;
        // one sample per pixel of arc length
        let steps = ((BEAM_WIDTH_DEG.to_radians() * r).ceil() as usize).max(1);
        for k in 0..=steps {
            let keep = (k + r as usize) % 3 != 0 || falloff > 0.6;
            if !keep {
                continue;
            }
            let deg = frame.beam_deg - half + BEAM_WIDTH_DEG * k as f64 / steps as f64;
            surface.dot(polar_to_pixel(r, deg, center), shade((20, 160, 230), 0.25 + 0.75 * falloff));
        }
        r += 1.0;
    }
}

pub fn draw_target<S: Surface>(surface: &mut S, frame: &ScopeFrame, target: &Target) {
    let p = frame.target_position(target);
    let value = threat_value(target);
    let tier = ThreatTier::from_value(value);
    let marker = frame.scaled(10.0, 2.0);
    let step = frame.scaled(10.0, 4.0);

    surface.disc(p, marker + 1.0, tier.glow());
    surface.disc(p, marker, tier.color());

    let mpp = meters_per_pixel(frame.canvas_size, frame.config.range_km);
    let r_px = km_to_px(target.range_km, mpp);
    let tip = polar_to_pixel(r_px + frame.scaled(20.0, 4.0), target.bearing_deg, frame.center());
    surface.line(p, tip, tier.color());

    surface.text(p, &target.kind.glyph().to_string(), FOREGROUND);
    surface.text(Point::new(p.x, p.y + step * 1.5), &value.to_string(), tier.color());
    surface.text(
        Point::new(p.x, p.y - step * 2.0),
        &format!("{}°", target.bearing_deg.round() as i64),
        tier.color(),
    );
    surface.text(
        Point::new(p.x, p.y - step * 3.0),
        &format!("{:.1}km", target.range_km),
        tier.color(),
    );
}

pub fn draw_alert<S: Surface>(surface: &mut S, frame: &ScopeFrame, target: &Target) {
    let p = frame.target_position(target);
    let size = frame.scaled(12.0, 4.0);
    let apex_y = p.y - size;
    let base_y = p.y + size / 2.0;

    // Filled triangle, one scanline per pixel row
    let mut y = apex_y;
    while y <= base_y {
        let t = (y - apex_y) / (base_y - apex_y);
        let half_w = t * size / 2.0;
        surface.line(Point::new(p.x - half_w, y), Point::new(p.x + half_w, y), ALERT);
        y += 1.0;
    }
    surface.text(Point::new(p.x, p.y + frame.scaled(25.0, 8.0)), "ALERT", ALERT);
}

pub fn draw_noise_blip<S: Surface, R: Rng + ?Sized>(surface: &mut S, frame: &ScopeFrame, rng: &mut R) {
    let scope = frame.scope_radius();
    let r = rng.gen_range(0.1..scope);
    let a = rng.gen_range(0.0..360.0);
    let size = frame.scaled(rng.gen_range(2.0..4.0), 0.5);
    let p = polar_to_pixel(r, a, frame.center());
    surface.disc(p, size, shade((255, 255, 255), rng.gen_range(0.25..0.6)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radar::types::TargetKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[derive(Default)]
    struct RecordingSurface {
        dots: Vec<(Point, Color)>,
        texts: Vec<(Point, String, Color)>,
    }

    impl Surface for RecordingSurface {
        fn dot(&mut self, p: Point, color: Color) {
            self.dots.push((p, color));
        }

        fn text(&mut self, p: Point, text: &str, color: Color) {
            self.texts.push((p, text.to_string(), color));
        }
    }

    impl RecordingSurface {
        fn has_text(&self, s: &str) -> bool {
            self.texts.iter().any(|(_, t, _)| t == s)
        }
    }

    fn quiet_config() -> RadarConfig {
        RadarConfig { noise: 0.0, ..RadarConfig::default() }
    }

    #[test]
    fn test_alert_drawn_regardless_of_detection() {
        let config = quiet_config();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for detected in [false, true] {
            let mut t = Target::new("x", TargetKind::Human, 3.0, 200.0, 0.0, 0.0);
            t.detected = detected;
            let targets = vec![t];
            let frame = ScopeFrame { targets: &targets, beam_deg: 0.0, config: &config, canvas_size: 400.0 };
            let mut s = RecordingSurface::default();
            assert!(render_scope(&mut s, &frame, &mut rng));
            assert!(s.has_text("ALERT"), "detected = {detected}");
            assert!(s.dots.iter().any(|(_, c)| *c == ALERT));
        }
    }

    #[test]
    fn test_undetected_target_is_hidden() {
        let config = quiet_config();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let targets = vec![Target::new("x", TargetKind::Air, 10.0, 200.0, 1.0, 0.0)];
        let frame = ScopeFrame { targets: &targets, beam_deg: 0.0, config: &config, canvas_size: 400.0 };
        let mut s = RecordingSurface::default();
        render_scope(&mut s, &frame, &mut rng);
        assert!(!s.has_text("A"));
        assert!(!s.has_text("ALERT"));
    }

    #[test]
    fn test_detected_target_labels() {
        let config = quiet_config();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut t = Target::new("1", TargetKind::Ship, 3.5, 45.0, 2.0, 0.01);
        t.detected = true;
        let targets = vec![t];
        let frame = ScopeFrame { targets: &targets, beam_deg: 45.0, config: &config, canvas_size: 800.0 };
        let mut s = RecordingSurface::default();
        render_scope(&mut s, &frame, &mut rng);
        assert!(s.has_text("S"));
        assert!(s.has_text("285"));
        assert!(s.has_text("45°"));
        assert!(s.has_text("3.5km"));
        let critical = ThreatTier::Critical.color();
        assert!(s.dots.iter().any(|(_, c)| *c == critical));
    }

    #[test]
    fn test_grid_labels() {
        let config = quiet_config();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let frame = ScopeFrame { targets: &[], beam_deg: 0.0, config: &config, canvas_size: 300.0 };
        let mut s = RecordingSurface::default();
        render_scope(&mut s, &frame, &mut rng);
        for label in ["000°", "030°", "180°", "330°", "3 km", "15 km"] {
            assert!(s.has_text(label), "missing {label}");
        }
    }

    #[test]
    fn test_beam_stays_inside_sector() {
        let config = quiet_config();
        let frame = ScopeFrame { targets: &[], beam_deg: 90.0, config: &config, canvas_size: 200.0 };
        let mut s = RecordingSurface::default();
        draw_beam(&mut s, &frame);
        assert!(!s.dots.is_empty());
        // beam at 090° lights the right half only
        assert!(s.dots.iter().all(|(p, _)| p.x >= 100.0 - 1e-6));
    }

    #[test]
    fn test_tiny_canvas_skips_frame() {
        let config = quiet_config();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let frame = ScopeFrame { targets: &[], beam_deg: 0.0, config: &config, canvas_size: 4.0 };
        let mut s = RecordingSurface::default();
        assert!(!render_scope(&mut s, &frame, &mut rng));
        assert!(s.dots.is_empty() && s.texts.is_empty());
    }

    #[test]
    fn test_full_noise_draws_blips() {
        // noise 1/FRAME_DT makes every roll succeed
        let config = RadarConfig { noise: 1.0 / FRAME_DT + 1.0, ..RadarConfig::default() };
        let targets = vec![Target::new("x", TargetKind::Ship, 10.0, 0.0, 0.0, 0.0)];
        let frame = ScopeFrame { targets: &targets, beam_deg: 180.0, config: &config, canvas_size: 200.0 };
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut with_noise = RecordingSurface::default();
        render_scope(&mut with_noise, &frame, &mut rng);

        let quiet = quiet_config();
        let frame = ScopeFrame { targets: &targets, beam_deg: 180.0, config: &quiet, canvas_size: 200.0 };
        let mut without = RecordingSurface::default();
        render_scope(&mut without, &frame, &mut rng);
        assert!(with_noise.dots.len() > without.dots.len());
    }
}
