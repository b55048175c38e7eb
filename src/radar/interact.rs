use crossterm::event::KeyModifiers;
use rand::Rng;

use super::geometry::{clamp_range, km_to_px, normalize_deg, polar_to_pixel, Point, REFERENCE_CANVAS};
use super::types::{random_id, Target, TargetKind};

/// Grab radius on the reference canvas.
pub const HIT_RADIUS_PX: f64 = 15.0;
/// A terminal cell is 2x4 dots, so anything tighter is unclickable.
pub const MIN_HIT_RADIUS_PX: f64 = 3.0;

/// Pointer drag over the scope.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(String),
}

impl DragState {
    pub fn dragged_id(&self) -> Option<&str> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(id) => Some(id),
        }
    }
}

/// Plain click places a ship, shift an aircraft, ctrl a human.
pub fn kind_for_modifiers(modifiers: KeyModifiers) -> TargetKind {
    if modifiers.contains(KeyModifiers::SHIFT) {
        TargetKind::Air
    } else if modifiers.contains(KeyModifiers::CONTROL) {
        TargetKind::Human
    } else {
        TargetKind::Ship
    }
}

/// Grab radius for a canvas of `canvas_size` pixels.
pub fn hit_radius(canvas_size: f64) -> f64 {
    (HIT_RADIUS_PX * canvas_size / REFERENCE_CANVAS).max(MIN_HIT_RADIUS_PX)
}

/// First target whose marker lies within [`hit_radius`] of `p`.
pub fn hit_test<'a>(targets: &'a [Target], p: Point, canvas_size: f64, mpp: f64) -> Option<&'a Target> {
    let center = Point::new(canvas_size / 2.0, canvas_size / 2.0);
    let radius = hit_radius(canvas_size);
    targets.iter().find(|t| {
        let pos = polar_to_pixel(km_to_px(t.range_km, mpp), t.bearing_deg, center);
        pos.distance(p) <= radius
    })
}

fn rnd<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
    a + rng.gen::<f64>() * (b - a)
}

/// New target at a position with a random heading and drift.
pub fn spawn_target<R: Rng + ?Sized>(
    rng: &mut R,
    kind: TargetKind,
    range_km: f64,
    bearing_deg: f64,
    max_range_km: f64,
) -> Target {
    let sign = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
    let dir = sign * rnd(rng, 0.0, 60.0);
    let drift = rnd(rng, -0.02, 0.02);
    Target::new(
        random_id(rng),
        kind,
        clamp_range(range_km, max_range_km),
        normalize_deg(bearing_deg),
        dir / 3.6,
        drift,
    )
}

/// Mixed default population: 4 ships, 3 aircraft, 2 humans.
pub fn seed_population<R: Rng + ?Sized>(rng: &mut R, max_range_km: f64) -> Vec<Target> {
    let mut targets = Vec::with_capacity(9);
    // (kind, count, min range, max range fraction, angular speed, radial drift)
    let plan = [
        (TargetKind::Ship, 4, 0.5, 0.8, 10.0, 0.02),
        (TargetKind::Air, 3, 2.0, 0.95, 50.0, 0.02),
        (TargetKind::Human, 2, 0.1, 0.3, 5.0, 0.01),
    ];
    for (kind, count, min_r, max_frac, speed, drift) in plan {
        for _ in 0..count {
            let hi = (max_range_km * max_frac).max(min_r);
            let range_km = clamp_range(rnd(rng, min_r, hi), max_range_km);
            let bearing_deg = normalize_deg(rnd(rng, 0.0, 360.0));
            let vel = rnd(rng, -speed, speed) / 3.6;
            let vr = rnd(rng, -drift, drift);
            targets.push(Target::new(random_id(rng), kind, range_km, bearing_deg, vel, vr));
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radar::geometry::{meters_per_pixel, MAX_RANGE_FRACTION};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_modifier_selects_kind() {
        assert_eq!(kind_for_modifiers(KeyModifiers::NONE), TargetKind::Ship);
        assert_eq!(kind_for_modifiers(KeyModifiers::SHIFT), TargetKind::Air);
        assert_eq!(kind_for_modifiers(KeyModifiers::CONTROL), TargetKind::Human);
        assert_eq!(kind_for_modifiers(KeyModifiers::SHIFT | KeyModifiers::CONTROL), TargetKind::Air);
    }

    #[test]
    fn test_hit_test_radius() {
        // full reference canvas keeps the 15 px radius
        let center = Point::new(400.0, 400.0);
        let mpp = meters_per_pixel(800.0, 10.0);
        let targets = vec![Target::new("t", TargetKind::Ship, 5.0, 90.0, 0.0, 0.0)];
        let pos = polar_to_pixel(km_to_px(5.0, mpp), 90.0, center);

        let near = Point::new(pos.x + 10.0, pos.y + 10.0);
        assert_eq!(hit_test(&targets, near, 800.0, mpp).map(|t| t.id.as_str()), Some("t"));

        let far = Point::new(pos.x + 12.0, pos.y + 12.0);
        assert!(hit_test(&targets, far, 800.0, mpp).is_none());
    }

    #[test]
    fn test_hit_radius_scales_with_canvas() {
        assert_eq!(hit_radius(800.0), HIT_RADIUS_PX);
        assert_eq!(hit_radius(400.0), 7.5);
        assert_eq!(hit_radius(104.0), MIN_HIT_RADIUS_PX);

        // on a small canvas two nearby markers no longer share one grab zone
        let mpp = meters_per_pixel(200.0, 10.0);
        let center = Point::new(100.0, 100.0);
        let targets = vec![
            Target::new("a", TargetKind::Ship, 5.0, 90.0, 0.0, 0.0),
            Target::new("b", TargetKind::Ship, 5.0, 100.0, 0.0, 0.0),
        ];
        let b = polar_to_pixel(km_to_px(5.0, mpp), 100.0, center);
        assert_eq!(hit_test(&targets, b, 200.0, mpp).map(|t| t.id.as_str()), Some("b"));
    }

    #[test]
    fn test_spawn_clamps_and_randomizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let t = spawn_target(&mut rng, TargetKind::Air, 99.0, -30.0, 15.0);
        assert_eq!(t.kind, TargetKind::Air);
        assert_eq!(t.range_km, 15.0 * MAX_RANGE_FRACTION);
        assert_eq!(t.bearing_deg, 330.0);
        assert!(t.vel_deg_per_sec.abs() <= 60.0 / 3.6);
        assert!(t.vr_km_per_sec.abs() <= 0.02);
        assert!(!t.detected);
    }

    #[test]
    fn test_seed_population_mix() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let targets = seed_population(&mut rng, 15.0);
        assert_eq!(targets.len(), 9);
        let count = |k| targets.iter().filter(|t| t.kind == k).count();
        assert_eq!(count(TargetKind::Ship), 4);
        assert_eq!(count(TargetKind::Air), 3);
        assert_eq!(count(TargetKind::Human), 2);
        for t in &targets {
            assert!(t.range_km >= 0.1 && t.range_km <= 15.0 * MAX_RANGE_FRACTION);
            assert!((0.0..360.0).contains(&t.bearing_deg));
        }
        for h in targets.iter().filter(|t| t.kind == TargetKind::Human) {
            assert!(h.range_km <= 4.5);
        }
    }

    #[test]
    fn test_drag_state_default_idle() {
        let state = DragState::default();
        assert_eq!(state, DragState::Idle);
        assert!(state.dragged_id().is_none());
        assert_eq!(DragState::Dragging("x".into()).dragged_id(), Some("x"));
    }
}
