use super::detect::{is_in_beam, BEAM_WIDTH_DEG};
use super::geometry::{clamp_range, normalize_deg};
use super::types::{RadarConfig, Target};

/// Nominal frame step in seconds. Used regardless of wall-clock time.
pub const FRAME_DT: f64 = 0.016;

/// Next beam angle. A paused radar keeps its beam where it is.
pub fn advance_beam(beam_deg: f64, config: &RadarConfig) -> f64 {
    if config.paused {
        return beam_deg;
    }
    normalize_deg(beam_deg + config.sweep_deg_per_sec * FRAME_DT)
}

pub fn step_target(target: &Target, beam_deg: f64, max_range_km: f64) -> Target {
    let bearing_deg = normalize_deg(target.bearing_deg + target.vel_deg_per_sec * FRAME_DT);
    let range_km = clamp_range(target.range_km + target.vr_km_per_sec * FRAME_DT, max_range_km);
    Target {
        bearing_deg,
        range_km,
        detected: is_in_beam(bearing_deg, beam_deg, BEAM_WIDTH_DEG),
        ..target.clone()
    }
}

/// Advance every target by one frame.
///
/// Returns `None` when nothing moved and no detection flag flipped, so the
/// owner is not notified about an idle scene.
pub fn step_targets(targets: &[Target], beam_deg: f64, max_range_km: f64) -> Option<Vec<Target>> {
    let updated: Vec<Target> = targets
        .iter()
        .map(|t| step_target(t, beam_deg, max_range_km))
        .collect();

    let changed = updated.iter().zip(targets).any(|(new, old)| {
        new.bearing_deg != old.bearing_deg
            || new.range_km != old.range_km
            || new.detected != old.detected
    });

    changed.then_some(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radar::geometry::{MAX_RANGE_FRACTION, MIN_RANGE_KM};
    use crate::radar::types::TargetKind;

    fn moving_targets() -> Vec<Target> {
        vec![
            Target::new("a", TargetKind::Ship, 14.0, 10.0, -40.0, 0.9),
            Target::new("b", TargetKind::Air, 0.3, 350.0, 55.0, -0.8),
            Target::new("c", TargetKind::Human, 7.0, 0.0, -0.5, 0.0),
        ]
    }

    #[test]
    fn test_range_stays_clamped() {
        let max = 15.0;
        let mut targets = moving_targets();
        for _ in 0..5_000 {
            if let Some(next) = step_targets(&targets, 0.0, max) {
                targets = next;
            }
            for t in &targets {
                assert!(t.range_km >= MIN_RANGE_KM);
                assert!(t.range_km <= max * MAX_RANGE_FRACTION);
            }
        }
    }

    #[test]
    fn test_bearing_stays_normalized() {
        let mut targets = moving_targets();
        for _ in 0..5_000 {
            if let Some(next) = step_targets(&targets, 90.0, 15.0) {
                targets = next;
            }
            for t in &targets {
                assert!((0.0..360.0).contains(&t.bearing_deg), "{}", t.bearing_deg);
            }
        }
    }

    #[test]
    fn test_idle_scene_stops_notifying() {
        let config = RadarConfig { paused: true, ..RadarConfig::default() };
        let mut beam = 30.0;
        let mut targets = vec![
            Target::new("a", TargetKind::Ship, 3.0, 40.0, 0.0, 0.0),
            Target::new("b", TargetKind::Air, 9.0, 250.0, 0.0, 0.0),
        ];
        // first frame may settle the detection flags
        beam = advance_beam(beam, &config);
        if let Some(next) = step_targets(&targets, beam, config.range_km) {
            targets = next;
        }
        for _ in 0..100 {
            beam = advance_beam(beam, &config);
            assert!(step_targets(&targets, beam, config.range_km).is_none());
        }
        assert_eq!(beam, 30.0);
        assert!(targets[0].detected);
        assert!(!targets[1].detected);
    }

    #[test]
    fn test_beam_advances_with_sweep() {
        let config = RadarConfig::default();
        let beam = advance_beam(359.0, &config);
        assert!((beam - (359.0 + 120.0 * FRAME_DT - 360.0)).abs() < 1e-9);
    }

    #[test]
    fn test_detection_follows_beam() {
        let t = Target::new("1", TargetKind::Ship, 3.5, 45.0, 2.0, 0.01);
        let stepped = step_target(&t, 45.0, 15.0);
        assert!(stepped.detected);
        assert!((stepped.bearing_deg - 45.032).abs() < 1e-9);
        assert!((stepped.range_km - 3.50016).abs() < 1e-9);

        let missed = step_target(&t, 225.0, 15.0);
        assert!(!missed.detected);
    }
}
