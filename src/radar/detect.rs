use super::geometry::normalize_deg;

/// Width of the sweep sector. Fixed, independent of the radar config.
pub const BEAM_WIDTH_DEG: f64 = 90.0;
/// Targets at or inside this range raise an alert whether detected or not.
pub const ALERT_RANGE_KM: f64 = 4.0;

/// Shortest-arc test of a bearing against a beam centred on `beam_deg`.
pub fn is_in_beam(target_deg: f64, beam_deg: f64, beam_width_deg: f64) -> bool {
    let target = normalize_deg(target_deg);
    let beam = normalize_deg(beam_deg);
    let mut diff = (target - beam).abs();
    if diff > 180.0 {
        diff = 360.0 - diff;
    }
    diff <= beam_width_deg / 2.0
}

pub fn in_alert_zone(range_km: f64) -> bool {
    range_km <= ALERT_RANGE_KM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beam_contains_own_center() {
        let mut b = -720.0;
        while b < 720.0 {
            assert!(is_in_beam(b, b, BEAM_WIDTH_DEG), "bearing {b}");
            b += 3.7;
        }
    }

    #[test]
    fn test_opposite_side_never_detected() {
        let mut b = 0.0;
        while b < 360.0 {
            assert!(!is_in_beam(b, b + 180.0, BEAM_WIDTH_DEG), "bearing {b}");
            b += 1.3;
        }
    }

    #[test]
    fn test_edges_and_wraparound() {
        assert!(is_in_beam(45.0, 0.0, 90.0));
        assert!(!is_in_beam(45.1, 0.0, 90.0));
        assert!(is_in_beam(350.0, 10.0, 90.0));
        assert!(is_in_beam(-20.0, 20.0, 90.0));
        assert!(!is_in_beam(90.0, 0.0, 90.0));
        assert!(is_in_beam(45.0, 45.0, 90.0));
    }

    #[test]
    fn test_alert_zone_boundary() {
        assert!(in_alert_zone(3.0));
        assert!(in_alert_zone(4.0));
        assert!(!in_alert_zone(4.01));
    }
}
