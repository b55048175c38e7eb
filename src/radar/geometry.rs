//! Polar/cartesian conversions for the scope.
//!
//! Bearings are degrees clockwise from "up". Pixel space has its origin in
//! the top-left corner with y growing downwards, so bearing 0 is `-y`.

/// Fraction of the canvas radius used for the scope; the rest holds labels.
pub const DISPLAY_MARGIN: f64 = 0.92;
pub const MIN_RANGE_KM: f64 = 0.1;
/// Targets stop at this fraction of the maximum range.
pub const MAX_RANGE_FRACTION: f64 = 0.98;
/// Canvas side, in pixels, that marker and hit sizes are specified against.
pub const REFERENCE_CANVAS: f64 = 800.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Wrap any angle into `[0, 360)`.
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Keep a target range inside `[MIN_RANGE_KM, 0.98 * max]`. When the
/// scope is smaller than the minimum, the minimum wins.
pub fn clamp_range(range_km: f64, max_range_km: f64) -> f64 {
    range_km.min(max_range_km * MAX_RANGE_FRACTION).max(MIN_RANGE_KM)
}

pub fn polar_to_pixel(r_px: f64, bearing_deg: f64, center: Point) -> Point {
    let t = (bearing_deg - 90.0).to_radians();
    Point {
        x: center.x + r_px * t.cos(),
        y: center.y + r_px * t.sin(),
    }
}

/// Inverse of [`polar_to_pixel`]: returns `(r_px, bearing_deg)`.
pub fn pixel_to_polar(x: f64, y: f64, center: Point) -> (f64, f64) {
    let dx = x - center.x;
    let dy = y - center.y;
    let r_px = dx.hypot(dy);
    let bearing = normalize_deg(dy.atan2(dx).to_degrees() + 90.0 + 360.0);
    (r_px, bearing)
}

pub fn meters_per_pixel(canvas_width: f64, max_range_km: f64) -> f64 {
    let radius = canvas_width / 2.0;
    (max_range_km * 1000.0) / (radius * DISPLAY_MARGIN)
}

pub fn km_to_px(range_km: f64, mpp: f64) -> f64 {
    range_km * 1000.0 / mpp
}

pub fn px_to_km(r_px: f64, mpp: f64) -> f64 {
    r_px * mpp / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d)
    }

    #[test]
    fn test_zero_bearing_points_up() {
        let c = Point::new(100.0, 100.0);
        let p = polar_to_pixel(50.0, 0.0, c);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 50.0).abs() < 1e-9);

        let east = polar_to_pixel(50.0, 90.0, c);
        assert!((east.x - 150.0).abs() < 1e-9);
        assert!((east.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let c = Point::new(200.0, 200.0);
        let radius = 200.0;
        let mut r = 0.5;
        while r <= radius {
            let mut b = 0.0;
            while b < 360.0 {
                let p = polar_to_pixel(r, b, c);
                let (r2, b2) = pixel_to_polar(p.x, p.y, c);
                assert!((r - r2).abs() < 1e-9, "range {r} -> {r2}");
                assert!(angle_diff(b, b2) < 1e-7, "bearing {b} -> {b2}");
                assert!((0.0..360.0).contains(&b2));
                b += 7.5;
            }
            r += 12.25;
        }
    }

    #[test]
    fn test_pixel_to_polar_at_center() {
        let c = Point::new(10.0, 10.0);
        let (r, b) = pixel_to_polar(10.0, 10.0, c);
        assert_eq!(r, 0.0);
        assert!((0.0..360.0).contains(&b));
    }

    #[test]
    fn test_meters_per_pixel() {
        // 800 px canvas, 15 km: 15000 / (400 * 0.92)
        let mpp = meters_per_pixel(800.0, 15.0);
        assert!((mpp - 40.760_869_565).abs() < 1e-6);
        let px = km_to_px(15.0, mpp);
        assert!((px - 368.0).abs() < 1e-9);
        assert!((px_to_km(px, mpp) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_and_clamp() {
        assert_eq!(normalize_deg(-90.0), 270.0);
        assert_eq!(normalize_deg(720.0), 0.0);
        assert_eq!(normalize_deg(-1e-20), 0.0);
        assert_eq!(clamp_range(0.0, 15.0), MIN_RANGE_KM);
        assert_eq!(clamp_range(100.0, 15.0), 15.0 * MAX_RANGE_FRACTION);
        assert_eq!(clamp_range(5.0, 15.0), 5.0);
    }

    #[test]
    fn test_clamp_range_below_minimum_scope() {
        // 0.98 * 0.1 sits under the minimum; must not panic
        assert_eq!(clamp_range(0.05, 0.1), MIN_RANGE_KM);
        assert_eq!(clamp_range(3.0, 0.1), MIN_RANGE_KM);
    }
}
