//! Small angle helpers shared by the house, aspect and ephemeris code.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_deg(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Normalize an angle to (-180, 180] degrees.
pub fn signed_deg(deg: f64) -> f64 {
    let r = normalize_deg(deg);
    if r > 180.0 {
        r - 360.0
    } else {
        r
    }
}

/// Forward (counter-clockwise) arc from `from` to `to`, in [0, 360).
pub fn forward_arc(from: f64, to: f64) -> f64 {
    normalize_deg(to - from)
}

/// Shortest angular distance between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw = (normalize_deg(lon1) - normalize_deg(lon2)).abs();
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_both_directions() {
        assert!((normalize_deg(370.0) - 10.0).abs() < 1e-10);
        assert!((normalize_deg(-10.0) - 350.0).abs() < 1e-10);
        assert_eq!(normalize_deg(360.0), 0.0);
        assert_eq!(normalize_deg(-1e-20), 0.0);
    }

    #[test]
    fn signed_range() {
        assert!((signed_deg(190.0) + 170.0).abs() < 1e-10);
        assert!((signed_deg(180.0) - 180.0).abs() < 1e-10);
        assert!((signed_deg(-30.0) + 30.0).abs() < 1e-10);
    }

    #[test]
    fn separation_is_symmetric_and_bounded() {
        assert!((angular_separation(10.0, 190.0) - 180.0).abs() < 1e-10);
        assert!((angular_separation(350.0, 10.0) - 20.0).abs() < 1e-10);
        assert!((angular_separation(10.0, 350.0) - 20.0).abs() < 1e-10);
        assert_eq!(angular_separation(42.0, 42.0), 0.0);
    }

    #[test]
    fn forward_arc_wraps() {
        assert!((forward_arc(350.0, 20.0) - 30.0).abs() < 1e-10);
        assert!((forward_arc(20.0, 350.0) - 330.0).abs() < 1e-10);
    }
}
