//! Angle normalization and snapping to the canonical axis angles.
//!
//! All angles are in degrees.

/// Per-axis angles a face orientation may use.
///
/// -180 and 180 describe the same heading; both are listed so that an
/// angle close to either end snaps without wrapping.
pub const CANONICAL_ANGLES: [f32; 5] = [-180.0, -90.0, 0.0, 90.0, 180.0];

/// Maps an angle into `(-180, 180]`.
///
/// Non-finite input is returned unchanged.
pub fn normalize(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }

    // the remainder is exact, so the loops below run at most once even for
    // accumulated rotations of many turns
    let mut angle = angle % 360.0;
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle <= -180.0 {
        angle += 360.0;
    }
    // adding +0.0 turns -0.0 into 0.0
    angle + 0.0
}

/// Returns the member of [`CANONICAL_ANGLES`] closest to `angle`.
///
/// Expects an already normalized angle. Ties keep the earlier entry: a
/// later candidate only wins with a strictly smaller difference, so 45
/// snaps to 0, 135 to 90, -45 to -90 and -135 to -180.
pub fn nearest_canonical(angle: f32) -> f32 {
    let mut nearest = CANONICAL_ANGLES[0];
    let mut min_difference = (angle - nearest).abs();

    for &candidate in &CANONICAL_ANGLES[1..] {
        let difference = (angle - candidate).abs();
        if difference < min_difference {
            nearest = candidate;
            min_difference = difference;
        }
    }

    nearest
}

/// Normalizes, then snaps to the nearest canonical angle.
#[inline]
pub fn snap(angle: f32) -> f32 {
    nearest_canonical(normalize(angle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        for step in -40..=40 {
            let angle = step as f32 * 37.5;
            let normalized = normalize(angle);
            assert!(
                normalized > -180.0 && normalized <= 180.0,
                "normalize({angle}) = {normalized} out of range"
            );
        }
    }

    #[test]
    fn test_normalize_boundaries() {
        assert_eq!(normalize(180.0), 180.0);
        assert_eq!(normalize(-180.0), 180.0);
        assert_eq!(normalize(540.0), 180.0);
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(-90.0), -90.0);
        assert_eq!(normalize(270.0), -90.0);
        assert!(normalize(-360.0).is_sign_positive());
    }

    #[test]
    fn test_normalize_periodic() {
        for base in [-179, -90, -1, 0, 1, 45, 135, 180] {
            let base = base as f32;
            for k in -5..=5 {
                let shifted = base + 360.0 * k as f32;
                assert_eq!(
                    normalize(shifted),
                    normalize(base),
                    "normalize({shifted}) differs from normalize({base})"
                );
            }
        }
    }

    #[test]
    fn test_normalize_many_turns_terminates() {
        let normalized = normalize(1.0e9);
        assert!(normalized > -180.0 && normalized <= 180.0);
        assert!(normalize(f32::NAN).is_nan());
        assert_eq!(normalize(f32::INFINITY), f32::INFINITY);
    }

    #[test]
    fn test_nearest_canonical() {
        assert_eq!(nearest_canonical(0.0), 0.0);
        assert_eq!(nearest_canonical(46.0), 90.0);
        assert_eq!(nearest_canonical(44.0), 0.0);
        assert_eq!(nearest_canonical(-100.0), -90.0);
        assert_eq!(nearest_canonical(170.0), 180.0);
        assert_eq!(nearest_canonical(-170.0), -180.0);
    }

    #[test]
    fn test_nearest_canonical_ties_keep_earlier_angle() {
        assert_eq!(nearest_canonical(135.0), 90.0);
        assert_eq!(nearest_canonical(45.0), 0.0);
        assert_eq!(nearest_canonical(-45.0), -90.0);
        assert_eq!(nearest_canonical(-135.0), -180.0);
    }

    #[test]
    fn test_snap_wraps_before_snapping() {
        assert_eq!(snap(350.0), 0.0);
        assert_eq!(snap(-260.0), 90.0);
        assert_eq!(snap(725.0), 0.0);
    }
}
