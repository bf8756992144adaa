//! Error types for the orientation controller.
//!
//! Every error here is raised before bad geometry reaches an orientation.
//! Losing a mirror source or follower is a normal termination and is not
//! represented.

use glam::{Quat, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RotationError {
    #[error("orientation has non-finite components: {0:?}")]
    NonFiniteOrientation(Quat),
    #[error("orientation has zero length")]
    DegenerateOrientation,
    #[error("input vector has non-finite components: {0:?}")]
    NonFiniteVector(Vec2),
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f32),
    #[error("delay must be finite and non-negative, got {0}")]
    InvalidDelay(f32),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Validates a quaternion and returns it normalized.
pub fn checked_orientation(orientation: Quat) -> Result<Quat, RotationError> {
    if !orientation.is_finite() {
        return Err(RotationError::NonFiniteOrientation(orientation));
    }
    let length = orientation.length();
    if length <= f32::EPSILON {
        return Err(RotationError::DegenerateOrientation);
    }
    Ok(orientation / length)
}

/// Rejects drag deltas and velocities with a NaN or infinite component.
pub fn checked_vector(vector: Vec2) -> Result<Vec2, RotationError> {
    if vector.is_finite() {
        Ok(vector)
    } else {
        Err(RotationError::NonFiniteVector(vector))
    }
}

/// Accepts a finite, non-negative tick length in seconds.
pub fn checked_time_step(dt: f32) -> Result<f32, RotationError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(dt)
    } else {
        Err(RotationError::InvalidTimeStep(dt))
    }
}

/// Accepts a finite, non-negative start delay in seconds.
pub fn checked_delay(delay: f32) -> Result<f32, RotationError> {
    if delay.is_finite() && delay >= 0.0 {
        Ok(delay)
    } else {
        Err(RotationError::InvalidDelay(delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_orientation_normalizes() {
        let q = checked_orientation(Quat::from_xyzw(0.0, 0.0, 0.0, 2.0)).unwrap();
        assert!((q.length() - 1.0).abs() < 1e-6);
        assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn test_checked_orientation_rejects_nan_and_zero() {
        let nan = Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0);
        assert!(matches!(
            checked_orientation(nan),
            Err(RotationError::NonFiniteOrientation(_))
        ));
        assert_eq!(
            checked_orientation(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)),
            Err(RotationError::DegenerateOrientation)
        );
    }

    #[test]
    fn test_checked_time_step() {
        assert_eq!(checked_time_step(0.0), Ok(0.0));
        assert_eq!(checked_time_step(-0.1), Err(RotationError::InvalidTimeStep(-0.1)));
        assert!(checked_time_step(f32::INFINITY).is_err());
        assert!(checked_delay(f32::NAN).is_err());
    }
}
