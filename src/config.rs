//! Tuning for the orientation controller.

use crate::animator::{DEFAULT_SPEED, DEFAULT_TOLERANCE_DEGREES};
use crate::drag::DragSpeeds;
use crate::error::RotationError;
use crate::inertia::INERTIA_REFERENCE_SPEED;

/// Tuning shared by every phase of an [`OrientationController`].
///
/// The defaults match a pointer drag in screen pixels. Checked once by
/// [`ControllerConfig::validate`] when the controller is built.
///
/// [`OrientationController`]: crate::OrientationController
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// Degrees per unit of drag input.
    pub drag_speeds: DragSpeeds,
    /// Extra scaling applied to the decayed velocity while coasting.
    pub coast_gain: f32,
    /// Release speed that coasts for the full second.
    pub inertia_reference_speed: f32,
    /// Distance, in degrees, at which an animation snaps onto its target.
    pub tolerance_degrees: f32,
    /// Fraction of the remaining angle covered per second of animation.
    pub convergence_speed: f32,
    /// Snap to the nearest face once a coast ends.
    pub snap_after_coast: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            drag_speeds: DragSpeeds::default(),
            coast_gain: 0.4,
            inertia_reference_speed: INERTIA_REFERENCE_SPEED,
            tolerance_degrees: DEFAULT_TOLERANCE_DEGREES,
            convergence_speed: DEFAULT_SPEED,
            snap_after_coast: true,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), RotationError> {
        let finite = |value: f32| value.is_finite();
        if !finite(self.drag_speeds.x) || !finite(self.drag_speeds.y) {
            return Err(RotationError::InvalidConfig("drag speeds must be finite"));
        }
        if !finite(self.coast_gain) || self.coast_gain < 0.0 {
            return Err(RotationError::InvalidConfig(
                "coast gain must be finite and non-negative",
            ));
        }
        if !finite(self.inertia_reference_speed) || self.inertia_reference_speed <= 0.0 {
            return Err(RotationError::InvalidConfig(
                "inertia reference speed must be positive",
            ));
        }
        if !finite(self.tolerance_degrees) || self.tolerance_degrees <= 0.0 {
            return Err(RotationError::InvalidConfig("tolerance must be positive"));
        }
        if !finite(self.convergence_speed) || self.convergence_speed <= 0.0 {
            return Err(RotationError::InvalidConfig(
                "convergence speed must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = ControllerConfig {
            tolerance_degrees: 0.0,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ControllerConfig {
            convergence_speed: f32::NAN,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ControllerConfig {
            drag_speeds: DragSpeeds {
                x: f32::INFINITY,
                y: 0.4,
            },
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_drag_speed_inverts_drag() {
        // inverted controls are a legitimate setting
        let config = ControllerConfig {
            drag_speeds: DragSpeeds { x: -0.4, y: 0.4 },
            ..ControllerConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
