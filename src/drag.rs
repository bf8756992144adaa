//! Drag rotation: turns 2D input deltas into world-space rotations.

use glam::{Quat, Vec2, Vec3};

use crate::error::{checked_orientation, RotationError};

/// Degrees of rotation per unit of drag input, per screen axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSpeeds {
    pub x: f32,
    pub y: f32,
}

impl Default for DragSpeeds {
    fn default() -> Self {
        Self { x: 0.4, y: 0.4 }
    }
}

/// World axis that horizontal drags spin around.
pub const UP: Vec3 = Vec3::Y;
/// World axis that vertical drags spin around.
pub const RIGHT: Vec3 = Vec3::X;

/// Applies a drag delta to an orientation.
///
/// Rotates by `-delta.x * speeds.x` degrees about [`UP`], then by
/// `delta.y * speeds.y` degrees about [`RIGHT`]. Both rotations are in
/// world space (pre-multiplied), and the up-axis rotation always goes
/// first; swapping them gives a different orientation for diagonal drags.
///
/// Fails when the scaled angles overflow, so a huge but finite delta can
/// never leave a NaN orientation behind.
pub fn apply_delta(
    orientation: Quat,
    delta: Vec2,
    speeds: DragSpeeds,
) -> Result<Quat, RotationError> {
    let angles = Vec2::new(-delta.x * speeds.x, delta.y * speeds.y);
    if !angles.is_finite() {
        return Err(RotationError::NonFiniteVector(angles));
    }
    let yaw = Quat::from_axis_angle(UP, angles.x.to_radians());
    let pitch = Quat::from_axis_angle(RIGHT, angles.y.to_radians());

    // renormalizing also keeps thousands of small drags on the unit sphere
    checked_orientation(pitch * (yaw * orientation))
}
