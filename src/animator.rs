//! Time-stepped convergence of an orientation onto a target.
//!
//! Each tick the orientation is spherically interpolated a fraction
//! `speed * dt` of the way toward the target. Once within the tolerance it
//! is set to the target exactly, which removes residual float error.

use glam::Quat;
use tracing::{trace, warn};

use crate::error::{checked_time_step, RotationError};
use crate::face::nearest_face;
use crate::PhaseStatus;

/// Default angular tolerance, in degrees.
pub const DEFAULT_TOLERANCE_DEGREES: f32 = 1.0;
/// Default interpolation speed (fraction of the remaining angle per second).
pub const DEFAULT_SPEED: f32 = 10.0;

/// Where an animation is heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationTarget {
    Fixed(Quat),
    /// The face nearest to the orientation at the moment the start delay
    /// runs out.
    NearestFace,
}

/// Angular distance between two orientations, in degrees.
pub fn angular_distance(a: Quat, b: Quat) -> f32 {
    a.angle_between(b).to_degrees()
}

/// Slerp with `t` clamped to `[0, 1]`, so a long frame never overshoots.
pub fn clamped_slerp(from: Quat, to: Quat, t: f32) -> Quat {
    from.slerp(to, t.clamp(0.0, 1.0))
}

/// Moves an orientation toward a target a little on every tick, optionally
/// after a start delay.
///
/// A [`AnimationTarget::NearestFace`] target is resolved once, on the first
/// tick after the delay, and held from then on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAnimator {
    target: AnimationTarget,
    tolerance_degrees: f32,
    speed: f32,
    delay_remaining: f32,
}

impl RotationAnimator {
    /// Creates an animator with no start delay.
    ///
    /// `tolerance_degrees` is the distance at which the orientation is set to
    /// the target and the animation finishes; `speed` is the fraction of the
    /// remaining angle covered per second.
    pub fn new(target: AnimationTarget, tolerance_degrees: f32, speed: f32) -> Self {
        Self {
            target,
            tolerance_degrees,
            speed,
            delay_remaining: 0.0,
        }
    }

    /// Waits `delay` seconds before the first distance check.
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay_remaining = delay.max(0.0);
        self
    }

    /// The current target. Becomes [`AnimationTarget::Fixed`] once a
    /// nearest-face target has been resolved.
    pub fn target(&self) -> AnimationTarget {
        self.target
    }

    pub fn delay_remaining(&self) -> f32 {
        self.delay_remaining
    }

    /// Advances the animation by one tick.
    ///
    /// The tick on which the delay runs out goes on to check the distance
    /// and step in that same tick. A target that cannot be resolved ends
    /// the animation and leaves the orientation alone. A negative or
    /// non-finite `dt` fails without touching the delay.
    pub fn step(
        &mut self,
        current: Quat,
        dt: f32,
    ) -> Result<(Quat, PhaseStatus), RotationError> {
        let dt = checked_time_step(dt)?;
        if self.delay_remaining > 0.0 {
            self.delay_remaining -= dt;
            if self.delay_remaining > 0.0 {
                return Ok((current, PhaseStatus::Running));
            }
            self.delay_remaining = 0.0;
        }

        let target = match self.resolve_target(current) {
            Ok(target) => target,
            Err(error) => {
                warn!(%error, "abandoning rotation: target could not be resolved");
                return Ok((current, PhaseStatus::Finished));
            }
        };

        let distance = angular_distance(current, target);
        if distance <= self.tolerance_degrees {
            trace!(distance, "converged");
            return Ok((target, PhaseStatus::Finished));
        }

        trace!(distance, "converging");
        Ok((
            clamped_slerp(current, target, self.speed * dt),
            PhaseStatus::Running,
        ))
    }

    /// Pins a nearest-face target to a concrete orientation.
    fn resolve_target(&mut self, current: Quat) -> Result<Quat, RotationError> {
        let target = match self.target {
            AnimationTarget::Fixed(target) => target,
            AnimationTarget::NearestFace => nearest_face(current)?,
        };
        if !target.is_finite() {
            return Err(RotationError::NonFiniteOrientation(target));
        }
        self.target = AnimationTarget::Fixed(target);
        Ok(target)
    }
}
