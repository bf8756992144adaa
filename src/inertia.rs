//! Coasting after a drag is released.
//!
//! The release velocity decays linearly to zero over a duration
//! proportional to its magnitude, capped at one second.

use glam::{Quat, Vec2};
use tracing::trace;

use crate::drag::{apply_delta, DragSpeeds};
use crate::error::{checked_time_step, RotationError};
use crate::PhaseStatus;

/// Release speed that earns the full one-second coast.
pub const INERTIA_REFERENCE_SPEED: f32 = 3000.0;

/// Coasting duration for a release velocity, in `[0, 1]`.
///
/// Non-finite velocities coast for zero time.
pub fn duration(velocity: Vec2, reference_speed: f32) -> f32 {
    if !velocity.is_finite() || reference_speed <= 0.0 {
        return 0.0;
    }
    (velocity.length() / reference_speed).clamp(0.0, 1.0)
}

/// Velocity `t` seconds into a coast, interpolated from `initial` down to zero.
pub fn velocity_at(t: f32, initial: Vec2, duration: f32) -> Vec2 {
    if duration <= 0.0 {
        return Vec2::ZERO;
    }
    let progress = (t / duration).clamp(0.0, 1.0);
    initial.lerp(Vec2::ZERO, progress)
}

/// An in-progress coast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaState {
    pub initial_velocity: Vec2,
    pub elapsed: f32,
    pub duration: f32,
}

impl InertiaState {
    pub fn new(initial_velocity: Vec2, reference_speed: f32) -> Self {
        Self {
            initial_velocity,
            elapsed: 0.0,
            duration: duration(initial_velocity, reference_speed),
        }
    }

    /// Advances the coast by one tick.
    ///
    /// While time remains, the decayed velocity times `dt * coast_gain` is
    /// fed through the drag rotation. The first tick that starts with no
    /// time left finishes without rotating, so a zero-velocity release ends
    /// on the tick it starts.
    ///
    /// A negative or non-finite `dt`, or a coast step that overflows, fails
    /// without advancing the coast.
    pub fn step(
        &mut self,
        orientation: Quat,
        dt: f32,
        speeds: DragSpeeds,
        coast_gain: f32,
    ) -> Result<(Quat, PhaseStatus), RotationError> {
        let dt = checked_time_step(dt)?;
        if self.elapsed >= self.duration {
            return Ok((orientation, PhaseStatus::Finished));
        }

        let velocity = velocity_at(self.elapsed, self.initial_velocity, self.duration);
        trace!(elapsed = self.elapsed, ?velocity, "coasting");

        let rotated = apply_delta(orientation, velocity * dt * coast_gain, speeds)?;
        self.elapsed += dt;
        Ok((rotated, PhaseStatus::Running))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_bounds() {
        assert_eq!(duration(Vec2::ZERO, INERTIA_REFERENCE_SPEED), 0.0);
        assert_eq!(duration(Vec2::new(3000.0, 0.0), INERTIA_REFERENCE_SPEED), 1.0);
        assert_eq!(duration(Vec2::new(0.0, -9000.0), INERTIA_REFERENCE_SPEED), 1.0);
        assert_eq!(duration(Vec2::new(1800.0, 2400.0), INERTIA_REFERENCE_SPEED), 1.0);
        assert_eq!(duration(Vec2::new(900.0, 1200.0), INERTIA_REFERENCE_SPEED), 0.5);
    }

    #[test]
    fn test_duration_is_monotonic() {
        let mut previous = 0.0;
        for step in 0..=80 {
            let speed = step as f32 * 50.0;
            let current = duration(Vec2::new(speed, 0.0), INERTIA_REFERENCE_SPEED);
            assert!(current >= previous, "duration dropped at speed {speed}");
            assert!((0.0..=1.0).contains(&current));
            previous = current;
        }
    }

    #[test]
    fn test_duration_of_non_finite_velocity_is_zero() {
        let velocity = Vec2::new(f32::NAN, 1.0);
        assert_eq!(duration(velocity, INERTIA_REFERENCE_SPEED), 0.0);
        let velocity = Vec2::new(f32::INFINITY, 0.0);
        assert_eq!(duration(velocity, INERTIA_REFERENCE_SPEED), 0.0);
    }

    #[test]
    fn test_velocity_decays_linearly() {
        let initial = Vec2::new(100.0, -40.0);
        assert_eq!(velocity_at(0.0, initial, 0.5), initial);
        assert!(velocity_at(0.25, initial, 0.5).abs_diff_eq(Vec2::new(50.0, -20.0), 1e-4));
        assert_eq!(velocity_at(0.5, initial, 0.5), Vec2::ZERO);
        assert_eq!(velocity_at(2.0, initial, 0.5), Vec2::ZERO);
        assert_eq!(velocity_at(0.0, initial, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_zero_velocity_finishes_on_first_tick() {
        let mut state = InertiaState::new(Vec2::ZERO, INERTIA_REFERENCE_SPEED);
        let start = Quat::from_rotation_x(0.2);
        let (orientation, status) = state
            .step(start, 1.0 / 60.0, DragSpeeds::default(), 0.4)
            .unwrap();
        assert_eq!(status, PhaseStatus::Finished);
        assert_eq!(orientation, start);
    }

    #[test]
    fn test_coast_runs_for_its_duration() {
        // 1500 units/s coasts for half a second: 5 ticks of 0.1s
        let mut state = InertiaState::new(Vec2::new(1500.0, 0.0), INERTIA_REFERENCE_SPEED);
        let mut orientation = Quat::IDENTITY;
        let mut running_ticks = 0;

        loop {
            let (next, status) = state
                .step(orientation, 0.1, DragSpeeds::default(), 0.4)
                .unwrap();
            orientation = next;
            if status == PhaseStatus::Finished {
                break;
            }
            running_ticks += 1;
            assert!(running_ticks <= 10, "coast never finished");
        }

        assert!((5..=6).contains(&running_ticks), "ran {running_ticks} ticks");
        assert!(orientation.angle_between(Quat::IDENTITY) > 0.0);

        // horizontal flicks only ever turn about the up axis
        let right = orientation * glam::Vec3::X;
        assert!(right.y.abs() < 1e-5);
    }

    #[test]
    fn test_bad_time_step_leaves_coast_untouched() {
        let mut state = InertiaState::new(Vec2::new(1500.0, 0.0), INERTIA_REFERENCE_SPEED);
        for dt in [f32::NAN, f32::INFINITY, -0.1] {
            let result = state.step(Quat::IDENTITY, dt, DragSpeeds::default(), 0.4);
            assert!(matches!(result, Err(RotationError::InvalidTimeStep(_))));
        }
        assert_eq!(state.elapsed, 0.0);

        // the coast still ends normally afterwards
        let mut orientation = Quat::IDENTITY;
        for _ in 0..10 {
            let (next, status) = state
                .step(orientation, 0.1, DragSpeeds::default(), 0.4)
                .unwrap();
            orientation = next;
            if status == PhaseStatus::Finished {
                break;
            }
        }
        assert!(state.elapsed >= state.duration);
        assert!(orientation.is_finite());
    }

    #[test]
    fn test_overflowing_coast_step_fails() {
        let mut state = InertiaState::new(Vec2::new(1500.0, 0.0), INERTIA_REFERENCE_SPEED);
        let speeds = DragSpeeds {
            x: f32::MAX,
            y: f32::MAX,
        };
        let result = state.step(Quat::IDENTITY, 0.1, speeds, 0.4);
        assert!(matches!(result, Err(RotationError::NonFiniteVector(_))));
        assert_eq!(state.elapsed, 0.0);
    }
}
