//! The orientation controller: drag, coast, then settle on a face.
//!
//! The controller owns the controlled orientation and exactly one
//! [`ActivePhase`]. Starting a phase replaces whatever was running, so a
//! drag, a coast and an animation can never mutate the orientation in the
//! same tick. Mirrors run alongside every phase and copy the orientation
//! after the phase has stepped.

use std::cell::Cell;
use std::rc::Rc;

use glam::{Quat, Vec2};
use tracing::{debug, trace, warn};

use crate::animator::{AnimationTarget, RotationAnimator};
use crate::config::ControllerConfig;
use crate::drag::apply_delta;
use crate::error::{
    checked_delay, checked_orientation, checked_time_step, checked_vector, RotationError,
};
use crate::inertia::InertiaState;
use crate::mirror::{SharedOrientation, SyncMirror};
use crate::PhaseStatus;

/// What currently drives the orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivePhase {
    Idle,
    Dragging,
    Coasting(InertiaState),
    Converging(RotationAnimator),
}

/// Payload-free view of [`ActivePhase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Idle,
    Dragging,
    Coasting,
    Converging,
}

impl ActivePhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::Idle => PhaseKind::Idle,
            Self::Dragging => PhaseKind::Dragging,
            Self::Coasting(_) => PhaseKind::Coasting,
            Self::Converging(_) => PhaseKind::Converging,
        }
    }
}

/// Owns an orientation and drives it through drag, coast and convergence.
///
/// Drag updates rotate the orientation as they arrive; coasting and
/// convergence move it on [`OrientationController::tick`]. The orientation
/// is shared, so attached mirrors read it without borrowing the controller.
#[derive(Debug)]
pub struct OrientationController {
    orientation: SharedOrientation,
    phase: ActivePhase,
    config: ControllerConfig,
    mirrors: Vec<SyncMirror>,
}

impl Default for OrientationController {
    fn default() -> Self {
        Self {
            orientation: Rc::new(Cell::new(Quat::IDENTITY)),
            phase: ActivePhase::Idle,
            config: ControllerConfig::default(),
            mirrors: Vec::new(),
        }
    }
}

impl OrientationController {
    pub fn new(config: ControllerConfig, initial: Quat) -> Result<Self, RotationError> {
        config.validate()?;
        let initial = checked_orientation(initial)?;
        Ok(Self {
            orientation: Rc::new(Cell::new(initial)),
            phase: ActivePhase::Idle,
            config,
            mirrors: Vec::new(),
        })
    }

    pub fn orientation(&self) -> Quat {
        self.orientation.get()
    }

    pub fn phase(&self) -> &ActivePhase {
        &self.phase
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// Number of mirrors still running.
    pub fn mirror_count(&self) -> usize {
        self.mirrors.len()
    }

    pub fn start_drag(&mut self) {
        self.transition(ActivePhase::Dragging);
    }

    /// Rotates by a drag delta. Ignored unless a drag is in progress.
    ///
    /// A delta that overflows once scaled by the drag speeds is rejected and
    /// the orientation is left as it was.
    pub fn update_drag(&mut self, delta: Vec2) -> Result<(), RotationError> {
        let delta = checked_vector(delta)?;
        if self.phase != ActivePhase::Dragging {
            debug!(?delta, phase = ?self.phase_kind(), "ignoring drag update outside a drag");
            return Ok(());
        }
        let rotated = apply_delta(self.orientation.get(), delta, self.config.drag_speeds)?;
        self.orientation.set(rotated);
        Ok(())
    }

    /// Releases the drag and starts coasting with the last sampled velocity.
    pub fn end_drag(&mut self, velocity: Vec2) -> Result<(), RotationError> {
        let velocity = checked_vector(velocity)?;
        if self.phase != ActivePhase::Dragging {
            debug!(phase = ?self.phase_kind(), "ignoring drag release outside a drag");
            return Ok(());
        }
        let inertia = InertiaState::new(velocity, self.config.inertia_reference_speed);
        debug!(?velocity, duration = inertia.duration, "drag released");
        self.transition(ActivePhase::Coasting(inertia));
        Ok(())
    }

    /// Animates onto the nearest face, chosen once `delay` seconds have passed.
    pub fn snap_to_nearest_face(&mut self, delay: f32) -> Result<(), RotationError> {
        let delay = checked_delay(delay)?;
        self.start_animation(AnimationTarget::NearestFace, delay);
        Ok(())
    }

    /// Animates onto `target` after `delay` seconds.
    pub fn rotate_to(&mut self, target: Quat, delay: f32) -> Result<(), RotationError> {
        let target = checked_orientation(target)?;
        let delay = checked_delay(delay)?;
        self.start_animation(AnimationTarget::Fixed(target), delay);
        Ok(())
    }

    /// Keeps `follower` matching this controller's orientation every tick
    /// until either side is dropped. The follower is synced immediately.
    pub fn attach_mirror(&mut self, follower: &SharedOrientation) {
        let mut mirror = SyncMirror::new(&self.orientation, follower);
        if mirror.tick() == PhaseStatus::Running {
            debug!(mirrors = self.mirrors.len() + 1, "mirror attached");
            self.mirrors.push(mirror);
        }
    }

    /// Stops whatever phase is running, leaving the orientation where it is.
    pub fn cancel(&mut self) {
        self.transition(ActivePhase::Idle);
    }

    /// Cancels any phase and sets the orientation directly.
    pub fn reset_to(&mut self, orientation: Quat) -> Result<(), RotationError> {
        let orientation = checked_orientation(orientation)?;
        self.transition(ActivePhase::Idle);
        self.orientation.set(orientation);
        Ok(())
    }

    /// Advances the active phase by `dt` seconds, then runs the mirrors.
    ///
    /// Returns the phase that will run on the next tick. If the phase fails
    /// to step, the orientation is left as it was, the controller goes idle
    /// and the error is returned.
    pub fn tick(&mut self, dt: f32) -> Result<PhaseKind, RotationError> {
        let dt = checked_time_step(dt)?;
        let after_coast = self.phase_after_coast();
        let current = self.orientation.get();

        let stepped = match &mut self.phase {
            ActivePhase::Idle | ActivePhase::Dragging => Ok((current, None)),
            ActivePhase::Coasting(inertia) => inertia
                .step(
                    current,
                    dt,
                    self.config.drag_speeds,
                    self.config.coast_gain,
                )
                .map(|(next, status)| {
                    (next, (status == PhaseStatus::Finished).then_some(after_coast))
                }),
            ActivePhase::Converging(animator) => animator
                .step(current, dt)
                .map(|(next, status)| {
                    (next, (status == PhaseStatus::Finished).then_some(ActivePhase::Idle))
                }),
        };

        let next_phase = match stepped {
            Ok((next, next_phase)) => {
                self.orientation.set(next);
                next_phase
            }
            Err(error) => {
                warn!(%error, phase = ?self.phase_kind(), "phase step failed, stopping");
                self.transition(ActivePhase::Idle);
                return Err(error);
            }
        };

        if let Some(phase) = next_phase {
            self.transition(phase);
        }
        self.tick_mirrors();

        trace!(dt, phase = ?self.phase_kind(), "tick");
        Ok(self.phase_kind())
    }

    fn start_animation(&mut self, target: AnimationTarget, delay: f32) {
        let animator = RotationAnimator::new(
            target,
            self.config.tolerance_degrees,
            self.config.convergence_speed,
        )
        .with_delay(delay);
        self.transition(ActivePhase::Converging(animator));
    }

    fn phase_after_coast(&self) -> ActivePhase {
        if self.config.snap_after_coast {
            ActivePhase::Converging(RotationAnimator::new(
                AnimationTarget::NearestFace,
                self.config.tolerance_degrees,
                self.config.convergence_speed,
            ))
        } else {
            ActivePhase::Idle
        }
    }

    fn transition(&mut self, phase: ActivePhase) {
        debug!(from = ?self.phase.kind(), to = ?phase.kind(), "phase transition");
        self.phase = phase;
    }

    fn tick_mirrors(&mut self) {
        self.mirrors
            .retain_mut(|mirror| mirror.tick() == PhaseStatus::Running);
    }
}
