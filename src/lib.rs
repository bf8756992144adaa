//! Cube Orientation Controller Library
//!
//! Drives the orientation of a cube from drag input: rotate while dragging,
//! coast under decaying velocity after release, then converge onto the
//! nearest of the 24 axis-aligned face orientations.
//!
//! Everything is single-threaded and ticked by the caller with the elapsed
//! frame time; nothing here schedules itself.

pub mod angle;
pub mod animator;
pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod face;
pub mod inertia;
pub mod mirror;
pub mod simulation;

pub use config::ControllerConfig;
pub use controller::{ActivePhase, OrientationController, PhaseKind};
pub use error::RotationError;
pub use mirror::{SharedOrientation, SyncMirror};

/// Outcome of advancing a per-tick process by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    /// Wants another tick.
    Running,
    /// Done; will not touch the orientation again.
    Finished,
}
