//! Mirroring one orientation onto a follower every tick.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use glam::Quat;
use tracing::debug;

use crate::PhaseStatus;

/// An orientation shared between the object that owns it and any mirrors.
pub type SharedOrientation = Rc<Cell<Quat>>;

/// Copies a source orientation onto a follower until either is dropped.
///
/// Holds only weak handles; a mirror never keeps its objects alive. Once
/// either side is gone the mirror stays finished, even if a new object is
/// later created in its place.
#[derive(Debug, Clone)]
pub struct SyncMirror {
    source: Weak<Cell<Quat>>,
    follower: Weak<Cell<Quat>>,
    finished: bool,
}

impl SyncMirror {
    pub fn new(source: &SharedOrientation, follower: &SharedOrientation) -> Self {
        Self {
            source: Rc::downgrade(source),
            follower: Rc::downgrade(follower),
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick(&mut self) -> PhaseStatus {
        if self.finished {
            return PhaseStatus::Finished;
        }

        match (self.source.upgrade(), self.follower.upgrade()) {
            (Some(source), Some(follower)) => {
                follower.set(source.get());
                PhaseStatus::Running
            }
            _ => {
                debug!("mirror detached: source or follower dropped");
                self.finished = true;
                PhaseStatus::Finished
            }
        }
    }
}
