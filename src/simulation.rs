//! Headless runs of the controller and text reports for the CLI.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use glam::{Quat, Vec2, Vec3};
use rustc_hash::FxHashMap;
use tracing::info;

use crate::angle::{nearest_canonical, normalize, snap};
use crate::config::ControllerConfig;
use crate::controller::{OrientationController, PhaseKind};
use crate::error::RotationError;
use crate::face::{euler_degrees, from_euler_degrees, is_face};
use crate::mirror::SharedOrientation;

/// A scripted interaction: drag by each delta on its own tick, release,
/// then tick until the controller goes idle or `max_ticks` runs out.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub start: Quat,
    pub drag_deltas: Vec<Vec2>,
    pub release_velocity: Vec2,
    pub dt: f32,
    pub max_ticks: usize,
    pub config: ControllerConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            start: from_euler_degrees(Vec3::new(10.0, 20.0, 0.0)),
            drag_deltas: vec![Vec2::new(15.0, -4.0); 12],
            release_velocity: Vec2::new(1400.0, -350.0),
            dt: 1.0 / 60.0,
            max_ticks: 2000,
            config: ControllerConfig::default(),
        }
    }
}

/// Outcome of [`run`]: how long each phase lasted and where the cube ended.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Ticks spent in each phase, keyed by the phase active when the tick began.
    pub ticks_per_phase: FxHashMap<PhaseKind, usize>,
    pub total_ticks: usize,
    pub final_orientation: Quat,
    /// Whether the controller went idle within `max_ticks`.
    pub settled: bool,
    pub on_face: bool,
    /// Whether the attached mirror ended up matching the controller.
    pub mirror_matches: bool,
}

impl SimulationReport {
    pub fn ticks_in(&self, phase: PhaseKind) -> usize {
        self.ticks_per_phase.get(&phase).copied().unwrap_or(0)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let angles = euler_degrees(self.final_orientation);
        writeln!(f, "Simulated {} ticks", self.total_ticks)?;
        for phase in [PhaseKind::Dragging, PhaseKind::Coasting, PhaseKind::Converging] {
            writeln!(f, "  {:<11} {}", format!("{phase:?}:"), self.ticks_in(phase))?;
        }
        writeln!(
            f,
            "Final orientation (x, y, z): ({:.1}, {:.1}, {:.1})",
            angles.x, angles.y, angles.z
        )?;
        writeln!(f, "Settled: {}, on face: {}", self.settled, self.on_face)?;
        write!(f, "Mirror in sync: {}", self.mirror_matches)
    }
}

/// Runs a scenario with one mirror attached.
pub fn run(scenario: &Scenario) -> Result<SimulationReport, RotationError> {
    let mut controller = OrientationController::new(scenario.config, scenario.start)?;
    let follower: SharedOrientation = Rc::new(Cell::new(Quat::IDENTITY));
    controller.attach_mirror(&follower);

    let mut ticks_per_phase: FxHashMap<PhaseKind, usize> = FxHashMap::default();
    let mut total_ticks = 0;
    let mut count_tick = |phase: PhaseKind| {
        *ticks_per_phase.entry(phase).or_insert(0) += 1;
        total_ticks += 1;
    };

    controller.start_drag();
    for &delta in &scenario.drag_deltas {
        controller.update_drag(delta)?;
        count_tick(controller.phase_kind());
        controller.tick(scenario.dt)?;
    }
    controller.end_drag(scenario.release_velocity)?;

    let mut settled = false;
    for _ in 0..scenario.max_ticks {
        count_tick(controller.phase_kind());
        if controller.tick(scenario.dt)? == PhaseKind::Idle {
            settled = true;
            break;
        }
    }

    let final_orientation = controller.orientation();
    info!(total_ticks, settled, "simulation finished");

    Ok(SimulationReport {
        ticks_per_phase,
        total_ticks,
        final_orientation,
        settled,
        on_face: is_face(final_orientation),
        mirror_matches: follower.get() == final_orientation,
    })
}

/// Euler angles of a face, snapped so float noise prints cleanly.
pub fn face_angles(face: Quat) -> Vec3 {
    let angles = euler_degrees(face);
    Vec3::new(snap(angles.x), snap(angles.y), snap(angles.z))
}

/// Headings from -405 to 405 degrees in 45 degree steps.
pub fn default_table_angles() -> Vec<f32> {
    (-9..=9).map(|step| step as f32 * 45.0).collect()
}

/// Formats how each angle normalizes and snaps.
pub fn format_snap_table(angles: &[f32]) -> String {
    let mut output = format!("{:>8} {:>11} {:>10}\n", "angle", "normalized", "canonical");
    for &angle in angles {
        let normalized = normalize(angle);
        let canonical = nearest_canonical(normalized);
        output.push_str(&format!("{angle:>8} {normalized:>11} {canonical:>10}\n"));
    }
    output
}
