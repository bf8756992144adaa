//! Cube Orientation Controller
//!
//! Headless driver for the orientation controller: runs a scripted drag
//! and flick through the full drag, coast and snap cycle, and exposes the
//! face snapping helpers on the command line.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use snapcube::drag::DragSpeeds;
use snapcube::face::{distinct_faces, from_euler_degrees, nearest_face, random_face};
use snapcube::simulation::{self, default_table_angles, face_angles, format_snap_table, Scenario};
use snapcube::{ControllerConfig, RotationError};

const DEFAULT_VELOCITY_X: f32 = 1400.0;
const DEFAULT_VELOCITY_Y: f32 = -350.0;
const DEFAULT_FPS: f32 = 60.0;
const DEFAULT_DRAG_SPEED: f32 = 0.4;
const DEFAULT_TOLERANCE: f32 = 1.0;
const DEFAULT_SPEED: f32 = 10.0;
const DEFAULT_MAX_TICKS: usize = 2000;

/// Drives a cube through drag, inertia and face snapping.
#[derive(Parser)]
#[command(name = "snapcube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log phase transitions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scripted drag and flick, then report how the cube settled.
    Simulate(SimulateArgs),
    /// Snap Euler angles (degrees) to the nearest face.
    Snap {
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        x: f32,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        y: f32,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        z: f32,
    },
    /// List the 24 distinct face orientations.
    Faces,
    /// Show how headings normalize and snap to canonical angles.
    Table,
    /// Draw a random face orientation.
    Random {
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct SimulateArgs {
    /// Horizontal release velocity.
    #[arg(long, default_value_t = DEFAULT_VELOCITY_X, allow_hyphen_values = true)]
    velocity_x: f32,
    /// Vertical release velocity.
    #[arg(long, default_value_t = DEFAULT_VELOCITY_Y, allow_hyphen_values = true)]
    velocity_y: f32,
    /// Simulated frames per second.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: f32,
    /// Degrees per unit of drag on both axes.
    #[arg(long, default_value_t = DEFAULT_DRAG_SPEED, allow_hyphen_values = true)]
    drag_speed: f32,
    /// Snap tolerance in degrees.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f32,
    /// Convergence speed.
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    speed: f32,
    /// Stop after coasting instead of snapping to a face.
    #[arg(long)]
    no_snap: bool,
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: usize,
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            velocity_x: DEFAULT_VELOCITY_X,
            velocity_y: DEFAULT_VELOCITY_Y,
            fps: DEFAULT_FPS,
            drag_speed: DEFAULT_DRAG_SPEED,
            tolerance: DEFAULT_TOLERANCE,
            speed: DEFAULT_SPEED,
            no_snap: false,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl SimulateArgs {
    fn scenario(&self) -> Scenario {
        let config = ControllerConfig {
            drag_speeds: DragSpeeds {
                x: self.drag_speed,
                y: self.drag_speed,
            },
            tolerance_degrees: self.tolerance,
            convergence_speed: self.speed,
            snap_after_coast: !self.no_snap,
            ..ControllerConfig::default()
        };
        Scenario {
            release_velocity: Vec2::new(self.velocity_x, self.velocity_y),
            dt: 1.0 / self.fps,
            max_ticks: self.max_ticks,
            config,
            ..Scenario::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Command::Simulate(args)) => run_simulation(&args),
        Some(Command::Snap { x, y, z }) => run_snap(Vec3::new(x, y, z)),
        Some(Command::Faces) => {
            run_faces();
            Ok(())
        }
        Some(Command::Table) => {
            print!("{}", format_snap_table(&default_table_angles()));
            Ok(())
        }
        Some(Command::Random { seed }) => {
            run_random(seed);
            Ok(())
        }
        // default: simulate with stock settings
        None => run_simulation(&SimulateArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the scripted scenario and prints its report.
fn run_simulation(args: &SimulateArgs) -> Result<(), RotationError> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        return Err(RotationError::InvalidConfig("fps must be positive"));
    }
    let report = simulation::run(&args.scenario())?;
    println!("{}", report);
    Ok(())
}

/// Prints the face nearest to the given Euler angles.
fn run_snap(angles: Vec3) -> Result<(), RotationError> {
    let face = nearest_face(from_euler_degrees(angles))?;
    let snapped = face_angles(face);
    println!(
        "({}, {}, {}) -> ({}, {}, {})",
        angles.x, angles.y, angles.z, snapped.x, snapped.y, snapped.z
    );
    Ok(())
}

/// Prints each distinct face as Euler angles.
fn run_faces() {
    let faces = distinct_faces();
    println!("{} distinct faces", faces.len());
    for (i, &face) in faces.iter().enumerate() {
        let angles = face_angles(face);
        println!("{:>3}: ({}, {}, {})", i + 1, angles.x, angles.y, angles.z);
    }
}

/// Prints a random face, reproducible when seeded.
fn run_random(seed: Option<u64>) {
    let face = match seed {
        Some(seed) => random_face(&mut StdRng::seed_from_u64(seed)),
        None => random_face(&mut rand::rng()),
    };
    let angles = face_angles(face);
    println!("({}, {}, {})", angles.x, angles.y, angles.z);
}
