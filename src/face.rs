//! Face orientations: the axis-aligned rotations a cube can rest in.
//!
//! A face orientation is any rotation whose Euler angles are all drawn from
//! [`CANONICAL_ANGLES`]. Of the 125 possible angle triples only 24 are
//! distinct rotations (6 faces that can point up, times 4 turns about the
//! vertical), see [`distinct_faces`].
//!
//! Euler convention: `(x, y, z)` in degrees, applied as yaw about Y, then
//! pitch about X, then roll about Z (`EulerRot::YXZ`).
//!
//! Known limitation: [`nearest_face`] snaps each Euler angle on its own. It
//! is not a nearest-rotation search over all 24 faces and can pick a face
//! that is not the closest in angular distance, especially near pitch
//! +/-90. Callers rely on this snapping behavior, so it is kept as is.

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::angle::{snap, CANONICAL_ANGLES};
use crate::error::{checked_orientation, RotationError};

/// Number of distinct face orientations of a cube.
pub const FACE_COUNT: usize = 24;

/// Quantization scale for rotation keys in [`distinct_faces`].
const KEY_SCALE: f32 = 1000.0;

/// Minimum `|dot|` for two unit quaternions to count as the same face
/// (about 0.5 degrees apart).
const SAME_FACE_DOT: f32 = 1.0 - 1e-5;

/// Decomposes an orientation into `(x, y, z)` Euler angles in degrees.
pub fn euler_degrees(orientation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = orientation.to_euler(EulerRot::YXZ);
    Vec3::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
}

/// Composes `(x, y, z)` Euler angles in degrees into an orientation.
pub fn from_euler_degrees(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        angles.y.to_radians(),
        angles.x.to_radians(),
        angles.z.to_radians(),
    )
}

/// Snaps an orientation to a face by snapping each Euler angle.
pub fn nearest_face(orientation: Quat) -> Result<Quat, RotationError> {
    let orientation = checked_orientation(orientation)?;
    let angles = euler_degrees(orientation);
    let snapped = Vec3::new(snap(angles.x), snap(angles.y), snap(angles.z));
    Ok(from_euler_degrees(snapped))
}

/// Whether `orientation` already rests on a face.
pub fn is_face(orientation: Quat) -> bool {
    nearest_face(orientation)
        .map(|face| face.dot(orientation.normalize()).abs() >= SAME_FACE_DOT)
        .unwrap_or(false)
}

/// Draws each Euler angle uniformly from [`CANONICAL_ANGLES`].
///
/// Any of the 125 triples can come out, so the 24 faces are not equally
/// likely.
pub fn random_face<R: Rng>(rng: &mut R) -> Quat {
    let mut pick = || CANONICAL_ANGLES[rng.random_range(0..CANONICAL_ANGLES.len())];
    let (x, y, z) = (pick(), pick(), pick());
    from_euler_degrees(Vec3::new(x, y, z))
}

/// An arbitrary orientation from normalized random components.
pub fn random_orientation<R: Rng>(rng: &mut R) -> Quat {
    loop {
        let candidate = Quat::from_xyzw(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        // resample the (practically impossible) all-zero draw
        if let Ok(orientation) = checked_orientation(candidate) {
            return orientation;
        }
    }
}

/// Lists the 24 distinct face orientations.
///
/// Walks every Euler triple in [`CANONICAL_ANGLES`] order and keeps the
/// first triple producing each rotation.
pub fn distinct_faces() -> Vec<Quat> {
    let mut seen: FxHashSet<[i32; 4]> = FxHashSet::default();
    let mut faces = Vec::with_capacity(FACE_COUNT);

    for &x in &CANONICAL_ANGLES {
        for &y in &CANONICAL_ANGLES {
            for &z in &CANONICAL_ANGLES {
                let face = from_euler_degrees(Vec3::new(x, y, z));
                if seen.insert(rotation_key(face)) {
                    faces.push(face);
                }
            }
        }
    }

    faces
}

/// Hashable key identifying a rotation.
///
/// `q` and `-q` are the same rotation, so the sign is fixed by making the
/// first non-negligible component positive before quantizing.
fn rotation_key(orientation: Quat) -> [i32; 4] {
    let components = orientation.to_array();
    let sign = components
        .iter()
        .find(|component| component.abs() > 1e-3)
        .map_or(1.0, |component| component.signum());
    components.map(|component| (component * sign * KEY_SCALE).round() as i32)
}
