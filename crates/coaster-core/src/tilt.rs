//! Curvature-driven banking.
//!
//! The signed curvature of the path projected onto the horizontal x-z plane
//! is used as a bank angle (radians) around the tangent axis. Rotating the
//! world-up reference by that angle leans the rider into the turn.

use crate::curve::CurveSample;
use crate::{CoasterError, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// At or below this speed the path is treated as straight.
pub const MIN_TILT_SPEED: f32 = 0.01;

/// How the rotated up vector is carried into the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TiltMode {
    /// Keep the full rotated vector
    #[default]
    Full,
    /// Collapse the rotated vector into a single vertical component, summing
    /// its x, y and z. Reproduces the classic single-scalar banking.
    Legacy,
}

impl fmt::Display for TiltMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiltMode::Full => write!(f, "full"),
            TiltMode::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for TiltMode {
    type Err = CoasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(TiltMode::Full),
            "legacy" => Ok(TiltMode::Legacy),
            other => Err(CoasterError::InvalidConfig(format!(
                "unknown tilt mode '{other}' (expected 'full' or 'legacy')"
            ))),
        }
    }
}

/// Signed horizontal curvature `(v.z * a.x - v.x * a.z) / |v|^3`.
///
/// Returns exactly 0 when `|v| <= MIN_TILT_SPEED`.
pub fn curvature(velocity: Vec3, acceleration: Vec3) -> f32 {
    let speed = velocity.length();
    if speed <= MIN_TILT_SPEED {
        return 0.0;
    }
    (velocity.z * acceleration.x - velocity.x * acceleration.z) / (speed * speed * speed)
}

/// Rotate a vector around a unit axis by an angle in radians (Rodrigues' formula).
pub fn rotate_around_axis(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let cos_a = angle.cos();
    let sin_a = angle.sin();
    let dot = v.dot(&axis);
    let cross = axis.cross(&v);
    Vec3::new(
        v.x * cos_a + cross.x * sin_a + axis.x * dot * (1.0 - cos_a),
        v.y * cos_a + cross.y * sin_a + axis.y * dot * (1.0 - cos_a),
        v.z * cos_a + cross.z * sin_a + axis.z * dot * (1.0 - cos_a),
    )
}

/// Result of one banking update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub curvature: f32,
    pub world_up: Vec3,
}

/// Turns curve samples into bank rotations of the world-up reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltSolver {
    mode: TiltMode,
    reference_up: Vec3,
}

impl Default for TiltSolver {
    fn default() -> Self {
        Self::new(TiltMode::default())
    }
}

impl TiltSolver {
    pub fn new(mode: TiltMode) -> Self {
        Self {
            mode,
            reference_up: Vec3::UP,
        }
    }

    pub fn mode(&self) -> TiltMode {
        self.mode
    }

    /// The untilted up vector every bank rotation starts from
    pub fn reference_up(&self) -> Vec3 {
        self.reference_up
    }

    pub fn curvature(&self, sample: &CurveSample) -> f32 {
        curvature(sample.velocity, sample.acceleration)
    }

    /// Rotate `world_up` by `curvature` radians about `axis`.
    ///
    /// [`TiltSolver::solve`] always passes the untilted reference, so banks do
    /// not compound from one tick to the next.
    pub fn apply_tilt(&self, curvature: f32, axis: Vec3, world_up: Vec3) -> Vec3 {
        let rotated = rotate_around_axis(world_up, axis, curvature);
        match self.mode {
            TiltMode::Full => rotated,
            TiltMode::Legacy => Vec3::new(0.0, rotated.x + rotated.y + rotated.z, 0.0),
        }
    }

    /// Bank the reference up vector for `sample` around `tangent_normal`.
    ///
    /// Every tick starts from the untilted reference, so the bank tracks the
    /// current curvature instead of spinning up over time.
    pub fn solve(&self, sample: &CurveSample, tangent_normal: Vec3) -> Tilt {
        let k = self.curvature(sample);
        Tilt {
            curvature: k,
            world_up: self.apply_tilt(k, tangent_normal, self.reference_up),
        }
    }
}
