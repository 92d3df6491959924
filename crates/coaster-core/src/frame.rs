//! Moving reference frame along the path.
//!
//! The frame is built from the curve velocity and a world-up reference:
//! - `tangent_normal`: unit vector opposite to the direction of travel
//! - `lateral`: `world_up x tangent_normal`, normalized
//! - `vertical`: `tangent_normal x lateral`, completing the triad

use crate::{CoasterError, Result, Vec3};

/// Below this length a velocity or cross product is treated as zero.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Orthonormal triad attached to one curve sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub tangent_normal: Vec3,
    pub lateral: Vec3,
    pub vertical: Vec3,
}

impl Frame {
    /// Direction of travel (the negated tangent normal)
    pub fn forward(&self) -> Vec3 {
        -self.tangent_normal
    }

    pub fn is_finite(&self) -> bool {
        self.tangent_normal.is_finite() && self.lateral.is_finite() && self.vertical.is_finite()
    }

    /// Largest deviation from orthonormality over all pairs and lengths
    pub fn orthonormality_error(&self) -> f32 {
        let n = self.tangent_normal;
        let l = self.lateral;
        let v = self.vertical;
        [
            n.dot(&l).abs(),
            n.dot(&v).abs(),
            l.dot(&v).abs(),
            (n.length() - 1.0).abs(),
            (l.length() - 1.0).abs(),
            (v.length() - 1.0).abs(),
        ]
        .into_iter()
        .fold(0.0, f32::max)
    }
}

/// Build the frame for `velocity` against the `world_up` reference.
///
/// Fails with [`CoasterError::DegenerateFrame`] when the velocity vanishes or
/// the tangent is parallel to `world_up`.
pub fn build_frame(velocity: Vec3, world_up: Vec3) -> Result<Frame> {
    let tangent_normal = (-velocity)
        .try_normalized(DEGENERATE_EPSILON)
        .ok_or_else(|| {
            CoasterError::DegenerateFrame(format!(
                "velocity {:?} has length {}",
                velocity,
                velocity.length()
            ))
        })?;

    let lateral = world_up
        .cross(&tangent_normal)
        .try_normalized(DEGENERATE_EPSILON)
        .ok_or_else(|| {
            CoasterError::DegenerateFrame(format!(
                "world up {:?} is parallel to tangent {:?}",
                world_up, tangent_normal
            ))
        })?;

    let vertical = tangent_normal.cross(&lateral);

    Ok(Frame {
        tangent_normal,
        lateral,
        vertical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-5;

    #[test]
    fn level_travel_along_x() {
        let frame = build_frame(Vec3::new(2.0, 0.0, 0.0), Vec3::UP).unwrap();
        assert!(frame.tangent_normal.max_abs_diff(&Vec3::new(-1.0, 0.0, 0.0)) < TOL);
        // up x (-x) = +z
        assert!(frame.lateral.max_abs_diff(&Vec3::new(0.0, 0.0, 1.0)) < TOL);
        // (-x) x (+z) = +y
        assert!(frame.vertical.max_abs_diff(&Vec3::UP) < TOL);
        assert!(frame.forward().max_abs_diff(&Vec3::RIGHT) < TOL);
    }

    #[test]
    fn frames_are_orthonormal() {
        let velocities = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.0, 0.5, 0.1),
            Vec3::new(0.01, -7.0, 2.0),
            Vec3::new(3.0, 3.0, -3.0),
        ];
        let ups = [
            Vec3::UP,
            Vec3::new(0.2, 0.9, -0.1),
            Vec3::new(0.0, 0.4, 0.0),
        ];
        for v in velocities {
            for up in ups {
                let frame = build_frame(v, up).unwrap();
                assert!(
                    frame.orthonormality_error() < 1e-5,
                    "v = {v:?}, up = {up:?}: {frame:?}"
                );
            }
        }
    }

    #[test]
    fn zero_velocity_is_degenerate() {
        let err = build_frame(Vec3::ZERO, Vec3::UP).unwrap_err();
        assert!(matches!(err, CoasterError::DegenerateFrame(_)));
    }

    #[test]
    fn vertical_travel_against_vertical_up_is_degenerate() {
        let err = build_frame(Vec3::new(0.0, 5.0, 0.0), Vec3::UP).unwrap_err();
        assert!(matches!(err, CoasterError::DegenerateFrame(_)));
    }

    #[test]
    fn zero_world_up_is_degenerate() {
        assert!(build_frame(Vec3::RIGHT, Vec3::ZERO).is_err());
    }
}
