//! Eye, look-at and up triples for the two camera modes.

use coaster_core::config::CameraConfig;
use coaster_core::{CurveSample, Vec3};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPlacement {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraPlacement {
    /// Rider's view: lifted above the rail, looking along the velocity.
    pub fn ride(sample: &CurveSample, lift: f32, up: Vec3) -> Self {
        Self {
            eye: sample.position + Vec3::UP * lift,
            target: sample.position + sample.velocity,
            up,
        }
    }

    /// Bystander's view circling the origin at a fixed radius and height.
    pub fn orbit(angle: f32, camera: &CameraConfig) -> Self {
        Self {
            eye: Vec3::new(
                camera.orbit_radius * angle.cos(),
                camera.orbit_height,
                -camera.orbit_radius * angle.sin(),
            ),
            target: Vec3::ZERO,
            up: Vec3::UP,
        }
    }
}
