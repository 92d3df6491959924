//! Animation state carried from one tick to the next.

use crate::camera::CameraPlacement;
use coaster_core::{ParameterDomain, Vec3};
use serde::Serialize;
use std::fmt;

/// Position along the path, always inside `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathParameter {
    value: f32,
    domain: ParameterDomain,
}

impl PathParameter {
    /// Start at the beginning of `domain`.
    pub fn new(domain: ParameterDomain) -> Self {
        Self {
            value: domain.start,
            domain,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn domain(&self) -> ParameterDomain {
        self.domain
    }

    /// Advance by `step`. Reaching or passing the end restarts at exactly
    /// `domain.start`; returns whether that happened.
    pub fn advance(&mut self, step: f32) -> bool {
        self.value += step;
        if self.value >= self.domain.end {
            self.value = self.domain.start;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// Circle the whole scene
    #[default]
    Orbit,
    /// Ride along the track
    Ride,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Orbit => CameraMode::Ride,
            CameraMode::Ride => CameraMode::Orbit,
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraMode::Orbit => write!(f, "orbit"),
            CameraMode::Ride => write!(f, "ride"),
        }
    }
}

/// Everything that changes while the ride runs.
///
/// Owned by the event loop and threaded through `Ride::tick`; renderers read
/// a copy taken after the tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub parameter: PathParameter,
    /// Banked up vector used for rail frames and the ride camera
    pub world_up: Vec3,
    /// Orbit camera angle in radians
    pub orbit_angle: f32,
    pub camera_mode: CameraMode,
    /// Ride camera from the most recent tick
    pub ride_camera: CameraPlacement,
    /// Speed readout from the most recent tick
    pub speed: f32,
    pub ticks: u64,
}

impl AnimationState {
    pub fn toggle_camera(&mut self) {
        self.camera_mode = self.camera_mode.toggled();
        tracing::info!(mode = %self.camera_mode, "camera mode changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> ParameterDomain {
        ParameterDomain {
            start: 3.0,
            end: 18.0,
        }
    }

    #[test]
    fn advances_by_step() {
        let mut p = PathParameter::new(domain());
        assert_eq!(p.value(), 3.0);
        assert!(!p.advance(0.05));
        assert!((p.value() - 3.05).abs() < 1e-6);
    }

    #[test]
    fn wraps_to_exact_start() {
        let mut p = PathParameter::new(domain());
        let mut wrapped = 0;
        for _ in 0..1000 {
            if p.advance(0.05) {
                wrapped += 1;
                assert_eq!(p.value(), 3.0);
            }
            assert!(p.value() >= 3.0 && p.value() < 18.0);
        }
        assert!(wrapped >= 3);
    }

    #[test]
    fn landing_on_end_wraps() {
        let mut p = PathParameter::new(domain());
        assert!(p.advance(15.0));
        assert_eq!(p.value(), 3.0);
    }

    #[test]
    fn camera_mode_cycles() {
        assert_eq!(CameraMode::default(), CameraMode::Orbit);
        assert_eq!(CameraMode::Orbit.toggled(), CameraMode::Ride);
        assert_eq!(CameraMode::Ride.toggled().toggled(), CameraMode::Ride);
        assert_eq!(CameraMode::Ride.to_string(), "ride");
    }
}
