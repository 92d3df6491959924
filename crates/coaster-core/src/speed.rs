//! Energy-conservation speed readout.
//!
//! The car starts with enough energy to clear the highest point of the track
//! plus a fixed margin: `work_total = g * max_height + margin`. Speed at height
//! `y` then follows from `v = sqrt(2 * (work_total - g * y))`.

use crate::control_points::ControlPointSet;

/// Standard gravity in m/s^2
pub const GRAVITY: f32 = 9.81;

/// Extra energy added on top of the climb to the crest
pub const DEFAULT_WORK_MARGIN: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedModel {
    work_total: f32,
    gravity: f32,
}

impl SpeedModel {
    pub fn new(max_height: f32, gravity: f32, margin: f32) -> Self {
        Self {
            work_total: gravity * max_height + margin,
            gravity,
        }
    }

    /// Size the energy budget from the highest control point.
    pub fn for_track(points: &ControlPointSet, gravity: f32, margin: f32) -> Self {
        Self::new(points.max_height(), gravity, margin)
    }

    pub fn work_total(&self) -> f32 {
        self.work_total
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// `2 * (work_total - g * height)` before clamping
    pub fn radicand(&self, height: f32) -> f32 {
        2.0 * (self.work_total - self.gravity * height)
    }

    /// Speed at `height`, clamped to zero above the energy ceiling
    pub fn speed_at(&self, height: f32) -> f32 {
        self.radicand(height).max(0.0).sqrt()
    }
}
