//! The ride: a path plus everything needed to animate and draw it.

use crate::animation::{AnimationState, CameraMode, PathParameter};
use crate::camera::CameraPlacement;
use crate::geometry::{SceneGeometry, Strip};
use crate::rails::{build_rails, rail_layout, RailStripParams};
use crate::sampler::PathSampler;
use crate::scenery::build_scenery;
use crate::supports::build_supports;
use coaster_core::{
    build_frame, ControlPointSet, CurveEvaluator, RideConfig, SpeedModel, TiltSolver, Vec3,
};
use serde::Serialize;
use std::f32::consts::TAU;

/// Telemetry for one animation tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub u: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub curvature: f32,
    pub world_up: Vec3,
    pub speed: f32,
    pub camera: CameraPlacement,
    /// The frame could not be built, so the up vector was kept
    pub degenerate: bool,
    /// The parameter wrapped back to the start after this tick
    pub wrapped: bool,
}

#[derive(Debug, Clone)]
pub struct Ride {
    points: ControlPointSet,
    config: RideConfig,
    tilt: TiltSolver,
    speed: SpeedModel,
    layout: Vec<RailStripParams>,
    scenery: Vec<Strip>,
}

impl Ride {
    pub fn new(points: ControlPointSet, config: RideConfig) -> Self {
        let tilt = TiltSolver::new(config.animation.tilt_mode);
        let speed = SpeedModel::for_track(&points, config.physics.gravity, config.physics.work_margin);
        let layout = rail_layout(&config.track, &config.colors);
        let scenery = build_scenery(&config.colors);
        tracing::info!(
            track = points.name(),
            points = points.len(),
            tilt = %config.animation.tilt_mode,
            work_total = speed.work_total(),
            "ride ready"
        );
        Self {
            points,
            config,
            tilt,
            speed,
            layout,
            scenery,
        }
    }

    /// The shipped loop with the given config
    pub fn classic(config: RideConfig) -> Self {
        Self::new(ControlPointSet::classic(), config)
    }

    pub fn points(&self) -> &ControlPointSet {
        &self.points
    }

    pub fn config(&self) -> &RideConfig {
        &self.config
    }

    pub fn tilt_solver(&self) -> &TiltSolver {
        &self.tilt
    }

    pub fn speed_model(&self) -> &SpeedModel {
        &self.speed
    }

    pub fn curve(&self) -> CurveEvaluator<'_> {
        CurveEvaluator::new(&self.points)
    }

    pub fn sampler(&self) -> PathSampler<'_> {
        PathSampler::new(self.curve(), self.config.track.sample_step)
    }

    /// State before the first tick: at the start of the path, unbanked,
    /// orbiting.
    pub fn initial_state(&self) -> AnimationState {
        let parameter = PathParameter::new(self.points.domain());
        let sample = self.curve().sample(parameter.value());
        let world_up = self.tilt.reference_up();
        AnimationState {
            parameter,
            world_up,
            orbit_angle: 0.0,
            camera_mode: CameraMode::default(),
            ride_camera: CameraPlacement::ride(&sample, self.config.camera.ride_lift, world_up),
            speed: self.speed.speed_at(sample.position.y),
            ticks: 0,
        }
    }

    /// Advance the animation by one tick.
    ///
    /// Samples the path at the current parameter, banks the up vector, places
    /// the ride camera, then moves the parameter and orbit angle forward.
    /// When the frame is degenerate the previous up vector is kept.
    pub fn tick(&self, state: AnimationState) -> (AnimationState, TickReport) {
        let mut next = state;
        let u = state.parameter.value();
        let sample = self.curve().sample(u);
        let speed = self.speed.speed_at(sample.position.y);

        let (curvature, degenerate) = match build_frame(sample.velocity, state.world_up) {
            Ok(frame) => {
                let tilt = self.tilt.solve(&sample, frame.tangent_normal);
                next.world_up = tilt.world_up;
                (tilt.curvature, false)
            }
            Err(err) => {
                tracing::warn!(u, %err, "skipping tilt update");
                (self.tilt.curvature(&sample), true)
            }
        };

        next.ride_camera =
            CameraPlacement::ride(&sample, self.config.camera.ride_lift, next.world_up);
        next.speed = speed;
        let wrapped = next.parameter.advance(self.config.animation.parameter_step);
        if wrapped {
            tracing::debug!(ticks = state.ticks + 1, "lap complete");
        }
        next.orbit_angle = (state.orbit_angle + self.config.animation.orbit_step).rem_euclid(TAU);
        next.ticks = state.ticks + 1;

        let report = TickReport {
            tick: next.ticks,
            u,
            position: sample.position,
            velocity: sample.velocity,
            curvature,
            world_up: next.world_up,
            speed,
            camera: next.ride_camera,
            degenerate,
            wrapped,
        };
        (next, report)
    }

    /// Camera for whichever mode `state` is in.
    pub fn camera_for(&self, state: &AnimationState) -> CameraPlacement {
        match state.camera_mode {
            CameraMode::Orbit => CameraPlacement::orbit(state.orbit_angle, &self.config.camera),
            CameraMode::Ride => state.ride_camera,
        }
    }

    /// Scenery, rails and support columns for the current up vector.
    pub fn build_scene(&self, state: &AnimationState) -> SceneGeometry {
        let sampler = self.sampler();
        let samples = sampler.samples(state.world_up);

        let mut strips = self.scenery.clone();
        strips.extend(build_rails(&samples, &self.layout));
        strips.extend(build_supports(
            &sampler,
            state.world_up,
            self.config.track.support_floor,
            self.config.colors.support,
        ));

        let scene = SceneGeometry { strips };
        tracing::trace!(
            strips = scene.strips.len(),
            vertices = scene.vertex_count(),
            "scene rebuilt"
        );
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::StripKind;
    use coaster_core::TiltMode;

    fn ride() -> Ride {
        Ride::classic(RideConfig::default())
    }

    #[test]
    fn initial_state_starts_at_domain_start() {
        let ride = ride();
        let state = ride.initial_state();
        assert_eq!(state.parameter.value(), 3.0);
        assert_eq!(state.world_up, Vec3::UP);
        assert_eq!(state.camera_mode, CameraMode::Orbit);
        assert_eq!(state.ticks, 0);
    }

    #[test]
    fn tick_advances_parameter_and_orbit() {
        let ride = ride();
        let (next, report) = ride.tick(ride.initial_state());
        assert_eq!(report.u, 3.0);
        assert!((next.parameter.value() - 3.05).abs() < 1e-6);
        assert!((next.orbit_angle - 0.01).abs() < 1e-6);
        assert_eq!(next.ticks, 1);
        assert!(!report.degenerate);
        assert!(!report.wrapped);
    }

    #[test]
    fn ride_camera_follows_the_track() {
        let ride = ride();
        let (next, report) = ride.tick(ride.initial_state());
        let expected_eye = Vec3::new(7.5, 12.5 + 3.0, -10.0 / 3.0);
        assert!(report.camera.eye.max_abs_diff(&expected_eye) < 1e-4);
        assert!(report
            .camera
            .target
            .max_abs_diff(&(report.position + report.velocity))
            < 1e-5);
        assert_eq!(report.camera.up, next.world_up);
    }

    #[test]
    fn a_full_lap_wraps_once_and_stays_finite() {
        let ride = ride();
        let mut state = ride.initial_state();
        let mut wraps = 0;
        let mut min_speed = f32::INFINITY;
        // 300 ticks per lap at the default step
        for _ in 0..310 {
            let (next, report) = ride.tick(state);
            assert!(report.world_up.is_finite());
            assert!(report.speed.is_finite() && report.speed > 0.0);
            assert!(next.parameter.value() >= 3.0 && next.parameter.value() < 18.0);
            min_speed = min_speed.min(report.speed);
            if report.wrapped {
                wraps += 1;
            }
            state = next;
        }
        assert_eq!(wraps, 1);
        assert!(min_speed >= ride.speed_model().speed_at(37.0));
    }

    #[test]
    fn full_mode_up_stays_unit_length() {
        let ride = ride();
        let mut state = ride.initial_state();
        for _ in 0..300 {
            let (next, report) = ride.tick(state);
            assert!((report.world_up.length() - 1.0).abs() < 1e-4);
            state = next;
        }
    }

    #[test]
    fn legacy_mode_up_is_vertical() {
        let mut config = RideConfig::default();
        config.animation.tilt_mode = TiltMode::Legacy;
        let ride = Ride::classic(config);
        let (next, _) = ride.tick(ride.initial_state());
        assert_eq!(next.world_up.x, 0.0);
        assert_eq!(next.world_up.z, 0.0);
    }

    #[test]
    fn bank_does_not_compound_from_previous_up() {
        let ride = ride();
        let fresh = ride.initial_state();
        let mut banked = fresh;
        banked.world_up = Vec3::new(0.3, 0.9, 0.1).normalized();
        let (from_fresh, _) = ride.tick(fresh);
        let (from_banked, report) = ride.tick(banked);
        assert!(!report.degenerate);
        assert!(from_banked.world_up.max_abs_diff(&from_fresh.world_up) < 1e-6);
    }

    #[test]
    fn degenerate_tick_keeps_previous_up() {
        let ride = ride();
        let mut state = ride.initial_state();
        state.world_up = Vec3::ZERO;
        let (next, report) = ride.tick(state);
        assert!(report.degenerate);
        assert_eq!(next.world_up, Vec3::ZERO);
        assert!((next.parameter.value() - 3.05).abs() < 1e-6);
    }

    #[test]
    fn camera_for_respects_mode() {
        let ride = ride();
        let (mut state, _) = ride.tick(ride.initial_state());
        let orbit = ride.camera_for(&state);
        assert_eq!(orbit.target, Vec3::ZERO);
        state.toggle_camera();
        assert_eq!(ride.camera_for(&state), state.ride_camera);
    }

    #[test]
    fn scene_contains_every_layer() {
        let ride = ride();
        let scene = ride.build_scene(&ride.initial_state());
        assert_eq!(scene.strips_of(StripKind::MainRail).count(), 4);
        assert_eq!(scene.strips_of(StripKind::SideRail).count(), 8);
        assert_eq!(scene.strips_of(StripKind::Support).count(), 15);
        assert_eq!(scene.strips_of(StripKind::Ground).count(), 1);
        assert_eq!(scene.strips_of(StripKind::Sky).count(), 1);
        assert_eq!(scene.strips_of(StripKind::Ceiling).count(), 1);
        assert_eq!(scene.strips[0].kind, StripKind::Ground);

        let rail = scene.strips_of(StripKind::MainRail).next().unwrap();
        assert!(rail.vertices.len() >= 2 * 1499);
        assert!(scene
            .strips
            .iter()
            .flat_map(|s| s.vertices.iter())
            .all(|v| v.is_finite()));
    }
}
