//! Walks the path at a fixed parameter step and attaches a frame to every
//! sample. Degenerate frames are replaced by the last good one.

use coaster_core::config::MIN_STEP;
use coaster_core::frame::build_frame;
use coaster_core::{CurveEvaluator, CurveSample, Frame, ParameterDomain, Result, Vec3};

/// Frame used when the very first sample is already degenerate: travel along
/// -z with +y up.
pub const FALLBACK_FRAME: Frame = Frame {
    tangent_normal: Vec3::new(0.0, 0.0, 1.0),
    lateral: Vec3::new(1.0, 0.0, 0.0),
    vertical: Vec3::new(0.0, 1.0, 0.0),
};

/// One cross-section along the path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub u: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub frame: Frame,
    /// True when `frame` was carried over from an earlier sample
    pub held: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct PathSampler<'a> {
    curve: CurveEvaluator<'a>,
    step: f32,
}

impl<'a> PathSampler<'a> {
    /// Steps below [`MIN_STEP`] (or NaN) are raised to it.
    pub fn new(curve: CurveEvaluator<'a>, step: f32) -> Self {
        let step = if step >= MIN_STEP {
            step
        } else {
            tracing::warn!(step, min = MIN_STEP, "sample step too small, clamping");
            MIN_STEP
        };
        Self { curve, step }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn domain(&self) -> ParameterDomain {
        self.curve.domain()
    }

    /// Parameters `start, start + step, ...` strictly below the domain end.
    ///
    /// Computed by index rather than accumulation so long walks do not drift.
    pub fn parameters(&self) -> impl Iterator<Item = f32> {
        let domain = self.curve.domain();
        let step = self.step;
        let count = (((domain.end - domain.start) / step).ceil().max(0.0) as usize).saturating_add(1);
        (0..count)
            .map(move |k| domain.start + k as f32 * step)
            .take_while(move |u| domain.contains(*u))
    }

    /// Curve sample and frame at a single parameter.
    pub fn frame_at(&self, u: f32, world_up: Vec3) -> Result<(CurveSample, Frame)> {
        let sample = self.curve.try_sample(u)?;
        let frame = build_frame(sample.velocity, world_up)?;
        Ok((sample, frame))
    }

    /// Sample the whole path against one world-up reference.
    pub fn samples(&self, world_up: Vec3) -> Vec<FrameSample> {
        let mut out = Vec::new();
        let mut last_good: Option<Frame> = None;
        let mut held_count = 0usize;

        for u in self.parameters() {
            let sample = self.curve.sample(u);
            let (frame, held) = match build_frame(sample.velocity, world_up) {
                Ok(frame) => {
                    last_good = Some(frame);
                    (frame, false)
                }
                Err(_) => {
                    held_count += 1;
                    (last_good.unwrap_or(FALLBACK_FRAME), true)
                }
            };
            out.push(FrameSample {
                u,
                position: sample.position,
                velocity: sample.velocity,
                frame,
                held,
            });
        }

        if held_count > 0 {
            tracing::warn!(
                held = held_count,
                total = out.len(),
                ?world_up,
                "degenerate frames replaced by the previous frame"
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coaster_core::ControlPointSet;

    #[test]
    fn parameters_cover_domain_without_reaching_end() {
        let set = ControlPointSet::classic();
        let sampler = PathSampler::new(CurveEvaluator::new(&set), 0.01);
        let us: Vec<f32> = sampler.parameters().collect();
        assert_eq!(us[0], 3.0);
        assert!((1499..=1501).contains(&us.len()), "{}", us.len());
        assert!(us.iter().all(|u| *u < 18.0));
        assert!(us.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn classic_loop_has_no_held_frames_with_vertical_up() {
        let set = ControlPointSet::classic();
        let sampler = PathSampler::new(CurveEvaluator::new(&set), 0.05);
        let samples = sampler.samples(Vec3::UP);
        assert!(samples.iter().all(|s| !s.held));
        assert!(samples
            .iter()
            .all(|s| s.frame.orthonormality_error() < 1e-4));
    }

    #[test]
    fn degenerate_samples_hold_previous_frame() {
        // Climb straight up after a level run: the vertical part is degenerate
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(3.0, 2.0, 0.0),
            Vec3::new(3.0, 3.0, 0.0),
        ];
        let set = ControlPointSet::new("kink", points).unwrap();
        let sampler = PathSampler::new(CurveEvaluator::new(&set), 0.25);
        let samples = sampler.samples(Vec3::UP);

        let first_held = samples.iter().position(|s| s.held).unwrap();
        assert!(first_held > 0);
        let before = samples[first_held - 1].frame;
        assert_eq!(samples[first_held].frame, before);
        assert!(samples.iter().all(|s| s.frame.is_finite()));
    }

    #[test]
    fn zero_up_falls_back_everywhere() {
        let set = ControlPointSet::classic();
        let sampler = PathSampler::new(CurveEvaluator::new(&set), 1.0);
        let samples = sampler.samples(Vec3::ZERO);
        assert_eq!(samples.len(), 15);
        assert!(samples.iter().all(|s| s.held && s.frame == FALLBACK_FRAME));
    }

    #[test]
    fn tiny_step_is_clamped_to_minimum() {
        let set = ControlPointSet::classic();
        for step in [1e-30, 0.0, -1.0, f32::NAN] {
            let sampler = PathSampler::new(CurveEvaluator::new(&set), step);
            assert_eq!(sampler.step(), MIN_STEP);
        }
        let sampler = PathSampler::new(CurveEvaluator::new(&set), 1e-30);
        let count = sampler.parameters().count();
        assert!(count > 100_000 && count <= 150_001, "{count}");
    }

    #[test]
    fn frame_at_rejects_out_of_domain() {
        let set = ControlPointSet::classic();
        let sampler = PathSampler::new(CurveEvaluator::new(&set), 0.01);
        assert!(sampler.frame_at(2.0, Vec3::UP).is_err());
        assert!(sampler.frame_at(5.0, Vec3::UP).is_ok());
    }
}
