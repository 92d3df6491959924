//! Whole-track sweep used by `coaster check`.

use crate::ride::Ride;
use coaster_core::frame::build_frame;
use coaster_core::tilt::curvature;
use serde::Serialize;

/// A value together with the parameter where it occurs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremum {
    pub value: f32,
    pub u: f32,
}

/// Summary of one sweep over the path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackReport {
    pub track: String,
    pub domain_start: f32,
    pub domain_end: f32,
    pub samples: usize,
    pub max_height: f32,
    pub work_total: f32,
    pub min_speed: Extremum,
    pub max_speed: Extremum,
    pub max_abs_curvature: Extremum,
    /// Parameters where the frame against vertical up is degenerate
    pub degenerate: Vec<f32>,
    /// Parameters where the speed radicand goes negative
    pub negative_radicand: Vec<f32>,
    /// Parameters with any non-finite position, derivative or frame
    pub non_finite: Vec<f32>,
}

impl TrackReport {
    /// Sweep the ride's path at its sample step.
    pub fn sweep(ride: &Ride) -> Self {
        let sampler = ride.sampler();
        let curve = ride.curve();
        let speed_model = ride.speed_model();
        let domain = sampler.domain();
        let up = ride.tilt_solver().reference_up();

        let start = Extremum {
            value: 0.0,
            u: domain.start,
        };
        let mut report = TrackReport {
            track: ride.points().name().to_string(),
            domain_start: domain.start,
            domain_end: domain.end,
            samples: 0,
            max_height: ride.points().max_height(),
            work_total: speed_model.work_total(),
            min_speed: Extremum {
                value: f32::INFINITY,
                ..start
            },
            max_speed: Extremum {
                value: f32::NEG_INFINITY,
                ..start
            },
            max_abs_curvature: start,
            degenerate: Vec::new(),
            negative_radicand: Vec::new(),
            non_finite: Vec::new(),
        };

        for u in sampler.parameters() {
            report.samples += 1;
            let sample = curve.sample(u);

            let frame = build_frame(sample.velocity, up);
            match &frame {
                Ok(f) if !f.is_finite() => report.non_finite.push(u),
                Ok(_) => {}
                Err(_) => report.degenerate.push(u),
            }
            if !(sample.position.is_finite()
                && sample.velocity.is_finite()
                && sample.acceleration.is_finite())
            {
                report.non_finite.push(u);
                continue;
            }

            let y = sample.position.y;
            if speed_model.radicand(y) < 0.0 {
                report.negative_radicand.push(u);
            }
            let speed = speed_model.speed_at(y);
            if speed < report.min_speed.value {
                report.min_speed = Extremum { value: speed, u };
            }
            if speed > report.max_speed.value {
                report.max_speed = Extremum { value: speed, u };
            }
            let k = curvature(sample.velocity, sample.acceleration).abs();
            if k > report.max_abs_curvature.value {
                report.max_abs_curvature = Extremum { value: k, u };
            }
        }

        tracing::debug!(
            samples = report.samples,
            degenerate = report.degenerate.len(),
            "track sweep finished"
        );
        report
    }

    pub fn is_healthy(&self) -> bool {
        self.degenerate.is_empty() && self.negative_radicand.is_empty() && self.non_finite.is_empty()
    }

    /// Human-readable multi-line summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Track: {}", self.track),
            format!(
                "Domain: [{}, {}) with {} samples",
                self.domain_start, self.domain_end, self.samples
            ),
            format!("Max height: {:.3}", self.max_height),
            format!("Work total: {:.3}", self.work_total),
            format!(
                "Min speed: {:.3} at u = {:.2}",
                self.min_speed.value, self.min_speed.u
            ),
            format!(
                "Max speed: {:.3} at u = {:.2}",
                self.max_speed.value, self.max_speed.u
            ),
            format!(
                "Max |curvature|: {:.4} at u = {:.2}",
                self.max_abs_curvature.value, self.max_abs_curvature.u
            ),
        ];
        for (label, list) in [
            ("Degenerate frames", &self.degenerate),
            ("Negative radicand", &self.negative_radicand),
            ("Non-finite samples", &self.non_finite),
        ] {
            if list.is_empty() {
                lines.push(format!("{label}: none"));
            } else {
                let first: Vec<String> = list.iter().take(5).map(|u| format!("{u:.2}")).collect();
                lines.push(format!(
                    "{label}: {} (first at u = {})",
                    list.len(),
                    first.join(", ")
                ));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coaster_core::{ControlPointSet, RideConfig, Vec3};

    #[test]
    fn classic_loop_is_healthy() {
        let report = TrackReport::sweep(&Ride::classic(RideConfig::default()));
        assert!(report.is_healthy(), "{}", report.summary());
        assert_eq!(report.max_height, 37.0);
        assert_eq!(report.domain_start, 3.0);
        assert_eq!(report.domain_end, 18.0);
        assert!(report.min_speed.value >= 6.0f32.sqrt() - 1e-3);
        assert!(report.max_speed.value > report.min_speed.value);
        assert!(report.max_abs_curvature.value > 0.0);
    }

    #[test]
    fn vertical_climb_is_flagged() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
        ];
        let ride = Ride::new(
            ControlPointSet::new("tower", points).unwrap(),
            RideConfig::default(),
        );
        let report = TrackReport::sweep(&ride);
        assert!(!report.is_healthy());
        assert_eq!(report.degenerate.len(), report.samples);
        assert!(report.summary().contains("Degenerate frames: "));
    }
}
