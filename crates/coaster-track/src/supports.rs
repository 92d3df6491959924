//! Support columns from the rail down below the ground, one per control point.

use crate::geometry::{Strip, StripKind};
use crate::sampler::PathSampler;
use coaster_core::{Color, Vec3};

/// Column half-thickness relative to the unit frame vectors
pub const SUPPORT_SCALE: f32 = 0.25;

/// One 8-vertex strip per integer parameter in the domain.
///
/// Each strip wraps three sides of a column whose top corners surround the
/// rail point and whose bottom corners sit at `floor`. Parameters where the
/// frame is degenerate get no column.
pub fn build_supports(
    sampler: &PathSampler<'_>,
    world_up: Vec3,
    floor: f32,
    color: Color,
) -> Vec<Strip> {
    let domain = sampler.domain();
    let columns = domain.start.ceil() as usize..domain.end.ceil() as usize;
    let mut strips = Vec::with_capacity(columns.len());

    for i in columns {
        let u = i as f32;
        let (sample, frame) = match sampler.frame_at(u, world_up) {
            Ok(found) => found,
            Err(err) => {
                tracing::debug!(u, %err, "skipping support column");
                continue;
            }
        };

        let n = frame.tangent_normal * SUPPORT_SCALE;
        let w = frame.lateral * SUPPORT_SCALE;
        let q = sample.position;

        let mut strip = Strip::with_capacity(StripKind::Support, color, 4);
        for offset in [-n + w, n + w, n - w, -n - w] {
            let top = q + offset;
            let bottom = Vec3::new(top.x, floor + offset.y, top.z);
            strip.push_pair(top, bottom);
        }
        strips.push(strip);
    }
    strips
}
