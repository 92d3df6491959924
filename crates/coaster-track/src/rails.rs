//! Rail cross-sections swept along the sampled path.
//!
//! Each rail is a box around an offset center, emitted as four separate quad
//! strips (one per face). With `v` the frame's vertical and `w` its lateral
//! vector, both scaled to half-extents, the faces are:
//!
//! ```text
//!   Top          (c + v + w, c + v - w)
//!   NegLateral   (c + v - w, c - v - w)
//!   Bottom       (c - v - w, c - v + w)
//!   PosLateral   (c - v + w, c + v + w)
//! ```

use crate::geometry::{Strip, StripKind};
use crate::sampler::FrameSample;
use coaster_core::config::{ColorConfig, TrackConfig};
use coaster_core::Color;

/// Half-extent of the main rail relative to the unit frame vectors
pub const MAIN_RAIL_SCALE: f32 = 0.5;

/// Half-extent of each secondary rail
pub const SIDE_RAIL_SCALE: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailFace {
    NegLateral,
    Bottom,
    PosLateral,
    Top,
}

impl RailFace {
    pub const ALL: [RailFace; 4] = [
        RailFace::NegLateral,
        RailFace::Bottom,
        RailFace::PosLateral,
        RailFace::Top,
    ];

    /// Corner signs `(vertical, lateral)` of the two edges bounding the face
    fn corners(self) -> [(f32, f32); 2] {
        match self {
            RailFace::NegLateral => [(1.0, -1.0), (-1.0, -1.0)],
            RailFace::Bottom => [(-1.0, -1.0), (-1.0, 1.0)],
            RailFace::PosLateral => [(-1.0, 1.0), (1.0, 1.0)],
            RailFace::Top => [(1.0, 1.0), (1.0, -1.0)],
        }
    }
}

/// Everything that distinguishes one rail strip from another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailStripParams {
    pub kind: StripKind,
    /// Center offset along the frame's lateral vector
    pub lateral_offset: f32,
    /// Center offset along the frame's vertical vector
    pub vertical_offset: f32,
    /// Half-extent in both cross-section directions
    pub scale: f32,
    pub face: RailFace,
    pub color: Color,
}

/// Sweep one face of one rail along `samples`.
pub fn emit_rail_strip(samples: &[FrameSample], params: &RailStripParams) -> Strip {
    let mut strip = Strip::with_capacity(params.kind, params.color, samples.len());
    let [a, b] = params.face.corners();

    for s in samples {
        let v = s.frame.vertical;
        let w = s.frame.lateral;
        let center = s.position + v * params.vertical_offset + w * params.lateral_offset;
        let hv = v * params.scale;
        let hw = w * params.scale;
        strip.push_pair(center + hv * a.0 + hw * a.1, center + hv * b.0 + hw * b.1);
    }
    strip
}

/// The main rail plus two secondary rails, four faces each.
///
/// Secondary rails sit `rail_shift_up` main half-heights above and
/// `rail_shift_right` main half-widths to either side of the main rail.
pub fn rail_layout(track: &TrackConfig, colors: &ColorConfig) -> Vec<RailStripParams> {
    let up = track.rail_shift_up * MAIN_RAIL_SCALE;
    let side = track.rail_shift_right * MAIN_RAIL_SCALE;
    let rails = [
        (StripKind::MainRail, 0.0, 0.0, MAIN_RAIL_SCALE, colors.main_rail),
        (StripKind::SideRail, -side, up, SIDE_RAIL_SCALE, colors.side_rail),
        (StripKind::SideRail, side, up, SIDE_RAIL_SCALE, colors.side_rail),
    ];

    rails
        .into_iter()
        .flat_map(|(kind, lateral_offset, vertical_offset, scale, color)| {
            RailFace::ALL.into_iter().map(move |face| RailStripParams {
                kind,
                lateral_offset,
                vertical_offset,
                scale,
                face,
                color,
            })
        })
        .collect()
}

/// Emit every strip of the layout from one set of samples.
pub fn build_rails(samples: &[FrameSample], layout: &[RailStripParams]) -> Vec<Strip> {
    layout
        .iter()
        .map(|params| emit_rail_strip(samples, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::FALLBACK_FRAME;
    use coaster_core::Vec3;

    const TOL: f32 = 1e-5;

    fn level_sample(x: f32) -> FrameSample {
        // Travelling +x with +y up: lateral = +z, vertical = +y
        let frame = coaster_core::build_frame(Vec3::RIGHT, Vec3::UP).unwrap();
        FrameSample {
            u: 3.0,
            position: Vec3::new(x, 10.0, 0.0),
            velocity: Vec3::RIGHT,
            frame,
            held: false,
        }
    }

    fn main_params(face: RailFace) -> RailStripParams {
        RailStripParams {
            kind: StripKind::MainRail,
            lateral_offset: 0.0,
            vertical_offset: 0.0,
            scale: MAIN_RAIL_SCALE,
            face,
            color: Color::WHITE,
        }
    }

    #[test]
    fn layout_has_twelve_strips_in_two_colors() {
        let colors = ColorConfig::default();
        let layout = rail_layout(&TrackConfig::default(), &colors);
        assert_eq!(layout.len(), 12);
        assert_eq!(
            layout.iter().filter(|p| p.kind == StripKind::MainRail).count(),
            4
        );
        assert!(layout
            .iter()
            .all(|p| (p.kind == StripKind::MainRail) == (p.color == colors.main_rail)));
        assert!(layout
            .iter()
            .filter(|p| p.kind == StripKind::SideRail)
            .all(|p| p.color == colors.side_rail && p.scale == SIDE_RAIL_SCALE));
    }

    #[test]
    fn secondary_rails_sit_up_and_to_either_side() {
        let layout = rail_layout(&TrackConfig::default(), &ColorConfig::default());
        let offsets: Vec<(f32, f32)> = layout
            .iter()
            .filter(|p| p.kind == StripKind::SideRail)
            .map(|p| (p.lateral_offset, p.vertical_offset))
            .collect();
        assert!(offsets.contains(&(-1.0, 1.0)));
        assert!(offsets.contains(&(1.0, 1.0)));
    }

    #[test]
    fn top_face_of_main_rail() {
        let samples = [level_sample(0.0), level_sample(1.0)];
        let strip = emit_rail_strip(&samples, &main_params(RailFace::Top));
        assert_eq!(strip.vertices.len(), 4);
        assert!(strip.vertices[0].max_abs_diff(&Vec3::new(0.0, 10.5, 0.5)) < TOL);
        assert!(strip.vertices[1].max_abs_diff(&Vec3::new(0.0, 10.5, -0.5)) < TOL);
        assert!(strip.vertices[2].max_abs_diff(&Vec3::new(1.0, 10.5, 0.5)) < TOL);
    }

    #[test]
    fn faces_close_the_cross_section() {
        let samples = [level_sample(0.0)];
        let strips: Vec<Strip> = RailFace::ALL
            .iter()
            .map(|face| emit_rail_strip(&samples, &main_params(*face)))
            .collect();
        // The second edge of each face is the first edge of the next
        for i in 0..4 {
            let end = strips[i].vertices[1];
            let start = strips[(i + 1) % 4].vertices[0];
            assert!(end.max_abs_diff(&start) < TOL);
        }
    }

    #[test]
    fn secondary_rail_center_is_offset() {
        let layout = rail_layout(&TrackConfig::default(), &ColorConfig::default());
        let params = layout
            .iter()
            .find(|p| p.kind == StripKind::SideRail && p.lateral_offset > 0.0 && p.face == RailFace::Top)
            .unwrap();
        let strip = emit_rail_strip(&[level_sample(0.0)], params);
        // center (0, 11, 1), half-extent 0.25
        assert!(strip.vertices[0].max_abs_diff(&Vec3::new(0.0, 11.25, 1.25)) < TOL);
        assert!(strip.vertices[1].max_abs_diff(&Vec3::new(0.0, 11.25, 0.75)) < TOL);
    }

    #[test]
    fn held_frames_still_emit_vertices() {
        let sample = FrameSample {
            frame: FALLBACK_FRAME,
            held: true,
            ..level_sample(2.0)
        };
        let strip = emit_rail_strip(&[sample], &main_params(RailFace::Bottom));
        assert!(strip.vertices.iter().all(|v| v.is_finite()));
    }
}
