//! Flat-colored quad strips handed to the renderer and exporters.

use coaster_core::{Color, Vec3};
use serde::Serialize;

/// What a strip represents in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StripKind {
    MainRail,
    SideRail,
    Support,
    Ground,
    Sky,
    Ceiling,
}

impl StripKind {
    pub fn label(self) -> &'static str {
        match self {
            StripKind::MainRail => "main_rail",
            StripKind::SideRail => "side_rail",
            StripKind::Support => "support",
            StripKind::Ground => "ground",
            StripKind::Sky => "sky",
            StripKind::Ceiling => "ceiling",
        }
    }
}

/// A quad strip with one flat color.
///
/// Vertices come in pairs; every two consecutive pairs span one quad, so the
/// sequence is also a valid triangle strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strip {
    pub kind: StripKind,
    pub color: Color,
    pub vertices: Vec<Vec3>,
}

impl Strip {
    pub fn new(kind: StripKind, color: Color) -> Self {
        Self {
            kind,
            color,
            vertices: Vec::new(),
        }
    }

    pub fn with_capacity(kind: StripKind, color: Color, pairs: usize) -> Self {
        Self {
            kind,
            color,
            vertices: Vec::with_capacity(pairs * 2),
        }
    }

    pub fn push_pair(&mut self, a: Vec3, b: Vec3) {
        self.vertices.push(a);
        self.vertices.push(b);
    }

    pub fn quad_count(&self) -> usize {
        (self.vertices.len() / 2).saturating_sub(1)
    }

    /// Triangle indices into `vertices`, two per quad, consistently wound.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (0..self.quad_count()).flat_map(|q| {
            let a = 2 * q;
            [[a, a + 1, a + 3], [a, a + 3, a + 2]]
        })
    }
}

/// Everything drawn in one frame, in draw order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneGeometry {
    pub strips: Vec<Strip>,
}

impl SceneGeometry {
    pub fn vertex_count(&self) -> usize {
        self.strips.iter().map(|s| s.vertices.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.strips.iter().map(|s| s.quad_count() * 2).sum()
    }

    pub fn strips_of(&self, kind: StripKind) -> impl Iterator<Item = &Strip> {
        self.strips.iter().filter(move |s| s.kind == kind)
    }
}
