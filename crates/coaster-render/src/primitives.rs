//! GPU vertex layout and strip flattening

use bytemuck::{Pod, Zeroable};
use coaster_core::Color;
use coaster_track::SceneGeometry;
use std::ops::Range;

/// A vertex with position and flat color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x4,
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Scene strips packed into one vertex list, one draw range per strip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StripBatch {
    pub vertices: Vec<Vertex>,
    pub ranges: Vec<Range<u32>>,
}

impl StripBatch {
    /// Flatten `scene`, converting colors for an sRGB target when `srgb`.
    pub fn from_scene(scene: &SceneGeometry, srgb: bool) -> Self {
        let mut batch = StripBatch {
            vertices: Vec::with_capacity(scene.vertex_count()),
            ranges: Vec::with_capacity(scene.strips.len()),
        };
        for strip in &scene.strips {
            // Strips with fewer than one quad draw nothing
            if strip.quad_count() == 0 {
                continue;
            }
            let color = surface_color(strip.color, srgb);
            let start = batch.vertices.len() as u32;
            batch.vertices.extend(strip.vertices.iter().map(|v| Vertex {
                position: v.to_array(),
                color,
            }));
            batch.ranges.push(start..batch.vertices.len() as u32);
        }
        batch
    }

    pub fn byte_len(&self) -> u64 {
        std::mem::size_of_val(self.vertices.as_slice()) as u64
    }
}

/// Decode an sRGB-encoded channel to linear
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Colors are authored in display (sRGB) space; an sRGB surface re-encodes
/// on write, so they are decoded first.
pub fn surface_color(color: Color, srgb: bool) -> [f32; 4] {
    if srgb {
        [
            srgb_to_linear(color.r),
            srgb_to_linear(color.g),
            srgb_to_linear(color.b),
            color.a,
        ]
    } else {
        color.to_array()
    }
}
