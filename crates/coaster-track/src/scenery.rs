//! Static backdrop: ground plane, sky cylinder and ceiling.

use crate::geometry::{Strip, StripKind};
use coaster_core::config::ColorConfig;
use coaster_core::{Color, Vec3};
use std::f32::consts::TAU;

pub const SCENE_HALF_SIZE: f32 = 100.0;
pub const SKY_RADIUS: f32 = 100.0;
pub const SKY_HEIGHT: f32 = 200.0;
pub const SKY_BASE: f32 = -1.5;
pub const SKY_SLICES: usize = 200;
pub const CEILING_HEIGHT: f32 = 100.0;

/// Horizontal square at height `y`, as a two-pair strip.
pub fn horizontal_square(kind: StripKind, y: f32, half_size: f32, color: Color) -> Strip {
    let h = half_size;
    let mut strip = Strip::with_capacity(kind, color, 2);
    strip.push_pair(Vec3::new(h, y, -h), Vec3::new(h, y, h));
    strip.push_pair(Vec3::new(-h, y, -h), Vec3::new(-h, y, h));
    strip
}

/// Open vertical cylinder around the y axis, one quad per slice.
pub fn cylinder(
    kind: StripKind,
    radius: f32,
    base: f32,
    height: f32,
    slices: usize,
    color: Color,
) -> Strip {
    let mut strip = Strip::with_capacity(kind, color, slices + 1);
    for i in 0..=slices {
        let angle = TAU * i as f32 / slices as f32;
        let x = radius * angle.cos();
        let z = -radius * angle.sin();
        strip.push_pair(Vec3::new(x, base, z), Vec3::new(x, base + height, z));
    }
    strip
}

/// Ground, sky and ceiling in draw order.
pub fn build_scenery(colors: &ColorConfig) -> Vec<Strip> {
    vec![
        horizontal_square(StripKind::Ground, 0.0, SCENE_HALF_SIZE, colors.ground),
        cylinder(
            StripKind::Sky,
            SKY_RADIUS,
            SKY_BASE,
            SKY_HEIGHT,
            SKY_SLICES,
            colors.sky,
        ),
        horizontal_square(
            StripKind::Ceiling,
            CEILING_HEIGHT,
            SCENE_HALF_SIZE,
            colors.ceiling,
        ),
    ]
}
