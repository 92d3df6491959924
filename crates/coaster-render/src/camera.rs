//! Perspective camera driven by ride camera placements

use coaster_core::config::CameraConfig;
use coaster_core::Vec3;
use coaster_track::CameraPlacement;

/// Column-major 4x4 matrix, `m[col][row]`
pub type Mat4 = [[f32; 4]; 4];

pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// A look-at camera with a perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Width / height
    pub aspect: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, config.orbit_height, config.orbit_radius),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov: config.fov,
            near: config.near,
            far: config.far,
            aspect,
        }
    }

    pub fn look_at(&mut self, placement: &CameraPlacement) {
        self.position = placement.eye;
        self.target = placement.target;
        self.up = placement.up;
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Right-handed view matrix.
    ///
    /// Falls back to identity when eye and target coincide, and to a
    /// substitute up vector when `up` is parallel to the view direction.
    pub fn view_matrix(&self) -> Mat4 {
        let Some(f) = (self.target - self.position).try_normalized(1e-6) else {
            return IDENTITY;
        };
        let s = f
            .cross(&self.up)
            .try_normalized(1e-6)
            .or_else(|| f.cross(&Vec3::FORWARD).try_normalized(1e-6))
            .or_else(|| f.cross(&Vec3::RIGHT).try_normalized(1e-6))
            .unwrap_or(Vec3::RIGHT);
        let u = s.cross(&f);

        [
            [s.x, u.x, -f.x, 0.0],
            [s.y, u.y, -f.y, 0.0],
            [s.z, u.z, -f.z, 0.0],
            [
                -s.dot(&self.position),
                -u.dot(&self.position),
                f.dot(&self.position),
                1.0,
            ],
        ]
    }

    /// Perspective projection mapping view depth `[-near, -far]` to `[0, 1]`.
    pub fn projection_matrix(&self) -> Mat4 {
        let f = 1.0 / (self.fov.to_radians() / 2.0).tan();
        let range = self.far / (self.near - self.far);

        [
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, range, -1.0],
            [0.0, 0.0, range * self.near, 0.0],
        ]
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        mat4_mul(&self.projection_matrix(), &self.view_matrix())
    }
}

/// `a * b` for column-major matrices
pub fn mat4_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];
    for (col, out) in result.iter_mut().enumerate() {
        for (row, cell) in out.iter_mut().enumerate() {
            *cell = (0..4).map(|k| a[k][row] * b[col][k]).sum();
        }
    }
    result
}

/// Transform a point and divide by w
pub fn project_point(m: &Mat4, p: Vec3) -> [f32; 3] {
    let v = [p.x, p.y, p.z, 1.0];
    let mut out = [0.0f32; 4];
    for (row, cell) in out.iter_mut().enumerate() {
        *cell = (0..4).map(|k| m[k][row] * v[k]).sum();
    }
    [out[0] / out[3], out[1] / out[3], out[2] / out[3]]
}
