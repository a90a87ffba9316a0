//! Fixed perspective camera looking down -Z at the particle cloud

use glimmer_core::{mat4_mul, Vec3};

/// A static perspective camera.
///
/// Only the aspect ratio changes at runtime (on window resize); particle
/// positions are resolution independent.
#[derive(Debug, Clone, PartialEq)]
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

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the aspect ratio from a viewport size; zero heights are ignored
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Get the view matrix (4x4, column-major)
    pub fn view_matrix(&self) -> [[f32; 4]; 4] {
        let f = (self.target - self.position).normalized();
        let s = f.cross(&self.up).normalized();
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

    /// Perspective projection (4x4, column-major), depth mapped to [0, 1]
    pub fn projection_matrix(&self) -> [[f32; 4]; 4] {
        let f = 1.0 / (self.fov.to_radians() / 2.0).tan();
        let depth = self.near - self.far;

        [
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, self.far / depth, -1.0],
            [0.0, 0.0, self.near * self.far / depth, 0.0],
        ]
    }

    /// Get combined view-projection matrix
    pub fn view_projection_matrix(&self) -> [[f32; 4]; 4] {
        mat4_mul(&self.projection_matrix(), &self.view_matrix())
    }

    /// Camera right vector (world space), for billboarding sprites
    pub fn right_vector(&self) -> [f32; 3] {
        let f = (self.target - self.position).normalized();
        f.cross(&self.up).normalized().to_array()
    }

    /// Camera up vector (world space, perpendicular to forward and right)
    pub fn up_vector(&self) -> [f32; 3] {
        let f = (self.target - self.position).normalized();
        let s = f.cross(&self.up).normalized();
        s.cross(&f).to_array()
    }
}
