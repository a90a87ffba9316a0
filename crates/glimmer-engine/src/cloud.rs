//! Cosmetic rotation of the whole particle cloud

use glimmer_core::{mat4_mul, rotation_y, rotation_z, CloudConfig};
use serde::Serialize;

/// Orientation of the cloud, a pure function of time since startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CloudTransform {
    /// Spin around the vertical axis, radians
    pub yaw: f32,
    /// Wobble around the depth axis, radians
    pub roll: f32,
}

impl CloudTransform {
    pub fn at(elapsed_ms: f64, config: &CloudConfig) -> Self {
        let yaw = (elapsed_ms * config.spin_rate) % std::f64::consts::TAU;
        let roll = (elapsed_ms * config.wobble_frequency).sin() as f32 * config.wobble_amplitude;
        Self {
            yaw: yaw as f32,
            roll,
        }
    }

    /// Model matrix (column-major): roll applied after yaw
    pub fn to_matrix(&self) -> [[f32; 4]; 4] {
        mat4_mul(&rotation_z(self.roll), &rotation_y(self.yaw))
    }
}
