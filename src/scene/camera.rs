use cgmath::prelude::*;
use cgmath::{Deg, Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Orientation change per pointer-drag pixel, in degrees.
pub const DRAG_DEGREES_PER_PIXEL: f32 = 0.25;

/// Pitch never reaches the poles, avoiding a degenerate view basis.
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Orbit camera for the probe view, derived entirely from drag input.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, SmartDefault)]
#[serde(default)]
pub struct OrbitCamera {
    /// Heading in degrees, always within [0, 360).
    #[default(0.0)]
    pub yaw: f32,

    /// Elevation in degrees, always within the pitch limit.
    #[default(0.0)]
    pub pitch: f32,

    /// Vertical field of view in degrees.
    #[default(65.0)]
    pub field_of_view: f32,
}

impl OrbitCamera {
    /// Composes a pointer drag onto the current orientation.
    ///
    /// Deltas are in pixels with +x right and +y down, so dragging up tilts
    /// the view up. Yaw wraps around; pitch saturates at the limit.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw = (self.yaw + dx * DRAG_DEGREES_PER_PIXEL).rem_euclid(360.0);

        self.pitch = (self.pitch - dy * DRAG_DEGREES_PER_PIXEL)
            .max(-PITCH_LIMIT_DEGREES)
            .min(PITCH_LIMIT_DEGREES);
    }

    /// The view direction for the current orientation.
    pub fn direction(&self) -> Vector3<f32> {
        let yaw = Deg(self.yaw);
        let pitch = Deg(self.pitch);

        Vector3::new(
            pitch.cos() * yaw.sin(),
            pitch.sin(),
            -pitch.cos() * yaw.cos(),
        )
    }

    /// The world-to-view transform; the camera sits at the origin.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Transform::look_at(
            Point3::origin(),
            Point3::origin() + self.direction(),
            Vector3::unit_y(),
        )
    }
}
