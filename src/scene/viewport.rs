use cgmath::{perspective, Deg, Matrix4};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Current drawable size in physical pixels.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, SmartDefault)]
#[serde(default)]
pub struct Viewport {
    #[default(960)]
    pub width: u32,

    #[default(540)]
    pub height: u32,
}

impl Viewport {
    pub fn aspect_ratio(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Aspect-correct perspective projection for this drawable size.
    pub fn projection(&self, field_of_view: f32) -> Matrix4<f32> {
        perspective(Deg(field_of_view), self.aspect_ratio(), 0.1, 100.0)
    }
}
