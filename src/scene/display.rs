use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Presentation settings applied when radiance reaches the screen.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, SmartDefault)]
#[serde(default)]
pub struct Display {
    /// Exposure adjustment in stops.
    #[default(0.0)]
    pub exposure: f32,

    /// Clear color, also shown while no probe is loaded.
    #[default([0.015, 0.015, 0.015])]
    pub background: [f32; 3],
}
