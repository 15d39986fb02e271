use crate::{Dirty, Display, OrbitCamera, Viewport};

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::collections::HashMap;

pub type Asset = String;

/// What the frame renderer puts on screen.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, SmartDefault)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Interactive orbit view of the probe.
    #[default]
    Probe,
    /// Flat preview of the vertical-cross atlas.
    Cross,
}

/// # Dirty Flags
///
/// For pragmatic reasons, the scene structure maintains dirty flags relative
/// to a particular device instance's internal state. As a consequence care
/// must be taken when using the same scene instance on multiple devices
/// simultaneously.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProbeScene {
    /// Name of the raw HDR asset to display, if any.
    pub probe: Dirty<Option<Asset>>,
    pub camera: Dirty<OrbitCamera>,
    pub viewport: Dirty<Viewport>,
    pub display: Dirty<Display>,
    pub mode: Dirty<ViewMode>,

    #[serde(skip)]
    pub assets: HashMap<Asset, Vec<u8>>,
}

impl ProbeScene {
    /// Marks the entire contents of this scene as dirty.
    ///
    /// This forces a complete device update on the next pass and should be
    /// used sparingly, e.g. after a context restore.
    pub fn dirty_all_fields(&mut self) {
        Dirty::dirty(&mut self.probe);
        Dirty::dirty(&mut self.camera);
        Dirty::dirty(&mut self.viewport);
        Dirty::dirty(&mut self.display);
        Dirty::dirty(&mut self.mode);
    }

    /// Patches this scene to be equal to another scene.
    ///
    /// Fields which are identical between the two scenes are left alone, so
    /// the method dirties as little state as it can.
    pub fn patch_from_other(&mut self, other: Self) {
        if self.probe != other.probe {
            self.probe = other.probe;
        }

        if self.camera != other.camera {
            self.camera = other.camera;
        }

        if self.viewport != other.viewport {
            self.viewport = other.viewport;
        }

        if self.display != other.display {
            self.display = other.display;
        }

        if self.mode != other.mode {
            self.mode = other.mode;
        }
    }
}
