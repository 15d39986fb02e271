use crate::{Device, Dirty, ProbeScene, ViewMode};
use js_sys::{Array, Error};
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;
use web_sys::{WebGl2RenderingContext, WebGlFramebuffer, WebGlTexture};

/// WASM binding for a probe scene.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct WebProbeView {
    scene: ProbeScene,
}

#[wasm_bindgen]
impl WebProbeView {
    /// Creates a new empty probe view.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebProbeView {
        Self::default()
    }

    pub fn json(&self) -> Result<JsValue, JsValue> {
        as_json(&self.scene)
    }

    /// Reconfigures the view using the provided scene JSON data.
    ///
    /// This method will attempt to dirty the least amount of scene data
    /// possible, so it won't necessarily always dirty the entire scene.
    pub fn set_json(&mut self, json: &JsValue) -> Result<(), JsValue> {
        self.scene.patch_from_other(from_json(json)?);

        Ok(())
    }

    /// Returns the list of all assets in the view as a JS string array.
    pub fn assets(&self) -> Array {
        self.scene.assets.keys().map(JsValue::from).collect()
    }

    pub fn insert_asset(&mut self, name: &str, data: &[u8]) {
        self.scene.assets.insert(name.to_owned(), data.to_vec());
    }

    pub fn remove_asset(&mut self, name: &str) {
        self.scene.assets.remove(name);
    }

    /// Selects the probe asset to display.
    ///
    /// The asset bytes must already be inserted; decoding happens on the
    /// next device update and its error, if any, surfaces there.
    pub fn set_probe(&mut self, name: &str) {
        *self.scene.probe = Some(name.to_owned());
    }

    pub fn clear_probe(&mut self) {
        *self.scene.probe = None;
    }

    /// Composes a pointer drag onto the camera orientation.
    ///
    /// Deltas are in CSS pixels with +x right and +y down, relative to the
    /// previous pointer position; absolute tracking stays host-side.
    pub fn drag_delta(&mut self, dx: f32, dy: f32) {
        self.scene.camera.drag(dx, dy);
    }

    /// Propagates a drawable size change; repeated identical sizes are
    /// idempotent and schedule no device work.
    pub fn resize(&mut self, width: u32, height: u32) {
        Dirty::modify(&mut self.scene.viewport, |viewport| {
            viewport.width = width.max(1);
            viewport.height = height.max(1);
        });
    }

    pub fn set_view_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = match mode {
            "probe" => ViewMode::Probe,
            "cross" => ViewMode::Cross,
            _ => return Err(Error::new("no such view mode").into()),
        };

        Dirty::modify(&mut self.scene.mode, |value| *value = mode);

        Ok(())
    }

    pub fn set_exposure(&mut self, stops: f32) {
        Dirty::modify(&mut self.scene.display, |display| display.exposure = stops);
    }

    pub fn set_background(&mut self, r: f32, g: f32, b: f32) {
        Dirty::modify(&mut self.scene.display, |display| {
            display.background = [r, g, b];
        });
    }
}

fn as_json<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(JsValue::from_serde(value).map_err(|e| Error::new(&e.to_string()))?)
}

fn from_json<T: DeserializeOwned>(json: &JsValue) -> Result<T, JsValue> {
    Ok(json.into_serde().map_err(|e| Error::new(&e.to_string()))?)
}

/// WASM binding for a device.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WebDevice {
    device: Device,
}

#[wasm_bindgen]
impl WebDevice {
    /// Creates a device bound to a host framebuffer (`None` = the canvas).
    #[wasm_bindgen(constructor)]
    pub fn new(
        context: &WebGl2RenderingContext,
        framebuffer: Option<WebGlFramebuffer>,
    ) -> Result<WebDevice, JsValue> {
        Ok(Self {
            device: Device::new(context, framebuffer)?,
        })
    }

    /// Updates the device with a view, returning true if an update occurred.
    pub fn update(&mut self, view: &mut WebProbeView) -> Result<bool, JsValue> {
        Ok(self.device.update(&mut view.scene)?)
    }

    /// Renders one frame into the host framebuffer.
    pub fn draw(&mut self) -> Result<(), JsValue> {
        Ok(self.device.draw()?)
    }

    /// Indicates to the device that its WebGL context has been lost.
    pub fn context_lost(&mut self) {
        self.device.context_lost();
    }

    /// Read-only handle to the cross atlas texture, if a probe is ready.
    pub fn cross_texture(&self) -> Option<WebGlTexture> {
        self.device.cross_texture()
    }

    pub fn cross_width(&self) -> u32 {
        self.device.cross_width() as u32
    }

    pub fn cross_height(&self) -> u32 {
        self.device.cross_height() as u32
    }

    /// The cross atlas as a Radiance HDR byte stream, for the host to save.
    pub fn export_cross_hdr(&self) -> Result<Vec<u8>, JsValue> {
        Ok(self.device.export_cross_hdr()?)
    }
}

/// Returns a version string for the WASM module.
#[wasm_bindgen]
pub fn version() -> String {
    concat!("Parhelion v", env!("CARGO_PKG_VERSION"), " (WebGL2)").to_owned()
}

/// Configures browser logging functionality.
///
/// This function is safe to call more than once and will do nothing should it
/// be called more than once; this lets it co-exist nicely with hot reloaders.
#[wasm_bindgen]
pub fn initialize_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init();
}
