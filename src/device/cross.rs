#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::{encode_radiance, Device};
use js_sys::Error;
use web_sys::WebGlTexture;

impl Device {
    /// Renders the six cube faces into the cross atlas in a single pass.
    ///
    /// Each fragment derives its cube direction from its grid cell; the six
    /// unused cells are written as opaque black.
    pub(crate) fn compose_cross(&mut self) -> Result<(), Error> {
        let command = self.compose_shader.begin_draw();

        command.bind(&self.probe_cube, "probe_cube");

        command.set_framebuffer(&self.cross_fbo);
        command.set_viewport(
            0,
            0,
            self.cross_fbo.cols() as i32,
            self.cross_fbo.rows() as i32,
        );

        command.draw_triangles(0, 1);

        debug!(
            "cross atlas composited at {}x{}",
            self.cross_fbo.cols(),
            self.cross_fbo.rows()
        );

        Ok(())
    }

    /// Read-only handle to the cross atlas texture, once a probe is ready.
    ///
    /// The texture stays owned by the device; hosts may sample or copy from
    /// it but must not delete or resize it.
    pub fn cross_texture(&self) -> Option<WebGlTexture> {
        if !self.state.ready {
            return None;
        }

        self.cross_texture.handle().cloned()
    }

    /// Width of the cross atlas in pixels, zero before a probe is ready.
    pub fn cross_width(&self) -> usize {
        if self.state.ready {
            self.cross_texture.cols()
        } else {
            0
        }
    }

    /// Height of the cross atlas in pixels, zero before a probe is ready.
    pub fn cross_height(&self) -> usize {
        if self.state.ready {
            self.cross_texture.rows()
        } else {
            0
        }
    }

    /// Reads the cross atlas back as tightly packed RGBA floats, rows from
    /// the top of the atlas down.
    pub fn read_cross_pixels(&self) -> Result<Vec<f32>, Error> {
        if !self.state.ready {
            return Err(Error::new("no probe is loaded"));
        }

        let mut pixels = vec![0.0f32; self.cross_fbo.cols() * self.cross_fbo.rows() * 4];

        self.cross_fbo.read_into(&mut pixels)?;

        Ok(pixels)
    }

    /// Encodes the cross atlas as a Radiance HDR stream for the host to
    /// persist; the device itself never touches storage.
    pub fn export_cross_hdr(&self) -> Result<Vec<u8>, Error> {
        let pixels = self.read_cross_pixels()?;

        let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);

        for rgba in pixels.chunks_exact(4) {
            rgb.extend_from_slice(&rgba[..3]);
        }

        encode_radiance(self.cross_fbo.cols(), self.cross_fbo.rows(), &rgb)
            .map_err(|err| Error::new(&format!("encode error: {}", err)))
    }
}
