#[allow(unused_imports)]
use log::{debug, info, warn};

use js_sys::{Error, Float32Array};
use web_sys::{WebGl2RenderingContext as Context, WebGlFramebuffer, WebGlTexture};

pub trait AsAttachment {
    fn as_attachment(&self) -> Option<&WebGlTexture>;

    fn attachment_dimensions(&self) -> (usize, usize);
}

#[derive(Debug)]
pub struct Framebuffer {
    gl: Context,
    handle: Option<WebGlFramebuffer>,
    cols: usize,
    rows: usize,
}

impl Framebuffer {
    pub fn new(gl: Context) -> Self {
        Self {
            gl,
            handle: None,
            cols: 0,
            rows: 0,
        }
    }

    pub fn handle(&self) -> Option<&WebGlFramebuffer> {
        self.handle.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.handle = None;
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Recreates the framebuffer around a single color attachment.
    pub fn rebuild(&mut self, attachment: &dyn AsAttachment) -> Result<(), Error> {
        if let Err(_) | Ok(None) = self.gl.get_extension("EXT_color_buffer_float") {
            return Err(Error::new("extension `EXT_color_buffer_float' missing"));
        }

        if let Some(framebuffer_handle) = &self.handle {
            self.gl.delete_framebuffer(Some(framebuffer_handle));
        }

        self.handle = self.gl.create_framebuffer();

        self.gl
            .bind_framebuffer(Context::DRAW_FRAMEBUFFER, self.handle.as_ref());

        self.gl.framebuffer_texture_2d(
            Context::DRAW_FRAMEBUFFER,
            Context::COLOR_ATTACHMENT0,
            Context::TEXTURE_2D,
            attachment.as_attachment(),
            0,
        );

        let (cols, rows) = attachment.attachment_dimensions();

        self.cols = cols;
        self.rows = rows;

        Ok(())
    }

    pub fn clear(&self, color: [f32; 4]) {
        self.gl
            .bind_framebuffer(Context::DRAW_FRAMEBUFFER, self.handle.as_ref());

        self.gl
            .clear_bufferfv_with_f32_array(Context::COLOR, 0, &color);
    }

    /// Reads the color attachment back into host memory as RGBA floats.
    ///
    /// This is a synchronous readback and will stall the pipeline; it is only
    /// meant for one-shot export paths, never for per-frame work.
    pub fn read_into(&self, pixels: &mut [f32]) -> Result<(), Error> {
        assert!(pixels.len() == self.cols * self.rows * 4);

        self.gl
            .bind_framebuffer(Context::READ_FRAMEBUFFER, self.handle.as_ref());

        self.gl.read_buffer(Context::COLOR_ATTACHMENT0);

        let buffer = Float32Array::new_with_length(pixels.len() as u32);

        self.gl
            .read_pixels_with_opt_array_buffer_view(
                0,
                0,
                self.cols as i32,
                self.rows as i32,
                Context::RGBA,
                Context::FLOAT,
                Some(&*buffer),
            )
            .map_err(|_| Error::new("framebuffer readback failed"))?;

        buffer.copy_to(pixels);

        self.gl.bind_framebuffer(Context::READ_FRAMEBUFFER, None);

        Ok(())
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        if let Some(framebuffer_handle) = &self.handle {
            self.gl.delete_framebuffer(Some(framebuffer_handle));
        }
    }
}
