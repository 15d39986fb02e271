#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::{AsAttachment, AsBindTarget, BindTarget, CubeFace};
use js_sys::{Object, Uint16Array};
use std::marker::PhantomData;
use web_sys::{WebGl2RenderingContext as Context, WebGlTexture};

/// Pixel format of a GPU texture.
///
/// All probe data is kept in RGBA16F: it is filterable and renderable in
/// WebGL2 (the latter through `EXT_color_buffer_float`), which 32-bit float
/// formats are not without further extensions.
pub trait TextureFormat {
    type Data;

    const GL_INTERNAL_FORMAT: u32;
    const GL_FORMAT: u32;
    const GL_TYPE: u32;

    fn into_texture_source_data(cols: usize, rows: usize, data: &[Self::Data]) -> Object;
}

#[derive(Debug)]
pub struct RGBA16F;

impl TextureFormat for RGBA16F {
    type Data = u16;

    const GL_INTERNAL_FORMAT: u32 = Context::RGBA16F;
    const GL_FORMAT: u32 = Context::RGBA;
    const GL_TYPE: u32 = Context::HALF_FLOAT;

    fn into_texture_source_data(cols: usize, rows: usize, data: &[Self::Data]) -> Object {
        assert!(data.len() == cols * rows * 4);

        Uint16Array::from(data).into()
    }
}

#[derive(Debug)]
pub struct Texture<T> {
    gl: Context,

    handle: Option<WebGlTexture>,
    cols: usize,
    rows: usize,
    format: PhantomData<T>,
}

impl<T> Texture<T> {
    pub fn new(gl: Context) -> Self {
        Self {
            gl,
            handle: None,
            cols: 0,
            rows: 0,
            format: PhantomData,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn handle(&self) -> Option<&WebGlTexture> {
        self.handle.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.cols = 0;
        self.rows = 0;
        self.handle = None;
    }

    pub fn is_invalid(&self) -> bool {
        self.handle.is_none()
    }
}

impl<T: TextureFormat> Texture<T> {
    pub fn create(&mut self, cols: usize, rows: usize) {
        assert!(cols > 0 && rows > 0, "invalid texture layout requested");

        if (self.cols, self.rows) == (cols, rows) && self.handle.is_some() {
            return; // texture already created
        }

        if let Some(texture_handle) = &self.handle {
            self.gl.delete_texture(Some(texture_handle));
        }

        self.handle = self.gl.create_texture();
        self.cols = cols;
        self.rows = rows;

        self.gl
            .bind_texture(Context::TEXTURE_2D, self.handle.as_ref());

        self.gl.tex_storage_2d(
            Context::TEXTURE_2D,
            1,
            T::GL_INTERNAL_FORMAT,
            cols as i32,
            rows as i32,
        );

        self.gl.tex_parameteri(
            Context::TEXTURE_2D,
            Context::TEXTURE_MAG_FILTER,
            Context::LINEAR as i32,
        );

        self.gl.tex_parameteri(
            Context::TEXTURE_2D,
            Context::TEXTURE_MIN_FILTER,
            Context::LINEAR as i32,
        );

        // Repeat horizontally so equirectangular data wraps at the seam, but
        // never vertically past the poles.

        self.gl
            .tex_parameteri(Context::TEXTURE_2D, Context::TEXTURE_WRAP_S, Context::REPEAT as i32);

        self.gl.tex_parameteri(
            Context::TEXTURE_2D,
            Context::TEXTURE_WRAP_T,
            Context::CLAMP_TO_EDGE as i32,
        );
    }

    pub fn upload(&mut self, cols: usize, rows: usize, data: &[T::Data]) {
        self.create(cols, rows);

        self.gl
            .bind_texture(Context::TEXTURE_2D, self.handle.as_ref());

        self.gl
            .tex_sub_image_2d_with_i32_and_i32_and_u32_and_type_and_opt_array_buffer_view(
                Context::TEXTURE_2D,
                0,
                0,
                0,
                cols as i32,
                rows as i32,
                T::GL_FORMAT,
                T::GL_TYPE,
                Some(&T::into_texture_source_data(cols, rows, data)),
            )
            .unwrap();
    }
}

impl<T: TextureFormat> AsAttachment for Texture<T> {
    fn as_attachment(&self) -> Option<&WebGlTexture> {
        self.handle.as_ref()
    }

    fn attachment_dimensions(&self) -> (usize, usize) {
        (self.cols(), self.rows())
    }
}

impl<T: TextureFormat> AsBindTarget for Texture<T> {
    fn bind_target(&self) -> BindTarget {
        BindTarget::Texture(self.handle.as_ref())
    }
}

impl<T> Drop for Texture<T> {
    fn drop(&mut self) {
        if let Some(texture_handle) = &self.handle {
            self.gl.delete_texture(Some(texture_handle));
        }
    }
}

/// A cube map texture with six square faces.
#[derive(Debug)]
pub struct CubeMap<T> {
    gl: Context,

    handle: Option<WebGlTexture>,
    size: usize,
    format: PhantomData<T>,
}

impl<T> CubeMap<T> {
    pub fn new(gl: Context) -> Self {
        Self {
            gl,
            handle: None,
            size: 0,
            format: PhantomData,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn invalidate(&mut self) {
        self.size = 0;
        self.handle = None;
    }
}

impl<T: TextureFormat> CubeMap<T> {
    pub fn create(&mut self, size: usize) {
        assert!(size > 0, "invalid cube map layout requested");

        if self.size == size && self.handle.is_some() {
            return; // texture already created
        }

        if let Some(texture_handle) = &self.handle {
            self.gl.delete_texture(Some(texture_handle));
        }

        self.handle = self.gl.create_texture();
        self.size = size;

        self.gl
            .bind_texture(Context::TEXTURE_CUBE_MAP, self.handle.as_ref());

        self.gl.tex_storage_2d(
            Context::TEXTURE_CUBE_MAP,
            1,
            T::GL_INTERNAL_FORMAT,
            size as i32,
            size as i32,
        );

        self.gl.tex_parameteri(
            Context::TEXTURE_CUBE_MAP,
            Context::TEXTURE_MAG_FILTER,
            Context::LINEAR as i32,
        );

        self.gl.tex_parameteri(
            Context::TEXTURE_CUBE_MAP,
            Context::TEXTURE_MIN_FILTER,
            Context::LINEAR as i32,
        );

        self.gl.tex_parameteri(
            Context::TEXTURE_CUBE_MAP,
            Context::TEXTURE_WRAP_S,
            Context::CLAMP_TO_EDGE as i32,
        );

        self.gl.tex_parameteri(
            Context::TEXTURE_CUBE_MAP,
            Context::TEXTURE_WRAP_T,
            Context::CLAMP_TO_EDGE as i32,
        );
    }

    pub fn upload_face(&mut self, face: CubeFace, data: &[T::Data]) {
        assert!(self.handle.is_some(), "cube map must be created first");

        self.gl
            .bind_texture(Context::TEXTURE_CUBE_MAP, self.handle.as_ref());

        self.gl
            .tex_sub_image_2d_with_i32_and_i32_and_u32_and_type_and_opt_array_buffer_view(
                Context::TEXTURE_CUBE_MAP_POSITIVE_X + face.index() as u32,
                0,
                0,
                0,
                self.size as i32,
                self.size as i32,
                T::GL_FORMAT,
                T::GL_TYPE,
                Some(&T::into_texture_source_data(self.size, self.size, data)),
            )
            .unwrap();
    }
}

impl<T: TextureFormat> AsBindTarget for CubeMap<T> {
    fn bind_target(&self) -> BindTarget {
        BindTarget::CubeMap(self.handle.as_ref())
    }
}

impl<T> Drop for CubeMap<T> {
    fn drop(&mut self) {
        if let Some(texture_handle) = &self.handle {
            self.gl.delete_texture(Some(texture_handle));
        }
    }
}
