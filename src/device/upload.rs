#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::Device;
use crate::{atlas_dimensions, decode_radiance, face_size_for, reproject, validate_faces};
use crate::{Asset, FaceImage, ProbeImage};
use half::f16;
use js_sys::Error;
use std::collections::HashMap;
use web_sys::WebGl2RenderingContext as Context;

impl Device {
    /// Decodes the named probe asset and (re)creates every GPU texture
    /// derived from it: the equirectangular source, the reprojected cube map
    /// and the cross atlas target.
    pub(crate) fn upload_probe(
        &mut self,
        assets: &HashMap<Asset, Vec<u8>>,
        probe: Option<&Asset>,
    ) -> Result<(), Error> {
        let name = match probe {
            Some(name) => name,
            None => {
                self.state.ready = false;
                self.state.cross_stale = false;

                return Ok(());
            }
        };

        let bytes = assets
            .get(name)
            .ok_or_else(|| Error::new(&format!("no such asset: {}", name)))?;

        let image = decode_radiance(bytes)
            .map_err(|err| Error::new(&format!("decode error: {}", err)))?;

        self.upload_equirect(&image)?;

        let face_size = face_size_for(image.height(), self.max_cube_map_size());
        let faces = reproject(&image, face_size);

        self.upload_cube_faces(&faces)?;

        let (cols, rows) = atlas_dimensions(face_size);

        if cols > self.max_texture_size() {
            return Err(Error::new("upload error: cross atlas exceeds texture size limit"));
        }

        self.cross_texture.create(cols, rows);
        self.cross_fbo.rebuild(&self.cross_texture)?;

        self.state.ready = true;
        self.state.cross_stale = true;

        info!(
            "probe '{}' uploaded: {}x{} source, {} face size",
            name,
            image.width(),
            image.height(),
            face_size
        );

        Ok(())
    }

    /// Uploads the equirectangular source as a 2D texture.
    pub(crate) fn upload_equirect(&mut self, image: &ProbeImage) -> Result<(), Error> {
        let limit = self.max_texture_size();

        if image.width() > limit || image.height() > limit {
            return Err(Error::new("upload error: probe exceeds texture size limit"));
        }

        let data = expand_to_rgba16f(image.pixels(), image.channels());

        self.probe_texture
            .upload(image.width(), image.height(), &data);

        Ok(())
    }

    /// Uploads six face images into the cube map texture.
    pub(crate) fn upload_cube_faces(&mut self, faces: &[FaceImage]) -> Result<(), Error> {
        let face_size = validate_faces(faces)
            .map_err(|err| Error::new(&format!("upload error: {}", err)))?;

        if face_size > self.max_cube_map_size() {
            return Err(Error::new("upload error: face exceeds cube map size limit"));
        }

        self.probe_cube.create(face_size);

        for face in faces {
            let data = expand_to_rgba16f(&face.pixels, 3);

            self.probe_cube.upload_face(face.face, &data);
        }

        Ok(())
    }

    pub(crate) fn max_texture_size(&self) -> usize {
        self.query_limit(Context::MAX_TEXTURE_SIZE)
    }

    pub(crate) fn max_cube_map_size(&self) -> usize {
        self.query_limit(Context::MAX_CUBE_MAP_TEXTURE_SIZE)
    }

    fn query_limit(&self, parameter: u32) -> usize {
        self.gl
            .get_parameter(parameter)
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(2048.0) as usize
    }
}

/// Converts tightly packed float samples into half-float RGBA texels.
fn expand_to_rgba16f(pixels: &[f32], channels: usize) -> Vec<u16> {
    let one = f16::from_f32(1.0).to_bits();

    let mut data = Vec::with_capacity(pixels.len() / channels * 4);

    for sample in pixels.chunks_exact(channels) {
        data.push(f16::from_f32(sample[0]).to_bits());
        data.push(f16::from_f32(sample[1]).to_bits());
        data.push(f16::from_f32(sample[2]).to_bits());

        if channels == 4 {
            data.push(f16::from_f32(sample[3]).to_bits());
        } else {
            data.push(one);
        }
    }

    data
}
