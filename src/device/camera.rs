use crate::Device;
use crate::{OrbitCamera, Viewport, CROSS_COLS, CROSS_ROWS};
use cgmath::prelude::*;
use cgmath::Matrix4;
use js_sys::Error;
use zerocopy::{AsBytes, FromBytes};

#[repr(align(16), C)]
#[derive(AsBytes, FromBytes, Debug, Default)]
pub struct CameraData {
    inv_view_proj: [[f32; 4]; 4],
}

#[repr(align(16), C)]
#[derive(AsBytes, FromBytes, Debug, Default)]
pub struct RasterData {
    fit: [f32; 2],
    padding: [f32; 2],
}

impl Device {
    pub(crate) fn update_camera(
        &mut self,
        camera: &OrbitCamera,
        viewport: &Viewport,
    ) -> Result<(), Error> {
        let projection = viewport.projection(camera.field_of_view);

        let xfm: Matrix4<f32> = (projection * camera.view_matrix())
            .inverse_transform()
            .ok_or_else(|| Error::new("camera transform is singular"))?;

        let mut data = CameraData::default();

        data.inv_view_proj = xfm.into();

        self.camera_buffer.write(&data)
    }

    pub(crate) fn update_raster(&mut self, viewport: &Viewport) -> Result<(), Error> {
        let mut data = RasterData::default();

        // Letterbox the cross atlas into the drawable area.

        let cross_aspect = CROSS_COLS as f32 / CROSS_ROWS as f32;
        let aspect = viewport.aspect_ratio();

        data.fit = if aspect > cross_aspect {
            [cross_aspect / aspect, 1.0]
        } else {
            [1.0, aspect / cross_aspect]
        };

        self.state.width = viewport.width;
        self.state.height = viewport.height;

        self.raster_buffer.write(&data)
    }
}
