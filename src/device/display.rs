use crate::{Device, Display};
use js_sys::Error;
use zerocopy::{AsBytes, FromBytes};

#[repr(align(16), C)]
#[derive(AsBytes, FromBytes, Debug, Default)]
pub struct DisplayData {
    exposure: f32,
    padding: [f32; 3],
}

impl Device {
    pub(crate) fn update_display(&mut self, display: &Display) -> Result<(), Error> {
        let mut data = DisplayData::default();

        data.exposure = (2.0f32).powf(display.exposure);

        self.state.background = display.background;

        self.display_buffer.write(&data)
    }
}
