#[allow(unused_imports)]
use log::{debug, info, warn};

use js_sys::Error;
use web_sys::{WebGl2RenderingContext as Context, WebGlFramebuffer};

use crate::*;

/// State the draw path needs each frame, captured during `update`.
#[derive(Debug, Default)]
pub(crate) struct ViewerState {
    pub ready: bool,
    pub cross_stale: bool,
    pub mode: ViewMode,
    pub width: u32,
    pub height: u32,
    pub background: [f32; 3],
}

/// GPU renderer for a probe scene.
///
/// The host owns the GL context and the presented framebuffer; the device
/// owns every other GL resource it creates and releases them on drop.
#[derive(Debug)]
pub struct Device {
    pub(crate) gl: Context,

    target_framebuffer: Option<WebGlFramebuffer>,

    pub(crate) skybox_shader: Shader,
    pub(crate) compose_shader: Shader,
    pub(crate) present_shader: Shader,

    pub(crate) probe_texture: Texture<RGBA16F>,
    pub(crate) probe_cube: CubeMap<RGBA16F>,

    pub(crate) cross_texture: Texture<RGBA16F>,
    pub(crate) cross_fbo: Framebuffer,

    pub(crate) camera_buffer: UniformBuffer<CameraData>,
    pub(crate) raster_buffer: UniformBuffer<RasterData>,
    pub(crate) display_buffer: UniformBuffer<DisplayData>,

    device_lost: bool,

    pub(crate) state: ViewerState,
}

impl Device {
    /// Creates a new device over a WebGL2 context.
    ///
    /// The framebuffer handle is the host-owned target that `draw` presents
    /// into (`None` being the canvas); it is fixed for the device's lifetime.
    pub fn new(gl: &Context, framebuffer: Option<WebGlFramebuffer>) -> Result<Self, Error> {
        let mut compose_shader = Shader::new(gl.clone(), &shader::VS_FULLSCREEN, &shader::FS_CROSS_COMPOSE);

        compose_shader.set_define("CROSS_COLS", CROSS_COLS);
        compose_shader.set_define("CROSS_ROWS", CROSS_ROWS);

        Ok(Self {
            gl: gl.clone(),
            target_framebuffer: framebuffer,
            skybox_shader: Shader::new(gl.clone(), &shader::VS_FULLSCREEN, &shader::FS_SKYBOX),
            compose_shader,
            present_shader: Shader::new(gl.clone(), &shader::VS_FULLSCREEN, &shader::FS_CROSS_PRESENT),
            probe_texture: Texture::new(gl.clone()),
            probe_cube: CubeMap::new(gl.clone()),
            cross_texture: Texture::new(gl.clone()),
            cross_fbo: Framebuffer::new(gl.clone()),
            camera_buffer: UniformBuffer::new(gl.clone()),
            raster_buffer: UniformBuffer::new(gl.clone()),
            display_buffer: UniformBuffer::new(gl.clone()),
            device_lost: true,
            state: ViewerState::default(),
        })
    }

    /// Signals the context was lost.
    pub fn context_lost(&mut self) {
        self.device_lost = true;
    }

    /// Updates this device to render a given scene or returns an error.
    ///
    /// All decode, upload and layout errors surface synchronously from this
    /// call; the failing field stays dirty so a later call can retry it.
    pub fn update(&mut self, scene: &mut ProbeScene) -> Result<bool, Error> {
        if self.device_lost && !self.try_restore(scene)? {
            return Ok(false); // context currently lost
        }

        let mut invalidated = false;

        let assets = &scene.assets;

        invalidated |= Dirty::clean(&mut scene.probe, |probe| {
            self.upload_probe(assets, probe.as_ref())
        })?;

        let resized = Dirty::clean(&mut scene.viewport, |viewport| {
            self.update_raster(viewport)
        })?;

        if resized {
            // the projection aspect follows the drawable size
            Dirty::dirty(&mut scene.camera);
        }

        invalidated |= resized;

        let viewport = &scene.viewport;

        invalidated |= Dirty::clean(&mut scene.camera, |camera| {
            self.update_camera(camera, viewport)
        })?;

        invalidated |= Dirty::clean(&mut scene.display, |display| {
            self.update_display(display)
        })?;

        invalidated |= Dirty::clean(&mut scene.mode, |mode| {
            self.state.mode = *mode;

            Ok::<(), Error>(())
        })?;

        self.skybox_shader.rebuild()?;
        self.compose_shader.rebuild()?;
        self.present_shader.rebuild()?;

        if self.state.cross_stale && self.state.ready {
            self.compose_cross()?;
            self.state.cross_stale = false;
        }

        Ok(invalidated)
    }

    /// Renders the scene into the host framebuffer.
    ///
    /// Before a probe is ready this leaves the clear color in place and
    /// returns successfully, so a host may start its frame loop immediately.
    pub fn draw(&mut self) -> Result<(), Error> {
        if self.device_lost {
            return Ok(());
        }

        self.gl
            .bind_framebuffer(Context::DRAW_FRAMEBUFFER, self.target_framebuffer.as_ref());

        self.gl
            .viewport(0, 0, self.state.width as i32, self.state.height as i32);

        let [r, g, b] = self.state.background;

        self.gl.clear_color(r, g, b, 1.0);
        self.gl
            .clear(Context::COLOR_BUFFER_BIT | Context::DEPTH_BUFFER_BIT);

        if !self.state.ready {
            return Ok(()); // placeholder frame while loading
        }

        match self.state.mode {
            ViewMode::Probe => self.draw_probe(),
            ViewMode::Cross => self.draw_cross_preview(),
        }

        Ok(())
    }

    fn draw_probe(&self) {
        let command = self.skybox_shader.begin_draw();

        command.bind(&self.probe_texture, "probe_map");
        command.bind(&self.camera_buffer, "Camera");
        command.bind(&self.display_buffer, "Display");

        command.set_host_framebuffer(self.target_framebuffer.as_ref());
        command.set_viewport(0, 0, self.state.width as i32, self.state.height as i32);

        command.draw_triangles(0, 1);
    }

    fn draw_cross_preview(&self) {
        let command = self.present_shader.begin_draw();

        command.bind(&self.cross_texture, "cross_map");
        command.bind(&self.raster_buffer, "Raster");
        command.bind(&self.display_buffer, "Display");

        command.set_host_framebuffer(self.target_framebuffer.as_ref());
        command.set_viewport(0, 0, self.state.width as i32, self.state.height as i32);

        command.draw_triangles(0, 1);
    }

    fn try_restore(&mut self, scene: &mut ProbeScene) -> Result<bool, Error> {
        if self.gl.is_context_lost() {
            return Ok(false);
        }

        self.skybox_shader.invalidate();
        self.compose_shader.invalidate();
        self.present_shader.invalidate();

        self.probe_texture.invalidate();
        self.probe_cube.invalidate();
        self.cross_texture.invalidate();
        self.cross_fbo.invalidate();

        self.camera_buffer.invalidate();
        self.raster_buffer.invalidate();
        self.display_buffer.invalidate();

        self.state = ViewerState::default();

        scene.dirty_all_fields();
        self.device_lost = false;

        Ok(true)
    }
}
