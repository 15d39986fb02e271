/// Metadata for one GLSL translation unit.
///
/// The binding point names listed here drive the slot assignment performed by
/// `Shader::new`, and the define names must be populated via
/// `Shader::set_define` before the first rebuild.
#[derive(Debug)]
pub struct ShaderInfo {
    pub name: &'static str,
    pub code: &'static str,
    pub defines: &'static [&'static str],
    pub uniform_blocks: &'static [&'static str],
    pub texture_units: &'static [&'static str],
}

pub static VS_FULLSCREEN: ShaderInfo = ShaderInfo {
    name: "vs_fullscreen.glsl",
    code: include_str!("shaders/vs_fullscreen.glsl"),
    defines: &[],
    uniform_blocks: &[],
    texture_units: &[],
};

pub static FS_SKYBOX: ShaderInfo = ShaderInfo {
    name: "fs_skybox.glsl",
    code: include_str!("shaders/fs_skybox.glsl"),
    defines: &[],
    uniform_blocks: &["Camera", "Display"],
    texture_units: &["probe_map"],
};

pub static FS_CROSS_COMPOSE: ShaderInfo = ShaderInfo {
    name: "fs_cross_compose.glsl",
    code: include_str!("shaders/fs_cross_compose.glsl"),
    defines: &["CROSS_COLS", "CROSS_ROWS"],
    uniform_blocks: &[],
    texture_units: &["probe_cube"],
};

pub static FS_CROSS_PRESENT: ShaderInfo = ShaderInfo {
    name: "fs_cross_present.glsl",
    code: include_str!("shaders/fs_cross_present.glsl"),
    defines: &[],
    uniform_blocks: &["Raster", "Display"],
    texture_units: &["cross_map"],
};
