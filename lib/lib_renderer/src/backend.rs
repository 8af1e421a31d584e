use bytemuck::{Pod, Zeroable};
use image::RgbaImage;
use lib_math::Vec2;

use crate::{TextureHandle, Vertex};

/// Everything the batch renderer needs from a GPU API.
///
/// Implementations: [`WgpuBackend`](crate::WgpuBackend) (on screen) and
/// [`RecordingBackend`](crate::RecordingBackend) (headless, for tests).
pub trait GpuBackend {
    /// Uploads `image` and returns a valid handle for it. The image's first
    /// row is the bottom of the texture.
    fn create_texture(&mut self, image: &RgbaImage) -> TextureHandle;

    /// Draws `call.vertices` as a triangle list sampling `call.texture`.
    fn draw(&mut self, call: DrawCall<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall<'a> {
    pub texture: TextureHandle,
    pub vertices: &'a [Vertex],
    pub view: ViewUniform,
}

/// Camera state as laid out in the shader's uniform block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ViewUniform {
    pub camera_pos: Vec2,
    pub window_size: Vec2,
    pub zoom: f32,
    pub debug_value: i32,
    _padding: [u32; 2],
}

impl ViewUniform {
    pub fn new(camera_pos: Vec2, window_size: Vec2, zoom: f32, debug_value: i32) -> Self {
        Self {
            camera_pos,
            window_size,
            zoom,
            debug_value,
            _padding: [0; 2],
        }
    }
}
