use image::RgbaImage;
use lib_math::{UVec2, uvec2};

use crate::{DrawCall, GpuBackend, TextureHandle, Vertex, ViewUniform};

/// Backend that keeps no GPU state: it hands out sequential handles, keeps a
/// copy of every uploaded image and remembers every draw call it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    textures: Vec<RgbaImage>,
    draws: Vec<RecordedDraw>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub texture: TextureHandle,
    pub vertices: Vec<Vertex>,
    pub view: ViewUniform,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Pixels as uploaded, bottom row first.
    pub fn texture_image(&self, handle: TextureHandle) -> Option<&RgbaImage> {
        let index = (handle.0 as usize).checked_sub(1)?;
        self.textures.get(index)
    }

    pub fn texture_size(&self, handle: TextureHandle) -> Option<UVec2> {
        self.texture_image(handle)
            .map(|image| uvec2(image.width(), image.height()))
    }
}

impl GpuBackend for RecordingBackend {
    fn create_texture(&mut self, image: &RgbaImage) -> TextureHandle {
        self.textures.push(image.clone());

        TextureHandle(self.textures.len() as u32)
    }

    fn draw(&mut self, call: DrawCall<'_>) {
        self.draws.push(RecordedDraw {
            texture: call.texture,
            vertices: call.vertices.to_vec(),
            view: call.view,
        });
    }
}

#[cfg(test)]
mod tests {
    use lib_math::Vec2;

    use super::*;

    #[test]
    fn handles_start_at_one() {
        let mut backend = RecordingBackend::new();

        let first = backend.create_texture(&RgbaImage::new(4, 2));
        let second = backend.create_texture(&RgbaImage::new(1, 1));

        assert_eq!(first, TextureHandle(1));
        assert_eq!(second, TextureHandle(2));
        assert_eq!(backend.texture_size(first), Some(uvec2(4, 2)));
        assert_eq!(backend.texture_size(TextureHandle::INVALID), None);
        assert_eq!(backend.texture_count(), 2);
    }

    #[test]
    fn records_draws_in_order() {
        let mut backend = RecordingBackend::new();
        let view = ViewUniform::new(Vec2::ZERO, Vec2::ONE, 1.0, 0);

        backend.draw(DrawCall {
            texture: TextureHandle(2),
            vertices: &[Vertex::default(); 6],
            view,
        });
        backend.draw(DrawCall {
            texture: TextureHandle(1),
            vertices: &[],
            view,
        });

        assert_eq!(backend.draws().len(), 2);
        assert_eq!(backend.draws()[0].texture, TextureHandle(2));
        assert_eq!(backend.draws()[0].vertices.len(), 6);

        backend.clear_draws();
        assert!(backend.draws().is_empty());
    }
}
