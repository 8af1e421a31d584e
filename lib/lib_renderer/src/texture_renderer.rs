use std::path::Path;

use lib_math::{Rect, UVec2, Vec2, uvec2};
use log::{debug, trace};

use crate::{
    DEFAULT_MAX_VERTEX_BYTES, DrawCall, GpuBackend, MAX_TEXTURES, MaskColor, TextureEntry,
    TextureError, TextureHandle, TextureTable, VertexBatch, ViewUniform, decode_texture,
    mask_pixels, normalized_rect_from_pdn, pixel_rect_from_pdn, quad_vertices,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    pub window_size: UVec2,
    pub max_vertex_bytes: usize,
    pub max_textures: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            window_size: uvec2(800, 600),
            max_vertex_bytes: DEFAULT_MAX_VERTEX_BYTES,
            max_textures: MAX_TEXTURES,
        }
    }
}

/// Batches textured quads and submits one draw call per run of quads that
/// share a texture.
///
/// Quads accumulate until a quad with a different texture arrives or
/// [`flush`](Self::flush) is called. The last batch of a frame is only drawn
/// by an explicit flush.
#[derive(Debug)]
pub struct TextureRenderer<B> {
    backend: B,
    textures: TextureTable,
    batch: VertexBatch,
    camera_pos: Vec2,
    zoom: f32,
    window_size: Vec2,
    frag_debug_value: i32,
}

impl<B: GpuBackend> TextureRenderer<B> {
    pub fn new(config: &RendererConfig, backend: B) -> Self {
        Self {
            backend,
            textures: TextureTable::new(config.max_textures),
            batch: VertexBatch::new(config.max_vertex_bytes),
            camera_pos: Vec2::ZERO,
            zoom: 1.0,
            window_size: config.window_size.as_vec2(),
            frag_debug_value: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn textures(&self) -> &TextureTable {
        &self.textures
    }

    /// Registers a texture the caller already uploaded through the backend.
    ///
    /// # Panics
    ///
    /// See [`TextureTable::register`].
    pub fn add_texture(
        &mut self,
        name: impl Into<String>,
        handle: TextureHandle,
        width: u32,
        height: u32,
    ) -> &TextureEntry {
        self.textures.register(name, handle, width, height)
    }

    /// Decodes `path`, masks `mask_colors` to transparent, uploads the pixels
    /// and registers the texture under the file's basename.
    ///
    /// A name that is already taken or a full table is reported before
    /// anything is decoded or uploaded.
    pub fn load_texture(
        &mut self,
        path: impl AsRef<Path>,
        mask_colors: &[MaskColor],
    ) -> Result<&TextureEntry, TextureError> {
        let path = path.as_ref();

        let path_str = path.to_string_lossy();
        let name = lib_str::basename(&path_str);

        if self.textures.find(name).is_some() {
            return Err(TextureError::DuplicateName {
                name: name.to_string(),
            });
        }
        if self.textures.is_full() {
            return Err(TextureError::TableFull {
                name: name.to_string(),
                capacity: self.textures.capacity(),
            });
        }

        let mut image = decode_texture(path)?;
        let masked = mask_pixels(&mut image, mask_colors);
        let handle = self.backend.create_texture(&image);

        debug!("loaded {} ({masked} pixels masked)", path.display());

        Ok(self
            .textures
            .register(name, handle, image.width(), image.height()))
    }

    /// # Panics
    ///
    /// Panics if `name` is not registered.
    pub fn texture(&self, name: &str) -> &TextureEntry {
        self.textures.lookup(name)
    }

    pub fn find_texture(&self, name: &str) -> Option<&TextureEntry> {
        self.textures.find(name)
    }

    /// # Panics
    ///
    /// Panics if `name` is not registered.
    pub fn texture_handle(&self, name: &str) -> TextureHandle {
        self.textures.lookup(name).handle
    }

    /// # Panics
    ///
    /// Panics if `name` is not registered.
    pub fn normalized_tex_coords_pdn(&self, name: &str, pdn: Rect) -> Rect {
        normalized_rect_from_pdn(pdn, self.textures.lookup(name).size)
    }

    /// Queues a quad covering `pos` at depth `z`, sampling `tex_coords` in
    /// normalized texture space. `reversed` mirrors the quad horizontally.
    ///
    /// # Panics
    ///
    /// Panics if `texture` is invalid or the vertex batch is full.
    pub fn draw_quad(
        &mut self,
        texture: TextureHandle,
        pos: Rect,
        z: f32,
        tex_coords: Rect,
        reversed: bool,
    ) {
        assert!(texture.is_valid(), "cannot draw with an invalid texture");

        if self.batch.texture().is_some_and(|bound| bound != texture) {
            self.flush();
        }

        let tex_coords = if reversed {
            tex_coords.flipped_x()
        } else {
            tex_coords
        };

        self.batch
            .push_quad(texture, quad_vertices(pos, z, tex_coords));
    }

    /// Draws the part of texture `name` given in editor cursor coordinates,
    /// at its pixel size with its first corner at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not registered or the vertex batch is full.
    pub fn draw_texture_pdn(&mut self, name: &str, pos: Vec2, z: f32, pdn: Rect, reversed: bool) {
        let entry = self.textures.lookup(name);
        let handle = entry.handle;
        let pixel_rect = pixel_rect_from_pdn(pdn, entry.size);

        let tex_coords = pixel_rect / entry.size;
        let pos_rect = Rect::from_pos_size(pos, pixel_rect.size());

        self.draw_quad(handle, pos_rect, z, tex_coords, reversed);
    }

    /// Draws all of texture `name` stretched over `size`, at depth 1.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not registered or the vertex batch is full.
    pub fn draw_texture(&mut self, name: &str, pos: Vec2, size: Vec2) {
        let handle = self.textures.lookup(name).handle;

        self.draw_quad(
            handle,
            Rect::from_pos_size(pos, size),
            1.0,
            Rect::UNIT,
            false,
        );
    }

    /// Submits the pending quads and returns to the idle state. Nothing is
    /// drawn when no quads are pending.
    pub fn flush(&mut self) {
        let view = self.view_uniform();

        if let Some(texture) = self.batch.texture()
            && !self.batch.is_empty()
        {
            trace!(
                "flushing {} vertices with {texture:?}",
                self.batch.vertices().len()
            );

            self.backend.draw(DrawCall {
                texture,
                vertices: self.batch.vertices(),
                view,
            });
        }

        self.batch.reset();
    }

    pub fn bound_texture(&self) -> Option<TextureHandle> {
        self.batch.texture()
    }

    pub fn vertex_data(&self) -> &[f32] {
        self.batch.float_data()
    }

    pub fn view_uniform(&self) -> ViewUniform {
        ViewUniform::new(
            self.camera_pos,
            self.window_size,
            self.zoom,
            self.frag_debug_value,
        )
    }

    pub fn set_camera_pos(&mut self, camera_pos: Vec2) {
        self.camera_pos = camera_pos;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = uvec2(width, height).as_vec2();
    }

    pub fn set_frag_debug_value(&mut self, value: i32) {
        self.frag_debug_value = value;
    }

    pub fn reset_frag_debug_value(&mut self) {
        self.frag_debug_value = 0;
    }
}
