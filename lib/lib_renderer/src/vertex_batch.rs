use crate::{TextureHandle, VERTICES_PER_QUAD, Vertex};

pub const DEFAULT_MAX_VERTEX_BYTES: usize = 1024 * 1024;

/// Vertices waiting for one draw call, all sampling the same texture.
#[derive(Debug, Clone)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    max_vertices: usize,
    texture: Option<TextureHandle>,
}

impl VertexBatch {
    pub fn new(max_bytes: usize) -> Self {
        let max_vertices = max_bytes / size_of::<Vertex>();

        Self {
            vertices: Vec::with_capacity(max_vertices),
            max_vertices,
            texture: None,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_vertices * size_of::<Vertex>()
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Pending vertices as interleaved floats.
    pub fn float_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// # Panics
    ///
    /// Panics if the quad would overflow the byte capacity or if a different
    /// texture is already bound.
    pub fn push_quad(&mut self, texture: TextureHandle, quad: [Vertex; VERTICES_PER_QUAD]) {
        assert!(
            self.vertices.len() + VERTICES_PER_QUAD <= self.max_vertices,
            "vertex batch is full ({} bytes)",
            self.max_bytes()
        );
        assert!(
            self.texture.is_none_or(|bound| bound == texture),
            "vertex batch is bound to {:?}, not {texture:?}",
            self.texture
        );

        self.vertices.extend_from_slice(&quad);
        self.texture = Some(texture);
    }

    pub fn reset(&mut self) {
        self.vertices.clear();
        self.texture = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::FLOATS_PER_VERTEX;

    use super::*;

    #[test]
    fn float_view_is_whole_vertices() {
        let mut batch = VertexBatch::new(DEFAULT_MAX_VERTEX_BYTES);
        batch.push_quad(TextureHandle(1), [Vertex::default(); VERTICES_PER_QUAD]);
        batch.push_quad(TextureHandle(1), [Vertex::default(); VERTICES_PER_QUAD]);

        assert_eq!(batch.float_data().len(), 2 * VERTICES_PER_QUAD * FLOATS_PER_VERTEX);
        assert_eq!(batch.float_data().len() % FLOATS_PER_VERTEX, 0);
    }

    #[test]
    fn reset_unbinds() {
        let mut batch = VertexBatch::new(DEFAULT_MAX_VERTEX_BYTES);
        batch.push_quad(TextureHandle(1), [Vertex::default(); VERTICES_PER_QUAD]);
        batch.reset();

        assert!(batch.is_empty());
        assert_eq!(batch.texture(), None);
    }

    #[test]
    fn capacity_fits_exact_quads() {
        let mut batch = VertexBatch::new(2 * VERTICES_PER_QUAD * size_of::<Vertex>());
        batch.push_quad(TextureHandle(1), [Vertex::default(); VERTICES_PER_QUAD]);
        batch.push_quad(TextureHandle(1), [Vertex::default(); VERTICES_PER_QUAD]);

        assert_eq!(batch.vertices().len(), 12);
    }

    #[test]
    #[should_panic(expected = "vertex batch is full")]
    fn overflow_panics() {
        let mut batch = VertexBatch::new(VERTICES_PER_QUAD * size_of::<Vertex>() + 4);
        batch.push_quad(TextureHandle(1), [Vertex::default(); VERTICES_PER_QUAD]);
        batch.push_quad(TextureHandle(1), [Vertex::default(); VERTICES_PER_QUAD]);
    }

    #[test]
    #[should_panic(expected = "bound to")]
    fn mixing_textures_panics() {
        let mut batch = VertexBatch::new(DEFAULT_MAX_VERTEX_BYTES);
        batch.push_quad(TextureHandle(1), [Vertex::default(); VERTICES_PER_QUAD]);
        batch.push_quad(TextureHandle(2), [Vertex::default(); VERTICES_PER_QUAD]);
    }
}
