use std::mem::offset_of;

use bytemuck::{Pod, Zeroable};
use lib_gpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};
use lib_math::{Rect, Vec2, Vec3};

pub const FLOATS_PER_VERTEX: usize = size_of::<Vertex>() / size_of::<f32>();
pub const VERTICES_PER_QUAD: usize = 6;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub pos: Vec3,
    pub tex_coord: Vec2,
}

impl Vertex {
    pub fn new(pos: Vec2, z: f32, tex_coord: Vec2) -> Self {
        Self {
            pos: pos.extend(z),
            tex_coord,
        }
    }
}

/// Two counter-clockwise triangles covering `pos`, each corner paired with the
/// matching corner of `tex_coords`.
pub fn quad_vertices(pos: Rect, z: f32, tex_coords: Rect) -> [Vertex; VERTICES_PER_QUAD] {
    let [p0, p1, p2, p3] = pos.corners();
    let [t0, t1, t2, t3] = tex_coords.corners();

    [
        Vertex::new(p0, z, t0),
        Vertex::new(p1, z, t1),
        Vertex::new(p2, z, t2),
        Vertex::new(p0, z, t0),
        Vertex::new(p2, z, t2),
        Vertex::new(p3, z, t3),
    ]
}

pub(crate) const VERTEX_BUFFER_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: size_of::<Vertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &[
        VertexAttribute {
            format: VertexFormat::Float32x3,
            offset: offset_of!(Vertex, pos) as u64,
            shader_location: 0,
        },
        VertexAttribute {
            format: VertexFormat::Float32x2,
            offset: offset_of!(Vertex, tex_coord) as u64,
            shader_location: 1,
        },
    ],
};

#[cfg(test)]
mod tests {
    use lib_math::{vec2, vec3};

    use super::*;

    #[test]
    fn five_floats_per_vertex() {
        assert_eq!(FLOATS_PER_VERTEX, 5);
        assert_eq!(size_of::<Vertex>(), 20);
    }

    #[test]
    fn quad_pairs_position_and_tex_corners() {
        let vertices = quad_vertices(
            Rect::from_coords(10.0, 20.0, 42.0, 36.0),
            2.0,
            Rect::from_coords(0.0, 0.5, 0.5, 1.0),
        );

        assert_eq!(vertices[0].pos, vec3(10.0, 20.0, 2.0));
        assert_eq!(vertices[0].tex_coord, vec2(0.0, 0.5));
        assert_eq!(vertices[1].pos, vec3(42.0, 20.0, 2.0));
        assert_eq!(vertices[1].tex_coord, vec2(0.5, 0.5));
        assert_eq!(vertices[2].pos, vec3(42.0, 36.0, 2.0));
        assert_eq!(vertices[2].tex_coord, vec2(0.5, 1.0));
        assert_eq!(vertices[3], vertices[0]);
        assert_eq!(vertices[4], vertices[2]);
        assert_eq!(vertices[5].pos, vec3(10.0, 36.0, 2.0));
        assert_eq!(vertices[5].tex_coord, vec2(0.0, 1.0));
    }
}
