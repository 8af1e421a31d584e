mod rect;
pub use glam::{IVec2, UVec2, Vec2, Vec3, Vec4, ivec2, uvec2, vec2, vec3, vec4};
pub use rect::*;
