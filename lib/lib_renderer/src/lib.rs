mod backend;
mod pdn;
mod recording_backend;
mod texture;
mod texture_renderer;
mod vertex;
mod vertex_batch;
mod wgpu_backend;
pub use backend::*;
pub use pdn::*;
pub use recording_backend::*;
pub use texture::*;
pub use texture_renderer::*;
pub use vertex::*;
pub use vertex_batch::*;
pub use wgpu_backend::*;
