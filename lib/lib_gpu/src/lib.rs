//! GPU API used across the workspace.

pub use wgpu::*;
