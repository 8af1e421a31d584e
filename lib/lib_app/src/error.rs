use lib_gpu::{CreateSurfaceError, RequestAdapterError, RequestDeviceError};
use thiserror::Error;
use winit::error::{EventLoopError, OsError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),

    #[error("failed to create main window: {0}")]
    CreateWindow(#[from] OsError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] RequestDeviceError),

    #[error("failed to create window surface: {0}")]
    CreateSurface(#[from] CreateSurfaceError),

    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,

    #[error("app initialization failed")]
    Init(#[source] Box<dyn std::error::Error + Send + Sync>),
}
