use std::time::Duration;

use lib_gpu::{
    Color, CommandEncoderDescriptor, Device, LoadOp, Operations, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, StoreOp, TextureFormat, TextureView,
};

pub use winit::{
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

mod error;
mod runner;
pub use error::*;
pub use runner::run_app;

pub trait AppHandler: Sized {
    const TITLE: &str = "Untitled App";

    /// Startup values handed to [`AppHandler::new`] once the GPU is up.
    type Config;

    fn window_attributes(_config: &Self::Config) -> WindowAttributes {
        WindowAttributes::default().with_title(Self::TITLE)
    }

    fn new(config: Self::Config, ctx: AppContext<'_>) -> Result<Self, AppError>;

    fn update(&mut self, _delta_time: Duration, _ctx: AppContext<'_>) -> AppFlow {
        AppFlow::Continue
    }

    fn event(&mut self, event: AppEvent<'_>, _ctx: AppContext<'_>) -> AppFlow {
        match event {
            AppEvent::CloseRequested => AppFlow::Exit,
            _ => AppFlow::Continue,
        }
    }

    fn draw(&mut self, output: &TextureView, ctx: AppContext<'_>) {
        let mut encoder = ctx
            .device
            .create_command_encoder(&CommandEncoderDescriptor::default());

        encoder.begin_render_pass(&RenderPassDescriptor {
            label: None,
            color_attachments: &[Some(RenderPassColorAttachment {
                view: output,
                ops: Operations {
                    load: LoadOp::Clear(Color::BLACK),
                    store: StoreOp::Store,
                },
                depth_slice: None,
                resolve_target: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        ctx.queue.submit([encoder.finish()]);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AppContext<'a> {
    pub window: &'a Window,
    pub device: &'a Device,
    pub queue: &'a Queue,
    pub surface_format: TextureFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    Continue,
    Exit,
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub enum AppEvent<'a> {
    CloseRequested,
    /// The surface was reconfigured to a new non-zero size.
    Resized {
        width: u32,
        height: u32,
    },
    Key(&'a KeyEvent),
    UnhandledWindowEvent(&'a WindowEvent),
}
