use std::{path::PathBuf, time::Duration};

use image::{Rgba, RgbaImage};
use lib_app::{AppContext, AppError, AppEvent, AppFlow, AppHandler, KeyCode, PhysicalKey};
use lib_gpu::{Color, TextureView};
use lib_math::{Rect, Vec2, vec2};
use lib_renderer::{GpuBackend, MaskColor, RendererConfig, TextureRenderer, WgpuBackend};
use log::info;

const CHECKERBOARD_NAME: &str = "checkerboard";
const CHECKERBOARD_SIZE: u32 = 64;
const CHECKERBOARD_CELL: u32 = 8;

const PAN_SPEED: f32 = 240.0;
const SPACING: f32 = 16.0;

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub renderer: RendererConfig,
    pub textures: Vec<PathBuf>,
    pub masks: Vec<MaskColor>,
    pub zoom: f32,
}

#[derive(Debug)]
pub struct Viewer {
    renderer: TextureRenderer<WgpuBackend>,
    names: Vec<String>,
    camera_pos: Vec2,
    pan: Pan,
}

/// Arrow keys currently held.
#[derive(Debug, Clone, Copy, Default)]
struct Pan {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl Pan {
    fn direction(self) -> Vec2 {
        let axis = |neg: bool, pos: bool| pos as i32 as f32 - neg as i32 as f32;

        vec2(axis(self.left, self.right), axis(self.down, self.up))
    }
}

impl AppHandler for Viewer {
    const TITLE: &str = "quadbatch";

    type Config = ViewerConfig;

    fn window_attributes(config: &ViewerConfig) -> lib_app::WindowAttributes {
        lib_app::WindowAttributes::default()
            .with_title(Self::TITLE)
            .with_inner_size(lib_app::PhysicalSize::new(
                config.renderer.window_size.x,
                config.renderer.window_size.y,
            ))
    }

    fn new(config: ViewerConfig, ctx: AppContext<'_>) -> Result<Self, AppError> {
        let backend = WgpuBackend::new(config.renderer.max_vertex_bytes, ctx.into());

        let mut renderer = TextureRenderer::new(&config.renderer, backend);
        renderer.set_zoom(config.zoom);

        let size = ctx.window.inner_size();
        renderer.set_window_size(size.width.max(1), size.height.max(1));

        let mut names = Vec::with_capacity(config.textures.len().max(1));
        for path in &config.textures {
            let entry = renderer
                .load_texture(path, &config.masks)
                .map_err(|err| AppError::Init(err.into()))?;

            names.push(entry.name.clone());
        }

        if names.is_empty() {
            info!("no textures given, showing a checkerboard");

            names.push(register_checkerboard(&mut renderer));
        }

        Ok(Self {
            renderer,
            names,
            camera_pos: Vec2::ZERO,
            pan: Pan::default(),
        })
    }

    fn update(&mut self, delta_time: Duration, _ctx: AppContext<'_>) -> AppFlow {
        self.camera_pos += self.pan.direction() * PAN_SPEED * delta_time.as_secs_f32();
        self.renderer.set_camera_pos(self.camera_pos);

        AppFlow::Continue
    }

    fn event(&mut self, event: AppEvent<'_>, _ctx: AppContext<'_>) -> AppFlow {
        match event {
            AppEvent::CloseRequested => return AppFlow::Exit,
            AppEvent::Resized { width, height } => self.renderer.set_window_size(width, height),
            AppEvent::Key(key) => {
                let PhysicalKey::Code(code) = key.physical_key else {
                    return AppFlow::Continue;
                };
                let pressed = key.state.is_pressed();

                match code {
                    KeyCode::ArrowLeft => self.pan.left = pressed,
                    KeyCode::ArrowRight => self.pan.right = pressed,
                    KeyCode::ArrowUp => self.pan.up = pressed,
                    KeyCode::ArrowDown => self.pan.down = pressed,
                    KeyCode::KeyM if pressed && !key.repeat => {
                        self.renderer.set_frag_debug_value(1);
                    }
                    KeyCode::KeyM if !pressed => self.renderer.reset_frag_debug_value(),
                    KeyCode::Escape if pressed => return AppFlow::Exit,
                    _ => {}
                }
            }
            _ => {}
        }

        AppFlow::Continue
    }

    fn draw(&mut self, output: &TextureView, _ctx: AppContext<'_>) {
        self.renderer.backend_mut().begin_frame(
            output,
            Color {
                r: 0.1,
                g: 0.1,
                b: 0.12,
                a: 1.0,
            },
        );

        let mut x = SPACING;
        for (index, name) in self.names.iter().enumerate() {
            let size = self.renderer.texture(name).size;
            let whole = Rect::from_coords(0.0, 0.0, size.x - 1.0, size.y - 1.0);

            // Top row: as loaded and mirrored. Bottom row: stretched to double size.
            let top = SPACING + 2.0 * size.y + SPACING + size.y;
            self.renderer
                .draw_texture_pdn(name, vec2(x, top), 0.0, whole, index % 2 == 1);
            self.renderer
                .draw_texture(name, vec2(x, SPACING), 2.0 * size);

            x += 2.0 * size.x + SPACING;
        }

        self.renderer.flush();
        self.renderer.backend_mut().end_frame();
    }
}

/// Uploads a generated checkerboard and returns the name it is drawn by.
fn register_checkerboard<B: GpuBackend>(renderer: &mut TextureRenderer<B>) -> String {
    let image = checkerboard(CHECKERBOARD_SIZE, CHECKERBOARD_CELL);
    let handle = renderer.backend_mut().create_texture(&image);

    renderer
        .add_texture(CHECKERBOARD_NAME, handle, image.width(), image.height())
        .name
        .clone()
}

fn checkerboard(size: u32, cell: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([230, 230, 230, 255])
        } else {
            Rgba([40, 40, 48, 255])
        }
    })
}

#[cfg(test)]
mod tests {
    use lib_renderer::RecordingBackend;

    use super::*;

    #[test]
    fn checkerboard_fallback_is_registered_and_drawable() {
        let mut renderer = TextureRenderer::new(&RendererConfig::default(), RecordingBackend::new());

        let name = register_checkerboard(&mut renderer);
        assert_eq!(name, CHECKERBOARD_NAME);
        assert_eq!(
            renderer.texture(&name).size,
            vec2(CHECKERBOARD_SIZE as f32, CHECKERBOARD_SIZE as f32)
        );

        renderer.draw_texture(&name, Vec2::ZERO, vec2(64.0, 64.0));
        renderer.flush();

        assert_eq!(renderer.backend().draws().len(), 1);
        assert_eq!(renderer.backend().texture_count(), 1);
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let image = checkerboard(16, 4);

        assert_eq!(image.get_pixel(0, 0), image.get_pixel(3, 3));
        assert_ne!(image.get_pixel(0, 0), image.get_pixel(4, 0));
        assert_eq!(image.get_pixel(0, 0), image.get_pixel(4, 4));
    }

    #[test]
    fn opposite_keys_cancel() {
        let pan = Pan {
            left: true,
            right: true,
            up: true,
            down: false,
        };

        assert_eq!(pan.direction(), vec2(0.0, 1.0));
    }
}
