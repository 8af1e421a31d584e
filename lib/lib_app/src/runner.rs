use std::{sync::Arc, time::Instant};

use lib_gpu::{
    Device, DeviceDescriptor, Instance, PollType, Queue, RequestAdapterOptions, Surface,
    SurfaceConfiguration, SurfaceError, TextureViewDescriptor,
};
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowId},
};

use crate::{AppContext, AppError, AppEvent, AppFlow, AppHandler};

/// Opens the main window and drives `T` until it exits or fails to start.
pub fn run_app<T: AppHandler>(config: T::Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;

    let mut application = AppRunner::<T> {
        state: RunnerState::Uninitialized(Some(config)),
        error: None,
    };

    event_loop.run_app(&mut application)?;

    match application.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct AppRunner<T: AppHandler> {
    state: RunnerState<T>,
    error: Option<AppError>,
}

enum RunnerState<T: AppHandler> {
    Uninitialized(Option<T::Config>),
    Initialized(InitializedAppRunner<T>),
}

struct InitializedAppRunner<T: AppHandler> {
    window: Arc<Window>,
    device: Device,
    queue: Queue,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    alt_left_is_held: bool,
    alt_right_is_held: bool,
    app: T,
    last_instant: Instant,
}

impl<T: AppHandler> ApplicationHandler for AppRunner<T> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let RunnerState::Uninitialized(config) = &mut self.state else {
            return;
        };

        let Some(config) = config.take() else {
            return;
        };

        match InitializedAppRunner::new(event_loop, config) {
            Ok(init_self) => self.state = RunnerState::Initialized(init_self),
            Err(err) => {
                error!("{err}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let RunnerState::Initialized(init_self) = &mut self.state else {
            return;
        };

        let now = Instant::now();
        let delta_time = now.duration_since(init_self.last_instant);
        init_self.last_instant = now;

        handle_appflow!(
            event_loop,
            init_self.app.update(
                delta_time,
                AppContext {
                    window: &init_self.window,
                    device: &init_self.device,
                    queue: &init_self.queue,
                    surface_format: init_self.surface_config.format,
                },
            )
        );

        init_self.window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let RunnerState::Initialized(init_self) = &mut self.state else {
            return;
        };

        init_self.fsswitch_window_event(&event);

        let app_event = match &event {
            WindowEvent::CloseRequested => AppEvent::CloseRequested,
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                init_self.surface_config.width = size.width;
                init_self.surface_config.height = size.height;

                init_self
                    .surface
                    .configure(&init_self.device, &init_self.surface_config);

                AppEvent::Resized {
                    width: size.width,
                    height: size.height,
                }
            }
            WindowEvent::KeyboardInput {
                device_id: _,
                event,
                is_synthetic: _,
            } => AppEvent::Key(event),
            _ => AppEvent::UnhandledWindowEvent(&event),
        };

        handle_appflow!(
            event_loop,
            init_self.app.event(
                app_event,
                AppContext {
                    window: &init_self.window,
                    device: &init_self.device,
                    queue: &init_self.queue,
                    surface_format: init_self.surface_config.format,
                },
            )
        );

        if let WindowEvent::RedrawRequested = &event {
            init_self.redraw();
        }
    }
}

impl<T: AppHandler> InitializedAppRunner<T> {
    fn new(event_loop: &ActiveEventLoop, config: T::Config) -> Result<Self, AppError> {
        let window = Arc::new(event_loop.create_window(T::window_attributes(&config))?);

        let instance = Instance::default();

        let adapter =
            pollster::block_on(instance.request_adapter(&RequestAdapterOptions::default()))?;

        info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) =
            pollster::block_on(adapter.request_device(&DeviceDescriptor::default()))?;

        let surface = instance.create_surface(window.clone())?;

        let surface_config = surface
            .get_default_config(
                &adapter,
                window.inner_size().width.max(1),
                window.inner_size().height.max(1),
            )
            .ok_or(AppError::UnsupportedSurface)?;

        surface.configure(&device, &surface_config);

        let app = T::new(
            config,
            AppContext {
                window: &window,
                device: &device,
                queue: &queue,
                surface_format: surface_config.format,
            },
        )?;

        let last_instant = Instant::now();

        Ok(Self {
            window,
            device,
            queue,
            surface,
            surface_config,
            alt_left_is_held: false,
            alt_right_is_held: false,
            app,
            last_instant,
        })
    }

    fn redraw(&mut self) {
        let texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                return;
            }
            Err(err) => {
                warn!("skipping frame: {err}");
                return;
            }
        };

        let output = texture
            .texture
            .create_view(&TextureViewDescriptor::default());

        self.app.draw(
            &output,
            AppContext {
                window: &self.window,
                device: &self.device,
                queue: &self.queue,
                surface_format: self.surface_config.format,
            },
        );

        self.window.pre_present_notify();
        texture.present();

        if let Err(err) = self.device.poll(PollType::Poll) {
            warn!("device poll failed: {err}");
        }
    }

    fn fsswitch_window_event(&mut self, event: &WindowEvent) {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return;
        };

        if event.repeat {
            return;
        }

        let PhysicalKey::Code(keycode) = event.physical_key else {
            return;
        };

        match keycode {
            KeyCode::AltLeft => self.alt_left_is_held = event.state.is_pressed(),
            KeyCode::AltRight => self.alt_right_is_held = event.state.is_pressed(),

            KeyCode::Enter if event.state.is_pressed() => {
                if self.alt_left_is_held || self.alt_right_is_held {
                    match self.window.fullscreen() {
                        Some(_) => self.window.set_fullscreen(None),
                        None => self
                            .window
                            .set_fullscreen(Some(Fullscreen::Borderless(None))),
                    }
                }
            }

            _ => {}
        }
    }
}

macro_rules! handle_appflow {
    ($event_loop:expr, $flow:expr) => {
        match $flow {
            AppFlow::Continue => {}
            AppFlow::Exit => {
                $event_loop.exit();
                return;
            }
        }
    };
}

use handle_appflow;
