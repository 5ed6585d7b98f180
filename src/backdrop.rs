//! Window host: the [`Backdrop`] builder and its winit event handler.
//!
//! ```ignore
//! use aurora_backdrop::prelude::*;
//!
//! Backdrop::new()
//!     .with_title("Portfolio")
//!     .with_params(ParamSet::load("tuned.json")?)
//!     .run()?;
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::compositor::{Compositor, Frame};
use crate::console::Console;
use crate::error::BackdropError;
use crate::gpu::GpuState;
use crate::params::ParamSet;
use crate::stage::Stage;
use crate::time::FrameClock;
use crate::viewport::{InputOutcome, DEFAULT_SCROLL_EXTENT};

#[cfg(feature = "egui")]
use crate::gpu::ConsoleOverlay;

/// Builder for a window running the aurora backdrop.
pub struct Backdrop {
    params: ParamSet,
    title: String,
    size: (u32, u32),
    background: [f32; 3],
    scroll_extent: f32,
    seed: Option<u64>,
}

impl Backdrop {
    pub fn new() -> Self {
        Self {
            params: ParamSet::default(),
            title: "Aurora".to_string(),
            size: (1280, 720),
            background: [0.02, 0.02, 0.05],
            scroll_extent: DEFAULT_SCROLL_EXTENT,
            seed: None,
        }
    }

    /// Start with these parameters instead of the built-in defaults.
    pub fn with_params(mut self, params: ParamSet) -> Self {
        self.params = params;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Clear color behind the aurora, as RGB in 0.0-1.0.
    pub fn with_background(mut self, rgb: [f32; 3]) -> Self {
        self.background = rgb;
        self
    }

    /// How far the mouse wheel can scroll the virtual page, in pixels.
    pub fn with_scroll_extent(mut self, extent: f32) -> Self {
        self.scroll_extent = extent;
        self
    }

    /// Spawn entities from a fixed seed, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), BackdropError> {
        let mut stage = Stage::new(self.params)?.with_scroll_extent(self.scroll_extent);
        if let Some(seed) = self.seed {
            stage = stage.with_seed(seed);
        }

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            title: self.title,
            size: self.size,
            background: self.background,
            window: None,
            gpu_state: None,
            #[cfg(feature = "egui")]
            overlay: None,
            stage,
            frame: Frame::new(),
            clock: FrameClock::new(),
            console: Console::new(),
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    title: String,
    size: (u32, u32),
    background: [f32; 3],
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    #[cfg(feature = "egui")]
    overlay: Option<ConsoleOverlay>,
    stage: Stage,
    frame: Frame,
    clock: FrameClock,
    console: Console,
    error: Option<BackdropError>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: BackdropError) {
        log::error!("{}", error);
        self.stage.unmount();
        self.error = Some(error);
        event_loop.exit();
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<(), BackdropError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), self.background))?;

        #[cfg(feature = "egui")]
        {
            self.overlay = Some(ConsoleOverlay::new(
                gpu_state.device(),
                gpu_state.format(),
                &window,
            ));
        }

        let size = window.inner_size();
        self.stage.mount(size.width as f32, size.height as f32)?;
        self.clock.reset();

        window.request_redraw();
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    /// Advance the scene, draw it and schedule the next frame.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if !self.stage.frame() {
            return;
        }
        if let Some(scene) = self.stage.scene() {
            Compositor::compose(scene, &mut self.frame);
        }
        self.clock.tick();

        match self.present(&window) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.reconfigure();
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, stopping");
                self.stage.unmount();
                event_loop.exit();
            }
            Err(e) => log::warn!("dropped frame: {}", e),
        }

        if self.stage.has_pending_frame() {
            window.request_redraw();
        }
    }

    fn present(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let Some(gpu_state) = self.gpu_state.as_mut() else {
            return Ok(());
        };

        #[cfg(feature = "egui")]
        if let Some(console) = self.overlay.as_mut() {
            let mut draft = self.stage.params().clone();
            let (action, overlay) =
                console.run(window, &mut self.console, &mut draft, self.clock.fps());

            // The new scene shows up from the next frame on
            if action.requires_restart() && self.stage.set_params(draft).is_ok() {
                log::debug!("restarted animation from console ({:?})", action);
            }

            return gpu_state.render_with_overlay(&self.frame, console, &overlay);
        }

        #[cfg(not(feature = "egui"))]
        let _ = window;

        gpu_state.render(&self.frame)
    }

    /// Whether the console claimed this event.
    #[cfg(feature = "egui")]
    fn console_consumes(&mut self, event: &WindowEvent) -> bool {
        match (&mut self.overlay, &self.window) {
            (Some(overlay), Some(window)) => {
                overlay.claims(window, event, self.console.is_visible())
            }
            _ => false,
        }
    }

    #[cfg(not(feature = "egui"))]
    fn console_consumes(&mut self, _event: &WindowEvent) -> bool {
        false
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.open(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = self.console_consumes(&event);

        match event {
            WindowEvent::CloseRequested => {
                self.stage.unmount();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                self.stage.handle_event(&event);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ if consumed => {}
            _ => {
                if self.stage.handle_event(&event) == InputOutcome::ToggleConsole {
                    self.console.toggle();
                }
            }
        }
    }
}
