//! Native window host.
//!
//! [`Backdrop`] opens a window, mounts a [`Background`] rendering into a
//! [`PixelCanvas`] and presents it every frame. The window plays the host:
//! frame requests become redraw requests, window resizes are forwarded while
//! the background listens, and `T` toggles the theme flag.
//!
//! ```ignore
//! use starfield::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Backdrop::new()
//!         .with_title("starfield")
//!         .with_theme(Theme::Dark)
//!         .run()
//! }
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::background::Background;
use crate::config::FieldConfig;
use crate::error::RunError;
use crate::gpu::Presenter;
use crate::host::{FrameHandle, Host, ListenerHandle, ThemeFlag};
use crate::palette::Theme;
use crate::raster::PixelCanvas;

const TITLE_REFRESH: Duration = Duration::from_secs(1);

/// Builder for a windowed particle background.
///
/// Configure with method chaining, then call [`run`](Backdrop::run).
pub struct Backdrop {
    title: String,
    size: (u32, u32),
    theme: ThemeFlag,
    config: FieldConfig,
    seed: Option<u64>,
    click_through: bool,
}

impl Backdrop {
    /// A 1280x720 dark backdrop with the default field.
    pub fn new() -> Self {
        Self {
            title: "starfield".to_string(),
            size: (1280, 720),
            theme: ThemeFlag::new(Theme::Dark),
            config: FieldConfig::default(),
            seed: None,
            click_through: false,
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial logical window size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Set the initial theme.
    pub fn with_theme(self, theme: Theme) -> Self {
        self.theme.set(theme);
        self
    }

    /// Share an existing theme flag, so the caller can recolor the field.
    pub fn with_theme_flag(mut self, flag: ThemeFlag) -> Self {
        self.theme = flag;
        self
    }

    /// Set the field configuration.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the particle field deterministically.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Let pointer input pass through the window.
    pub fn with_click_through(mut self, enabled: bool) -> Self {
        self.click_through = enabled;
        self
    }

    /// The theme flag the backdrop reads every frame.
    pub fn theme_flag(&self) -> ThemeFlag {
        self.theme.clone()
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

/// Host services backed by a winit window.
///
/// At most one frame is outstanding at a time; a request becomes a redraw
/// request and the handle is delivered on the next `RedrawRequested`.
struct WindowHost {
    window: Arc<Window>,
    next_id: Cell<u64>,
    pending: Cell<Option<FrameHandle>>,
    listener: Cell<Option<ListenerHandle>>,
}

impl WindowHost {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: Cell::new(1),
            pending: Cell::new(None),
            listener: Cell::new(None),
        }
    }

    fn take_frame(&self) -> Option<FrameHandle> {
        self.pending.take()
    }

    fn listening(&self) -> bool {
        self.listener.get().is_some()
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl Host for WindowHost {
    fn viewport(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn request_frame(&self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.pending.set(Some(handle));
        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if self.pending.get() == Some(handle) {
            self.pending.set(None);
        }
    }

    fn add_resize_listener(&self) -> ListenerHandle {
        let handle = ListenerHandle(self.next_id());
        self.listener.set(Some(handle));
        handle
    }

    fn remove_resize_listener(&self, handle: ListenerHandle) {
        if self.listener.get() == Some(handle) {
            self.listener.set(None);
        }
    }
}

struct App {
    options: Backdrop,
    window: Option<Arc<Window>>,
    host: Option<Rc<WindowHost>>,
    presenter: Option<Presenter>,
    background: Option<Background<Rc<WindowHost>, PixelCanvas>>,
    error: Option<RunError>,
    title_updated: Instant,
}

impl App {
    fn new(options: Backdrop) -> Self {
        Self {
            options,
            window: None,
            host: None,
            presenter: None,
            background: None,
            error: None,
            title_updated: Instant::now(),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let (width, height) = self.options.size;
        let attrs = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(LogicalSize::new(width, height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        if self.options.click_through {
            if let Err(e) = window.set_cursor_hittest(false) {
                log::warn!("click-through unsupported on this platform: {}", e);
            }
        }

        let presenter = pollster::block_on(Presenter::new(window.clone()))?;
        let host = Rc::new(WindowHost::new(window.clone()));
        let canvas = PixelCanvas::new(0, 0);
        let theme = self.options.theme.clone();
        let config = self.options.config.clone();

        let background = match self.options.seed {
            Some(seed) => {
                Background::mount_with_seed(host.clone(), Some(canvas), theme, config, seed)?
            }
            None => Background::mount(host.clone(), Some(canvas), theme, config)?,
        };

        self.window = Some(window);
        self.host = Some(host);
        self.presenter = Some(presenter);
        self.background = Some(background);
        self.present(event_loop);
        Ok(())
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        // Unmount before the presenter and window go away.
        self.background.take();
        self.presenter.take();
        event_loop.exit();
    }

    fn present(&mut self, event_loop: &ActiveEventLoop) {
        let result = match (&mut self.presenter, &self.background) {
            (Some(presenter), Some(background)) => presenter.present(background.surface()),
            _ => return,
        };
        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.reconfigure();
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, stopping");
                self.stop(event_loop);
            }
            Err(e) => log::error!("render error: {}", e),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(host), Some(background)) = (&self.host, &mut self.background) else {
            return;
        };
        let Some(frame) = host.take_frame() else {
            return;
        };
        background.on_frame(frame);
        self.present(event_loop);
        self.refresh_title();
    }

    fn refresh_title(&mut self) {
        if self.title_updated.elapsed() < TITLE_REFRESH {
            return;
        }
        self.title_updated = Instant::now();
        let (Some(window), Some(background)) = (&self.window, &self.background) else {
            return;
        };
        let fps = background.clock().fps();
        let stats = background.last_stats();
        log::debug!(
            "{:.1} fps, {} particles, {} links",
            fps,
            stats.particles,
            stats.links
        );
        window.set_title(&format!("{} ({:.0} fps)", self.options.title, fps));
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.logical_key {
            Key::Named(NamedKey::Escape) => self.stop(event_loop),
            Key::Character(c) if c.eq_ignore_ascii_case("t") => {
                let theme = self.options.theme.toggle();
                log::info!("theme switched to {:?}", theme);
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            log::error!("failed to start backdrop: {}", e);
            self.error = Some(e);
            self.stop(event_loop);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.stop(event_loop),
            WindowEvent::KeyboardInput { event, .. } => self.on_key(event_loop, event),
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(size.width, size.height);
                }
                let listening = self.host.as_ref().is_some_and(|h| h.listening());
                if let (true, Some(background)) = (listening, &mut self.background) {
                    background.on_resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.background.take();
    }
}
