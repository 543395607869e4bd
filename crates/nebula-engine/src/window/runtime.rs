use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::{SurfaceSize, Viewport};
use crate::core::{App, AppControl, FrameHandle, Host, ListenerId};
use crate::device::GpuInit;
use crate::input::{InputEvent, ListenerKind, PointerMoveEvent};
use crate::render::GpuSurface;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Ask the compositor for a window with an alpha channel.
    pub transparent: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "nebula".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            transparent: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, mounts `app` on it and runs until the window closes.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App<WindowHost> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

/// `Host` implementation backed by a winit window.
///
/// Frame callbacks map onto `request_redraw`: one handle is pending at a time
/// and a `RedrawRequested` without a pending handle does not reach the app.
pub struct WindowHost {
    window: Arc<Window>,
    gpu_init: GpuInit,
    surface_attached: bool,

    next_frame: u64,
    pending_frame: Option<FrameHandle>,

    next_listener: u64,
    listeners: HashMap<ListenerId, ListenerKind>,
}

impl WindowHost {
    fn new(window: Arc<Window>, gpu_init: GpuInit) -> Self {
        Self {
            window,
            gpu_init,
            surface_attached: false,
            next_frame: 0,
            pending_frame: None,
            next_listener: 0,
            listeners: HashMap::new(),
        }
    }

    fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.values().any(|&k| k == kind)
    }

    fn take_due_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }

    fn to_logical(&self, pos: PhysicalPosition<f64>) -> (f32, f32) {
        let logical = pos.to_logical::<f64>(self.window.scale_factor());
        (logical.x as f32, logical.y as f32)
    }
}

impl Host for WindowHost {
    type Surface = GpuSurface;

    fn anchor_size(&self) -> Viewport {
        let logical: LogicalSize<f64> = self.window.inner_size().to_logical(self.window.scale_factor());
        Viewport::new(logical.width as f32, logical.height as f32)
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.window.scale_factor() as f32
    }

    fn attach_surface(&mut self, size: SurfaceSize) -> Result<GpuSurface> {
        anyhow::ensure!(!self.surface_attached, "anchor already has a rendering surface");

        let surface = pollster::block_on(GpuSurface::new(
            self.window.clone(),
            size,
            self.gpu_init.clone(),
        ))
        .context("failed to create rendering surface")?;

        self.surface_attached = true;
        log::debug!("surface attached ({}x{})", size.width, size.height);
        Ok(surface)
    }

    fn detach_surface(&mut self) {
        if std::mem::replace(&mut self.surface_attached, false) {
            log::debug!("surface detached");
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_frame = self.next_frame.wrapping_add(1);
        let handle = FrameHandle::new(self.next_frame);

        if let Some(stale) = self.pending_frame.replace(handle) {
            log::trace!("frame {} superseded by {}", stale.raw(), handle.raw());
        }

        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        self.next_listener = self.next_listener.wrapping_add(1);
        let id = ListenerId::new(self.next_listener);
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

struct AppState<A>
where
    A: App<WindowHost> + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    host: Option<WindowHost>,
    window_id: Option<WindowId>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App<WindowHost> + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            host: None,
            window_id: None,
            exit_requested: false,
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_transparent(self.config.transparent);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        self.window_id = Some(window.id());
        let host = self
            .host
            .insert(WindowHost::new(Arc::new(window), self.gpu_init.clone()));

        self.app.mount(host).context("mount failed")
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(host) = self.host.as_mut() {
            self.app.unmount(host);
        }
        self.host = None;
        self.exit_requested = true;
        event_loop.exit();
    }

    fn dispatch(&mut self, event: InputEvent) -> AppControl {
        let Some(host) = self.host.as_mut() else {
            return AppControl::Continue;
        };
        if !host.is_listening(event.kind()) {
            return AppControl::Continue;
        }
        self.app.on_event(host, &event)
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App<WindowHost> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.open(event_loop) {
            log::error!("failed to start: {e:#}");
            self.shutdown(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Redraws are driven by `Host::request_frame`, not by the loop.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested || self.window_id != Some(window_id) {
            return;
        }

        let control = match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
                return;
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.dispatch(InputEvent::Resized)
            }

            WindowEvent::CursorMoved { position, .. } => {
                let Some(host) = self.host.as_ref() else { return };
                let (x, y) = host.to_logical(position);
                self.dispatch(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
            }

            WindowEvent::RedrawRequested => {
                let Some(host) = self.host.as_mut() else { return };
                match host.take_due_frame() {
                    Some(handle) => self.app.on_frame(host, handle),
                    None => AppControl::Continue,
                }
            }

            _ => AppControl::Continue,
        };

        if control == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(host) = self.host.as_mut() {
            self.app.unmount(host);
        }
        self.host = None;
    }
}
