use anyhow::{Result, ensure};
use nebula_engine::core::{App, AppControl, FrameHandle, Host};
use nebula_engine::input::InputEvent;
use nebula_engine::render::RenderSurface;

use crate::config::BackdropConfig;
use crate::lifecycle::{Backdrop, TickOutcome};

/// Runs a [`Backdrop`] under any `Host`.
pub struct BackdropApp<S: RenderSurface> {
    config: BackdropConfig,
    backdrop: Option<Backdrop<S>>,
}

impl<S: RenderSurface> BackdropApp<S> {
    pub fn new(config: BackdropConfig) -> Self {
        Self { config, backdrop: None }
    }

    pub fn backdrop(&self) -> Option<&Backdrop<S>> {
        self.backdrop.as_ref()
    }
}

impl<H: Host> App<H> for BackdropApp<H::Surface> {
    fn mount(&mut self, host: &mut H) -> Result<()> {
        ensure!(self.backdrop.is_none(), "backdrop is already mounted");
        self.backdrop = Some(Backdrop::mount(host, self.config.clone())?);
        Ok(())
    }

    fn on_event(&mut self, host: &mut H, event: &InputEvent) -> AppControl {
        if let Some(b) = self.backdrop.as_mut() {
            b.on_event(host, event);
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, host: &mut H, handle: FrameHandle) -> AppControl {
        let Some(b) = self.backdrop.as_mut() else {
            return AppControl::Continue;
        };

        match b.tick(host, handle) {
            TickOutcome::Fatal => AppControl::Exit,
            _ => AppControl::Continue,
        }
    }

    fn unmount(&mut self, host: &mut H) {
        if let Some(mut b) = self.backdrop.take() {
            b.unmount(host);
        }
    }
}

#[cfg(test)]
mod tests {
    use nebula_engine::render::FrameStatus;

    use super::*;
    use crate::fake::{FakeHost, FakeSurface};

    fn app() -> BackdropApp<FakeSurface> {
        BackdropApp::new(BackdropConfig {
            seed: Some(3),
            ..BackdropConfig::default()
        })
    }

    #[test]
    fn drives_backdrop_through_host_callbacks() {
        let mut host = FakeHost::new(640.0, 480.0, 1.0);
        let mut app = app();

        app.mount(&mut host).unwrap();
        for _ in 0..9 {
            let h = host.fire_frame().unwrap();
            assert_eq!(app.on_frame(&mut host, h), AppControl::Continue);
        }
        assert_eq!(host.journal().renders, 10);

        app.unmount(&mut host);
        app.unmount(&mut host);
        assert!(app.backdrop().is_none());
        assert_eq!(host.journal().surfaces_disposed, 1);
        assert!(host.journal().outstanding.is_empty());
    }

    #[test]
    fn mounting_twice_is_rejected() {
        let mut host = FakeHost::new(640.0, 480.0, 1.0);
        let mut app = app();
        app.mount(&mut host).unwrap();
        assert!(app.mount(&mut host).is_err());
        assert_eq!(host.journal().surfaces_attached, 1);
    }

    #[test]
    fn fatal_surface_requests_exit() {
        let mut host = FakeHost::new(640.0, 480.0, 1.0);
        let mut app = app();
        app.mount(&mut host).unwrap();

        host.journal_mut().render_status = FrameStatus::Fatal;
        let h = host.fire_frame().unwrap();
        assert_eq!(app.on_frame(&mut host, h), AppControl::Exit);
    }

    #[test]
    fn failed_mount_leaves_app_unmounted() {
        let mut host = FakeHost::new(0.0, 0.0, 1.0);
        let mut app = app();
        assert!(app.mount(&mut host).is_err());
        assert!(app.backdrop().is_none());
        assert_eq!(app.on_frame(&mut host, nebula_engine::core::FrameHandle::new(1)), AppControl::Continue);
    }
}
