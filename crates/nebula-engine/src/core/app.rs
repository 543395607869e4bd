use anyhow::Result;

use crate::input::InputEvent;

use super::host::{FrameHandle, Host};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Lifecycle contract implemented by mounted components.
pub trait App<H: Host> {
    /// Acquires resources on the host. An error is fatal to the component.
    fn mount(&mut self, host: &mut H) -> Result<()>;

    /// Called for events the component registered a listener for.
    fn on_event(&mut self, host: &mut H, event: &InputEvent) -> AppControl {
        let _ = (host, event);
        AppControl::Continue
    }

    /// Called when a frame requested through `Host::request_frame` fires.
    fn on_frame(&mut self, host: &mut H, handle: FrameHandle) -> AppControl;

    /// Releases everything acquired in `mount`. Must tolerate repeated calls.
    fn unmount(&mut self, host: &mut H);
}
