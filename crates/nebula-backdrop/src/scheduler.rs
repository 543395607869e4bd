//! Frame loop state machine.
//!
//! `Idle -> Scheduled(handle) -> ... -> Stopped`. Exactly one handle is
//! outstanding while scheduled; `Stopped` is terminal.

use nebula_engine::core::{FrameHandle, Host};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SchedulerState {
    Idle,
    Scheduled(FrameHandle),
    Stopped,
}

#[derive(Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    issued: u64,
    cancelled: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Idle,
            issued: 0,
            cancelled: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[inline]
    pub fn pending(&self) -> Option<FrameHandle> {
        match self.state {
            SchedulerState::Scheduled(h) => Some(h),
            _ => None,
        }
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.state == SchedulerState::Stopped
    }

    /// Frame handles requested from the host so far.
    #[inline]
    pub fn issued(&self) -> u64 {
        self.issued
    }

    #[inline]
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }

    /// Whether a frame delivered with `handle` is the one this scheduler is
    /// waiting for. Consumes the pending handle on success.
    pub fn accept(&mut self, handle: FrameHandle) -> bool {
        match self.state {
            SchedulerState::Scheduled(pending) if pending == handle => {
                self.state = SchedulerState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Requests the next frame, replacing the stored handle.
    ///
    /// Returns `None` once stopped.
    pub fn schedule<H: Host>(&mut self, host: &mut H) -> Option<FrameHandle> {
        if self.is_stopped() {
            return None;
        }

        if let SchedulerState::Scheduled(prev) = self.state {
            host.cancel_frame(prev);
            self.cancelled += 1;
        }

        let handle = host.request_frame();
        self.issued += 1;
        self.state = SchedulerState::Scheduled(handle);
        Some(handle)
    }

    /// Cancels the pending frame, if any, and enters `Stopped`.
    ///
    /// Returns `true` on the transition, `false` if already stopped.
    pub fn stop<H: Host>(&mut self, host: &mut H) -> bool {
        match std::mem::replace(&mut self.state, SchedulerState::Stopped) {
            SchedulerState::Stopped => false,
            SchedulerState::Scheduled(handle) => {
                host.cancel_frame(handle);
                self.cancelled += 1;
                true
            }
            SchedulerState::Idle => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeHost;

    #[test]
    fn schedule_then_accept() {
        let mut host = FakeHost::new(800.0, 600.0, 1.0);
        let mut s = FrameScheduler::new();
        assert_eq!(s.state(), SchedulerState::Idle);

        let h = s.schedule(&mut host).unwrap();
        assert_eq!(s.pending(), Some(h));
        assert_eq!(host.journal().outstanding.len(), 1);

        let fired = host.fire_frame().unwrap();
        assert_eq!(fired, h);
        assert!(s.accept(fired));
        assert_eq!(s.state(), SchedulerState::Idle);
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut host = FakeHost::new(800.0, 600.0, 1.0);
        let mut s = FrameScheduler::new();

        let first = s.schedule(&mut host).unwrap();
        let second = s.schedule(&mut host).unwrap();
        assert_ne!(first, second);
        assert_eq!(host.journal().outstanding, vec![second]);

        assert!(!s.accept(first));
        assert!(s.accept(second));
        assert!(!s.accept(second));
    }

    #[test]
    fn stop_cancels_and_is_terminal() {
        let mut host = FakeHost::new(800.0, 600.0, 1.0);
        let mut s = FrameScheduler::new();
        let h = s.schedule(&mut host).unwrap();

        assert!(s.stop(&mut host));
        assert!(!s.stop(&mut host));
        assert!(s.is_stopped());
        assert_eq!(host.journal().cancelled, vec![h]);
        assert!(host.journal().outstanding.is_empty());

        assert_eq!(s.schedule(&mut host), None);
        assert!(!s.accept(h));
        assert_eq!(s.issued(), 1);
        assert_eq!(s.cancelled(), 1);
    }

    #[test]
    fn stop_from_idle() {
        let mut host = FakeHost::new(800.0, 600.0, 1.0);
        let mut s = FrameScheduler::new();
        assert!(s.stop(&mut host));
        assert!(host.journal().cancelled.is_empty());
    }
}
