//! Frame timing.
//!
//! A `FrameClock` lives next to each frame loop and is ticked once per
//! rendered frame; animations read `FrameTime::elapsed_ms`.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
