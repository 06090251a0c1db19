#![no_std]

pub mod color;
pub mod engine;
pub mod frame_scheduler;
pub mod mailbox;
pub mod mode;

pub use color::{Hsv, Rgb};
pub use engine::{AnimationEngine, AnimationPhase};
pub use frame_scheduler::{DEFAULT_FRAME_DURATION, FrameResult, FrameScheduler};
pub use mailbox::{Mailbox, ModeMailbox, ModeReceiver, ModeSender, ModeString};
pub use mode::{ModeConfig, ModeError, PALETTE_SIZE};

pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The animation engine is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
