//! Frame scheduling and timing utilities.
//!
//! Drives the animation engine at a fixed cadence without async/await or
//! platform-specific timers. The caller is responsible for sleeping/waiting
//! between frames. The scheduler also owns the persistent frame buffer the
//! engine accumulates into, and applies pending mode strings at the start of
//! each tick.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::color::Rgb;
use crate::engine::AnimationEngine;
use crate::mailbox::ModeReceiver;

/// Default frame duration (5 FPS; the mode animations are slow-moving).
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(200);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler.
///
/// This scheduler:
/// - Applies newly delivered mode strings before rendering
/// - Tracks frame timing with drift correction
/// - Calls the engine and output driver
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::<_, 60>::new(driver, modes.receiver());
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, const MAX_LEDS: usize> {
    output: O,
    engine: AnimationEngine,
    modes: ModeReceiver<'a>,
    frame: [Rgb; MAX_LEDS],
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver, const MAX_LEDS: usize> FrameScheduler<'a, O, MAX_LEDS> {
    /// Create a new frame scheduler.
    ///
    /// Uses [`DEFAULT_FRAME_DURATION`] for frame timing.
    pub fn new(driver: O, modes: ModeReceiver<'a>) -> Self {
        Self::with_frame_duration(driver, modes, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        driver: O,
        modes: ModeReceiver<'a>,
        frame_duration: Duration,
    ) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let strip_len = MAX_LEDS.min(usize::from(u16::MAX)) as u16;
        Self {
            output: driver,
            engine: AnimationEngine::new(strip_len),
            modes,
            frame: [Rgb::default(); MAX_LEDS],
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies a pending mode string, if one was delivered
    /// 2. Applies drift correction if we've fallen too far behind
    /// 3. Renders the current frame and advances the animation
    /// 4. Writes to the output driver
    /// 5. Returns the deadline for the next frame
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        self.apply_pending_mode();

        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift_ms = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift_ms {
            self.next_frame = now;
        }

        // Render and output
        self.engine.tick(&mut self.frame);
        self.output.write(&self.frame);

        // Calculate next frame deadline
        self.next_frame += self.frame_duration;

        // Calculate sleep duration (may be zero if we're behind)
        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Apply a newly delivered mode string, keeping the previous
    /// configuration when the string is rejected.
    fn apply_pending_mode(&mut self) {
        let Some(raw) = self.modes.take() else {
            return;
        };
        match self.engine.apply_mode(raw.as_str()) {
            Ok(_changed) => {
                #[cfg(feature = "esp32-log")]
                if _changed {
                    println!("[mode] applied id={}", self.engine.mode_id().unwrap_or(0));
                }
            }
            Err(_err) => {
                #[cfg(feature = "esp32-log")]
                println!("[mode] rejected: {:?}", _err);
            }
        }
    }

    /// Get a reference to the engine.
    pub fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    /// Get a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut AnimationEngine {
        &mut self.engine
    }
}
