//! Animation engine
//!
//! Owns the current [`ModeConfig`] and the animation phase, and turns them
//! into per-pixel colors frame by frame. The engine never performs I/O; an
//! external loop feeds it mode strings and hands the rendered buffer to the
//! LED driver.

use crate::color::{Rgb, hue_to_rgb, mix};
use crate::mode::{ModeConfig, ModeError, PALETTE_SIZE};

/// Blend coefficient applied in gradient mode.
const GRADIENT_BLEND: f32 = 0.6;

/// Bring-up color shown before the first configuration arrives.
const AWAITING_COLOR: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Position of the animation inside its repeating cycle.
///
/// `step` wraps modulo [`ModeConfig::cycle_len`]; `speed_step` counts render
/// ticks until the next step advance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnimationPhase {
    pub step: u32,
    pub speed_step: u8,
}

/// The animation engine.
///
/// Rendering accumulates into the caller's frame buffer instead of
/// overwriting it: gradient mode moves each pixel a fraction of the way
/// toward its target color every frame, so the previous frame's values are
/// part of the animation state. Callers must pass the *same* buffer on every
/// tick for gradient blending to work.
#[derive(Debug, Clone)]
pub struct AnimationEngine {
    strip_len: u16,
    config: Option<ModeConfig>,
    phase: AnimationPhase,
}

impl AnimationEngine {
    /// Create an engine for a strip of `strip_len` pixels.
    ///
    /// The engine starts without a configuration and renders solid white
    /// until the first mode string is applied.
    pub const fn new(strip_len: u16) -> Self {
        Self {
            strip_len,
            config: None,
            phase: AnimationPhase {
                step: 0,
                speed_step: 0,
            },
        }
    }

    /// Currently applied mode id, if any.
    pub fn mode_id(&self) -> Option<u8> {
        self.config.as_ref().map(|config| config.mode_id)
    }

    /// Currently applied configuration, if any.
    pub fn config(&self) -> Option<&ModeConfig> {
        self.config.as_ref()
    }

    /// Current animation phase.
    pub const fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Decode a mode string and apply it.
    ///
    /// Returns `Ok(true)` when a new configuration replaced the current one,
    /// which also resets the phase. Redelivery of the current mode id is a
    /// no-op (`Ok(false)`): neither configuration nor phase change. A decode
    /// error leaves the previous configuration animating.
    pub fn apply_mode(&mut self, raw: &str) -> Result<bool, ModeError> {
        let previous = self.mode_id();
        match ModeConfig::decode(raw, previous, self.strip_len)? {
            Some(config) => {
                self.config = Some(config);
                self.phase = AnimationPhase::default();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Render the current frame into `frame`.
    ///
    /// `frame` must be the same buffer across calls; see the type docs.
    pub fn render(&self, frame: &mut [Rgb]) {
        let Some(config) = &self.config else {
            frame.fill(AWAITING_COLOR);
            return;
        };

        let space = config.color_space();
        for (i, led) in frame.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let position = self.phase.step + i as u32;
            let color_index = position / space;

            if config.rainbow {
                #[allow(clippy::cast_possible_truncation)]
                let hue = (color_index % space) as u16;
                *led = hue_to_rgb(hue);
            } else {
                *led = blend_pixel(config, *led, position, color_index);
            }
        }
    }

    /// Advance the animation by one render tick.
    ///
    /// `speed_step` gates the advance: the step counter only moves every
    /// `speed_divisor` ticks. Gradient mode jumps a whole segment per
    /// advance; otherwise the step moves by a single position.
    pub fn advance(&mut self) {
        let Some(config) = &self.config else {
            return;
        };

        self.phase.speed_step += 1;
        if self.phase.speed_step < config.speed_divisor {
            return;
        }
        self.phase.speed_step = 0;

        let increment = if config.gradient {
            u32::from(config.segment_size)
        } else {
            1
        };
        self.phase.step = (self.phase.step + increment) % config.cycle_len();
    }

    /// Process one render tick: render the frame, then advance the phase.
    pub fn tick(&mut self, frame: &mut [Rgb]) {
        self.render(frame);
        self.advance();
    }
}

/// Compute one palette-mode pixel, cross-faded toward the next segment.
///
/// Near a segment boundary the color is mixed with the upcoming segment's
/// color over a window of `segment_size / 3` positions. The result is then
/// accumulated onto the previous frame's value: fully in plain mode, at
/// [`GRADIENT_BLEND`] strength in gradient mode.
fn blend_pixel(config: &ModeConfig, current: Rgb, position: u32, color_index: u32) -> Rgb {
    let segment = u32::from(config.segment_size);
    let steps_to_next = segment / 3;
    let in_color_step = steps_to_next.min(segment - color_index % segment);
    let next_color_index = (position + segment) / config.color_space();

    #[allow(clippy::cast_precision_loss)]
    let mix_ratio = if steps_to_next == 0 {
        1.0
    } else {
        in_color_step as f32 / steps_to_next as f32
    };

    let color = config.palette[color_index as usize % PALETTE_SIZE];
    let next = config.palette[next_color_index as usize % PALETTE_SIZE];
    let target = Rgb {
        r: mix(color.r, next.r, mix_ratio),
        g: mix(color.g, next.g, mix_ratio),
        b: mix(color.b, next.b, mix_ratio),
    };

    let coefficient = if config.gradient { GRADIENT_BLEND } else { 1.0 };
    Rgb {
        r: accumulate(current.r, target.r, coefficient),
        g: accumulate(current.g, target.g, coefficient),
        b: accumulate(current.b, target.b, coefficient),
    }
}

/// Move a channel a fraction of the way from its previous value to `target`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn accumulate(current: u8, target: u8, coefficient: f32) -> u8 {
    let delta = (f32::from(target) - f32::from(current)) * coefficient;
    let moved = f32::from(current) + libm::roundf(delta);
    moved.clamp(0.0, 255.0) as u8
}
