//! Oscilloscope sampling - ring buffer, interval gate, and trigger.
//!
//! The sampler only runs while the oscilloscope is active. Each due tick
//! either captures the primary reading into the ring and yields a
//! [`Frame`] to draw, or, when the trigger is armed and the reading is
//! below the level, captures nothing and retries on the next tick.
//!
//! Channel 2 has no history: a frame carries the one current secondary
//! reading, which the renderer draws as a flat line.

use crate::clock::{has_elapsed, Millis};
use crate::config::{ADC_MAX, SAMPLE_BUFFER_LEN, WAVE_BOTTOM_Y, WAVE_TOP_Y};
use crate::settings::ScopeSettings;

/// Analog inputs of the test bed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogChannel {
    /// Channel 1 (ADC0).
    Primary,
    /// Channel 2 (ADC1).
    Secondary,
}

/// Source of raw analog readings in `0..=ADC_MAX`.
pub trait AnalogSource {
    fn read_raw(&mut self, channel: AnalogChannel) -> u16;
}

/// Fixed-capacity circular buffer, overwritten oldest-first.
#[derive(Clone, Debug)]
pub struct SampleRing<const N: usize> {
    samples: [u16; N],
    cursor: usize,
}

/// The primary-channel history drawn by the oscilloscope screen.
pub type SampleBuffer = SampleRing<SAMPLE_BUFFER_LEN>;

impl<const N: usize> SampleRing<N> {
    pub const fn new() -> Self {
        Self {
            samples: [0; N],
            cursor: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Slot the next write lands in; also the oldest sample.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Overwrite the oldest slot with `value`.
    pub fn push(&mut self, value: u16) {
        self.samples[self.cursor] = value;
        self.cursor = (self.cursor + 1) % N;
    }

    /// Sample at logical position `i`, where 0 is the oldest.
    pub fn get(&self, i: usize) -> u16 {
        self.samples[(self.cursor + i) % N]
    }

    /// All slots, oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        (0..N).map(move |i| self.get(i))
    }
}

impl<const N: usize> Default for SampleRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Readings from the tick that produced a redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub primary: u16,
    pub secondary: u16,
}

/// Interval- and trigger-gated capture into the sample ring.
#[derive(Clone, Debug)]
pub struct Sampler {
    ring: SampleBuffer,
    interval_ms: Millis,
    last_sample: Option<Millis>,
}

impl Sampler {
    pub fn new(interval_ms: Millis) -> Self {
        Self {
            ring: SampleBuffer::new(),
            interval_ms,
            last_sample: None,
        }
    }

    pub fn ring(&self) -> &SampleBuffer {
        &self.ring
    }

    /// Make the next tick due immediately (used when the scope starts).
    pub fn restart(&mut self) {
        self.last_sample = None;
    }

    pub fn is_due(&self, now: Millis) -> bool {
        match self.last_sample {
            Some(at) => has_elapsed(now, at, self.interval_ms),
            None => true,
        }
    }

    /// Capture one sample if due and the trigger allows it.
    pub fn tick(
        &mut self,
        now: Millis,
        primary: u16,
        secondary: u16,
        settings: &ScopeSettings,
    ) -> Option<Frame> {
        if !self.is_due(now) {
            return None;
        }

        if settings.trigger_enabled() && primary < settings.trigger_level() {
            return None;
        }

        self.ring.push(primary);
        self.last_sample = Some(now);
        Some(Frame { primary, secondary })
    }
}

/// Screen row for a raw reading: `0` → bottom of the plot, `ADC_MAX` → top.
pub fn reading_to_row(value: u16) -> i32 {
    i32::from(value) * (WAVE_TOP_Y - WAVE_BOTTOM_Y) / i32::from(ADC_MAX) + WAVE_BOTTOM_Y
}
