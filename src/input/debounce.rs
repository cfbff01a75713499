//! Time-window debouncing of a single logical button.

use super::Edge;
use crate::clock::{has_elapsed, Millis};

/// Filters a raw pressed/released level into stable edges.
///
/// An edge is reported only after the raw level has held for the whole
/// window and differs from the last level reported.
#[derive(Clone, Debug)]
pub struct Debouncer {
    window_ms: Millis,
    last_raw: bool,
    changed_at: Millis,
    stable: bool,
}

impl Debouncer {
    /// Create a debouncer that starts out released.
    pub const fn new(window_ms: Millis) -> Self {
        Self {
            window_ms,
            last_raw: false,
            changed_at: 0,
            stable: false,
        }
    }

    /// Feed the current raw level (`true` = pressed).
    pub fn sample(&mut self, raw: bool, now: Millis) -> Option<Edge> {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.changed_at = now;
        }

        if raw == self.stable || !has_elapsed(now, self.changed_at, self.window_ms) {
            return None;
        }

        self.stable = raw;
        Some(if raw { Edge::Pressed } else { Edge::Released })
    }

    /// Last reported stable level.
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}
