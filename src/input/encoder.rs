//! Rotary encoder adapter - position counter → rate-limited direction.
//!
//! The rate limit is UI throttling, not debounce: the quadrature
//! decoder already rejects contact bounce. A movement seen inside the
//! window is left unaccepted so the next poll reads it again.

use super::{Direction, PositionCounter};
use crate::clock::{has_elapsed, Millis};

pub struct EncoderAdapter<C> {
    counter: C,
    rate_limit_ms: Millis,
    last_position: i32,
    last_accepted: Option<Millis>,
}

impl<C: PositionCounter> EncoderAdapter<C> {
    /// Wrap `counter`, treating its current position as the origin.
    pub fn new(counter: C, rate_limit_ms: Millis) -> Self {
        let last_position = counter.position();
        Self {
            counter,
            rate_limit_ms,
            last_position,
            last_accepted: None,
        }
    }

    /// Tick the counter and report the direction of any accepted movement.
    ///
    /// Several detents between two accepted polls still yield a single
    /// event.
    pub fn poll(&mut self, now: Millis) -> Option<Direction> {
        self.counter.tick();
        let position = self.counter.position();
        if position == self.last_position {
            return None;
        }

        if let Some(at) = self.last_accepted {
            if !has_elapsed(now, at, self.rate_limit_ms) {
                return None;
            }
        }

        let direction = if position > self.last_position {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        self.last_position = position;
        self.last_accepted = Some(now);
        Some(direction)
    }

    /// Last accepted position.
    pub fn position(&self) -> i32 {
        self.last_position
    }

    pub fn counter_mut(&mut self) -> &mut C {
        &mut self.counter
    }
}
