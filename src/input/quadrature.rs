//! Quadrature decoder for a detented rotary encoder.
//!
//! Gray-code transitions of the A/B lines are accumulated as quarter
//! steps; the detent position is latched each time both lines return
//! high, which is the resting state of common 4-step-per-detent knobs.
//!
//! ```text
//! state = A | B << 1
//!
//! +1 sequence:  3 (A=1,B=1) → 1 (A=1,B=0) → 0 → 2 (A=0,B=1) → 3
//! -1 sequence:  3 → 2 → 0 → 1 → 3
//! ```

/// Quarter-step delta indexed by `old_state << 2 | new_state`.
/// Impossible double transitions count as zero.
const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

/// Both lines high - the mechanical detent.
const LATCH_STATE: u8 = 3;

#[derive(Clone, Debug)]
pub struct QuadratureDecoder {
    state: u8,
    quarter_steps: i32,
    position: i32,
}

impl QuadratureDecoder {
    /// Start from the current line levels.
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            state: line_state(a, b),
            quarter_steps: 0,
            position: 0,
        }
    }

    /// Feed the current line levels.
    pub fn update(&mut self, a: bool, b: bool) {
        let state = line_state(a, b);
        if state == self.state {
            return;
        }

        let index = ((self.state << 2) | state) as usize;
        self.quarter_steps += i32::from(TRANSITIONS[index]);
        self.state = state;

        if state == LATCH_STATE {
            self.position = self.quarter_steps >> 2;
        }
    }

    /// Detent position.
    pub fn position(&self) -> i32 {
        self.position
    }
}

fn line_state(a: bool, b: bool) -> u8 {
    u8::from(a) | (u8::from(b) << 1)
}
