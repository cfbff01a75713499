//! User input - push-buttons and the rotary encoder.
//!
//! Raw levels come from the board adapter each tick and are turned into
//! [`InputEvent`]s here:
//!
//! - **Encoder button**: one debounced input
//! - **Back buttons**: three switches OR-combined, then debounced as one
//! - **Encoder rotation**: position counter → rate-limited direction

pub mod debounce;
pub mod encoder;
pub mod quadrature;

pub use debounce::Debouncer;
pub use encoder::EncoderAdapter;
pub use quadrature::QuadratureDecoder;

/// A debounced transition of a push-button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

/// Rotation direction derived from consecutive encoder positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// `+1` for clockwise, `-1` for counter-clockwise.
    pub fn signum(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// One user interaction, consumed immediately by the mode state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    Encoder(Direction),
    EncoderButton(Edge),
    BackButtons(Edge),
}

/// Instantaneous pressed state of every push-button.
///
/// Already converted from the pins' active-low levels: `true` = pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLevels {
    pub encoder: bool,
    pub back: [bool; 3],
}

impl ButtonLevels {
    /// Logical "back" input: any of the three back buttons held.
    pub fn any_back(&self) -> bool {
        self.back.iter().any(|&pressed| pressed)
    }
}

/// Source of push-button levels (board GPIO in firmware, fakes in tests).
pub trait ButtonPins {
    fn levels(&mut self) -> ButtonLevels;
}

/// External quadrature counter wrapped by [`EncoderAdapter`].
pub trait PositionCounter {
    /// Sample the encoder lines and update the position.
    fn tick(&mut self);

    /// Current detent position; grows clockwise.
    fn position(&self) -> i32;
}
