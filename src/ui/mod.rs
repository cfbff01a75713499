//! User interface subsystem - OLED screens and the mode state machine.
//!
//! The controller reacts to debounced button edges and encoder
//! directions, owns the scope settings and sample buffer, and redraws the
//! active screen on a [`Canvas`] when something changed.
//!
//! ## Components
//!
//! - **Controller**: mode, selection cursor, oscilloscope-active flag
//! - **Render**: one full-frame draw function per screen
//! - **Input logic**: wrapping cursor movement

pub mod input_logic;
pub mod machine;
pub mod render;


pub use machine::Controller;

use crate::retry::RetryPolicy;

/// Screens (modes) the test bed can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Main menu - pick one of the three tools.
    Menu,
    /// Scrolling waveform of the primary analog input.
    Oscilloscope,
    /// Scope settings editor.
    Settings,
    /// Live push-button states.
    ButtonTest,
}

/// Entries of the main menu, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    Oscilloscope,
    Settings,
    ButtonTest,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Oscilloscope, MenuItem::Settings, MenuItem::ButtonTest];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Oscilloscope => "Oscilloscope",
            MenuItem::Settings => "Settings",
            MenuItem::ButtonTest => "Button Test",
        }
    }

    /// Mode entered when this item is chosen.
    pub fn mode(self) -> Mode {
        match self {
            MenuItem::Oscilloscope => Mode::Oscilloscope,
            MenuItem::Settings => Mode::Settings,
            MenuItem::ButtonTest => Mode::ButtonTest,
        }
    }
}

/// A change of mode, reported for the diagnostic log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
}

/// Monochrome pixel canvas the screens are drawn on.
///
/// Coordinates are pixels with the origin top-left. `print` draws at the
/// text cursor (top of the glyphs) and advances it past the text.
/// Nothing reaches the panel until `flush`.
pub trait Canvas {
    fn clear(&mut self);
    fn set_cursor(&mut self, x: i32, y: i32);
    fn print(&mut self, text: &str);
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);
    fn flush(&mut self);
}

/// Start-up steps of a display panel.
pub trait Panel {
    type Error;

    /// Send the controller's power-on command sequence.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Clear the frame buffer and push the blank frame to the panel.
    fn blank(&mut self) -> Result<(), Self::Error>;
}

/// Bring `panel` up to a blank screen.
///
/// A failure at any step restarts the whole sequence, so the panel is
/// never left initialised but unflushed.
pub fn bring_up<P: Panel>(panel: &mut P, policy: RetryPolicy) -> Result<(), P::Error> {
    policy.run(|| {
        panel.init()?;
        panel.blank()
    })
}
