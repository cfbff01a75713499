//! SSD1306 OLED display wrapper.
//!
//! Implements the library's [`Canvas`] on top of the buffered graphics
//! mode: every draw call lands in RAM and `flush` pushes the frame over
//! I²C in one go.

use defmt::warn;
use display_interface::DisplayError;
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use embassy_time::{block_for, Duration};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use pico_testbed::config::{CHAR_WIDTH, DISPLAY_I2C_ADDRESS};
use pico_testbed::retry::RetryPolicy;
use pico_testbed::ui::{bring_up, Canvas, Panel};
use pico_testbed::Error;

/// Pause between failed bring-up attempts.
const INIT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
///
/// Each failed attempt is logged; `policy` decides when to give up.
/// Under [`RetryPolicy::Forever`] this only returns once the panel is up.
pub fn init<I2C>(i2c: I2C, policy: RetryPolicy) -> Result<OledCanvas<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDRESS);
    let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();

    let mut canvas = OledCanvas {
        display,
        cursor: Point::zero(),
    };
    bring_up(&mut canvas, policy)?;
    Ok(canvas)
}

/// Log a failed bring-up step and back off before the next attempt.
fn bring_up_failed(step: &str, e: DisplayError) -> Error {
    warn!("SSD1306 {} failed: {:?}", step, defmt::Debug2Format(&e));
    block_for(INIT_RETRY_DELAY);
    Error::Display
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_5X8)
        .text_color(BinaryColor::On)
        .build()
}

/// Buffered OLED plus the text cursor.
pub struct OledCanvas<I2C> {
    display: Display<I2C>,
    cursor: Point,
}

impl<I2C> Panel for OledCanvas<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type Error = Error;

    fn init(&mut self) -> Result<(), Error> {
        self.display
            .init()
            .map_err(|e| bring_up_failed("init", e))
    }

    fn blank(&mut self) -> Result<(), Error> {
        self.display.clear_buffer();
        self.display
            .flush()
            .map_err(|e| bring_up_failed("flush", e))
    }
}

impl<I2C> Canvas for OledCanvas<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) {
        self.display.clear_buffer();
        self.cursor = Point::zero();
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn print(&mut self, text: &str) {
        let _ = Text::with_baseline(text, self.cursor, text_style(), Baseline::Top)
            .draw(&mut self.display);
        self.cursor.x += text.len() as i32 * CHAR_WIDTH;
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let _ = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.display);
    }

    fn flush(&mut self) {
        if let Err(e) = self.display.flush() {
            warn!("display flush failed: {:?}", defmt::Debug2Format(&e));
        }
    }
}
