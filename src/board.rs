//! RP2040 board adapters - GPIO buttons, encoder lines, and the ADC.
//!
//! All inputs are active-low with internal pull-ups.

use defmt::warn;
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::Input;

use pico_testbed::input::{ButtonLevels, ButtonPins, PositionCounter, QuadratureDecoder};
use pico_testbed::scope::{AnalogChannel, AnalogSource};

/// Push-buttons and analog inputs.
pub struct Board {
    pub encoder_button: Input<'static>,
    pub back_buttons: [Input<'static>; 3],
    pub adc: Adc<'static, Blocking>,
    pub primary: Channel<'static>,
    pub secondary: Channel<'static>,
    /// Last good reading per channel, returned when a conversion fails.
    last: [u16; 2],
}

impl Board {
    pub fn new(
        encoder_button: Input<'static>,
        back_buttons: [Input<'static>; 3],
        adc: Adc<'static, Blocking>,
        primary: Channel<'static>,
        secondary: Channel<'static>,
    ) -> Self {
        Self {
            encoder_button,
            back_buttons,
            adc,
            primary,
            secondary,
            last: [0; 2],
        }
    }
}

impl ButtonPins for Board {
    fn levels(&mut self) -> ButtonLevels {
        ButtonLevels {
            encoder: self.encoder_button.is_low(),
            back: [
                self.back_buttons[0].is_low(),
                self.back_buttons[1].is_low(),
                self.back_buttons[2].is_low(),
            ],
        }
    }
}

impl AnalogSource for Board {
    fn read_raw(&mut self, channel: AnalogChannel) -> u16 {
        let (pin, slot) = match channel {
            AnalogChannel::Primary => (&mut self.primary, 0),
            AnalogChannel::Secondary => (&mut self.secondary, 1),
        };
        match self.adc.blocking_read(pin) {
            // 12-bit conversion scaled to the 10-bit range the UI works in.
            Ok(raw) => self.last[slot] = raw >> 2,
            Err(e) => warn!("ADC read on {:?} failed: {:?}", channel, defmt::Debug2Format(&e)),
        }
        self.last[slot]
    }
}

/// Encoder A/B lines feeding the quadrature decoder.
pub struct PinEncoder {
    a: Input<'static>,
    b: Input<'static>,
    decoder: QuadratureDecoder,
}

impl PinEncoder {
    pub fn new(a: Input<'static>, b: Input<'static>) -> Self {
        let decoder = QuadratureDecoder::new(a.is_high(), b.is_high());
        Self { a, b, decoder }
    }
}

impl PositionCounter for PinEncoder {
    fn tick(&mut self) {
        self.decoder.update(self.a.is_high(), self.b.is_high());
    }

    fn position(&self) -> i32 {
        self.decoder.position()
    }
}
