//! pico-testbed firmware
//!
//! Raspberry Pi Pico test bed: a 128×64 SSD1306 OLED menu driven by a
//! rotary encoder, with a low-rate two-channel oscilloscope, a settings
//! editor, and a live push-button tester.
//!
//! All interaction runs in the main task as a polling loop; the only
//! other task persists settings snapshots to flash.

#![no_std]
#![no_main]

mod board;
mod storage;
#[path = "ui/display.rs"]
mod display;

use defmt::{debug, info};
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_time::Instant;
use {defmt_rtt as _, panic_probe as _};

use pico_testbed::clock::{has_elapsed, Millis};
use pico_testbed::config::HEARTBEAT_MS;
use pico_testbed::input::ButtonPins;
use pico_testbed::retry::RetryPolicy;
use pico_testbed::TestBed;

use crate::board::{Board, PinEncoder};
use crate::storage::{storage_task, SAVE_REQUEST};

/// I²C bus speed for the OLED.
const I2C_FREQUENCY_HZ: u32 = 400_000;

fn now_ms() -> Millis {
    // Truncation wraps every ~49 days; all interval checks are wrap-safe.
    Instant::now().as_millis() as Millis
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("pico-testbed starting...");

    let p = embassy_rp::init(Default::default());

    // OLED on I²C0: GP16 = SDA, GP17 = SCL
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, i2c_config);

    // Nothing useful can happen without the screen.
    let mut canvas = defmt::unwrap!(display::init(i2c, RetryPolicy::Forever));
    info!("OLED initialized");

    let mut board = Board::new(
        Input::new(p.PIN_4, Pull::Up),
        [
            Input::new(p.PIN_5, Pull::Up),
            Input::new(p.PIN_6, Pull::Up),
            Input::new(p.PIN_7, Pull::Up),
        ],
        Adc::new_blocking(p.ADC, adc::Config::default()),
        adc::Channel::new_pin(p.PIN_26, Pull::None),
        adc::Channel::new_pin(p.PIN_27, Pull::None),
    );
    let encoder = PinEncoder::new(Input::new(p.PIN_2, Pull::Up), Input::new(p.PIN_3, Pull::Up));

    let mut flash: storage::SettingsFlash = Flash::new(p.FLASH, p.DMA_CH0);
    let settings = storage::load_or_default(&mut flash).await;
    defmt::unwrap!(spawner.spawn(storage_task(flash)));

    let mut bed = TestBed::new(encoder, settings);
    let mut last_heartbeat = now_ms();
    info!("Entering main loop in {:?}", bed.controller().mode());

    loop {
        let now = now_ms();
        let levels = board.levels();
        let report = bed.poll(now, levels, &mut board, &mut canvas);

        for event in &report.events {
            debug!("Input: {:?}", event);
        }
        for transition in &report.transitions {
            info!("Mode: {:?} -> {:?}", transition.from, transition.to);
        }
        if let Some(settings) = report.save {
            info!("Settings due for save");
            SAVE_REQUEST.signal(settings);
        }

        if has_elapsed(now, last_heartbeat, HEARTBEAT_MS) {
            last_heartbeat = now;
            info!(
                "Heartbeat: mode={:?} scope_active={}",
                bed.controller().mode(),
                bed.controller().is_scope_active()
            );
        }

        embassy_futures::yield_now().await;
    }
}
