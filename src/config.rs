//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and screen geometry
//! live here so they can be tuned in one place.

// Display

/// OLED panel width in pixels (SSD1306 128×64).
pub const SCREEN_WIDTH: i32 = 128;

/// 7-bit I²C address of the SSD1306.
pub const DISPLAY_I2C_ADDRESS: u8 = 0x3C;

/// Text row height in pixels (5×8 font, 8 rows on the panel).
pub const LINE_HEIGHT: i32 = 8;

/// Glyph advance in pixels.
pub const CHAR_WIDTH: i32 = 5;

/// Pixel rows the waveform is mapped onto. Larger readings plot higher,
/// so the full-scale reading lands on `WAVE_TOP_Y`.
pub const WAVE_TOP_Y: i32 = 0;
pub const WAVE_BOTTOM_Y: i32 = 48;

// GPIO pin assignments (Raspberry Pi Pico)
//
// These are logical numbers shown on screen; the concrete
// `embassy_rp::peripherals::PIN_*` types are selected in `main.rs`.
//
//   Encoder A        → GP2
//   Encoder B        → GP3
//   Encoder button   → GP4
//   Back buttons     → GP5, GP6, GP7
//   I²C0 SDA / SCL   → GP16 / GP17
//   Analog CH1 / CH2 → GP26 (ADC0) / GP27 (ADC1)

pub const ENCODER_A_PIN: u8 = 2;
pub const ENCODER_B_PIN: u8 = 3;
pub const ENCODER_BUTTON_PIN: u8 = 4;
pub const BACK_BUTTON_PINS: [u8; 3] = [5, 6, 7];

// Timing

/// Button debounce window (ms).
pub const BUTTON_DEBOUNCE_MS: u32 = 50;

/// Minimum spacing between accepted encoder movements (ms).
pub const ENCODER_RATE_LIMIT_MS: u32 = 5;

/// Oscilloscope sample interval (ms).
pub const SAMPLE_INTERVAL_MS: u32 = 1;

/// Quiet period after the last settings change before they are saved (ms).
pub const SETTINGS_SAVE_DELAY_MS: u32 = 5_000;

/// Interval between diagnostic heartbeat log lines (ms).
pub const HEARTBEAT_MS: u32 = 1_000;

// Sampling

/// Number of primary-channel samples kept for the scrolling waveform.
pub const SAMPLE_BUFFER_LEN: usize = 128;

/// Full-scale analog reading (10-bit).
pub const ADC_MAX: u16 = 1023;

// Settings storage

/// Total size of the Pico's on-board QSPI flash.
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Flash erase-sector index where settings storage starts (4 KB sectors).
pub const STORAGE_FLASH_SECTOR_START: u32 = 508;

/// Number of flash sectors reserved for settings storage.
pub const STORAGE_FLASH_SECTOR_COUNT: u32 = 4;
