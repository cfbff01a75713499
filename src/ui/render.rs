//! Full-frame screen rendering.
//!
//! Each function clears the canvas, draws its screen from the state it
//! is given, and flushes exactly once. None of them touch domain state.
//! Text is laid out on 8 px rows of a 5×8 font (8 rows × 25 columns).

use core::fmt::{self, Write};

use super::{Canvas, MenuItem};
use crate::config::{
    ADC_MAX, BACK_BUTTON_PINS, ENCODER_A_PIN, ENCODER_BUTTON_PIN, ENCODER_B_PIN, LINE_HEIGHT,
    SCREEN_WIDTH,
};
use crate::input::ButtonLevels;
use crate::scope::{reading_to_row, Frame, SampleRing};
use crate::settings::{ScopeSettings, SettingField};

/// One formatted text row.
type Line = heapless::String<32>;

const SEPARATOR: &str = "-------------";

/// Print formatted text at the start of text row `row`.
fn text_row<C: Canvas>(canvas: &mut C, row: i32, args: fmt::Arguments<'_>) {
    let mut line = Line::new();
    let _ = line.write_fmt(args);
    canvas.set_cursor(0, row * LINE_HEIGHT);
    canvas.print(&line);
}

fn marker(selected: bool) -> &'static str {
    if selected {
        ">"
    } else {
        " "
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "ON"
    } else {
        "OFF"
    }
}

fn up_down(pressed: bool) -> &'static str {
    if pressed {
        "DOWN"
    } else {
        "UP"
    }
}

/// Main menu with the selection marker and the encoder pin legend.
pub fn render_menu<C: Canvas>(canvas: &mut C, selection: usize) {
    canvas.clear();
    text_row(canvas, 0, format_args!("Test Bed Menu"));
    text_row(canvas, 1, format_args!("{}", SEPARATOR));

    for (i, item) in MenuItem::ALL.iter().enumerate() {
        text_row(
            canvas,
            2 + i as i32,
            format_args!("{} {}", marker(i == selection), item.label()),
        );
    }

    text_row(canvas, 6, format_args!("Encoder pins:"));
    text_row(
        canvas,
        7,
        format_args!(
            "A={} B={} BTN={}",
            ENCODER_A_PIN, ENCODER_B_PIN, ENCODER_BUTTON_PIN
        ),
    );
    canvas.flush();
}

/// Scrolling channel 1 waveform, optional flat channel 2 line, readouts.
///
/// Channel 2 is drawn from the frame's single reading, so it is always
/// a horizontal line shifted down by the configured offset.
pub fn render_oscilloscope<C: Canvas, const N: usize>(
    canvas: &mut C,
    samples: &SampleRing<N>,
    frame: &Frame,
    settings: &ScopeSettings,
) {
    canvas.clear();
    text_row(canvas, 0, format_args!("Press any button"));
    text_row(canvas, 1, format_args!("to return to menu"));

    // One sample per pixel column; a longer buffer shows its newest end.
    let columns = samples.capacity().min(SCREEN_WIDTH as usize);
    let first = samples.capacity() - columns;
    for x in 0..columns.saturating_sub(1) {
        canvas.draw_line(
            x as i32,
            reading_to_row(samples.get(first + x)),
            x as i32 + 1,
            reading_to_row(samples.get(first + x + 1)),
        );
    }

    if settings.show_second_channel() {
        let y = reading_to_row(frame.secondary) + i32::from(settings.second_channel_offset());
        for x in 0..SCREEN_WIDTH - 1 {
            canvas.draw_line(x, y, x + 1, y);
        }
    }

    if settings.show_second_channel() {
        text_row(
            canvas,
            7,
            format_args!(
                "CH1:{} CH2:{} Off:{}",
                frame.primary,
                frame.secondary,
                settings.second_channel_offset()
            ),
        );
    } else {
        text_row(canvas, 7, format_args!("CH1:{}", frame.primary));
    }
    canvas.flush();
}

/// Settings list with the cursor on `selection`.
pub fn render_settings<C: Canvas>(canvas: &mut C, settings: &ScopeSettings, selection: usize) {
    canvas.clear();
    text_row(canvas, 0, format_args!("Scope Settings"));

    for (i, &field) in SettingField::ALL.iter().enumerate() {
        let mut line = Line::new();
        let _ = line.push_str(marker(i == selection));
        write_field(&mut line, field, settings);
        canvas.set_cursor(0, (1 + i as i32) * LINE_HEIGHT);
        canvas.print(&line);
    }
    canvas.flush();
}

fn write_field(line: &mut Line, field: SettingField, s: &ScopeSettings) {
    let _ = match field {
        SettingField::TimeScale => write!(line, "Time: {}ms/div", s.time_scale()),
        SettingField::VoltageScale => write!(line, "Volt: {}/div", s.voltage_scale()),
        SettingField::TriggerEnabled => write!(line, "Trig: {}", on_off(s.trigger_enabled())),
        SettingField::TriggerLevel => {
            let tenths = trigger_level_decivolts(s.trigger_level());
            write!(line, "Trig Lvl: {}.{}V", tenths / 10, tenths % 10)
        }
        SettingField::SecondChannel => write!(line, "CH2: {}", on_off(s.show_second_channel())),
        SettingField::SecondChannelOffset => {
            write!(line, "CH2 Off: {}px", s.second_channel_offset())
        }
        SettingField::Persist => write!(line, "Save: {}", on_off(s.persist_enabled())),
    };
}

/// Trigger level in tenths of a volt on the 3.3 V ADC reference.
pub fn trigger_level_decivolts(level: u16) -> u32 {
    u32::from(level) * 33 / u32::from(ADC_MAX)
}

/// Pressed/released state of every button with its pin number.
pub fn render_button_test<C: Canvas>(canvas: &mut C, levels: &ButtonLevels) {
    canvas.clear();
    text_row(canvas, 0, format_args!("Button Test"));
    text_row(canvas, 1, format_args!("{}", SEPARATOR));
    text_row(
        canvas,
        2,
        format_args!(
            "Encoder: {} (Pin {})",
            up_down(levels.encoder),
            ENCODER_BUTTON_PIN
        ),
    );
    for (i, (&pressed, &pin)) in levels.back.iter().zip(BACK_BUTTON_PINS.iter()).enumerate() {
        text_row(
            canvas,
            3 + i as i32,
            format_args!("Button {}: {} (Pin {})", i + 1, up_down(pressed), pin),
        );
    }
    text_row(canvas, 7, format_args!("Press encoder to exit"));
    canvas.flush();
}
