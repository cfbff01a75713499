//! Integration tests for the test bed, driven through the public API the
//! firmware uses: raw button levels, encoder line levels, and ADC
//! readings go in one millisecond at a time; screens come out on a
//! canvas.

use std::collections::VecDeque;

use pico_testbed::input::{ButtonLevels, PositionCounter, QuadratureDecoder};
use pico_testbed::scope::{AnalogChannel, AnalogSource};
use pico_testbed::settings::ScopeSettings;
use pico_testbed::ui::{Canvas, Mode, Transition};
use pico_testbed::TestBed;

// ═══════════════════════════════════════════════════════════════════════════
// Fakes
// ═══════════════════════════════════════════════════════════════════════════

/// Encoder knob: queued A/B levels are fed to a real decoder, one per tick.
struct Knob {
    decoder: QuadratureDecoder,
    queued: VecDeque<(bool, bool)>,
}

const FORWARD: [(bool, bool); 4] = [(true, false), (false, false), (false, true), (true, true)];
const BACKWARD: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];
/// Ticks the knob rests on its detent between clicks.
const REST: [(bool, bool); 3] = [(true, true); 3];

impl Knob {
    fn new() -> Self {
        Self {
            decoder: QuadratureDecoder::new(true, true),
            queued: VecDeque::new(),
        }
    }
}

impl PositionCounter for Knob {
    fn tick(&mut self) {
        if let Some((a, b)) = self.queued.pop_front() {
            self.decoder.update(a, b);
        }
    }

    fn position(&self) -> i32 {
        self.decoder.position()
    }
}

#[derive(Default)]
struct Signals {
    primary: u16,
    secondary: u16,
    reads: usize,
}

impl AnalogSource for Signals {
    fn read_raw(&mut self, channel: AnalogChannel) -> u16 {
        self.reads += 1;
        match channel {
            AnalogChannel::Primary => self.primary,
            AnalogChannel::Secondary => self.secondary,
        }
    }
}

/// Keeps the text of the last flushed frame, like the panel would.
#[derive(Default)]
struct Screen {
    cursor_y: i32,
    pending: Vec<(i32, String)>,
    shown: Vec<(i32, String)>,
    pending_lines: usize,
    shown_lines: usize,
    flushes: usize,
}

impl Screen {
    fn shows(&self, text: &str) -> bool {
        self.shown.iter().any(|(_, t)| t == text)
    }

    fn row(&self, y: i32) -> Option<&str> {
        self.shown
            .iter()
            .find(|(row, _)| *row == y)
            .map(|(_, t)| t.as_str())
    }
}

impl Canvas for Screen {
    fn clear(&mut self) {
        self.pending.clear();
        self.pending_lines = 0;
    }

    fn set_cursor(&mut self, _x: i32, y: i32) {
        self.cursor_y = y;
    }

    fn print(&mut self, text: &str) {
        self.pending.push((self.cursor_y, text.to_string()));
    }

    fn draw_line(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32) {
        self.pending_lines += 1;
    }

    fn flush(&mut self) {
        self.shown = self.pending.clone();
        self.shown_lines = self.pending_lines;
        self.flushes += 1;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Rig
// ═══════════════════════════════════════════════════════════════════════════

struct Rig {
    bed: TestBed<Knob>,
    screen: Screen,
    signals: Signals,
    levels: ButtonLevels,
    now: u32,
    transitions: Vec<Transition>,
    saves: Vec<ScopeSettings>,
}

impl Rig {
    fn new(settings: ScopeSettings) -> Self {
        Self::starting_at(0, settings)
    }

    fn starting_at(now: u32, settings: ScopeSettings) -> Self {
        let mut rig = Self {
            bed: TestBed::new(Knob::new(), settings),
            screen: Screen::default(),
            signals: Signals::default(),
            levels: ButtonLevels::default(),
            now,
            transitions: Vec::new(),
            saves: Vec::new(),
        };
        rig.run(1);
        rig
    }

    fn run(&mut self, ms: u32) {
        for _ in 0..ms {
            let report = self
                .bed
                .poll(self.now, self.levels, &mut self.signals, &mut self.screen);
            self.transitions.extend(report.transitions.iter().copied());
            self.saves.extend(report.save);
            self.now = self.now.wrapping_add(1);
        }
    }

    fn click(&mut self, set: impl Fn(&mut ButtonLevels, bool)) {
        set(&mut self.levels, true);
        self.run(60);
        set(&mut self.levels, false);
        self.run(60);
    }

    fn press_encoder(&mut self) {
        self.click(|l, v| l.encoder = v);
    }

    fn press_back(&mut self, button: usize) {
        self.click(|l, v| l.back[button] = v);
    }

    /// Turn the knob; positive is clockwise.
    fn turn(&mut self, detents: i32) {
        let phases = if detents > 0 { FORWARD } else { BACKWARD };
        let knob = self.bed.encoder_mut().counter_mut();
        for _ in 0..detents.unsigned_abs() {
            knob.queued.extend(phases);
            knob.queued.extend(REST);
        }
        let ticks = detents.unsigned_abs() * (phases.len() + REST.len()) as u32;
        self.run(ticks + 5);
    }

    fn mode(&self) -> Mode {
        self.bed.controller().mode()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Scenarios
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn boots_into_menu() {
    let rig = Rig::new(ScopeSettings::default());
    assert_eq!(rig.mode(), Mode::Menu);
    assert_eq!(rig.screen.row(0), Some("Test Bed Menu"));
    assert!(rig.screen.shows("> Oscilloscope"));
    assert_eq!(rig.screen.row(56), Some("A=2 B=3 BTN=4"));
}

#[test]
fn knob_moves_menu_cursor_one_item_per_detent() {
    let mut rig = Rig::new(ScopeSettings::default());
    rig.turn(2);
    assert_eq!(rig.bed.controller().selection(), 2);
    assert!(rig.screen.shows("> Button Test"));
    rig.turn(1);
    assert_eq!(rig.bed.controller().selection(), 0);
    rig.turn(-1);
    assert_eq!(rig.bed.controller().selection(), 2);
}

#[test]
fn button_test_shows_live_levels_and_ignores_back() {
    let mut rig = Rig::new(ScopeSettings::default());
    rig.turn(2);
    rig.press_encoder();
    assert_eq!(rig.mode(), Mode::ButtonTest);
    assert!(rig.screen.shows("Button 2: UP (Pin 6)"));

    rig.levels.back[1] = true;
    rig.run(1);
    // Raw levels, no debounce on the display.
    assert!(rig.screen.shows("Button 2: DOWN (Pin 6)"));
    rig.run(100);
    rig.levels.back[1] = false;
    rig.run(100);
    assert_eq!(rig.mode(), Mode::ButtonTest);

    rig.press_encoder();
    assert_eq!(rig.mode(), Mode::Menu);
    assert_eq!(
        rig.transitions,
        vec![
            Transition {
                from: Mode::Menu,
                to: Mode::ButtonTest
            },
            Transition {
                from: Mode::ButtonTest,
                to: Mode::Menu
            },
        ]
    );
}

#[test]
fn scope_runs_only_while_active() {
    let mut rig = Rig::new(ScopeSettings::default());
    rig.signals.primary = 800;
    rig.press_encoder();
    assert_eq!(rig.mode(), Mode::Oscilloscope);
    assert!(rig.bed.controller().is_scope_active());
    assert_eq!(rig.screen.row(56), Some("CH1:800"));
    assert_eq!(rig.screen.shown_lines, 127);
    assert!(rig.bed.controller().sampler().ring().iter().any(|v| v == 800));

    rig.press_back(2);
    assert_eq!(rig.mode(), Mode::Menu);
    assert!(!rig.bed.controller().is_scope_active());
    let reads = rig.signals.reads;
    rig.run(500);
    assert_eq!(rig.signals.reads, reads);
}

#[test]
fn scope_waits_for_trigger_level() {
    let mut settings = ScopeSettings::default();
    settings.set_trigger_enabled(true);
    settings.set_trigger_level(600);
    let mut rig = Rig::new(settings);
    rig.signals.primary = 500;
    let menu_flushes = rig.screen.flushes;

    rig.press_encoder();
    assert_eq!(rig.mode(), Mode::Oscilloscope);
    assert_eq!(rig.screen.flushes, menu_flushes);
    assert!(rig.bed.controller().sampler().ring().iter().all(|v| v == 0));

    rig.signals.primary = 650;
    rig.run(1);
    assert_eq!(rig.screen.flushes, menu_flushes + 1);
    assert_eq!(rig.screen.row(56), Some("CH1:650"));
}

#[test]
fn knob_shifts_second_channel_in_scope() {
    let mut settings = ScopeSettings::default();
    settings.set_show_second_channel(true);
    let mut rig = Rig::new(settings);
    rig.signals.secondary = 300;
    rig.press_encoder();
    rig.turn(3);
    assert_eq!(rig.bed.controller().settings().second_channel_offset(), 23);
    assert_eq!(rig.screen.row(56), Some("CH1:0 CH2:300 Off:23"));
    assert_eq!(rig.screen.shown_lines, 2 * 127);
}

#[test]
fn settings_edit_is_saved_once_after_quiet_period() {
    let mut rig = Rig::new(ScopeSettings::default());
    rig.turn(1);
    rig.press_encoder();
    assert_eq!(rig.mode(), Mode::Settings);

    // Cursor to Volt; the same detent bumps it to 150.
    rig.turn(1);
    assert!(rig.screen.shows(">Volt: 150/div"));
    rig.run(4_000);
    assert!(rig.saves.is_empty());
    rig.run(1_500);
    assert_eq!(rig.saves.len(), 1);
    assert_eq!(rig.saves[0].voltage_scale(), 150);

    rig.run(10_000);
    assert_eq!(rig.saves.len(), 1);
}

#[test]
fn nothing_saved_with_persistence_off() {
    let mut settings = ScopeSettings::default();
    settings.set_persist_enabled(false);
    let mut rig = Rig::new(settings);
    rig.turn(1);
    rig.press_encoder();
    rig.turn(2);
    rig.run(10_000);
    assert!(rig.saves.is_empty());
    assert!(rig.bed.controller().settings().trigger_enabled());
}

#[test]
fn back_from_settings_returns_to_menu_top() {
    let mut rig = Rig::new(ScopeSettings::default());
    rig.turn(1);
    rig.press_encoder();
    rig.turn(3);
    rig.press_back(0);
    assert_eq!(rig.mode(), Mode::Menu);
    assert_eq!(rig.bed.controller().selection(), 0);
    assert!(rig.screen.shows("> Oscilloscope"));
}

#[test]
fn back_in_menu_resets_cursor() {
    let mut rig = Rig::new(ScopeSettings::default());
    rig.turn(2);
    rig.press_back(1);
    assert_eq!(rig.mode(), Mode::Menu);
    assert_eq!(rig.bed.controller().selection(), 0);
    assert!(rig.transitions.is_empty());
}

#[test]
fn short_glitch_is_not_a_press() {
    let mut rig = Rig::new(ScopeSettings::default());
    rig.levels.encoder = true;
    rig.run(20);
    rig.levels.encoder = false;
    rig.run(100);
    assert_eq!(rig.mode(), Mode::Menu);
}

#[test]
fn survives_millisecond_counter_wrap() {
    let mut rig = Rig::starting_at(u32::MAX - 30, ScopeSettings::default());
    rig.press_encoder();
    assert_eq!(rig.mode(), Mode::Oscilloscope);
    rig.press_encoder();
    assert_eq!(rig.mode(), Mode::Menu);
    rig.turn(1);
    assert_eq!(rig.bed.controller().selection(), 1);
}
