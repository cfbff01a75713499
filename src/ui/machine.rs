//! Mode state machine - the top-level controller.
//!
//! ```text
//!            encoder press (selection 0/1/2)
//!   Menu ───────────────────────────────────► Oscilloscope | Settings | ButtonTest
//!    ▲                                                  │
//!    └──────── encoder press, or back press ────────────┘
//!              (back is ignored in ButtonTest)
//! ```
//!
//! All interaction state lives here and is only touched through
//! [`Controller::handle`] and [`Controller::update`].

use super::input_logic::step_selection;
use super::render::{render_button_test, render_menu, render_oscilloscope, render_settings};
use super::{Canvas, MenuItem, Mode, Transition};
use crate::clock::Millis;
use crate::config::{SAMPLE_INTERVAL_MS, SETTINGS_SAVE_DELAY_MS};
use crate::input::{ButtonLevels, Direction, Edge, InputEvent};
use crate::scope::{AnalogChannel, AnalogSource, Sampler};
use crate::settings::{ScopeSettings, SettingField, SettingsStore};

pub struct Controller {
    mode: Mode,
    selection: usize,
    /// Gates sampling. Tracked separately from `mode` so leaving and
    /// re-entering the scope is explicit.
    scope_active: bool,
    settings: SettingsStore,
    sampler: Sampler,
    needs_redraw: bool,
    /// Levels shown on the Button Test screen, if it is up to date.
    drawn_levels: Option<ButtonLevels>,
}

impl Controller {
    /// Start in the menu with the given settings.
    pub fn new(settings: ScopeSettings) -> Self {
        Self {
            mode: Mode::Menu,
            selection: 0,
            scope_active: false,
            settings: SettingsStore::new(settings, SETTINGS_SAVE_DELAY_MS),
            sampler: Sampler::new(SAMPLE_INTERVAL_MS),
            needs_redraw: true,
            drawn_levels: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn is_scope_active(&self) -> bool {
        self.scope_active
    }

    pub fn settings(&self) -> &ScopeSettings {
        self.settings.settings()
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    /// Apply one input event; returns the mode change it caused, if any.
    pub fn handle(&mut self, event: InputEvent, now: Millis) -> Option<Transition> {
        match event {
            InputEvent::Encoder(direction) => {
                self.on_rotate(direction, now);
                None
            }
            InputEvent::EncoderButton(Edge::Pressed) => self.on_encoder_press(),
            InputEvent::BackButtons(Edge::Pressed) => self.on_back_press(),
            InputEvent::EncoderButton(Edge::Released) | InputEvent::BackButtons(Edge::Released) => {
                None
            }
        }
    }

    fn on_rotate(&mut self, direction: Direction, now: Millis) {
        match self.mode {
            Mode::Menu => {
                self.selection = step_selection(self.selection, MenuItem::COUNT, direction);
                self.needs_redraw = true;
            }
            Mode::Settings => {
                // The tick that moves the cursor also edits the field it lands on.
                self.selection = step_selection(self.selection, SettingField::COUNT, direction);
                if let Some(field) = SettingField::from_index(self.selection) {
                    self.settings.nudge(field, direction.signum(), now);
                }
                self.needs_redraw = true;
            }
            Mode::Oscilloscope => {
                if self.settings().show_second_channel() {
                    self.settings
                        .nudge(SettingField::SecondChannelOffset, direction.signum(), now);
                }
            }
            Mode::ButtonTest => {}
        }
    }

    fn on_encoder_press(&mut self) -> Option<Transition> {
        match self.mode {
            Mode::Menu => {
                let item = MenuItem::from_index(self.selection)?;
                Some(self.switch_to(item.mode()))
            }
            Mode::Oscilloscope | Mode::Settings | Mode::ButtonTest => {
                Some(self.switch_to(Mode::Menu))
            }
        }
    }

    fn on_back_press(&mut self) -> Option<Transition> {
        match self.mode {
            Mode::Menu => {
                self.selection = 0;
                self.needs_redraw = true;
                None
            }
            Mode::Oscilloscope | Mode::Settings => Some(self.switch_to(Mode::Menu)),
            // Back buttons stay inert so their levels can be inspected.
            Mode::ButtonTest => None,
        }
    }

    fn switch_to(&mut self, to: Mode) -> Transition {
        let from = self.mode;

        match from {
            Mode::Oscilloscope => self.scope_active = false,
            Mode::Menu | Mode::Settings | Mode::ButtonTest => {}
        }

        match to {
            Mode::Menu | Mode::Settings => self.selection = 0,
            Mode::Oscilloscope => {
                self.scope_active = true;
                self.sampler.restart();
            }
            Mode::ButtonTest => {}
        }

        self.mode = to;
        self.needs_redraw = true;
        self.drawn_levels = None;
        Transition { from, to }
    }

    /// Sample and redraw as due for the current mode.
    ///
    /// The analog inputs are only read when the scope is active and a
    /// sample is due. Returns `true` if a frame was drawn.
    pub fn update<A, C>(
        &mut self,
        now: Millis,
        levels: ButtonLevels,
        analog: &mut A,
        canvas: &mut C,
    ) -> bool
    where
        A: AnalogSource,
        C: Canvas,
    {
        let drew = match self.mode {
            Mode::Menu => {
                if self.needs_redraw {
                    render_menu(canvas, self.selection);
                }
                self.needs_redraw
            }
            Mode::Settings => {
                if self.needs_redraw {
                    render_settings(canvas, self.settings.settings(), self.selection);
                }
                self.needs_redraw
            }
            Mode::ButtonTest => {
                let stale = self.needs_redraw || self.drawn_levels != Some(levels);
                if stale {
                    render_button_test(canvas, &levels);
                    self.drawn_levels = Some(levels);
                }
                stale
            }
            Mode::Oscilloscope => self.sample(now, analog, canvas),
        };
        self.needs_redraw = false;
        drew
    }

    fn sample<A, C>(&mut self, now: Millis, analog: &mut A, canvas: &mut C) -> bool
    where
        A: AnalogSource,
        C: Canvas,
    {
        if !self.scope_active || !self.sampler.is_due(now) {
            return false;
        }

        let primary = analog.read_raw(AnalogChannel::Primary);
        let secondary = analog.read_raw(AnalogChannel::Secondary);
        let settings = self.settings.settings();
        match self.sampler.tick(now, primary, secondary, settings) {
            Some(frame) => {
                render_oscilloscope(canvas, self.sampler.ring(), &frame, settings);
                true
            }
            None => false,
        }
    }

    /// Settings snapshot to persist, once the knob has been quiet long enough.
    pub fn take_due_save(&mut self, now: Millis) -> Option<ScopeSettings> {
        self.settings.take_due_save(now)
    }
}
