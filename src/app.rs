//! The test bed: input conditioning plus the mode controller.
//!
//! One call to [`TestBed::poll`] is one iteration of the firmware's main
//! loop. Inputs are polled in a fixed order (encoder, encoder button,
//! back buttons) and every resulting event is applied before sampling and
//! drawing, so a press and a redraw in the same tick are consistent.

use heapless::Vec;

use crate::clock::Millis;
use crate::config::{BUTTON_DEBOUNCE_MS, ENCODER_RATE_LIMIT_MS};
use crate::input::{ButtonLevels, Debouncer, EncoderAdapter, InputEvent, PositionCounter};
use crate::scope::AnalogSource;
use crate::settings::ScopeSettings;
use crate::ui::{Canvas, Controller, Transition};

/// At most one event per input source per tick.
pub const MAX_EVENTS_PER_TICK: usize = 3;

/// What happened during one [`TestBed::poll`], for the caller to log and act on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PollReport {
    pub events: Vec<InputEvent, MAX_EVENTS_PER_TICK>,
    pub transitions: Vec<Transition, MAX_EVENTS_PER_TICK>,
    /// Settings snapshot due for persisting.
    pub save: Option<ScopeSettings>,
    /// A frame was drawn and flushed.
    pub redrawn: bool,
}

pub struct TestBed<C> {
    encoder: EncoderAdapter<C>,
    encoder_button: Debouncer,
    back_buttons: Debouncer,
    controller: Controller,
}

impl<C: PositionCounter> TestBed<C> {
    pub fn new(counter: C, settings: ScopeSettings) -> Self {
        Self {
            encoder: EncoderAdapter::new(counter, ENCODER_RATE_LIMIT_MS),
            encoder_button: Debouncer::new(BUTTON_DEBOUNCE_MS),
            back_buttons: Debouncer::new(BUTTON_DEBOUNCE_MS),
            controller: Controller::new(settings),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn encoder_mut(&mut self) -> &mut EncoderAdapter<C> {
        &mut self.encoder
    }

    /// Run one main-loop iteration.
    pub fn poll<A, D>(
        &mut self,
        now: Millis,
        levels: ButtonLevels,
        analog: &mut A,
        canvas: &mut D,
    ) -> PollReport
    where
        A: AnalogSource,
        D: Canvas,
    {
        let mut report = PollReport::default();

        let rotation = self.encoder.poll(now).map(InputEvent::Encoder);
        let press = self
            .encoder_button
            .sample(levels.encoder, now)
            .map(InputEvent::EncoderButton);
        let back = self
            .back_buttons
            .sample(levels.any_back(), now)
            .map(InputEvent::BackButtons);

        for event in [rotation, press, back].into_iter().flatten() {
            // Capacity matches the number of sources above.
            let _ = report.events.push(event);
            if let Some(transition) = self.controller.handle(event, now) {
                let _ = report.transitions.push(transition);
            }
        }

        report.redrawn = self.controller.update(now, levels, analog, canvas);
        report.save = self.controller.take_due_save(now);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Direction, Edge};
    use crate::scope::AnalogChannel;
    use crate::ui::tests::RecordingCanvas;
    use crate::ui::Mode;

    struct ScriptedCounter(i32);

    impl PositionCounter for ScriptedCounter {
        fn tick(&mut self) {}

        fn position(&self) -> i32 {
            self.0
        }
    }

    struct Flat;

    impl AnalogSource for Flat {
        fn read_raw(&mut self, _channel: AnalogChannel) -> u16 {
            0
        }
    }

    const IDLE: ButtonLevels = ButtonLevels {
        encoder: false,
        back: [false; 3],
    };

    const ENCODER_HELD: ButtonLevels = ButtonLevels {
        encoder: true,
        back: [false; 3],
    };

    #[test]
    fn first_poll_draws_menu() {
        let mut bed = TestBed::new(ScriptedCounter(0), ScopeSettings::default());
        let mut canvas = RecordingCanvas::default();
        let report = bed.poll(0, IDLE, &mut Flat, &mut canvas);
        assert!(report.events.is_empty());
        assert!(report.redrawn);
        assert_eq!(report.save, None);
    }

    #[test]
    fn held_encoder_button_enters_scope_after_debounce() {
        let mut bed = TestBed::new(ScriptedCounter(0), ScopeSettings::default());
        let mut canvas = RecordingCanvas::default();
        bed.poll(0, ENCODER_HELD, &mut Flat, &mut canvas);
        let report = bed.poll(49, ENCODER_HELD, &mut Flat, &mut canvas);
        assert!(report.transitions.is_empty());

        let report = bed.poll(50, ENCODER_HELD, &mut Flat, &mut canvas);
        assert_eq!(
            report.events.as_slice(),
            &[InputEvent::EncoderButton(Edge::Pressed)]
        );
        assert_eq!(
            report.transitions.as_slice(),
            &[Transition {
                from: Mode::Menu,
                to: Mode::Oscilloscope
            }]
        );
        // Scope samples in the same tick it is entered.
        assert!(report.redrawn);
    }

    #[test]
    fn rotation_is_applied_before_press() {
        let mut bed = TestBed::new(ScriptedCounter(0), ScopeSettings::default());
        let mut canvas = RecordingCanvas::default();
        bed.poll(0, ENCODER_HELD, &mut Flat, &mut canvas);
        bed.encoder_mut().counter_mut().0 = 1;

        let report = bed.poll(50, ENCODER_HELD, &mut Flat, &mut canvas);
        assert_eq!(
            report.events.as_slice(),
            &[
                InputEvent::Encoder(Direction::Clockwise),
                InputEvent::EncoderButton(Edge::Pressed),
            ]
        );
        assert_eq!(bed.controller().mode(), Mode::Settings);
    }
}
