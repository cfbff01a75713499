//! Oscilloscope settings - ranges, editing, and save scheduling.
//!
//! Every field is clamped to its range on write; nothing is ever
//! rejected. The store marks itself dirty on a real change and hands out
//! a snapshot for persisting once the knob has been left alone for the
//! quiet period.
//!
//! Storage layout (little-endian, `RECORD_LEN` bytes):
//! ```text
//! Byte 0:    record version
//! Byte 1:    time scale (ms/div)
//! Byte 2-3:  voltage scale (units/div)
//! Byte 4-5:  trigger level (raw ADC)
//! Byte 6:    channel 2 offset (px)
//! Byte 7:    flags  bit 0 = trigger, bit 1 = channel 2, bit 2 = persist
//! ```

use crate::clock::{has_elapsed, Millis};
use crate::error::Error;

pub const TIME_SCALE_MIN: i32 = 1;
pub const TIME_SCALE_MAX: i32 = 100;

pub const VOLTAGE_SCALE_MIN: i32 = 50;
pub const VOLTAGE_SCALE_MAX: i32 = 500;
pub const VOLTAGE_SCALE_STEP: i32 = 50;

pub const TRIGGER_LEVEL_MIN: i32 = 0;
pub const TRIGGER_LEVEL_MAX: i32 = 1023;
pub const TRIGGER_LEVEL_STEP: i32 = 50;

pub const CH2_OFFSET_MIN: i32 = 0;
pub const CH2_OFFSET_MAX: i32 = 40;

/// Serialized settings size in bytes.
pub const RECORD_LEN: usize = 8;

const RECORD_VERSION: u8 = 1;

const FLAG_TRIGGER: u8 = 1 << 0;
const FLAG_CH2: u8 = 1 << 1;
const FLAG_PERSIST: u8 = 1 << 2;

/// Adjustable scope configuration.
///
/// Fields are private so the ranges cannot be bypassed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScopeSettings {
    time_scale: u8,
    voltage_scale: u16,
    trigger_level: u16,
    trigger_enabled: bool,
    show_second_channel: bool,
    second_channel_offset: u8,
    persist_enabled: bool,
}

impl Default for ScopeSettings {
    fn default() -> Self {
        Self {
            time_scale: 1,
            voltage_scale: 100,
            trigger_level: 512,
            trigger_enabled: false,
            show_second_channel: false,
            second_channel_offset: 20,
            persist_enabled: true,
        }
    }
}

impl ScopeSettings {
    pub fn time_scale(&self) -> u8 {
        self.time_scale
    }

    pub fn voltage_scale(&self) -> u16 {
        self.voltage_scale
    }

    pub fn trigger_level(&self) -> u16 {
        self.trigger_level
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn show_second_channel(&self) -> bool {
        self.show_second_channel
    }

    pub fn second_channel_offset(&self) -> u8 {
        self.second_channel_offset
    }

    pub fn persist_enabled(&self) -> bool {
        self.persist_enabled
    }

    pub fn set_time_scale(&mut self, value: i32) {
        self.time_scale = value.clamp(TIME_SCALE_MIN, TIME_SCALE_MAX) as u8;
    }

    pub fn set_voltage_scale(&mut self, value: i32) {
        self.voltage_scale = value.clamp(VOLTAGE_SCALE_MIN, VOLTAGE_SCALE_MAX) as u16;
    }

    pub fn set_trigger_level(&mut self, value: i32) {
        self.trigger_level = value.clamp(TRIGGER_LEVEL_MIN, TRIGGER_LEVEL_MAX) as u16;
    }

    pub fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
    }

    pub fn set_show_second_channel(&mut self, show: bool) {
        self.show_second_channel = show;
    }

    pub fn set_second_channel_offset(&mut self, value: i32) {
        self.second_channel_offset = value.clamp(CH2_OFFSET_MIN, CH2_OFFSET_MAX) as u8;
    }

    pub fn set_persist_enabled(&mut self, enabled: bool) {
        self.persist_enabled = enabled;
    }

    /// Move `field` by `steps` of its step size, clamping at the ends.
    ///
    /// Boolean fields toggle once for any nonzero `steps`.
    pub fn nudge(&mut self, field: SettingField, steps: i32) {
        if steps == 0 {
            return;
        }
        match field {
            SettingField::TimeScale => {
                self.set_time_scale(i32::from(self.time_scale).saturating_add(steps))
            }
            SettingField::VoltageScale => self.set_voltage_scale(
                i32::from(self.voltage_scale)
                    .saturating_add(steps.saturating_mul(VOLTAGE_SCALE_STEP)),
            ),
            SettingField::TriggerEnabled => self.trigger_enabled = !self.trigger_enabled,
            SettingField::TriggerLevel => self.set_trigger_level(
                i32::from(self.trigger_level)
                    .saturating_add(steps.saturating_mul(TRIGGER_LEVEL_STEP)),
            ),
            SettingField::SecondChannel => self.show_second_channel = !self.show_second_channel,
            SettingField::SecondChannelOffset => self.set_second_channel_offset(
                i32::from(self.second_channel_offset).saturating_add(steps),
            ),
            SettingField::Persist => self.persist_enabled = !self.persist_enabled,
        }
    }

    /// Serialise into the flash record layout.
    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut flags = 0;
        if self.trigger_enabled {
            flags |= FLAG_TRIGGER;
        }
        if self.show_second_channel {
            flags |= FLAG_CH2;
        }
        if self.persist_enabled {
            flags |= FLAG_PERSIST;
        }

        let volt = self.voltage_scale.to_le_bytes();
        let level = self.trigger_level.to_le_bytes();
        [
            RECORD_VERSION,
            self.time_scale,
            volt[0],
            volt[1],
            level[0],
            level[1],
            self.second_channel_offset,
            flags,
        ]
    }

    /// Parse a flash record. Out-of-range values are clamped.
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() != RECORD_LEN || data[0] != RECORD_VERSION {
            return Err(Error::Corrupt);
        }

        let mut settings = Self::default();
        settings.set_time_scale(i32::from(data[1]));
        settings.set_voltage_scale(i32::from(u16::from_le_bytes([data[2], data[3]])));
        settings.set_trigger_level(i32::from(u16::from_le_bytes([data[4], data[5]])));
        settings.set_second_channel_offset(i32::from(data[6]));
        settings.trigger_enabled = data[7] & FLAG_TRIGGER != 0;
        settings.show_second_channel = data[7] & FLAG_CH2 != 0;
        settings.persist_enabled = data[7] & FLAG_PERSIST != 0;
        Ok(settings)
    }
}

/// Rows of the Settings screen, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingField {
    TimeScale,
    VoltageScale,
    TriggerEnabled,
    TriggerLevel,
    SecondChannel,
    SecondChannelOffset,
    Persist,
}

impl SettingField {
    pub const ALL: [SettingField; 7] = [
        SettingField::TimeScale,
        SettingField::VoltageScale,
        SettingField::TriggerEnabled,
        SettingField::TriggerLevel,
        SettingField::SecondChannel,
        SettingField::SecondChannelOffset,
        SettingField::Persist,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Live settings plus the bookkeeping for deferred saves.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    settings: ScopeSettings,
    save_delay_ms: Millis,
    dirty: bool,
    changed_at: Millis,
}

impl SettingsStore {
    pub fn new(settings: ScopeSettings, save_delay_ms: Millis) -> Self {
        Self {
            settings,
            save_delay_ms,
            dirty: false,
            changed_at: 0,
        }
    }

    pub fn settings(&self) -> &ScopeSettings {
        &self.settings
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Nudge `field`; returns `true` if the value actually changed.
    pub fn nudge(&mut self, field: SettingField, steps: i32, now: Millis) -> bool {
        let before = self.settings;
        self.settings.nudge(field, steps);
        let changed = self.settings != before;
        if changed {
            self.dirty = true;
            self.changed_at = now;
        }
        changed
    }

    /// Snapshot to persist once the quiet period has passed.
    ///
    /// Clears the dirty flag when the period is over; returns `None` if
    /// persistence is switched off.
    pub fn take_due_save(&mut self, now: Millis) -> Option<ScopeSettings> {
        if !self.dirty || !has_elapsed(now, self.changed_at, self.save_delay_ms) {
            return None;
        }
        self.dirty = false;
        self.settings.persist_enabled.then_some(self.settings)
    }
}
