//! Settings record in NOR flash.
//!
//! The settings are a single `sequential-storage` map item. Every save
//! appends a fresh copy; `sequential-storage` handles wear levelling and
//! garbage collection across the range it is given.
//!
//! Nothing here logs: [`load`] reports what it found as a [`Loaded`] so
//! the firmware can say why it fell back to defaults.

use core::ops::Range;

use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;

use crate::error::Error;
use crate::settings::ScopeSettings;

/// Key of the settings record in the map storage.
pub const SETTINGS_KEY: u8 = 0x01;

/// Scratch buffer for `sequential-storage` (key + record + item header).
const BUF_SIZE: usize = 64;

/// Outcome of reading the stored settings at boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Loaded {
    Stored(ScopeSettings),
    /// Nothing has been saved yet.
    Empty,
    /// The flash could not be read or held an unusable record.
    Unusable(Error),
}

impl Loaded {
    /// Settings to start with: the stored record, else defaults.
    pub fn settings(&self) -> ScopeSettings {
        match self {
            Loaded::Stored(settings) => *settings,
            Loaded::Empty | Loaded::Unusable(_) => ScopeSettings::default(),
        }
    }
}

/// Read the settings record from `range`.
pub async fn load<F: NorFlash>(flash: &mut F, range: Range<u32>) -> Loaded {
    let mut buf = [0u8; BUF_SIZE];

    let fetched = sequential_storage::map::fetch_item::<u8, &[u8], _>(
        flash,
        range,
        &mut NoCache::new(),
        &mut buf,
        &SETTINGS_KEY,
    )
    .await;

    match fetched {
        Ok(Some(data)) => match ScopeSettings::from_bytes(data) {
            Ok(settings) => Loaded::Stored(settings),
            Err(e) => Loaded::Unusable(e),
        },
        Ok(None) => Loaded::Empty,
        Err(_) => Loaded::Unusable(Error::Storage),
    }
}

/// Write `settings` as the current record in `range`.
pub async fn save<F: NorFlash>(
    flash: &mut F,
    range: Range<u32>,
    settings: &ScopeSettings,
) -> Result<(), Error> {
    let mut buf = [0u8; BUF_SIZE];
    let record = settings.to_bytes();
    let item: &[u8] = &record;

    sequential_storage::map::store_item::<u8, &[u8], _>(
        flash,
        range,
        &mut NoCache::new(),
        &mut buf,
        &SETTINGS_KEY,
        &item,
    )
    .await
    .map_err(|_| Error::Storage)
}
