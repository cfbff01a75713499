//! Persistent storage for the scope settings.
//!
//! Uses the RP2040's on-board QSPI flash through the library's
//! `persist` record functions, over a reserved range of erase sectors.
//!
//! The main loop never touches flash after boot: due snapshots are
//! handed to [`storage_task`] through [`SAVE_REQUEST`], and only the
//! latest one is written.

use core::ops::Range;

use defmt::{error, info, warn};
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use pico_testbed::config::{FLASH_SIZE, STORAGE_FLASH_SECTOR_COUNT, STORAGE_FLASH_SECTOR_START};
use pico_testbed::persist::{self, Loaded};
use pico_testbed::settings::ScopeSettings;

/// Flash erase sector size for the Pico's W25Q16 (4 KB).
const FLASH_SECTOR_SIZE: u32 = 4096;

/// Start offset of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_SECTOR_START * FLASH_SECTOR_SIZE;

/// End offset (exclusive) of our storage region.
const STORAGE_END: u32 =
    (STORAGE_FLASH_SECTOR_START + STORAGE_FLASH_SECTOR_COUNT) * FLASH_SECTOR_SIZE;

const STORAGE_RANGE: Range<u32> = STORAGE_START..STORAGE_END;

pub type SettingsFlash = Flash<'static, FLASH, Async, FLASH_SIZE>;

/// Latest settings snapshot waiting to be written.
pub static SAVE_REQUEST: Signal<CriticalSectionRawMutex, ScopeSettings> = Signal::new();

/// Settings to start with: the stored record, or defaults if there is
/// none or it cannot be used.
pub async fn load_or_default(flash: &mut SettingsFlash) -> ScopeSettings {
    let loaded = persist::load(flash, STORAGE_RANGE).await;
    match loaded {
        Loaded::Stored(settings) => info!("Loaded settings from flash: {:?}", settings),
        Loaded::Empty => info!("No settings in flash - using defaults"),
        Loaded::Unusable(e) => warn!("Stored settings unusable ({:?}) - using defaults", e),
    }
    loaded.settings()
}

/// Writes every requested snapshot; failures are logged and dropped.
#[embassy_executor::task]
pub async fn storage_task(mut flash: SettingsFlash) {
    info!("Storage task started");

    loop {
        let settings = SAVE_REQUEST.wait().await;
        match persist::save(&mut flash, STORAGE_RANGE, &settings).await {
            Ok(()) => info!("Settings saved"),
            Err(e) => error!("Settings save failed: {:?}", e),
        }
    }
}
