//! Host-testable core of the pico-testbed firmware.
//!
//! Everything here is pure logic: input conditioning, the mode state
//! machine, scope sampling, settings, and screen rendering onto an
//! abstract [`ui::Canvas`]. Hardware is reached only through the traits
//! in [`input`], [`scope`] and [`ui`], which the embedded binary
//! implements for the RP2040 board.
//!
//! Usage: `cargo test` on the host.
//!
//! Note: The firmware binary (main.rs, `embedded` feature) is
//! `#![no_std]` / `#![no_main]` and links this library for its logic.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod persist;
pub mod retry;
pub mod scope;
pub mod settings;
pub mod ui;

pub use app::{PollReport, TestBed};
pub use error::Error;
