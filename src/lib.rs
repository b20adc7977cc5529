#![no_std]
//! SX127x Radio Board Abstraction Layer
//!
//! This crate sits between a Semtech SX1276/77/78/79 protocol driver and the
//! circuit board the transceiver is soldered to. The driver knows how to
//! talk to the chip over SPI; this crate knows how the chip is wired: which
//! GPIO resets it, which DIO lines raise interrupts, whether an RF switch or
//! a TCXO is fitted, which PA output reaches the antenna, and which part of
//! the spectrum the matching network supports.
//!
//! # Features
//! - Reset sequencing with a fixed timing contract (blocking and async)
//! - DIO interrupt routing through a fixed-size handler table
//! - PA path selection (RFO / PA_BOOST) with `RegPaConfig`/`RegPaDac` values
//! - Antenna switch positioning from the operating mode, with low-power override
//! - Frequency range validation and low/high band classification
//! - TCXO supply control with its wake-up delay
//! - TX/RX debug pins, compiled out unless the `debug-pins` feature is enabled
//!
//! # Architecture
//! The crate is organized into several modules:
//!
//! - [`board`]: the [`Board`] context object owning all board resources
//! - [`config`]: board-fixed constants and per-variant presets
//! - [`pins`]: logical-to-physical pin bindings and active-level handling
//! - [`control`]: one component per board concern
//!   - [`control::irq`]: DIO interrupt routing
//!   - [`control::reset`]: reset pulse sequencing
//!   - [`control::pa`]: power amplifier path selection
//!   - [`control::antenna`]: antenna switch positioning
//!   - [`control::frequency`]: supported spectrum checks
//!   - [`control::tcxo`]: oscillator supply control
//!   - [`control::debug`]: activity instrumentation pins
//! - [`registers`]: SX127x registers computed or decoded by this layer
//!
//! # Usage
//! Pins are plain `embedded-hal` 1.0 [`OutputPin`](embedded_hal::digital::OutputPin)s
//! and delays are `embedded-hal`/`embedded-hal-async`
//! [`DelayNs`](embedded_hal::delay::DelayNs) implementations, so any HAL can
//! back a board.
//!
//! Bring-up follows a fixed sequence:
//!
//! 1. Pick a [`BoardConfig`] (usually [`BoardConfig::selected`])
//! 2. Build a [`Board`] from it and the HAL's pin handles
//! 3. Call [`Board::init`] to drive every line to its idle level
//! 4. Register the driver's DIO handlers
//! 5. Call [`Board::reset`] before the driver touches the chip
//! 6. Write [`Board::init_registers`] through the driver
//!
//! # Important Notes
//! - [`Board::dispatch`] is the only operation meant for interrupt context
//! - Reset and TCXO waits block the caller for their full duration
//! - The crate does no locking; share a [`Board`] through your own mutex
//! - Frequency checks report unsupported frequencies, they never fail

pub mod board;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;
pub mod registers;

pub use board::{Board, BoardPins};
pub use config::{BoardConfig, BoardFeatures, FrequencyRange, PaLimits, ResetTiming};
pub use control::{Band, DioHandler, PaPathDecision, SwitchState};
pub use error::{ConfigError, Error};
pub use pins::{ActiveLevel, DioLine, LogicalPin, PhysicalPin, PinBinding, PinSet};
pub use registers::{OpMode, OperatingMode, PaPath};
