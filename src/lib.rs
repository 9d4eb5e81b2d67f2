//! Device abstractions for SG90 hobby servos on the ATmega2560's 16-bit timers.
//!
//! A servo is bound to one output-compare channel of one hardware timer. The
//! timer is programmed once for a 20 ms Fast PWM frame; after that the
//! waveform free-runs in hardware and each angle command is a single write to
//! the channel's compare register.
//!
//! # Glossary
//!
//! Timer resources on the ATmega2560:
//!
//! - **Timer:** a hardware counter peripheral that can generate periodic
//!   waveforms. Timers 1, 3, and 4 are 16-bit and can hold a 20 ms frame.
//! - **Output-compare channel:** a sub-unit of a timer (A, B, or C) that
//!   drives one pin by comparing the counter to a register value.
//! - **TOP / `ICRn`:** the counter's maximum value, which sets the waveform
//!   period. Fixed here at 40000 ticks of 0.5 µs = 20 ms.
//! - **Compare / `OCRnx`:** the value at which the output toggles within the
//!   period, which sets the pulse width.
//! - **Prescaler:** the clock divider feeding the counter. Fixed here at 8,
//!   so a 16 MHz core clock gives one tick per 0.5 µs.
#![cfg_attr(not(feature = "host"), no_std)]

// Compile-time check: some platform must be selected. The `host` feature is
// dominant - enabling it alongside `mega2560` builds the host configuration.
#[cfg(not(any(feature = "mega2560", feature = "host")))]
compile_error!("Must enable a platform feature: 'mega2560' or 'host'");

mod error;
mod fmt;
pub mod pinout;
pub mod registers;
pub mod servo;
pub mod timer;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
