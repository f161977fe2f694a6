#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Controller`**: One call to `poll` per main-loop iteration; reads serial input, answers commands, animates pulses
//! - **`LineReader`**: Non-blocking assembly of CR/LF-terminated lines in a fixed-capacity `InputBuffer`
//! - **`Command`**: A parsed and validated `blink`, `wipe`, `color` or `pulse` request
//! - **`EffectEngine`**: Executes commands on the strip and owns the `EffectState` (idle or pulsing)
//! - **`LedStrip`**: Trait to implement for your addressable LED driver
//! - **`Delay`**: Trait to implement for your blocking millisecond delay
//! - **`SerialPort`**: Trait to implement for your UART or USB serial link
//! - **`BusyIndicator`**: Optional status LED lit while a command is processed
//!
//! Pixel colors are `Srgb<u8>`, passed to the `LedStrip` implementation as-is.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod command;
pub mod config;
pub mod controller;
pub mod effect;
pub mod line_buffer;
pub mod reader;
pub mod serial;
pub mod strip;
pub mod time;

pub use command::{Command, CommandError};
pub use config::{
    ConfigError, DEFAULT_INPUT_CAPACITY, DEFAULT_PIXEL_COUNT, EffectConfig, INPUT_TOO_LONG,
    STATUS_OK,
};
pub use controller::{Controller, StatusLine, status_line};
pub use effect::{EffectEngine, EffectState, PulsePhase};
pub use line_buffer::{BufferError, InputBuffer};
pub use reader::{LineReader, PollSummary};
pub use serial::{BusyIndicator, NoIndicator, SerialPort};
pub use strip::LedStrip;
pub use time::Delay;

pub const COLOR_OFF: Srgb<u8> = Srgb::new(0, 0, 0);

