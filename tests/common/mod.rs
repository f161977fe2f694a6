//! Shared test infrastructure for led-serial-core integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::collections::VecDeque;

use led_serial_core::{
    BusyIndicator, DEFAULT_PIXEL_COUNT, Delay, LedStrip, SerialPort, Srgb, StatusLine,
};

// ============================================================================
// Mock LED Strip
// ============================================================================

/// One call made on the mock strip, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripEvent {
    Pixel(usize, Srgb<u8>),
    Brightness(u8),
    Show,
}

/// Mock strip that keeps buffered and flushed state apart and records every call
pub struct MockStrip {
    pixels: Vec<Srgb<u8>>,
    brightness: u8,
    shown: Vec<Srgb<u8>>,
    frames: Vec<Vec<Srgb<u8>>>,
    shown_brightness: u8,
    events: Vec<StripEvent>,
}

impl MockStrip {
    pub fn new() -> Self {
        Self::with_len(DEFAULT_PIXEL_COUNT)
    }

    pub fn with_len(len: usize) -> Self {
        Self {
            pixels: vec![Srgb::new(7, 7, 7); len],
            brightness: 255,
            shown: vec![Srgb::new(7, 7, 7); len],
            frames: Vec::new(),
            shown_brightness: 255,
            events: Vec::new(),
        }
    }

    /// Pixel colors as last flushed to the hardware.
    pub fn shown_pixels(&self) -> &[Srgb<u8>] {
        &self.shown
    }

    /// Brightness as last flushed to the hardware.
    pub fn shown_brightness(&self) -> u8 {
        self.shown_brightness
    }

    /// Flushed pixel snapshots, one per `show`, since the last `clear_history`.
    pub fn frames(&self) -> &[Vec<Srgb<u8>>] {
        &self.frames
    }

    pub fn events(&self) -> &[StripEvent] {
        &self.events
    }

    pub fn show_count(&self) -> usize {
        self.frames.len()
    }

    /// Forgets recorded calls and frames; flushed state is kept.
    pub fn clear_history(&mut self) {
        self.events.clear();
        self.frames.clear();
    }
}

impl LedStrip for MockStrip {
    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set_pixel(&mut self, index: usize, color: Srgb<u8>) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
            self.events.push(StripEvent::Pixel(index, color));
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
        self.events.push(StripEvent::Brightness(level));
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn show(&mut self) {
        self.shown.clone_from(&self.pixels);
        self.frames.push(self.pixels.clone());
        self.shown_brightness = self.brightness;
        self.events.push(StripEvent::Show);
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Mock delay that records requested waits instead of sleeping
#[derive(Default)]
pub struct MockDelay {
    waits: Vec<u32>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits(&self) -> &[u32] {
        &self.waits
    }

    pub fn total_ms(&self) -> u64 {
        self.waits.iter().map(|&w| u64::from(w)).sum()
    }
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, millis: u32) {
        self.waits.push(millis);
    }
}

// ============================================================================
// Mock Serial Port
// ============================================================================

/// Mock serial port with scripted input and captured output lines
#[derive(Default)]
pub struct MockSerial {
    input: VecDeque<u8>,
    output: Vec<String>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues bytes as if the host had sent them.
    pub fn send(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    pub fn send_line(&mut self, line: &str) {
        self.send(line.as_bytes());
        self.send(b"\n");
    }

    pub fn pending(&self) -> usize {
        self.input.len()
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

impl SerialPort for MockSerial {
    fn read(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}

// ============================================================================
// Mock Busy Indicator
// ============================================================================

/// Records every busy transition
#[derive(Default)]
pub struct MockIndicator {
    transitions: Vec<bool>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> &[bool] {
        &self.transitions
    }

    pub fn is_busy(&self) -> bool {
        self.transitions.last().copied().unwrap_or(false)
    }
}

impl BusyIndicator for MockIndicator {
    fn set_busy(&mut self, busy: bool) {
        self.transitions.push(busy);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub const OFF: Srgb<u8> = Srgb::new(0, 0, 0);

pub fn all_pixels(pixels: &[Srgb<u8>], color: Srgb<u8>) -> bool {
    !pixels.is_empty() && pixels.iter().all(|&p| p == color)
}

pub fn status(code: u8) -> StatusLine {
    led_serial_core::status_line(code)
}
