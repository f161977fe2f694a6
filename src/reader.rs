//! Non-blocking line reader over a serial byte stream.
//!
//! [`LineReader::poll`] drains whatever the serial port has pending, splits
//! it on CR/LF and hands each complete line to a caller-supplied dispatcher.
//! Bytes that do not yet form a complete line stay buffered until the next
//! poll.

use crate::config::INPUT_TOO_LONG;
use crate::line_buffer::InputBuffer;
use crate::serial::SerialPort;

const NUL: u8 = 0;
const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// What happened during one [`LineReader::poll`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollSummary {
    /// Bytes taken from the serial port.
    pub bytes_read: usize,
    /// Complete lines handed to the dispatcher.
    pub lines_dispatched: usize,
    /// Lines discarded for exceeding the buffer capacity.
    pub overflows: usize,
}

/// Assembles command lines of at most `C` bytes.
#[derive(Debug, Clone, Default)]
pub struct LineReader<const C: usize> {
    buffer: InputBuffer<C>,
    // set after an overflow until the overlong line's terminator arrives
    discarding: bool,
}

impl<const C: usize> LineReader<C> {
    pub const fn new() -> Self {
        Self {
            buffer: InputBuffer::new(),
            discarding: false,
        }
    }

    /// Number of bytes buffered for the line in progress.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Drains all pending input without blocking.
    ///
    /// NUL bytes are dropped. CR or LF terminates a line; an empty line is
    /// ignored, so CR+LF produces a single dispatch. A line longer than `C`
    /// bytes is discarded up to and including its terminator, and
    /// [`INPUT_TOO_LONG`] is written to `serial` once for it.
    pub fn poll<S, F>(&mut self, serial: &mut S, mut dispatch: F) -> PollSummary
    where
        S: SerialPort,
        F: FnMut(&mut S, &str),
    {
        let mut summary = PollSummary::default();

        while let Some(byte) = serial.read() {
            summary.bytes_read += 1;

            match byte {
                NUL => {}
                CR | LF if self.discarding => self.discarding = false,
                CR | LF => {
                    if !self.buffer.is_empty() {
                        dispatch(serial, self.buffer.as_str());
                        self.buffer.clear();
                        summary.lines_dispatched += 1;
                    }
                }
                _ if self.discarding => {}
                _ => {
                    if self.buffer.push(byte).is_err() {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("input exceeded {} bytes, discarding line", C);

                        serial.write_line(INPUT_TOO_LONG);
                        summary.overflows += 1;
                        self.discarding = true;
                    }
                }
            }
        }

        summary
    }
}
