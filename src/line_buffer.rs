//! Fixed-capacity buffer for accumulating one command line.

use heapless::Vec;

/// Errors raised by [`InputBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// The byte did not fit; the buffer has been cleared.
    Overflow,
}

impl core::fmt::Display for BufferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BufferError::Overflow => write!(f, "input buffer capacity exceeded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BufferError {}

/// Append-only byte buffer holding at most `C` bytes.
///
/// Overflow is an explicit error that also discards everything buffered so
/// far, so a partial line can never leak into the next command.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer<const C: usize> {
    bytes: Vec<u8, C>,
}

impl<const C: usize> InputBuffer<C> {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Appends a byte.
    ///
    /// # Errors
    /// Returns [`BufferError::Overflow`] if the buffer already holds `C`
    /// bytes. The buffer is empty afterwards.
    pub fn push(&mut self, byte: u8) -> Result<(), BufferError> {
        if self.bytes.push(byte).is_err() {
            self.bytes.clear();
            return Err(BufferError::Overflow);
        }
        Ok(())
    }

    /// Discards all buffered bytes.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        C
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Buffer contents as text; invalid UTF-8 yields an empty string.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes).unwrap_or("")
    }
}
