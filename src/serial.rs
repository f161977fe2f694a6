//! Serial link and activity indicator abstractions.

/// Trait for abstracting the serial byte stream the host talks over.
pub trait SerialPort {
    /// Reads one pending byte, or returns `None` if nothing is available.
    ///
    /// Must never block waiting for input.
    fn read(&mut self) -> Option<u8>;

    /// Writes `line` followed by a line terminator.
    fn write_line(&mut self, line: &str);
}

impl<T: SerialPort + ?Sized> SerialPort for &mut T {
    fn read(&mut self) -> Option<u8> {
        (**self).read()
    }

    fn write_line(&mut self, line: &str) {
        (**self).write_line(line)
    }
}

/// Signals that a command is being processed, typically via an on-board LED.
pub trait BusyIndicator {
    /// Marks the start (`true`) or end (`false`) of command processing.
    fn set_busy(&mut self, busy: bool);
}

/// Indicator for boards without a spare status LED.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoIndicator;

impl BusyIndicator for NoIndicator {
    #[inline]
    fn set_busy(&mut self, _busy: bool) {}
}
