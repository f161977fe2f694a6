//! Hardware abstraction for an addressable LED strip.

use palette::Srgb;

/// Trait for abstracting an addressable LED strip (NeoPixel, DotStar, ...).
///
/// The strip driver buffers pixel colors and a global brightness scalar, and
/// only pushes them to the physical LEDs on [`show`](LedStrip::show). All
/// methods are infallible from the caller's point of view; handle transport
/// errors inside the implementation.
pub trait LedStrip {
    /// Number of pixels on the strip.
    fn len(&self) -> usize;

    /// Returns true if the strip has no pixels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buffers `color` for the pixel at `index`. Out-of-range indices are ignored.
    fn set_pixel(&mut self, index: usize, color: Srgb<u8>);

    /// Buffers the global brightness level (0-255).
    fn set_brightness(&mut self, level: u8);

    /// Returns the currently buffered brightness level.
    fn brightness(&self) -> u8;

    /// Flushes buffered pixel and brightness changes to the hardware.
    fn show(&mut self);

    /// Buffers `color` for every pixel without flushing.
    fn fill(&mut self, color: Srgb<u8>) {
        for index in 0..self.len() {
            self.set_pixel(index, color);
        }
    }
}

impl<T: LedStrip + ?Sized> LedStrip for &mut T {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn set_pixel(&mut self, index: usize, color: Srgb<u8>) {
        (**self).set_pixel(index, color)
    }

    fn set_brightness(&mut self, level: u8) {
        (**self).set_brightness(level)
    }

    fn brightness(&self) -> u8 {
        (**self).brightness()
    }

    fn show(&mut self) {
        (**self).show()
    }
}
