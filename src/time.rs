//! Blocking delay abstraction for platform-agnostic timing.

/// Trait for abstracting a blocking millisecond delay.
///
/// Bounded effects (blink, wipe) and each pulse step hold the control loop
/// for their wait time. Implement this with your HAL's busy-wait or timer.
pub trait Delay {
    /// Blocks for `millis` milliseconds.
    fn delay_ms(&mut self, millis: u32);
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay_ms(&mut self, millis: u32) {
        (**self).delay_ms(millis)
    }
}

/// Saturating conversion of a 64-bit millisecond count to a delay argument.
#[inline]
pub(crate) fn clamp_millis(millis: u64) -> u32 {
    u32::try_from(millis).unwrap_or(u32::MAX)
}
