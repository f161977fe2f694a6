//! LED effect engine with pulse state management.
//!
//! Provides [`EffectEngine`], which owns the strip and delay capabilities and
//! carries out validated [`Command`]s. Bounded effects (blink, wipe, color)
//! run to completion inside [`EffectEngine::execute`]. Pulsing is the only
//! effect that outlives the call: it arms [`EffectState::Pulsing`] and is
//! advanced one step per [`EffectEngine::tick`] until another command
//! replaces it.

use crate::COLOR_OFF;
use crate::command::Command;
use crate::config::{ConfigError, EffectConfig};
use crate::strip::LedStrip;
use crate::time::{Delay, clamp_millis};
use palette::Srgb;

/// Direction the pulse brightness is currently moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulsePhase {
    /// Brightness increasing toward the ceiling.
    Rising,
    /// Brightness decreasing toward the floor.
    Falling,
}

/// The indefinite effect currently in force.
///
/// Bounded effects never appear here; they finish before `execute` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EffectState {
    /// No effect in progress. The strip holds whatever the last command left.
    #[default]
    Idle,
    /// Brightness breathing between the configured floor and ceiling.
    Pulsing(PulsePhase),
}

impl EffectState {
    pub fn is_pulsing(&self) -> bool {
        matches!(self, EffectState::Pulsing(_))
    }
}

/// Drives an LED strip through blink, wipe, solid color and pulse effects.
///
/// # Type Parameters
/// * `L` - LED strip implementation
/// * `D` - Blocking delay implementation
pub struct EffectEngine<L: LedStrip, D: Delay> {
    strip: L,
    delay: D,
    config: EffectConfig,
    state: EffectState,
}

impl<L: LedStrip, D: Delay> EffectEngine<L, D> {
    /// Creates an idle engine at default brightness with every pixel off.
    pub fn new(strip: L, delay: D) -> Self {
        Self::with_config(strip, delay, EffectConfig::DEFAULT)
    }

    /// Creates an idle engine using `config`, with every pixel off.
    pub fn with_config(mut strip: L, delay: D, config: EffectConfig) -> Self {
        strip.set_brightness(config.default_brightness);
        strip.fill(COLOR_OFF);
        strip.show();

        Self {
            strip,
            delay,
            config,
            state: EffectState::Idle,
        }
    }

    /// Like [`with_config`](Self::with_config), but rejects an unusable `config`.
    pub fn try_with_config(strip: L, delay: D, config: EffectConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(strip, delay, config))
    }

    /// Carries out a validated command.
    ///
    /// Any command ends a running pulse. Blink and wipe block for their full
    /// duration and cannot be interrupted.
    pub fn execute(&mut self, command: &Command) {
        #[cfg(feature = "defmt")]
        defmt::debug!("executing {=str}", command.name());

        match *command {
            Command::Blink {
                color,
                duration_ms,
                repeats,
            } => self.blink(color, duration_ms, repeats),
            Command::Wipe { color, duration_ms } => self.wipe(color, duration_ms),
            Command::Color { color } => self.solid(color),
            Command::Pulse => self.state = EffectState::Pulsing(PulsePhase::Rising),
        }
    }

    /// Advances the pulse animation by one step.
    ///
    /// Returns `false` without touching the strip when not pulsing.
    pub fn tick(&mut self) -> bool {
        let EffectState::Pulsing(phase) = self.state else {
            return false;
        };

        let (level, next_phase) = self.next_pulse_level(phase);

        #[cfg(feature = "defmt")]
        if next_phase != phase {
            defmt::trace!("pulse turned {} at {}", next_phase, level);
        }

        self.state = EffectState::Pulsing(next_phase);
        self.strip.set_brightness(level);
        self.strip.show();
        self.delay.delay_ms(self.config.pulse_interval_ms);
        true
    }

    /// Returns the current effect state.
    pub fn state(&self) -> EffectState {
        self.state
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn strip(&self) -> &L {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut L {
        &mut self.strip
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Consumes the engine, returning the strip and delay.
    pub fn release(self) -> (L, D) {
        (self.strip, self.delay)
    }

    fn begin_bounded(&mut self) {
        self.state = EffectState::Idle;
        self.strip.set_brightness(self.config.default_brightness);
    }

    fn blink(&mut self, color: Srgb<u8>, duration_ms: u32, repeats: u32) {
        self.begin_bounded();
        let wait = clamp_millis(u64::from(duration_ms) / (2 * u64::from(repeats.max(1))));

        for _ in 0..repeats {
            self.strip.fill(COLOR_OFF);
            self.strip.show();
            self.delay.delay_ms(wait);

            self.strip.fill(color);
            self.strip.show();
            self.delay.delay_ms(wait);
        }

        self.strip.fill(COLOR_OFF);
        self.strip.show();
    }

    fn wipe(&mut self, color: Srgb<u8>, duration_ms: u32) {
        self.begin_bounded();
        let pixels = self.strip.len();
        let wait = u64::from(duration_ms)
            .checked_div(pixels as u64)
            .map_or(0, clamp_millis);

        for index in 0..pixels {
            self.strip.set_pixel(index, color);
            self.strip.show();
            self.delay.delay_ms(wait);
        }
    }

    fn solid(&mut self, color: Srgb<u8>) {
        self.begin_bounded();
        self.strip.fill(color);
        self.strip.show();
    }

    fn next_pulse_level(&self, phase: PulsePhase) -> (u8, PulsePhase) {
        let current = i16::from(self.strip.brightness());
        let step = i16::from(self.config.pulse_step);
        let floor = i16::from(self.config.pulse_min);
        let ceiling = i16::from(self.config.pulse_max);

        match phase {
            PulsePhase::Rising => {
                let level = current + step;
                if level > ceiling {
                    (self.config.pulse_max, PulsePhase::Falling)
                } else {
                    (level as u8, PulsePhase::Rising)
                }
            }
            PulsePhase::Falling => {
                let level = current - step;
                if level < floor {
                    (self.config.pulse_min, PulsePhase::Rising)
                } else {
                    (level as u8, PulsePhase::Falling)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    struct MockStrip {
        pixels: [Srgb<u8>; 4],
        brightness: u8,
        shows: usize,
    }

    impl MockStrip {
        fn new() -> Self {
            Self {
                pixels: [Srgb::new(9, 9, 9); 4],
                brightness: 255,
                shows: 0,
            }
        }
    }

    impl LedStrip for MockStrip {
        fn len(&self) -> usize {
            self.pixels.len()
        }

        fn set_pixel(&mut self, index: usize, color: Srgb<u8>) {
            if let Some(pixel) = self.pixels.get_mut(index) {
                *pixel = color;
            }
        }

        fn set_brightness(&mut self, level: u8) {
            self.brightness = level;
        }

        fn brightness(&self) -> u8 {
            self.brightness
        }

        fn show(&mut self) {
            self.shows += 1;
        }
    }

    struct MockDelay {
        waits: Vec<u32, 64>,
    }

    impl Delay for MockDelay {
        fn delay_ms(&mut self, millis: u32) {
            let _ = self.waits.push(millis);
        }
    }

    fn engine() -> EffectEngine<MockStrip, MockDelay> {
        EffectEngine::new(MockStrip::new(), MockDelay { waits: Vec::new() })
    }

    #[test]
    fn new_turns_strip_off_at_default_brightness() {
        let engine = engine();
        assert_eq!(engine.state(), EffectState::Idle);
        assert_eq!(engine.strip().brightness, 128);
        assert_eq!(engine.strip().pixels, [COLOR_OFF; 4]);
        assert_eq!(engine.strip().shows, 1);
    }

    #[test]
    fn try_with_config_rejects_inverted_pulse_range() {
        let config = EffectConfig::DEFAULT.with_pulse_range(100, 50);
        let result =
            EffectEngine::try_with_config(MockStrip::new(), MockDelay { waits: Vec::new() }, config);
        assert!(matches!(
            result,
            Err(ConfigError::InvertedPulseRange { min: 100, max: 50 })
        ));
    }

    #[test]
    fn tick_is_noop_when_idle() {
        let mut engine = engine();
        assert!(!engine.tick());
        assert_eq!(engine.strip().shows, 1);
        assert!(engine.delay.waits.is_empty());
    }

    #[test]
    fn pulse_rising_clamps_to_ceiling_and_flips() {
        let mut engine = engine();
        engine.execute(&Command::Pulse);
        engine.strip_mut().brightness = 118;

        assert!(engine.tick());
        assert_eq!(engine.strip().brightness, 120);
        assert_eq!(engine.state(), EffectState::Pulsing(PulsePhase::Falling));
    }

    #[test]
    fn pulse_falling_clamps_to_floor_and_flips() {
        let mut engine = engine();
        engine.state = EffectState::Pulsing(PulsePhase::Falling);
        engine.strip_mut().brightness = 22;

        engine.tick();
        assert_eq!(engine.strip().brightness, 20);
        assert_eq!(engine.state(), EffectState::Pulsing(PulsePhase::Rising));
    }

    #[test]
    fn wipe_on_empty_strip_does_nothing_but_reset_brightness() {
        struct EmptyStrip(u8);
        impl LedStrip for EmptyStrip {
            fn len(&self) -> usize {
                0
            }
            fn set_pixel(&mut self, _index: usize, _color: Srgb<u8>) {}
            fn set_brightness(&mut self, level: u8) {
                self.0 = level;
            }
            fn brightness(&self) -> u8 {
                self.0
            }
            fn show(&mut self) {}
        }

        let mut engine = EffectEngine::new(EmptyStrip(0), MockDelay { waits: Vec::new() });
        engine.execute(&Command::Wipe {
            color: Srgb::new(1, 2, 3),
            duration_ms: 1000,
        });
        assert!(engine.delay.waits.is_empty());
        assert_eq!(engine.strip().0, 128);
    }
}
