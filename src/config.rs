//! Effect tuning parameters and protocol constants.

/// Default input buffer capacity.
///
/// A line of exactly this many bytes is accepted; the next byte overflows.
/// Earlier AVR firmware speaking this protocol overflowed on the 127th byte,
/// so hosts written against it never send more than 126.
pub const DEFAULT_INPUT_CAPACITY: usize = 127;

/// Pixel count of the reference LED strip.
pub const DEFAULT_PIXEL_COUNT: usize = 15;

/// Status code reported after a successfully executed command.
pub const STATUS_OK: u8 = 0;

/// Diagnostic written when a line exceeds the input capacity.
pub const INPUT_TOO_LONG: &str = "Input too long";

/// Brightness and pulse timing parameters for the effect engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EffectConfig {
    /// Brightness restored before every bounded or solid color effect.
    pub default_brightness: u8,
    /// Floor of the pulse animation.
    pub pulse_min: u8,
    /// Ceiling of the pulse animation.
    pub pulse_max: u8,
    /// Brightness change per pulse step.
    pub pulse_step: u8,
    /// Wait after each pulse step, in milliseconds.
    pub pulse_interval_ms: u32,
}

impl EffectConfig {
    pub const DEFAULT: Self = Self {
        default_brightness: 128,
        pulse_min: 20,
        pulse_max: 120,
        pulse_step: 5,
        pulse_interval_ms: 100,
    };

    pub const fn with_default_brightness(mut self, level: u8) -> Self {
        self.default_brightness = level;
        self
    }

    pub const fn with_pulse_range(mut self, min: u8, max: u8) -> Self {
        self.pulse_min = min;
        self.pulse_max = max;
        self
    }

    pub const fn with_pulse_step(mut self, step: u8) -> Self {
        self.pulse_step = step;
        self
    }

    pub const fn with_pulse_interval_ms(mut self, millis: u32) -> Self {
        self.pulse_interval_ms = millis;
        self
    }

    /// Checks that the pulse parameters describe a usable animation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pulse_min > self.pulse_max {
            return Err(ConfigError::InvertedPulseRange {
                min: self.pulse_min,
                max: self.pulse_max,
            });
        }
        if self.pulse_step == 0 {
            return Err(ConfigError::ZeroPulseStep);
        }
        Ok(())
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Invalid effect configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pulse floor is above the pulse ceiling.
    InvertedPulseRange { min: u8, max: u8 },
    /// Pulse step of zero would never move the brightness.
    ZeroPulseStep,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvertedPulseRange { min, max } => {
                write!(f, "pulse floor {} is above pulse ceiling {}", min, max)
            }
            ConfigError::ZeroPulseStep => write!(f, "pulse step must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
