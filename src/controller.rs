//! Top-level control loop tying the line reader to the effect engine.

use core::fmt::Write;

use crate::command::{Command, CommandError};
use crate::config::{ConfigError, DEFAULT_INPUT_CAPACITY, EffectConfig, STATUS_OK};
use crate::effect::{EffectEngine, EffectState};
use crate::reader::{LineReader, PollSummary};
use crate::serial::{BusyIndicator, NoIndicator, SerialPort};
use crate::strip::LedStrip;
use crate::time::Delay;

/// Text of a status line: a decimal code of at most three digits.
pub type StatusLine = heapless::String<4>;

/// Formats a status code as sent to the host.
pub fn status_line(code: u8) -> StatusLine {
    let mut line = StatusLine::new();
    // three digits always fit
    let _ = write!(line, "{}", code);
    line
}

/// Serial-driven LED controller.
///
/// Call [`poll`](Controller::poll) once per iteration of the main loop. Each
/// call handles every complete command line the serial port has delivered,
/// answering each with one status line, then advances the pulse animation
/// by one step if it is active.
///
/// # Type Parameters
/// * `L` - LED strip implementation
/// * `D` - Blocking delay implementation
/// * `I` - Busy indicator implementation
/// * `C` - Maximum command line length in bytes
pub struct Controller<
    L: LedStrip,
    D: Delay,
    I: BusyIndicator = NoIndicator,
    const C: usize = DEFAULT_INPUT_CAPACITY,
> {
    reader: LineReader<C>,
    engine: EffectEngine<L, D>,
    indicator: I,
}

impl<L: LedStrip, D: Delay> Controller<L, D> {
    /// Creates a controller with default settings and no busy indicator.
    pub fn new(strip: L, delay: D) -> Self {
        Self::with_indicator(strip, delay, NoIndicator, EffectConfig::DEFAULT)
    }
}

impl<L: LedStrip, D: Delay, I: BusyIndicator, const C: usize> Controller<L, D, I, C> {
    /// Creates a controller that reports command processing on `indicator`.
    pub fn with_indicator(strip: L, delay: D, mut indicator: I, config: EffectConfig) -> Self {
        indicator.set_busy(false);

        Self {
            reader: LineReader::new(),
            engine: EffectEngine::with_config(strip, delay, config),
            indicator,
        }
    }

    /// Like [`with_indicator`](Self::with_indicator), but rejects an unusable `config`.
    pub fn try_with_indicator(
        strip: L,
        delay: D,
        indicator: I,
        config: EffectConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_indicator(strip, delay, indicator, config))
    }

    /// Runs one scheduler tick.
    ///
    /// Pending input is handled first. The pulse step then runs whether or
    /// not input arrived this tick, so a tick that receives commands may also
    /// advance the animation.
    pub fn poll<S: SerialPort>(&mut self, serial: &mut S) -> PollSummary {
        let engine = &mut self.engine;
        let indicator = &mut self.indicator;

        let summary = self.reader.poll(serial, |serial, line| {
            let _ = dispatch(engine, indicator, serial, line);
        });

        self.engine.tick();
        summary
    }

    /// Parses and executes one command line, writing its status to `serial`.
    pub fn handle_line<S: SerialPort>(
        &mut self,
        serial: &mut S,
        line: &str,
    ) -> Result<Command, CommandError> {
        dispatch(&mut self.engine, &mut self.indicator, serial, line)
    }

    pub fn state(&self) -> EffectState {
        self.engine.state()
    }

    pub fn engine(&self) -> &EffectEngine<L, D> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EffectEngine<L, D> {
        &mut self.engine
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Bytes buffered toward the next command line.
    pub fn pending_input(&self) -> usize {
        self.reader.pending()
    }
}

fn dispatch<L, D, I, S>(
    engine: &mut EffectEngine<L, D>,
    indicator: &mut I,
    serial: &mut S,
    line: &str,
) -> Result<Command, CommandError>
where
    L: LedStrip,
    D: Delay,
    I: BusyIndicator,
    S: SerialPort,
{
    indicator.set_busy(true);

    let result = Command::parse(line);
    let code = match &result {
        Ok(command) => {
            engine.execute(command);
            STATUS_OK
        }
        Err(error) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("rejected command: {}", error);
            error.status_code()
        }
    };

    indicator.set_busy(false);
    serial.write_line(&status_line(code));
    result
}
