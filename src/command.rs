//! Text command parsing and validation.
//!
//! The serial protocol is one command per line, words separated by spaces:
//!
//! ```text
//! blink <r> <g> <b> <duration_ms> <repeats>
//! wipe <r> <g> <b> <duration_ms>
//! color <r> <g> <b>
//! pulse
//! ```
//!
//! Arguments are validated left to right and parsing stops at the first bad
//! one. Tokens after the last expected argument are ignored.

use core::str::{FromStr, Split};

use palette::Srgb;

/// A validated command, ready for the effect engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Flash the whole strip `repeats` times over `duration_ms`, ending dark.
    Blink {
        color: Srgb<u8>,
        duration_ms: u32,
        repeats: u32,
    },
    /// Light the strip pixel by pixel over `duration_ms`.
    Wipe { color: Srgb<u8>, duration_ms: u32 },
    /// Set the whole strip to one color.
    Color { color: Srgb<u8> },
    /// Breathe the brightness until another command arrives.
    Pulse,
}

/// Why a command line was rejected.
///
/// `position` is the 1-based index of the offending argument after the
/// command word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Unknown or empty command word.
    Unrecognized,
    /// The line ended before a required argument.
    MissingArgument { position: usize },
    /// The argument is not a decimal integer.
    InvalidNumber { position: usize },
    /// The argument is outside its allowed range.
    OutOfRange { position: usize },
}

impl CommandError {
    /// Non-zero status code reported to the host.
    pub const fn status_code(&self) -> u8 {
        match self {
            CommandError::Unrecognized => 1,
            CommandError::MissingArgument { .. } => 2,
            CommandError::InvalidNumber { .. } => 3,
            CommandError::OutOfRange { .. } => 4,
        }
    }
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::Unrecognized => write!(f, "unrecognized command"),
            CommandError::MissingArgument { position } => {
                write!(f, "missing argument {}", position)
            }
            CommandError::InvalidNumber { position } => {
                write!(f, "argument {} is not an integer", position)
            }
            CommandError::OutOfRange { position } => {
                write!(f, "argument {} is out of range", position)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

impl Command {
    /// Parses and validates one command line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut args = Args::new(line);

        match args.command_word() {
            Some("blink") => {
                let color = args.color()?;
                let duration_ms = args.integer(0, u32::MAX as i64)? as u32;
                // zero repeats would leave the half-cycle wait undefined
                let repeats = args.integer(1, u32::MAX as i64)? as u32;
                Ok(Command::Blink {
                    color,
                    duration_ms,
                    repeats,
                })
            }
            Some("wipe") => {
                let color = args.color()?;
                let duration_ms = args.integer(0, u32::MAX as i64)? as u32;
                Ok(Command::Wipe { color, duration_ms })
            }
            Some("color") => {
                let color = args.color()?;
                Ok(Command::Color { color })
            }
            Some("pulse") => Ok(Command::Pulse),
            _ => Err(CommandError::Unrecognized),
        }
    }

    /// The command word this command is spelled with.
    pub const fn name(&self) -> &'static str {
        match self {
            Command::Blink { .. } => "blink",
            Command::Wipe { .. } => "wipe",
            Command::Color { .. } => "color",
            Command::Pulse => "pulse",
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Command::parse(line)
    }
}

/// Space-separated tokens of a line, tracking the argument position.
struct Args<'a> {
    tokens: Split<'a, char>,
    position: usize,
}

impl<'a> Args<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            tokens: line.split(' '),
            position: 0,
        }
    }

    // Runs of spaces separate tokens like a single space does.
    fn next_token(&mut self) -> Option<&'a str> {
        self.tokens.by_ref().find(|token| !token.is_empty())
    }

    fn command_word(&mut self) -> Option<&'a str> {
        self.next_token()
    }

    fn integer(&mut self, min: i64, max: i64) -> Result<i64, CommandError> {
        self.position += 1;
        let position = self.position;

        let token = self
            .next_token()
            .ok_or(CommandError::MissingArgument { position })?;
        let value = parse_integer(token).ok_or(CommandError::InvalidNumber { position })?;

        if value < min || value > max {
            return Err(CommandError::OutOfRange { position });
        }
        Ok(value)
    }

    fn channel(&mut self) -> Result<u8, CommandError> {
        Ok(self.integer(0, u8::MAX as i64)? as u8)
    }

    fn color(&mut self) -> Result<Srgb<u8>, CommandError> {
        let red = self.channel()?;
        let green = self.channel()?;
        let blue = self.channel()?;
        Ok(Srgb::new(red, green, blue))
    }
}

/// Optional sign followed by at least one decimal digit, nothing else.
fn parse_integer(token: &str) -> Option<i64> {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
