//! Command-line surface, mirroring the flag table in the external
//! interfaces section: a required configuration file, a required ordered
//! list of start keys, a required `[min, max]` window, a counting/dry-run
//! switch, an infinite-wait switch, a required log file, an optional
//! scheduled stop, and an optional restart string.

use clap::Parser;

use crate::error::ArgumentError;

#[derive(Parser, Debug)]
#[command(
    name = "keywalk",
    about = "Enumerates or counts keyboard-walk strings reachable from a set of starting keys."
)]
pub struct Args {
    /// Keyboard configuration file.
    #[arg(short = 'a', long = "arrangement")]
    pub arrangement: String,

    /// Concatenated base characters of the starting keys, in emission order.
    #[arg(short = 'k', long = "keys")]
    pub keys: String,

    /// Minimum walk length, inclusive.
    #[arg(short = 'm', long = "min")]
    pub min: u32,

    /// Maximum walk length, inclusive.
    #[arg(short = 'M', long = "max")]
    pub max: u32,

    /// Select counting ("dry-run") mode instead of enumeration.
    #[arg(short = 'd', long = "dryrun", action)]
    pub dryrun: bool,

    /// After completion, wait for a signal before exiting.
    #[arg(short = 'i', long = "infinite", action)]
    pub infinite: bool,

    /// Append-only progress log file.
    #[arg(short = 'l', long = "logfile")]
    pub logfile: String,

    /// Schedule termination this many seconds after startup.
    #[arg(short = 's', long = "stop")]
    pub stop: Option<u32>,

    /// Resume enumeration from this previously emitted string.
    #[arg(short = 'w', long = "restart")]
    pub restart: Option<String>,
}

impl Args {
    /// Validates cross-field constraints the derive macro can't express:
    /// `min > 0`, `max >= min`, `stop` (if present) is a positive number of
    /// seconds, no duplicate start keys, and (if present) the restart
    /// string's length falls within `[min, max]`.
    pub fn validate(&self) -> Result<(), ArgumentError> {
        if self.min == 0 {
            return Err(ArgumentError::MinNotPositive(self.min));
        }
        if self.max < self.min {
            return Err(ArgumentError::MaxLessThanMin {
                min: self.min,
                max: self.max,
            });
        }
        if self.stop == Some(0) {
            return Err(ArgumentError::StopNotPositive(0));
        }
        let mut seen = std::collections::HashSet::new();
        for c in self.keys.chars() {
            if !seen.insert(c) {
                return Err(ArgumentError::RepeatedStartKey(c));
            }
        }
        if let Some(restart) = &self.restart {
            let len = restart.chars().count();
            if len < self.min as usize || len > self.max as usize {
                return Err(ArgumentError::RestartLengthOutOfRange {
                    len,
                    min: self.min,
                    max: self.max,
                });
            }
        }
        Ok(())
    }

    pub fn start_keys(&self) -> impl Iterator<Item = char> + '_ {
        self.keys.chars()
    }
}
