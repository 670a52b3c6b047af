//! Orchestrates the counting and enumeration engines across the caller's
//! ordered list of starting keys, including the one-shot consumption of an
//! optional restart string.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::counting::{count, Memo};
use crate::enumerate::{Enumerator, Sink};
use crate::error::{ConfigError, WalkError};
use crate::key::KeyId;
use crate::keyboard::Keyboard;
use crate::restart::reconstruct;

/// One line of counting-mode output: a start key's own count.
pub struct CountResult {
    pub base: char,
    pub count: BigUint,
}

/// Runs counting mode over every start key, returning one result per key
/// plus the grand total. Memoization is shared across all start keys.
pub fn run_counting(
    keyboard: &Keyboard,
    starts: &[KeyId],
    min: u32,
    max: u32,
) -> Result<(Vec<CountResult>, BigUint), WalkError> {
    let mut memo = Memo::new();
    let mut results = Vec::with_capacity(starts.len());
    let mut total = BigUint::zero();
    for &start in starts {
        if !keyboard.key(start).active() {
            return Err(ConfigError::InactiveStartKey(keyboard.key(start).base()).into());
        }
        let c = count(keyboard, &mut memo, start, min, max)?;
        total += &c;
        results.push(CountResult {
            base: keyboard.key(start).base(),
            count: c,
        });
    }
    Ok((results, total))
}

/// Runs enumeration mode over every start key, in order. `restart`, if
/// present, is consumed exactly once: it seeds the run for the start key
/// whose base character matches the restart string's first character, and
/// is discarded afterward so later start keys begin fresh.
pub fn run_enumeration(
    keyboard: &Keyboard,
    starts: &[KeyId],
    min: u32,
    max: u32,
    restart: Option<&str>,
    sink: &mut impl Sink,
) -> Result<(), WalkError> {
    let mut restart = restart;

    if let Some(w) = restart {
        let first = w
            .chars()
            .next()
            .ok_or(ConfigError::RestartDoesNotMatchAnyStartKey('\0'))?;
        let matches_any = starts
            .iter()
            .any(|&s| keyboard.key(s).base() == first);
        if !matches_any {
            return Err(ConfigError::RestartDoesNotMatchAnyStartKey(first).into());
        }
    }

    for &start in starts {
        if !keyboard.key(start).active() {
            return Err(ConfigError::InactiveStartKey(keyboard.key(start).base()).into());
        }

        let base = keyboard.key(start).base();
        let use_restart = restart
            .map(|w| w.chars().next() == Some(base))
            .unwrap_or(false);

        if use_restart {
            let w = restart.take().unwrap();
            let mut enumerator = reconstruct(keyboard, w, min as usize, max as usize)?;
            enumerator.run(sink)?;
        } else {
            let mut enumerator = Enumerator::seed(keyboard, start, min as usize, max as usize);
            enumerator.run(sink)?;
        }
    }

    Ok(())
}
