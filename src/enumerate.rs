//! Iterative enumeration engine: yields every walk-string of length in
//! `[min, max]` starting at a given key, in the lexicographic-by-traversal
//! order described in the component design (base before each shift variant,
//! in declared order; neighbors in declared order).
//!
//! The reference implementation pushes children base-first; under LIFO
//! popping that actually visits variants before the base and later
//! neighbors before earlier ones. To get base-first, declared-neighbor-order
//! emission, this engine pushes the *last* eligible choice first and the
//! *first* eligible choice (base) last, so popping replays declared order.

use crate::error::CapacityError;
use crate::key::{Choice, KeyId};
use crate::keyboard::Keyboard;

/// Receives each completed walk-string as it is emitted.
pub trait Sink {
    fn emit(&mut self, word: &str);
}

impl<F: FnMut(&str)> Sink for F {
    fn emit(&mut self, word: &str) {
        self(word)
    }
}

/// A single frame of the traversal work stack: one character choice at one
/// position in the word being built.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub key: KeyId,
    pub pos: usize,
    pub choice: Choice,
    pub expanded: bool,
}

/// Hard ceiling on simultaneous work-stack frames, matching the reference's
/// fixed-size stack rather than a dynamically growable one.
pub const STACK_CEILING: usize = 4096;

pub struct Enumerator<'a> {
    keyboard: &'a Keyboard,
    min: usize,
    max: usize,
    stack: Vec<Frame>,
    word: Vec<char>,
}

impl<'a> Enumerator<'a> {
    /// Seeds the stack at the starting key with no restart: the base choice
    /// and every shift-variant choice at position 0, pushed so that base
    /// pops first.
    pub fn seed(keyboard: &'a Keyboard, start: KeyId, min: usize, max: usize) -> Enumerator<'a> {
        let mut enumerator = Enumerator {
            keyboard,
            min,
            max,
            stack: Vec::new(),
            word: vec!['\0'; max + 1],
        };
        enumerator.push_choices_reversed(start, 0);
        enumerator
    }

    /// Builds an enumerator around an already-prepared stack and word
    /// prefix, as produced by the restart reconstructor.
    pub fn from_parts(
        keyboard: &'a Keyboard,
        min: usize,
        max: usize,
        stack: Vec<Frame>,
        word: Vec<char>,
    ) -> Enumerator<'a> {
        Enumerator {
            keyboard,
            min,
            max,
            stack,
            word,
        }
    }

    /// Pushes every choice of `key` at `pos`, in an order such that the
    /// first declared choice (base) is popped first: push the last choice
    /// first, and base last.
    fn push_choices_reversed(&mut self, key: KeyId, pos: usize) {
        let choices: Vec<Choice> = self.keyboard.key(key).choices().collect();
        for choice in choices.into_iter().rev() {
            self.stack.push(Frame {
                key,
                pos,
                choice,
                expanded: false,
            });
        }
    }

    /// Runs to completion, calling `sink.emit` for every walk-string found.
    pub fn run(&mut self, sink: &mut impl Sink) -> Result<(), CapacityError> {
        while let Some(frame) = self.stack.pop() {
            if frame.expanded {
                continue;
            }
            if self.stack.len() + 1 > STACK_CEILING {
                return Err(CapacityError::StackCeilingExceeded(STACK_CEILING));
            }

            let key = self.keyboard.key(frame.key);
            let c = key.char_for(frame.choice);
            self.word[frame.pos] = c;

            let len = frame.pos + 1;
            if len >= self.min {
                let word: String = self.word[..len].iter().collect();
                sink.emit(&word);
            }

            if len < self.max {
                for &neighbor in key.neighbors().iter().rev() {
                    if !self.keyboard.key(neighbor).active() {
                        continue;
                    }
                    self.push_choices_reversed(neighbor, len);
                }
            }
        }
        Ok(())
    }

    pub fn word_prefix(&self, len: usize) -> String {
        self.word[..len].iter().collect()
    }
}
