//! Iterative dry-run counting engine: for a starting key, computes the
//! exact number of walk-strings with length in `[min, max]`, memoized over
//! `(key, depth)`. Mirrors the reference implementation's `dry_run`
//! function; since summation does not depend on push order, the child-push
//! order here is whatever is convenient (unlike the enumeration engine).

use hashbrown::HashMap;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::InternalError;
use crate::keyboard::Keyboard;
use crate::key::KeyId;

/// Memo table shared across every starting key in a single counting run,
/// so that sub-walks common to multiple starts are computed once.
pub struct Memo {
    table: HashMap<(KeyId, u32), BigUint>,
}

impl Memo {
    pub fn new() -> Memo {
        Memo {
            table: HashMap::new(),
        }
    }
}

impl Default for Memo {
    fn default() -> Memo {
        Memo::new()
    }
}

struct Frame {
    key: KeyId,
    depth: u32,
    expanded: bool,
}

/// `count(s, 0)`: the number of walk-strings of length in `[min, max]`
/// starting at `s`. `s` must be active.
pub fn count(
    keyboard: &Keyboard,
    memo: &mut Memo,
    start: KeyId,
    min: u32,
    max: u32,
) -> Result<BigUint, InternalError> {
    count_at(keyboard, memo, start, 0, min, max)
}

fn count_at(
    keyboard: &Keyboard,
    memo: &mut Memo,
    start: KeyId,
    start_depth: u32,
    min: u32,
    max: u32,
) -> Result<BigUint, InternalError> {
    let mut stack = vec![Frame {
        key: start,
        depth: start_depth,
        expanded: false,
    }];

    while let Some(frame) = stack.pop() {
        if memo.table.contains_key(&(frame.key, frame.depth)) {
            continue;
        }

        if !frame.expanded {
            let key = keyboard.key(frame.key);
            if frame.depth + 1 < max {
                let mut needs_children = false;
                for &n in key.neighbors() {
                    if !keyboard.key(n).active() {
                        continue;
                    }
                    if !memo.table.contains_key(&(n, frame.depth + 1)) {
                        needs_children = true;
                    }
                }
                if needs_children {
                    stack.push(Frame {
                        key: frame.key,
                        depth: frame.depth,
                        expanded: true,
                    });
                    for &n in key.neighbors() {
                        if !keyboard.key(n).active() {
                            continue;
                        }
                        stack.push(Frame {
                            key: n,
                            depth: frame.depth + 1,
                            expanded: false,
                        });
                    }
                    continue;
                }
            }
            combine(keyboard, memo, frame.key, frame.depth, min, max)?;
        } else {
            combine(keyboard, memo, frame.key, frame.depth, min, max)?;
        }
    }

    memo.table
        .get(&(start, start_depth))
        .cloned()
        .ok_or(InternalError::ZeroMemo {
            base: keyboard.key(start).base(),
            depth: start_depth as usize,
        })
}

fn combine(
    keyboard: &Keyboard,
    memo: &mut Memo,
    key_id: KeyId,
    depth: u32,
    min: u32,
    max: u32,
) -> Result<(), InternalError> {
    if memo.table.contains_key(&(key_id, depth)) {
        return Ok(());
    }
    let key = keyboard.key(key_id);
    let v = BigUint::from(key.choice_count());

    let additive = if depth + 1 >= min {
        v.clone()
    } else {
        BigUint::zero()
    };

    let total = if depth + 1 >= max {
        additive
    } else {
        let mut sum = BigUint::zero();
        for &n in key.neighbors() {
            if !keyboard.key(n).active() {
                continue;
            }
            let child = memo.table.get(&(n, depth + 1)).cloned().ok_or(
                InternalError::ZeroMemo {
                    base: keyboard.key(n).base(),
                    depth: (depth + 1) as usize,
                },
            )?;
            sum += child;
        }
        &v * sum + additive
    };

    memo.table.insert((key_id, depth), total);
    Ok(())
}
