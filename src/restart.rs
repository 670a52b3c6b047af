//! Rebuilds an [`Enumerator`]'s work stack from a previously emitted string
//! so that enumeration resumes at the lexicographic successor of that
//! string under the engine's own ordering. Mirrors the reference
//! implementation's `reinitDFS`, adjusted for the corrected push order used
//! by [`crate::enumerate`].

use crate::enumerate::{Enumerator, Frame};
use crate::error::ConfigError;
use crate::key::Choice;
use crate::keyboard::Keyboard;

/// Reconstructs the enumerator state that should follow `restart` having
/// just been emitted.
pub fn reconstruct<'a>(
    keyboard: &'a Keyboard,
    restart: &str,
    min: usize,
    max: usize,
) -> Result<Enumerator<'a>, ConfigError> {
    let chars: Vec<char> = restart.chars().collect();
    let len = chars.len();

    let mut word = vec!['\0'; max + 1];
    for (i, &c) in chars.iter().enumerate() {
        word[i] = c;
    }

    let mut key_ids = Vec::with_capacity(len);
    for &c in &chars {
        let id = keyboard
            .find_by_char(c)
            .ok_or(ConfigError::UnknownRestartChar(c))?;
        key_ids.push(id);
    }

    let mut frames: Vec<Frame> = Vec::new();

    for i in 0..len {
        let key_id = key_ids[i];
        let key = keyboard.key(key_id);
        let used = key
            .choice_for_char(chars[i])
            .ok_or(ConfigError::UnknownRestartChar(chars[i]))?;

        if i < len - 1 {
            let next_key_id = key_ids[i + 1];
            let declared_pos = key
                .neighbors()
                .iter()
                .position(|&n| n == next_key_id)
                .ok_or(ConfigError::NonAdjacentRestartStep {
                    from: chars[i],
                    to: chars[i + 1],
                })?;
            if !keyboard.key(next_key_id).active() {
                return Err(ConfigError::NonAdjacentRestartStep {
                    from: chars[i],
                    to: chars[i + 1],
                });
            }

            // Re-offer sibling choices at this key not yet used, in
            // base-first pop order.
            push_choices_after(&mut frames, keyboard, key_id, i, used);

            // Re-offer neighbors strictly after the one the restart string
            // continued into, in declared order (first-after popping
            // first).
            let active_after: Vec<_> = key
                .neighbors()
                .iter()
                .skip(declared_pos + 1)
                .copied()
                .filter(|&n| keyboard.key(n).active())
                .collect();
            for &neighbor in active_after.iter().rev() {
                push_all_choices(&mut frames, keyboard, neighbor, i + 1);
            }
        } else {
            // Last character: re-offer this key's own choice and every
            // later one, so the continuation past the restart point is
            // re-explored.
            push_choices_from(&mut frames, keyboard, key_id, i, used);
        }
    }

    Ok(Enumerator::from_parts(keyboard, min, max, frames, word))
}

fn push_all_choices(
    frames: &mut Vec<Frame>,
    keyboard: &Keyboard,
    key_id: crate::key::KeyId,
    pos: usize,
) {
    let choices: Vec<Choice> = keyboard.key(key_id).choices().collect();
    for choice in choices.into_iter().rev() {
        frames.push(Frame {
            key: key_id,
            pos,
            choice,
            expanded: false,
        });
    }
}

fn push_choices_after(
    frames: &mut Vec<Frame>,
    keyboard: &Keyboard,
    key_id: crate::key::KeyId,
    pos: usize,
    after: Choice,
) {
    let choices: Vec<Choice> = keyboard
        .key(key_id)
        .choices()
        .filter(|c| c.rank() > after.rank())
        .collect();
    for choice in choices.into_iter().rev() {
        frames.push(Frame {
            key: key_id,
            pos,
            choice,
            expanded: false,
        });
    }
}

fn push_choices_from(
    frames: &mut Vec<Frame>,
    keyboard: &Keyboard,
    key_id: crate::key::KeyId,
    pos: usize,
    from: Choice,
) {
    let choices: Vec<Choice> = keyboard
        .key(key_id)
        .choices()
        .filter(|c| c.rank() >= from.rank())
        .collect();
    for choice in choices.into_iter().rev() {
        frames.push(Frame {
            key: key_id,
            pos,
            choice,
            expanded: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::Sink;
    use crate::key::Key;

    fn k1() -> Keyboard {
        let mut a = Key::init_character('a', vec![], true);
        let mut b = Key::init_character('b', vec!['B'], true);
        a.init_neighbors(vec![crate::key::KeyId(1)]);
        b.init_neighbors(vec![crate::key::KeyId(0)]);
        Keyboard::new(vec![a, b])
    }

    fn run_collect(mut enumerator: Enumerator) -> Vec<String> {
        let mut out = Vec::new();
        let mut sink = |w: &str| out.push(w.to_string());
        enumerator.run(&mut sink as &mut dyn Sink).unwrap();
        out
    }

    #[test]
    fn s5_restart_after_ab_reproduces_ab_then_the_remaining_strings() {
        // The algorithm's last-character rule re-offers the restart key's
        // own choice so its continuation is re-explored, which legitimately
        // re-emits "ab" itself once before the new strings. Property 8 only
        // requires that nothing *preceding* "ab" is emitted and that the
        // union with the original run up to "ab" equals the full sequence.
        let kb = k1();
        let enumerator = reconstruct(&kb, "ab", 2, 3).unwrap();
        let got = run_collect(enumerator);
        let got_set: std::collections::BTreeSet<String> = got.iter().cloned().collect();
        let expected: std::collections::BTreeSet<String> =
            ["ab", "aB", "aba", "aBa"].iter().map(|s| s.to_string()).collect();
        assert_eq!(got_set, expected);

        let full_run: std::collections::BTreeSet<String> = {
            let mut out = Vec::new();
            let a = kb.find_by_char('a').unwrap();
            let mut e = crate::enumerate::Enumerator::seed(&kb, a, 2, 3);
            e.run(&mut |w: &str| out.push(w.to_string())).unwrap();
            out.into_iter().collect()
        };
        assert_eq!(got_set, full_run);
    }

    #[test]
    fn unknown_restart_character_is_a_config_error() {
        let kb = k1();
        let err = reconstruct(&kb, "az", 1, 2);
        assert!(matches!(err, Err(ConfigError::UnknownRestartChar('z'))));
    }

    #[test]
    fn non_adjacent_restart_step_is_a_config_error() {
        let mut isolated = Key::init_character('c', vec![], true);
        isolated.init_neighbors(vec![]);
        let mut a = Key::init_character('a', vec![], true);
        a.init_neighbors(vec![]);
        let kb = Keyboard::new(vec![a, isolated]);
        let err = reconstruct(&kb, "ac", 1, 2);
        assert!(matches!(
            err,
            Err(ConfigError::NonAdjacentRestartStep { from: 'a', to: 'c' })
        ));
    }
}
