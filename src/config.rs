//! Loads a [`Keyboard`] from the line-oriented configuration file format:
//! a key count, N key-definition lines, a blank separator, then zero or
//! more adjacency lines. Mirrors the state machine in the reference
//! implementation's `parseFile`/`setup_neighbours`.

use std::io::BufRead;

use hashbrown::HashMap;

use crate::error::ConfigError;
use crate::key::Key;
use crate::keyboard::{Keyboard, KeyboardValidation, KeyValidation};

const MAX_LINE_LEN: usize = 1024;

#[derive(PartialEq, Eq, Clone, Copy)]
enum State {
    Preamble,
    KeyDefinitions,
    Adjacency,
}

/// Parses `reader` into a fully validated [`Keyboard`].
pub fn load<R: BufRead>(reader: R) -> Result<Keyboard, ConfigError> {
    let mut state = State::Preamble;
    let mut num_keys: usize = 0;
    let mut bases: Vec<char> = Vec::new();
    let mut keys: Vec<Key> = Vec::new();
    let mut adjacency: HashMap<char, Vec<char>> = HashMap::new();
    let mut adjacency_lines_seen = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let raw = line.map_err(|e| ConfigError::MalformedLine {
            line: line_no,
            message: e.to_string(),
        })?;
        let raw = truncate_line(&raw);

        if state == State::Preamble {
            if raw.is_empty() || raw.starts_with('#') {
                continue;
            }
            let n: i64 = raw.trim().parse().map_err(|_| ConfigError::MalformedLine {
                line: line_no,
                message: format!("expected a key count, found {raw:?}"),
            })?;
            if n <= 0 {
                return Err(ConfigError::MalformedLine {
                    line: line_no,
                    message: format!("invalid number of keys: {n}"),
                });
            }
            num_keys = n as usize;
            state = State::KeyDefinitions;
            continue;
        }

        if state == State::KeyDefinitions {
            if raw.trim().is_empty() {
                if keys.len() != num_keys {
                    return Err(ConfigError::MalformedLine {
                        line: line_no,
                        message: format!(
                            "wrong number of keys - asked for {num_keys}, found {}",
                            keys.len()
                        ),
                    });
                }
                state = State::Adjacency;
                continue;
            }
            if keys.len() == num_keys {
                return Err(ConfigError::MalformedLine {
                    line: line_no,
                    message: format!(
                        "too many keys - asked for {num_keys}, found {}",
                        keys.len() + 1
                    ),
                });
            }
            let mut chars = raw.chars();
            if chars.next() != Some('-') {
                return Err(ConfigError::MalformedLine {
                    line: line_no,
                    message: "key definition should start with '-'".to_string(),
                });
            }
            let base = chars.next().ok_or_else(|| ConfigError::MalformedLine {
                line: line_no,
                message: "invalid base character".to_string(),
            })?;
            let variants: Vec<char> = chars.collect();
            bases.push(base);
            keys.push(Key::init_character(base, variants, true));
            continue;
        }

        // State::Adjacency
        if raw.trim().is_empty() {
            continue;
        }
        adjacency_lines_seen += 1;
        if adjacency_lines_seen > num_keys {
            return Err(ConfigError::MalformedLine {
                line: line_no,
                message: "too many key configuration lines".to_string(),
            });
        }
        let mut chars = raw.chars();
        let base = chars.next().ok_or_else(|| ConfigError::MalformedLine {
            line: line_no,
            message: "empty adjacency line".to_string(),
        })?;
        chars.next(); // separator byte, value ignored per the format
        let neighbors: Vec<char> = chars.collect();
        if !bases.contains(&base) {
            return Err(ConfigError::UnknownStartKey(base));
        }
        if adjacency.contains_key(&base) {
            return Err(ConfigError::RepeatedAdjacency(base));
        }
        for &n in &neighbors {
            if !bases.contains(&n) {
                return Err(ConfigError::UnknownNeighbor(n));
            }
        }
        adjacency.insert(base, neighbors);
    }

    if state == State::Preamble {
        return Err(ConfigError::MalformedLine {
            line: 0,
            message: "configuration file is empty".to_string(),
        });
    }
    if state == State::KeyDefinitions && keys.len() != num_keys {
        return Err(ConfigError::MalformedLine {
            line: 0,
            message: format!(
                "wrong number of keys - asked for {num_keys}, found {}",
                keys.len()
            ),
        });
    }

    let base_to_index: HashMap<char, usize> = bases
        .iter()
        .enumerate()
        .map(|(idx, &c)| (c, idx))
        .collect();

    for (idx, base) in bases.iter().enumerate() {
        let neighbor_ids = adjacency
            .get(base)
            .map(|ns| {
                ns.iter()
                    .map(|n| crate::key::KeyId(base_to_index[n]))
                    .collect()
            })
            .unwrap_or_default();
        keys[idx].init_neighbors(neighbor_ids);
    }

    let keyboard = Keyboard::new(keys);
    match keyboard.validate() {
        KeyboardValidation::Ok => Ok(keyboard),
        KeyboardValidation::BadKey(id, reason) => {
            let base = keyboard.key(id).base();
            let reason = match reason {
                KeyValidation::Ok => unreachable!(),
                KeyValidation::BaseInVariants => "base appears in its own shift variants",
                KeyValidation::RepeatedVariant => "a shift variant is repeated",
                KeyValidation::RepeatedNeighbor => "a neighbor is repeated",
            };
            Err(ConfigError::InvalidKey {
                base,
                reason: reason.to_string(),
            })
        }
        KeyboardValidation::NotDisjoint(a, b) => Err(ConfigError::NotDisjoint {
            a: keyboard.key(a).base(),
            b: keyboard.key(b).base(),
        }),
    }
}

fn truncate_line(line: &str) -> String {
    if line.len() <= MAX_LINE_LEN {
        line.trim_end_matches(['\r', '\n']).to_string()
    } else {
        line[..MAX_LINE_LEN].trim_end_matches(['\r', '\n']).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<Keyboard, ConfigError> {
        load(Cursor::new(text.as_bytes()))
    }

    #[test]
    fn parses_k1_from_the_worked_example() {
        let text = "2\n-a\n-bB\n\na-b\nb-a\n";
        let kb = parse(text).unwrap();
        assert_eq!(kb.len(), 2);
        let a = kb.find_by_char('a').unwrap();
        let b = kb.find_by_char('b').unwrap();
        assert_eq!(kb.key(a).neighbors(), &[b]);
        assert_eq!(kb.key(b).neighbors(), &[a]);
        assert_eq!(kb.key(b).shift_variants(), &['B']);
    }

    #[test]
    fn skips_leading_blank_and_comment_lines() {
        let text = "# comment\n\n1\n-a\n\n";
        let kb = parse(text).unwrap();
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn keys_without_an_adjacency_line_have_no_neighbors() {
        let text = "1\n-a\n\n";
        let kb = parse(text).unwrap();
        let a = kb.find_by_char('a').unwrap();
        assert!(kb.key(a).neighbors().is_empty());
    }

    #[test]
    fn tolerates_any_single_separator_byte() {
        let text = "2\n-a\n-b\n\na:b\nb b\n";
        let kb = parse(text).unwrap();
        let a = kb.find_by_char('a').unwrap();
        let b = kb.find_by_char('b').unwrap();
        assert_eq!(kb.key(a).neighbors(), &[b]);
        assert_eq!(kb.key(b).neighbors(), &[a]);
    }

    #[test]
    fn rejects_wrong_key_count() {
        let text = "2\n-a\n\n";
        assert!(matches!(parse(text), Err(ConfigError::MalformedLine { .. })));
    }

    #[test]
    fn rejects_repeated_adjacency_line() {
        let text = "1\n-a\n\na-a\na-a\n";
        assert!(matches!(parse(text), Err(ConfigError::RepeatedAdjacency('a'))));
    }

    #[test]
    fn rejects_unknown_neighbor() {
        let text = "1\n-a\n\na-z\n";
        assert!(matches!(parse(text), Err(ConfigError::UnknownNeighbor('z'))));
    }

    #[test]
    fn rejects_non_disjoint_keys() {
        let text = "2\n-ax\n-bx\n\n";
        assert!(matches!(parse(text), Err(ConfigError::NotDisjoint { .. })));
    }

    #[test]
    fn rejects_base_in_variants() {
        let text = "1\n-xy x\n\n";
        let err = parse(text);
        assert!(err.is_err());
    }
}
