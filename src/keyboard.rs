use hashbrown::HashMap;

use crate::key::{disjoint, validate_key, Key, KeyId, KeyValidation};

/// The outcome of [`Keyboard::validate`], naming which pairwise or per-key
/// rule failed and which key(s) triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardValidation {
    Ok,
    BadKey(KeyId, KeyValidation),
    NotDisjoint(KeyId, KeyId),
}

/// An ordered collection of keys plus a character-to-key lookup.
///
/// Keys are addressed by [`KeyId`] — an index into `keys` — rather than by
/// reference, since neighbors close a cycle back through the same `Vec`.
#[derive(Debug, Clone)]
pub struct Keyboard {
    keys: Vec<Key>,
    by_char: HashMap<char, KeyId>,
}

impl Keyboard {
    /// Assembles a keyboard from keys already wired up with their neighbor
    /// ids (via [`Key::init_neighbors`]). Building the `char -> KeyId`
    /// lookup happens here, after every key has a final position in `keys`.
    pub fn new(keys: Vec<Key>) -> Keyboard {
        let mut by_char = HashMap::with_capacity(keys.len() * 2);
        for (idx, key) in keys.iter().enumerate() {
            let id = KeyId(idx);
            by_char.insert(key.base(), id);
            for &variant in key.shift_variants() {
                by_char.insert(variant, id);
            }
        }
        Keyboard { keys, by_char }
    }

    pub fn key(&self, id: KeyId) -> &Key {
        &self.keys[id.0]
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = KeyId> {
        (0..self.keys.len()).map(KeyId)
    }

    /// The key producing `c` as either its base or a shift variant, if any.
    pub fn find_by_char(&self, c: char) -> Option<KeyId> {
        self.by_char.get(&c).copied()
    }

    /// Checks every key individually, then every ordered pair for shared
    /// characters. Returns the first failure found, in key-index order.
    pub fn validate(&self) -> KeyboardValidation {
        for (idx, key) in self.keys.iter().enumerate() {
            let outcome = validate_key(key);
            if outcome != KeyValidation::Ok {
                return KeyboardValidation::BadKey(KeyId(idx), outcome);
            }
        }
        for i in 0..self.keys.len() {
            for j in (i + 1)..self.keys.len() {
                if !disjoint(&self.keys[i], &self.keys[j]) {
                    return KeyboardValidation::NotDisjoint(KeyId(i), KeyId(j));
                }
            }
        }
        KeyboardValidation::Ok
    }
}
