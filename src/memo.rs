//! Single-entry cache for results derived from upstream data

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Remembers the last computed value along with the inputs it came from
///
/// A lookup first compares a structural hash of the inputs and then the
/// inputs themselves. Any mismatch replaces the whole entry. Keys are owned,
/// so large inputs are best shared behind an `Arc`, whose clones are cheap
/// and whose comparison checks the pointer before the contents.
#[derive(Debug)]
pub struct Memo<K, V> {
    entry: Option<Entry<K, V>>,
    misses: usize,
}

#[derive(Debug)]
struct Entry<K, V> {
    hash: u64,
    key: K,
    value: V,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Memo::new()
    }
}

impl<K, V> Memo<K, V> {
    pub fn new() -> Self {
        Memo {
            entry: None,
            misses: 0,
        }
    }

    /// Drop the cached value
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of times a value had to be computed
    pub fn misses(&self) -> usize {
        self.misses
    }
}

impl<K: Hash + Eq, V> Memo<K, V> {
    /// Return the cached value for `key`, computing it if needed
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> &V
    where
        F: FnOnce() -> V,
    {
        let hash = structural_hash(&key);
        let fresh = match &self.entry {
            Some(entry) => entry.hash == hash && entry.key == key,
            None => false,
        };
        if !fresh {
            log::debug!("memo miss, key {:016x}", hash);
            self.misses += 1;
            self.entry = None;
        }
        let entry = self.entry.get_or_insert_with(|| Entry {
            hash,
            key,
            value: compute(),
        });
        &entry.value
    }
}

/// Hash of a value's contents
pub fn structural_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;

    /// Every value hashes the same
    #[derive(Debug, Eq, PartialEq)]
    struct Colliding(u32);

    impl Hash for Colliding {
        fn hash<H: Hasher>(&self, state: &mut H) {
            0u8.hash(state);
        }
    }

    #[test]
    fn reuses_matching_entry() {
        let mut memo = Memo::new();
        let inputs = Arc::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(memo.get_or_compute(inputs.clone(), || inputs.len()), &2);
        assert_eq!(memo.get_or_compute(inputs.clone(), || 99), &2);
        assert_eq!(memo.misses(), 1);

        let copy = Arc::new(inputs.to_vec());
        assert_eq!(memo.get_or_compute(copy, || 99), &2);
        assert_eq!(memo.misses(), 1);
    }

    #[test]
    fn replaces_entry_on_new_inputs() {
        let mut memo = Memo::new();
        assert_eq!(memo.get_or_compute((1, true), || "first"), &"first");
        assert_eq!(memo.get_or_compute((1, false), || "second"), &"second");
        assert_eq!(memo.get_or_compute((1, true), || "third"), &"third");
        assert_eq!(memo.misses(), 3);

        memo.invalidate();
        assert_eq!(memo.get_or_compute((1, true), || "fourth"), &"fourth");
        assert_eq!(memo.misses(), 4);
    }

    #[test]
    fn equal_hashes_still_compare_inputs() {
        assert_eq!(structural_hash(&Colliding(1)), structural_hash(&Colliding(2)));

        let mut memo = Memo::new();
        assert_eq!(memo.get_or_compute(Colliding(1), || "one"), &"one");
        assert_eq!(memo.get_or_compute(Colliding(2), || "two"), &"two");
        assert_eq!(memo.get_or_compute(Colliding(2), || "again"), &"two");
        assert_eq!(memo.misses(), 2);
    }

    #[test]
    fn hashes_are_structural() {
        assert_eq!(
            structural_hash(&vec!["x".to_string()]),
            structural_hash(&["x".to_string()][..])
        );
        assert_ne!(structural_hash(&("a", "bc")), structural_hash(&("ab", "c")));
    }
}
