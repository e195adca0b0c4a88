//! Version-stamped cells
//!
//! Every mutable store carries a monotonically increasing [`Version`].
//! Derived values remember the stamp they were computed from in a [`Memo`]
//! and are recomputed when the stamp no longer matches.

use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Monotonic change counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Version(u64);

impl Version {
    /// Initial version
    pub const INITIAL: Version = Version(0);

    /// Following version
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Raw counter value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Value paired with the version of its last write
#[derive(Debug, Clone, Default)]
pub struct Versioned<T> {
    value: T,
    version: Version,
}

impl<T> Versioned<T> {
    /// Wrap an initial value at [`Version::INITIAL`]
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            version: Version::INITIAL,
        }
    }

    /// Current value
    #[inline]
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Version of the last write
    #[inline]
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Replace the value, always bumping the version
    pub fn set(&mut self, value: T) -> Version {
        self.value = value;
        self.version = self.version.next();
        self.version
    }

    /// Mutate in place, always bumping the version
    pub fn update(&mut self, f: impl FnOnce(&mut T)) -> Version {
        f(&mut self.value);
        self.version = self.version.next();
        self.version
    }
}

impl<T: PartialEq> Versioned<T> {
    /// Replace the value, bumping the version only if it differs
    ///
    /// Returns true if the value changed.
    pub fn set_if_changed(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.set(value);
        true
    }
}

/// Single-entry memo keyed by a stamp
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
}

impl<K, V> Memo<K, V> {
    /// Create empty memo
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entry: None }
    }

    /// Cached value if `fresh` accepts its stamp
    pub fn get_if(&self, fresh: impl FnOnce(&K) -> bool) -> Option<&V> {
        self.entry
            .as_ref()
            .filter(|(stamp, _)| fresh(stamp))
            .map(|(_, value)| value)
    }

    /// Mutable cached value if `fresh` accepts its stamp
    pub fn get_mut_if(&mut self, fresh: impl FnOnce(&K) -> bool) -> Option<&mut V> {
        self.entry
            .as_mut()
            .filter(|(stamp, _)| fresh(stamp))
            .map(|(_, value)| value)
    }

    /// Store a value computed at `stamp`
    pub fn store(&mut self, stamp: K, value: V) -> &mut V {
        &mut self.entry.insert((stamp, value)).1
    }

    /// Drop the cached value
    #[inline]
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// True if a value is cached
    #[inline]
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.entry.is_some()
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Cached value if it was computed at exactly `stamp`
    #[inline]
    pub fn get(&self, stamp: &K) -> Option<&V> {
        self.get_if(|cached| cached == stamp)
    }

    /// Cached value for `stamp`, computing and storing it on mismatch
    pub fn get_or_insert_with(&mut self, stamp: K, compute: impl FnOnce() -> V) -> &mut V {
        let entry = match self.entry.take() {
            Some((cached, value)) if cached == stamp => (cached, value),
            _ => (stamp, compute()),
        };
        &mut self.entry.insert(entry).1
    }
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_increase() {
        let v = Version::INITIAL;
        assert!(v.next() > v);
        assert_eq!(v.next().get(), 1);
        assert_eq!(v.next().to_string(), "v1");
    }

    #[test]
    fn set_always_bumps() {
        let mut cell = Versioned::new(1);
        cell.set(1);
        cell.set(1);
        assert_eq!(cell.version().get(), 2);
    }

    #[test]
    fn set_if_changed_skips_equal_values() {
        let mut cell = Versioned::new(vec!["a"]);
        assert!(!cell.set_if_changed(vec!["a"]));
        assert_eq!(cell.version(), Version::INITIAL);

        assert!(cell.set_if_changed(vec!["a", "b"]));
        assert_eq!(cell.version().get(), 1);
    }

    #[test]
    fn memo_recomputes_on_stamp_change() {
        let mut memo = Memo::new();
        let mut calls = 0;

        *memo.get_or_insert_with(1, || {
            calls += 1;
            "one"
        });
        memo.get_or_insert_with(1, || {
            calls += 1;
            "again"
        });
        assert_eq!(calls, 1);
        assert_eq!(memo.get(&1), Some(&"one"));

        memo.get_or_insert_with(2, || {
            calls += 1;
            "two"
        });
        assert_eq!(calls, 2);
        assert_eq!(memo.get(&1), None);
    }

    #[test]
    fn memo_clear() {
        let mut memo = Memo::new();
        memo.store(0u8, 'x');
        assert!(memo.is_populated());
        memo.clear();
        assert!(memo.get_if(|_| true).is_none());
    }
}
