//! # Mapping Module
//!
//! Ordered `key -> entry` storage shared by selector and action mappings.
//!
//! - Keys are unique strings; re-inserting a key replaces its entry in place
//! - Iteration follows insertion order
//! - Storage is reference counted: cloning a mapping is cheap and the clone
//!   shares storage with the original until one of them is mutated

use crate::types::{Axis, PropwireError};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// ENTRY
// =============================================================================

/// A single value stored under a mapping key.
///
/// `Malformed` stands for a value that was declared under a key but cannot
/// be called. It is kept rather than rejected: construction proceeds, the
/// validator reports it, and calling it fails with
/// [`PropwireError::Invocation`].
pub enum Entry<F: ?Sized> {
    /// An invocable selector or action creator.
    Callable(Arc<F>),
    /// A non-invocable value, described for diagnostics (e.g. `number 42`).
    Malformed(String),
}

impl<F: ?Sized> Entry<F> {
    /// Whether this entry can be invoked.
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }

    /// Borrow the function behind this entry, or fail with an invocation
    /// error naming `key`.
    pub fn callable(&self, key: &str) -> Result<&F, PropwireError> {
        match self {
            Self::Callable(f) => Ok(f.as_ref()),
            Self::Malformed(found) => Err(PropwireError::Invocation {
                key: key.to_string(),
                found: found.clone(),
            }),
        }
    }
}

impl<F: ?Sized> Clone for Entry<F> {
    fn clone(&self) -> Self {
        match self {
            Self::Callable(f) => Self::Callable(Arc::clone(f)),
            Self::Malformed(found) => Self::Malformed(found.clone()),
        }
    }
}

impl<F: ?Sized> fmt::Debug for Entry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Malformed(found) => f.debug_tuple("Malformed").field(found).finish(),
        }
    }
}

// =============================================================================
// ENTRY KIND
// =============================================================================

/// Ties a mapping to the function type it stores and the axis it serves.
///
/// Implemented by `SelectorKind<M>` and `ActionKind<M>`; the marker keeps
/// the schema visible in the mapping's type so each axis can carry its own
/// builder methods.
pub trait EntryKind: 'static {
    /// The unsized function type behind each `Entry::Callable`.
    type Target: ?Sized;

    /// Which side of a component this kind of mapping describes.
    const AXIS: Axis;
}

// =============================================================================
// MAPPING
// =============================================================================

/// Ordered mapping from prop key to entry.
pub struct Mapping<K: EntryKind> {
    entries: Arc<IndexMap<String, Entry<K::Target>>>,
}

impl<K: EntryKind> Mapping<K> {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(IndexMap::new()),
        }
    }

    /// Insert an entry, returning the entry previously stored under `key`.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        entry: Entry<K::Target>,
    ) -> Option<Entry<K::Target>> {
        Arc::make_mut(&mut self.entries).insert(key.into(), entry)
    }

    /// Builder form of [`Mapping::insert`].
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, entry: Entry<K::Target>) -> Self {
        self.insert(key, entry);
        self
    }

    /// Declare a non-invocable value under `key`.
    #[must_use]
    pub fn malformed(self, key: impl Into<String>, found: impl Into<String>) -> Self {
        self.with_entry(key, Entry::Malformed(found.into()))
    }

    /// Look up the entry stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry<K::Target>> {
        self.entries.get(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(key, entry)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry<K::Target>)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Whether two mappings share the same storage.
    ///
    /// True for a mapping and its unmodified clones.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<K: EntryKind> Default for Mapping<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EntryKind> Clone for Mapping<K> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K: EntryKind> fmt::Debug for Mapping<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Numbers;

    impl EntryKind for Numbers {
        type Target = dyn Fn(i64) -> i64 + Send + Sync;
        const AXIS: Axis = Axis::Selector;
    }

    fn double() -> Entry<dyn Fn(i64) -> i64 + Send + Sync> {
        let f: Arc<dyn Fn(i64) -> i64 + Send + Sync> = Arc::new(|n| n * 2);
        Entry::Callable(f)
    }

    #[test]
    fn empty_mapping_has_no_keys() {
        let mapping: Mapping<Numbers> = Mapping::new();
        assert!(mapping.is_empty());
        assert_eq!(mapping.len(), 0);
        assert_eq!(mapping.keys().count(), 0);
    }

    #[test]
    fn replacing_a_key_keeps_position() {
        let mut mapping: Mapping<Numbers> = Mapping::new()
            .with_entry("a", double())
            .with_entry("b", double());

        let previous = mapping.insert("a", Entry::Malformed("string \"x\"".to_string()));
        assert!(previous.is_some_and(|entry| entry.is_callable()));

        let keys: Vec<&str> = mapping.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(!mapping.get("a").is_some_and(Entry::is_callable));
    }

    #[test]
    fn clones_share_storage_until_mutated() {
        let original: Mapping<Numbers> = Mapping::new().with_entry("a", double());
        let mut copy = original.clone();
        assert!(original.ptr_eq(&copy));

        copy.insert("b", double());
        assert!(!original.ptr_eq(&copy));
        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn callable_entry_invokes() {
        let entry = double();
        let f = entry.callable("a").expect("callable");
        assert_eq!(f(21), 42);
    }

    #[test]
    fn malformed_entry_fails_with_key() {
        let mapping: Mapping<Numbers> = Mapping::new().malformed("bad", "number 42");
        let entry = mapping.get("bad").expect("entry");

        let err = entry.callable("bad").err();
        assert_eq!(
            err,
            Some(PropwireError::Invocation {
                key: "bad".to_string(),
                found: "number 42".to_string(),
            })
        );
    }

    #[test]
    fn debug_lists_entries() {
        let mapping: Mapping<Numbers> = Mapping::new()
            .with_entry("ok", double())
            .malformed("bad", "null");
        let rendered = format!("{mapping:?}");
        assert!(rendered.contains("\"ok\": Callable(..)"));
        assert!(rendered.contains("\"bad\": Malformed(\"null\")"));
    }
}
