//! # Core Type Definitions
//!
//! This module contains the small set of types every other module builds on:
//! - The `Schema` trait, naming the types a component binds against
//! - `Props`, the ordered key/value output of every adapter
//! - `Axis`, which side of a component (selectors or actions) a value belongs to
//! - Error types (`PropwireError`)
//!
//! ## Ordering Guarantees
//!
//! `Props` is an `IndexMap`: keys come out in the order the originating
//! mapping declared them, so the same description always yields the same
//! iteration order.

use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

// =============================================================================
// SCHEMA
// =============================================================================

/// The types a connected component reads and writes.
///
/// A `Schema` is a type-level bundle; it is never instantiated. Implement it
/// on a marker type and use that marker to parameterize mappings, adapters
/// and components:
///
/// ```
/// use propwire_core::Schema;
///
/// struct Counter;
///
/// impl Schema for Counter {
///     type State = i64;
///     type OwnProps = i64;
///     type Prop = i64;
///     type Action = i64;
///     type Arg = i64;
/// }
/// ```
pub trait Schema: 'static {
    /// The store's global state, passed to every selector.
    type State: 'static;
    /// Properties handed to a component instance by its parent.
    type OwnProps: 'static;
    /// The value a selector produces for a single prop.
    type Prop: 'static;
    /// The opaque action value submitted to dispatch.
    type Action: 'static;
    /// A single positional argument to an action creator.
    type Arg: 'static;
}

// =============================================================================
// PROPS
// =============================================================================

/// Props produced by an adapter: exactly one entry per key of the mapping
/// that produced it, in declaration order.
pub type Props<V> = IndexMap<String, V>;

// =============================================================================
// AXIS
// =============================================================================

/// Which side of a component a mapping describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// State selectors (`mapStateToProps` side).
    Selector,
    /// Action creators (`mapDispatchToProps` side).
    Action,
}

impl Axis {
    /// Lowercase name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Selector => "selector",
            Self::Action => "action",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in propwire.
///
/// - No silent failures
/// - Invocation failures are never caught here; they reach whoever called
///   the adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropwireError {
    /// A selector or action creator that is not invocable was called.
    #[error("Invocation error: `{key}` is not a function (found {found})")]
    Invocation {
        /// Key of the offending mapping entry.
        key: String,
        /// Description of the value found under that key.
        found: String,
    },

    /// Connect options could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred while loading options.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================
