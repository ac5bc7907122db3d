//! # Provider Module
//!
//! Makes a store available to a component subtree. A thin shared handle:
//! no subscriptions, no lifecycle beyond the `Arc` it wraps.

use std::ops::Deref;
use std::sync::Arc;

/// Shared handle to a store.
#[derive(Debug)]
pub struct Provider<S: ?Sized> {
    store: Arc<S>,
}

impl<S> Provider<S> {
    /// Provide `store` to a subtree.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl<S: ?Sized> Provider<S> {
    /// Provide an already shared store.
    pub fn from_arc(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S: ?Sized> Clone for Provider<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ?Sized> Deref for Provider<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.store
    }
}
