//! # Actions Module
//!
//! Dispatch-adapter construction (the `mapDispatchToProps` side).
//!
//! - A flat `ActionMapping` is passed through untouched; the enhancer binds
//!   it to dispatch (see [`ActionMapping::bind`])
//! - An action factory becomes a two-argument `FullDispatchAdapter` that
//!   rebinds fresh action creators from own props on every call
//! - Binding is lazy: a non-invocable creator only fails when its
//!   `BoundAction` is invoked

use crate::mapping::{Entry, EntryKind, Mapping};
use crate::types::{Axis, Props, PropwireError, Schema};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

// =============================================================================
// DISPATCH
// =============================================================================

/// The store's dispatch operation.
///
/// Implemented for every `Fn(A) -> R`; whatever the function returns is
/// discarded.
pub trait Dispatch<A>: Send + Sync {
    /// Submit `action` to the store.
    fn dispatch(&self, action: A);
}

impl<A, R, F> Dispatch<A> for F
where
    F: Fn(A) -> R + Send + Sync,
{
    fn dispatch(&self, action: A) {
        let _ = self(action);
    }
}

/// Shared dispatch handle held by bound actions.
pub type DispatchHandle<M> = Arc<dyn Dispatch<<M as Schema>::Action>>;

// =============================================================================
// ACTION TYPES
// =============================================================================

/// An action creator: positional arguments in, action value out.
pub type ActionFn<M> =
    dyn Fn(&[<M as Schema>::Arg]) -> <M as Schema>::Action + Send + Sync;

/// An action factory: builds an action mapping from own props.
pub type ActionFactoryFn<M> =
    dyn Fn(&<M as Schema>::OwnProps) -> ActionMapping<M> + Send + Sync;

/// Marker tying a [`Mapping`] to action creators of schema `M`.
pub struct ActionKind<M>(PhantomData<fn() -> M>);

impl<M: Schema> EntryKind for ActionKind<M> {
    type Target = ActionFn<M>;
    const AXIS: Axis = Axis::Action;
}

/// Ordered `key -> action creator` mapping.
pub type ActionMapping<M> = Mapping<ActionKind<M>>;

impl<M: Schema> Mapping<ActionKind<M>> {
    /// Declare `creator` under `key`.
    #[must_use]
    pub fn action<F>(self, key: impl Into<String>, creator: F) -> Self
    where
        F: Fn(&[M::Arg]) -> M::Action + Send + Sync + 'static,
    {
        let creator: Arc<ActionFn<M>> = Arc::new(creator);
        self.with_entry(key, Entry::Callable(creator))
    }

    /// Bind every creator to `dispatch`, one `BoundAction` per key.
    ///
    /// This is what an enhancer does with a passed-through mapping, and what
    /// `FullDispatchAdapter` does with each factory result.
    pub fn bind(&self, dispatch: &DispatchHandle<M>) -> Props<BoundAction<M>> {
        self.iter()
            .map(|(key, entry)| {
                let bound = BoundAction::new(key, entry.clone(), Arc::clone(dispatch));
                (key.to_string(), bound)
            })
            .collect()
    }
}

// =============================================================================
// BOUND ACTION
// =============================================================================

/// An action creator paired with the dispatch handle it reports to.
pub struct BoundAction<M: Schema> {
    key: String,
    creator: Entry<ActionFn<M>>,
    dispatch: DispatchHandle<M>,
}

impl<M: Schema> BoundAction<M> {
    /// Pair `creator` (declared under `key`) with `dispatch`.
    pub fn new(
        key: impl Into<String>,
        creator: Entry<ActionFn<M>>,
        dispatch: DispatchHandle<M>,
    ) -> Self {
        Self {
            key: key.into(),
            creator,
            dispatch,
        }
    }

    /// The key this action was declared under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Create an action from `args` and dispatch it.
    ///
    /// Arguments reach the creator unchanged and in order. Exactly one
    /// dispatch happens per successful call.
    pub fn invoke(&self, args: &[M::Arg]) -> Result<(), PropwireError> {
        let creator = self.creator.callable(&self.key)?;
        let action = creator(args);
        tracing::trace!(key = %self.key, "dispatching bound action");
        self.dispatch.dispatch(action);
        Ok(())
    }
}

impl<M: Schema> Clone for BoundAction<M> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            creator: self.creator.clone(),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

impl<M: Schema> fmt::Debug for BoundAction<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundAction")
            .field("key", &self.key)
            .field("creator", &self.creator)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// ACTION DESCRIPTION
// =============================================================================

/// How a component dispatches: a flat mapping, or a factory of mappings
/// keyed on own props.
pub enum Actions<M: Schema> {
    /// Fixed action creators.
    Mapping(ActionMapping<M>),
    /// Action creators rebuilt from own props on every call.
    Factory(Arc<ActionFactoryFn<M>>),
}

impl<M: Schema> Actions<M> {
    /// Wrap an action factory.
    #[must_use]
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&M::OwnProps) -> ActionMapping<M> + Send + Sync + 'static,
    {
        let factory: Arc<ActionFactoryFn<M>> = Arc::new(factory);
        Self::Factory(factory)
    }
}

impl<M: Schema> From<ActionMapping<M>> for Actions<M> {
    fn from(mapping: ActionMapping<M>) -> Self {
        Self::Mapping(mapping)
    }
}

impl<M: Schema> Clone for Actions<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Mapping(mapping) => Self::Mapping(mapping.clone()),
            Self::Factory(factory) => Self::Factory(Arc::clone(factory)),
        }
    }
}

impl<M: Schema> fmt::Debug for Actions<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping(mapping) => f.debug_tuple("Mapping").field(mapping).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

// =============================================================================
// DISPATCH ADAPTERS
// =============================================================================

/// Two-argument dispatch adapter: `(dispatch, own_props) -> bound actions`.
pub struct FullDispatchAdapter<M: Schema> {
    factory: Arc<ActionFactoryFn<M>>,
}

impl<M: Schema> FullDispatchAdapter<M> {
    /// Ask the factory for creators matching `own_props` and bind each one
    /// to `dispatch`.
    pub fn call(
        &self,
        dispatch: &DispatchHandle<M>,
        own_props: &M::OwnProps,
    ) -> Props<BoundAction<M>> {
        (self.factory)(own_props).bind(dispatch)
    }
}

/// The dispatch adapter handed to an enhancer.
pub enum DispatchAdapter<M: Schema> {
    /// A flat mapping, left for the enhancer to bind.
    Passthrough(ActionMapping<M>),
    /// Built from a factory.
    Full(FullDispatchAdapter<M>),
}

impl<M: Schema> DispatchAdapter<M> {
    /// Number of arguments a function-shaped adapter consumes; `None` for a
    /// passed-through mapping.
    #[must_use]
    pub const fn arity(&self) -> Option<usize> {
        match self {
            Self::Passthrough(_) => None,
            Self::Full(_) => Some(2),
        }
    }

    /// Whether the adapter is the original mapping.
    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough(_))
    }

    /// Uniform entry point for enhancers: bound actions for `own_props`.
    /// A passed-through mapping ignores `own_props`.
    pub fn map_dispatch(
        &self,
        dispatch: &DispatchHandle<M>,
        own_props: &M::OwnProps,
    ) -> Props<BoundAction<M>> {
        match self {
            Self::Passthrough(mapping) => mapping.bind(dispatch),
            Self::Full(adapter) => adapter.call(dispatch, own_props),
        }
    }
}

impl<M: Schema> fmt::Debug for DispatchAdapter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passthrough(mapping) => f.debug_tuple("Passthrough").field(mapping).finish(),
            Self::Full(_) => f.write_str("Full(..)"),
        }
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builds dispatch adapters from action descriptions.
pub struct ActionAdapterBuilder;

impl ActionAdapterBuilder {
    /// Flat mappings pass through; factories become full adapters.
    pub fn build<M: Schema>(actions: Actions<M>) -> DispatchAdapter<M> {
        match actions {
            Actions::Mapping(mapping) => DispatchAdapter::Passthrough(mapping),
            Actions::Factory(factory) => DispatchAdapter::Full(Self::full(factory)),
        }
    }

    /// Two-argument adapter over a factory.
    pub fn full<M: Schema>(factory: Arc<ActionFactoryFn<M>>) -> FullDispatchAdapter<M> {
        FullDispatchAdapter { factory }
    }
}

// =============================================================================
// TESTS
// =============================================================================
