//! # Selectors Module
//!
//! State-adapter construction (the `mapStateToProps` side).
//!
//! - A flat `SelectorMapping` becomes a one-argument `BasicStateAdapter`
//!   that ignores own props
//! - A selector factory becomes a two-argument `FullStateAdapter` that asks
//!   the factory for a fresh mapping on every call
//! - The choice is made once, in `StateAdapterBuilder::build`

use crate::mapping::{Entry, EntryKind, Mapping};
use crate::types::{Axis, Props, PropwireError, Schema};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

// =============================================================================
// SELECTOR TYPES
// =============================================================================

/// A selector: projects one prop value out of global state.
pub type SelectorFn<M> = dyn Fn(&<M as Schema>::State) -> <M as Schema>::Prop + Send + Sync;

/// A selector factory: builds a selector mapping from own props.
pub type SelectorFactoryFn<M> =
    dyn Fn(&<M as Schema>::OwnProps) -> SelectorMapping<M> + Send + Sync;

/// Marker tying a [`Mapping`] to selectors of schema `M`.
pub struct SelectorKind<M>(PhantomData<fn() -> M>);

impl<M: Schema> EntryKind for SelectorKind<M> {
    type Target = SelectorFn<M>;
    const AXIS: Axis = Axis::Selector;
}

/// Ordered `key -> selector` mapping.
pub type SelectorMapping<M> = Mapping<SelectorKind<M>>;

impl<M: Schema> Mapping<SelectorKind<M>> {
    /// Declare `selector` under `key`.
    #[must_use]
    pub fn select<F>(self, key: impl Into<String>, selector: F) -> Self
    where
        F: Fn(&M::State) -> M::Prop + Send + Sync + 'static,
    {
        let selector: Arc<SelectorFn<M>> = Arc::new(selector);
        self.with_entry(key, Entry::Callable(selector))
    }

    /// Run every selector against `state`, in declaration order.
    ///
    /// Stops at the first entry that cannot be invoked.
    pub fn select_all(&self, state: &M::State) -> Result<Props<M::Prop>, PropwireError> {
        let mut props = Props::with_capacity(self.len());
        for (key, entry) in self.iter() {
            let selector = entry.callable(key)?;
            props.insert(key.to_string(), selector(state));
        }
        Ok(props)
    }
}

// =============================================================================
// SELECTOR DESCRIPTION
// =============================================================================

/// How a component reads state: a flat mapping, or a factory of mappings
/// keyed on own props.
pub enum Selectors<M: Schema> {
    /// Fixed selectors, independent of own props.
    Mapping(SelectorMapping<M>),
    /// Selectors rebuilt from own props on every call.
    Factory(Arc<SelectorFactoryFn<M>>),
}

impl<M: Schema> Selectors<M> {
    /// Wrap a selector factory.
    #[must_use]
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&M::OwnProps) -> SelectorMapping<M> + Send + Sync + 'static,
    {
        let factory: Arc<SelectorFactoryFn<M>> = Arc::new(factory);
        Self::Factory(factory)
    }
}

impl<M: Schema> From<SelectorMapping<M>> for Selectors<M> {
    fn from(mapping: SelectorMapping<M>) -> Self {
        Self::Mapping(mapping)
    }
}

impl<M: Schema> Clone for Selectors<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Mapping(mapping) => Self::Mapping(mapping.clone()),
            Self::Factory(factory) => Self::Factory(Arc::clone(factory)),
        }
    }
}

impl<M: Schema> fmt::Debug for Selectors<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping(mapping) => f.debug_tuple("Mapping").field(mapping).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

// =============================================================================
// STATE ADAPTERS
// =============================================================================

/// One-argument state adapter: `(state) -> props`.
pub struct BasicStateAdapter<M: Schema> {
    selectors: SelectorMapping<M>,
}

impl<M: Schema> BasicStateAdapter<M> {
    /// Map `state` to props. Same key set on every call.
    pub fn call(&self, state: &M::State) -> Result<Props<M::Prop>, PropwireError> {
        self.selectors.select_all(state)
    }

    /// The selectors this adapter was built from.
    #[must_use]
    pub fn selectors(&self) -> &SelectorMapping<M> {
        &self.selectors
    }
}

/// Two-argument state adapter: `(state, own_props) -> props`.
pub struct FullStateAdapter<M: Schema> {
    factory: Arc<SelectorFactoryFn<M>>,
}

impl<M: Schema> FullStateAdapter<M> {
    /// Map `state` to props using the selectors the factory produces for
    /// `own_props`. The factory runs on every call, so the key set follows
    /// whatever it returns this time.
    pub fn call(
        &self,
        state: &M::State,
        own_props: &M::OwnProps,
    ) -> Result<Props<M::Prop>, PropwireError> {
        let selectors = (self.factory)(own_props);
        selectors.select_all(state)
    }
}

/// The state adapter handed to an enhancer.
pub enum StateAdapter<M: Schema> {
    /// Built from a flat mapping.
    Basic(BasicStateAdapter<M>),
    /// Built from a factory.
    Full(FullStateAdapter<M>),
}

impl<M: Schema> StateAdapter<M> {
    /// Number of arguments the adapter consumes: 1 for basic, 2 for full.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::Basic(_) => 1,
            Self::Full(_) => 2,
        }
    }

    /// Whether props must be recomputed when own props change.
    #[must_use]
    pub const fn depends_on_own_props(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    /// Uniform entry point for enhancers. The basic variant ignores
    /// `own_props`.
    pub fn map_state(
        &self,
        state: &M::State,
        own_props: &M::OwnProps,
    ) -> Result<Props<M::Prop>, PropwireError> {
        match self {
            Self::Basic(adapter) => adapter.call(state),
            Self::Full(adapter) => adapter.call(state, own_props),
        }
    }
}

impl<M: Schema> fmt::Debug for StateAdapter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(adapter) => f.debug_tuple("Basic").field(adapter.selectors()).finish(),
            Self::Full(_) => f.write_str("Full(..)"),
        }
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builds state adapters from selector descriptions.
pub struct StateAdapterBuilder;

impl StateAdapterBuilder {
    /// Pick the adapter shape from the description's variant.
    pub fn build<M: Schema>(selectors: Selectors<M>) -> StateAdapter<M> {
        match selectors {
            Selectors::Mapping(mapping) => StateAdapter::Basic(Self::basic(mapping)),
            Selectors::Factory(factory) => StateAdapter::Full(Self::full(factory)),
        }
    }

    /// One-argument adapter over a fixed mapping.
    pub fn basic<M: Schema>(selectors: SelectorMapping<M>) -> BasicStateAdapter<M> {
        BasicStateAdapter { selectors }
    }

    /// Two-argument adapter over a factory.
    pub fn full<M: Schema>(factory: Arc<SelectorFactoryFn<M>>) -> FullStateAdapter<M> {
        FullStateAdapter { factory }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct State {
        count: i64,
        step: i64,
    }

    impl Schema for Counter {
        type State = State;
        type OwnProps = i64;
        type Prop = i64;
        type Action = i64;
        type Arg = i64;
    }

    fn state() -> State {
        State { count: 1, step: 5 }
    }

    #[test]
    fn basic_adapter_maps_every_key() {
        let mapping = SelectorMapping::<Counter>::new()
            .select("count", |s| s.count)
            .select("step", |s| s.step);
        let adapter = StateAdapterBuilder::basic(mapping);

        let props = adapter.call(&state()).expect("props");
        assert_eq!(props.len(), 2);
        assert_eq!(props["count"], 1);
        assert_eq!(props["step"], 5);
    }

    #[test]
    fn basic_adapter_keeps_declaration_order() {
        let mapping = SelectorMapping::<Counter>::new()
            .select("step", |s| s.step)
            .select("count", |s| s.count);
        let props = StateAdapterBuilder::basic(mapping)
            .call(&state())
            .expect("props");

        let keys: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["step", "count"]);
    }

    #[test]
    fn empty_mapping_yields_empty_props() {
        let adapter = StateAdapterBuilder::basic(SelectorMapping::<Counter>::new());
        assert!(adapter.call(&state()).expect("props").is_empty());
    }

    #[test]
    fn full_adapter_reads_own_props() {
        let selectors = Selectors::<Counter>::factory(|offset| {
            let offset = *offset;
            SelectorMapping::<Counter>::new().select("count", move |s| s.count + offset)
        });
        let adapter = StateAdapterBuilder::build(selectors);

        assert_eq!(adapter.map_state(&state(), &3).expect("props")["count"], 4);
        assert_eq!(adapter.map_state(&state(), &10).expect("props")["count"], 11);
    }

    #[test]
    fn full_adapter_calls_factory_every_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let adapter = StateAdapterBuilder::build(Selectors::<Counter>::factory(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            SelectorMapping::<Counter>::new().select("count", |s| s.count)
        }));

        for _ in 0..3 {
            adapter.map_state(&state(), &0).expect("props");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn full_adapter_key_set_follows_factory() {
        let adapter = StateAdapterBuilder::build(Selectors::<Counter>::factory(|flag| {
            let mapping = SelectorMapping::<Counter>::new().select("count", |s| s.count);
            if *flag > 0 {
                mapping.select("step", |s| s.step)
            } else {
                mapping
            }
        }));

        assert_eq!(adapter.map_state(&state(), &0).expect("props").len(), 1);
        assert_eq!(adapter.map_state(&state(), &1).expect("props").len(), 2);
    }

    #[test]
    fn basic_adapter_ignores_own_props() {
        let adapter = StateAdapterBuilder::build(Selectors::from(
            SelectorMapping::<Counter>::new().select("count", |s| s.count),
        ));
        let a = adapter.map_state(&state(), &0).expect("props");
        let b = adapter.map_state(&state(), &99).expect("props");
        assert_eq!(a, b);
    }

    #[test]
    fn arity_reflects_shape() {
        let basic = StateAdapterBuilder::build(Selectors::from(
            SelectorMapping::<Counter>::new().select("count", |s| s.count),
        ));
        let full = StateAdapterBuilder::build(Selectors::<Counter>::factory(|_| {
            SelectorMapping::<Counter>::new().select("count", |s| s.count)
        }));

        assert_eq!(basic.arity(), 1);
        assert!(!basic.depends_on_own_props());
        assert_eq!(full.arity(), 2);
        assert!(full.depends_on_own_props());
    }

    #[test]
    fn malformed_selector_fails_on_call() {
        let mapping = SelectorMapping::<Counter>::new()
            .select("count", |s| s.count)
            .malformed("bad", "number 42");
        let adapter = StateAdapterBuilder::basic(mapping);

        assert_eq!(
            adapter.call(&state()),
            Err(PropwireError::Invocation {
                key: "bad".to_string(),
                found: "number 42".to_string(),
            })
        );
    }
}
