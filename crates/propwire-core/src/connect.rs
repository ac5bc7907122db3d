//! # Connect Module
//!
//! The composer: reads a component's selectors and actions, builds the two
//! adapters and hands them to an enhancer.
//!
//! ```text
//! Component ──selectors()──▶ Validator ──▶ StateAdapterBuilder  ──┐
//!           ──actions()────▶ Validator ──▶ ActionAdapterBuilder ──┤
//!                                                                 ▼
//!                              Enhancer::enhance(map_state, map_dispatch)(component)
//! ```
//!
//! The composer adds no behavior of its own: the enhancer's result is
//! returned as is.

use crate::actions::{ActionAdapterBuilder, Actions, DispatchAdapter};
use crate::config::ConnectOptions;
use crate::diagnostics::{Diagnostic, Validator};
use crate::selectors::{Selectors, StateAdapter, StateAdapterBuilder};
use crate::types::Schema;

// =============================================================================
// COLLABORATOR TRAITS
// =============================================================================

/// A component that can be connected.
///
/// Both descriptions are optional; a component with neither is connected
/// with no store-derived props at all.
pub trait Component {
    /// Types this component binds against.
    type Schema: Schema;

    /// How the component reads state.
    fn selectors(&self) -> Option<Selectors<Self::Schema>> {
        None
    }

    /// How the component dispatches.
    fn actions(&self) -> Option<Actions<Self::Schema>> {
        None
    }

    /// Name used in diagnostics.
    fn display_name(&self) -> Option<&str> {
        None
    }
}

/// The enhancement mechanism: takes the two optional adapters and returns a
/// higher-order function from component to enhanced component.
///
/// Any `Fn(Option<StateAdapter<M>>, Option<DispatchAdapter<M>>) -> H` with
/// `H: FnOnce(C) -> E` is an enhancer.
pub trait Enhancer<M: Schema, C> {
    /// The enhanced component.
    type Enhanced;
    /// The higher-order function returned by [`Enhancer::enhance`].
    type Hoc: FnOnce(C) -> Self::Enhanced;

    /// Wire the adapters. `None` means "contribute no props from this side".
    fn enhance(
        &self,
        map_state: Option<StateAdapter<M>>,
        map_dispatch: Option<DispatchAdapter<M>>,
    ) -> Self::Hoc;
}

impl<M, C, F, H, E> Enhancer<M, C> for F
where
    M: Schema,
    F: Fn(Option<StateAdapter<M>>, Option<DispatchAdapter<M>>) -> H,
    H: FnOnce(C) -> E,
{
    type Enhanced = E;
    type Hoc = H;

    fn enhance(
        &self,
        map_state: Option<StateAdapter<M>>,
        map_dispatch: Option<DispatchAdapter<M>>,
    ) -> H {
        self(map_state, map_dispatch)
    }
}

// =============================================================================
// BINDINGS
// =============================================================================

/// The adapters built for one component, plus what validation found.
#[derive(Debug)]
pub struct Bindings<M: Schema> {
    /// State adapter, if the component declared selectors.
    pub map_state: Option<StateAdapter<M>>,
    /// Dispatch adapter, if the component declared actions.
    pub map_dispatch: Option<DispatchAdapter<M>>,
    /// Malformed entries found in flat mappings.
    pub diagnostics: Vec<Diagnostic>,
}

/// Read, validate and build both adapters for `component`.
pub fn bind<C: Component>(options: &ConnectOptions, component: &C) -> Bindings<C::Schema> {
    let name = options.component_name(component.display_name());
    let mut diagnostics = Vec::new();

    let map_state = component.selectors().map(|selectors| {
        if options.validate {
            diagnostics.extend(Validator::check_selectors(&selectors, name));
        }
        StateAdapterBuilder::build(selectors)
    });

    let map_dispatch = component.actions().map(|actions| {
        if options.validate {
            diagnostics.extend(Validator::check_actions(&actions, name));
        }
        ActionAdapterBuilder::build(actions)
    });

    tracing::debug!(
        component = name,
        map_state = ?map_state.as_ref().map(StateAdapter::arity),
        map_dispatch = ?map_dispatch.as_ref().map(DispatchAdapter::arity),
        diagnostics = diagnostics.len(),
        "bound component"
    );

    Bindings {
        map_state,
        map_dispatch,
        diagnostics,
    }
}

// =============================================================================
// CONNECTOR
// =============================================================================

/// An enhancer together with the options used when connecting through it.
#[derive(Debug, Clone)]
pub struct Connector<E> {
    enhancer: E,
    options: ConnectOptions,
}

impl<E> Connector<E> {
    /// Connector with default options.
    pub fn new(enhancer: E) -> Self {
        Self {
            enhancer,
            options: ConnectOptions::default(),
        }
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: ConnectOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the adapters for `component` without enhancing it.
    pub fn bind<C: Component>(&self, component: &C) -> Bindings<C::Schema> {
        bind(&self.options, component)
    }

    /// Connect `component`: build both adapters, enhance, return the result.
    pub fn connect<C>(&self, component: C) -> E::Enhanced
    where
        C: Component,
        E: Enhancer<C::Schema, C>,
    {
        let Bindings {
            map_state,
            map_dispatch,
            ..
        } = self.bind(&component);
        let hoc = self.enhancer.enhance(map_state, map_dispatch);
        hoc(component)
    }
}

/// Connect `component` through `enhancer` with default options.
pub fn connect<C, E>(enhancer: &E, component: C) -> E::Enhanced
where
    C: Component,
    E: Enhancer<C::Schema, C>,
{
    let Bindings {
        map_state,
        map_dispatch,
        ..
    } = bind(&ConnectOptions::default(), &component);
    let hoc = enhancer.enhance(map_state, map_dispatch);
    hoc(component)
}

// =============================================================================
// TESTS
// =============================================================================
