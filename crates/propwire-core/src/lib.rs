//! # propwire-core
//!
//! Declarative selectors and actions for state-bound UI components.
//!
//! A component declares *what* it reads from the store (selectors) and
//! *what* it can dispatch (action creators). This crate turns those
//! declarations into the two adapters a connect/enhance mechanism expects:
//!
//! - `selectors` → a state adapter (`(state)` or `(state, own_props)`)
//! - `actions` → a dispatch adapter (the mapping itself, or
//!   `(dispatch, own_props)`)
//!
//! then calls the enhancer and returns whatever it produces.
//!
//! ## Architectural Constraints
//!
//! - Stateless: adapters are built once per component and close only over
//!   the descriptions they were built from
//! - Explicit shapes: mapping vs. factory is a variant chosen by the caller,
//!   not a runtime guess
//! - Closed: the store, dispatch and enhancer are collaborators reached
//!   through traits
//! - NO async, NO store implementation, NO change detection

// =============================================================================
// MODULES
// =============================================================================

pub mod actions;
pub mod config;
pub mod connect;
pub mod diagnostics;
pub mod mapping;
pub mod provider;
pub mod selectors;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use mapping::{Entry, EntryKind, Mapping};
pub use types::{Axis, Props, PropwireError, Schema};

// =============================================================================
// RE-EXPORTS: Builders
// =============================================================================

pub use actions::{
    ActionAdapterBuilder, ActionFactoryFn, ActionFn, ActionKind, ActionMapping, Actions,
    BoundAction, Dispatch, DispatchAdapter, DispatchHandle, FullDispatchAdapter,
};
pub use selectors::{
    BasicStateAdapter, FullStateAdapter, SelectorFactoryFn, SelectorFn, SelectorKind,
    SelectorMapping, Selectors, StateAdapter, StateAdapterBuilder,
};

// =============================================================================
// RE-EXPORTS: Composer
// =============================================================================

pub use config::{ConnectOptions, DEFAULT_FALLBACK_NAME};
pub use connect::{Bindings, Component, Connector, Enhancer, bind, connect};
pub use diagnostics::{Diagnostic, Validator};
pub use provider::Provider;
