//! # Diagnostics Module
//!
//! Advisory validation of flat mappings at connect time.
//!
//! - Each entry is checked on its own, with its own key and value
//! - A non-invocable entry yields a `Diagnostic` and a `warn!` event
//! - Never blocks construction, never returns an error
//! - Factories are not checked: their mapping is unknown until first call

use crate::actions::Actions;
use crate::mapping::{Entry, EntryKind, Mapping};
use crate::selectors::Selectors;
use crate::types::{Axis, Schema};
use std::fmt;

/// A non-invocable entry found in a flat mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Selector or action side.
    pub axis: Axis,
    /// Key of the offending entry.
    pub key: String,
    /// Display name of the component, or the configured fallback.
    pub component: String,
    /// Description of the value found under `key`.
    pub found: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} `{}` on {} is not a function (found {})",
            self.axis, self.key, self.component, self.found
        )
    }
}

/// Checks selector and action descriptions for non-invocable entries.
pub struct Validator;

impl Validator {
    /// Report every malformed entry of `mapping`, in declaration order.
    pub fn check_mapping<K: EntryKind>(mapping: &Mapping<K>, component: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (key, entry) in mapping.iter() {
            if let Entry::Malformed(found) = entry {
                let diagnostic = Diagnostic {
                    axis: K::AXIS,
                    key: key.to_string(),
                    component: component.to_string(),
                    found: found.clone(),
                };
                tracing::warn!(
                    axis = %diagnostic.axis,
                    key = %diagnostic.key,
                    component = %diagnostic.component,
                    found = %diagnostic.found,
                    "{}",
                    diagnostic
                );
                diagnostics.push(diagnostic);
            }
        }
        diagnostics
    }

    /// Check a selector description. Factories are skipped.
    pub fn check_selectors<M: Schema>(selectors: &Selectors<M>, component: &str) -> Vec<Diagnostic> {
        match selectors {
            Selectors::Mapping(mapping) => Self::check_mapping(mapping, component),
            Selectors::Factory(_) => Vec::new(),
        }
    }

    /// Check an action description. Factories are skipped.
    pub fn check_actions<M: Schema>(actions: &Actions<M>, component: &str) -> Vec<Diagnostic> {
        match actions {
            Actions::Mapping(mapping) => Self::check_mapping(mapping, component),
            Actions::Factory(_) => Vec::new(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionMapping;
    use crate::selectors::SelectorMapping;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    struct Plain;

    impl Schema for Plain {
        type State = i64;
        type OwnProps = ();
        type Prop = i64;
        type Action = i64;
        type Arg = i64;
    }

    #[test]
    fn well_formed_mapping_is_silent() {
        let selectors = Selectors::from(SelectorMapping::<Plain>::new().select("n", |s| *s));
        assert!(Validator::check_selectors(&selectors, "Counter").is_empty());
    }

    #[test]
    fn each_malformed_entry_is_reported_with_its_own_key() {
        let actions = Actions::from(
            ActionMapping::<Plain>::new()
                .malformed("first", "number 1")
                .action("ok", |_| 0)
                .malformed("second", "null"),
        );

        let diagnostics = Validator::check_actions(&actions, "Counter");
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic {
                    axis: Axis::Action,
                    key: "first".to_string(),
                    component: "Counter".to_string(),
                    found: "number 1".to_string(),
                },
                Diagnostic {
                    axis: Axis::Action,
                    key: "second".to_string(),
                    component: "Counter".to_string(),
                    found: "null".to_string(),
                },
            ]
        );
    }

    /// Collects formatted log output from a scoped subscriber.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().expect("lock").clone();
            String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect()
        }
    }

    #[test]
    fn each_malformed_entry_emits_a_warning() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();

        let mapping = SelectorMapping::<Plain>::new()
            .malformed("bad", "number 42")
            .select("ok", |s| *s)
            .malformed("worse", "null");
        let diagnostics = tracing::subscriber::with_default(subscriber, || {
            Validator::check_mapping(&mapping, "Counter")
        });
        assert_eq!(diagnostics.len(), 2);

        let warnings: Vec<String> = buffer
            .lines()
            .into_iter()
            .filter(|line| line.contains("WARN"))
            .collect();
        assert_eq!(warnings.len(), 2, "one warning per malformed entry: {warnings:?}");

        let first = &warnings[0];
        assert!(first.contains("axis=selector"), "{first}");
        assert!(first.contains("key=bad"), "{first}");
        assert!(first.contains("component=Counter"), "{first}");
        assert!(first.contains("found=number 42"), "{first}");
        assert!(warnings[1].contains("key=worse"), "{}", warnings[1]);
        assert!(!warnings.iter().any(|line| line.contains("key=ok")));
    }

    #[test]
    fn factories_are_not_checked() {
        let selectors = Selectors::<Plain>::factory(|_| {
            SelectorMapping::<Plain>::new().malformed("bad", "number 42")
        });
        assert!(Validator::check_selectors(&selectors, "component").is_empty());
    }

    #[test]
    fn message_names_key_and_component() {
        let diagnostic = Diagnostic {
            axis: Axis::Selector,
            key: "bad".to_string(),
            component: "component".to_string(),
            found: "number 42".to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "selector `bad` on component is not a function (found number 42)"
        );
    }
}
