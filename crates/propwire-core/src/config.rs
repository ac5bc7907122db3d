//! # Config Module
//!
//! Connect options, loadable from a `[connect]` table in TOML:
//!
//! ```toml
//! [connect]
//! validate = true
//! fallback_name = "component"
//! ```

use crate::types::PropwireError;
use serde::Deserialize;
use std::path::Path;

/// Name used in diagnostics when a component has no display name.
pub const DEFAULT_FALLBACK_NAME: &str = "component";

/// Options applied by the composer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectOptions {
    /// Check flat mappings for non-invocable entries at connect time.
    pub validate: bool,
    /// Component name used in diagnostics when none is exposed.
    pub fallback_name: String,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            validate: true,
            fallback_name: DEFAULT_FALLBACK_NAME.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct OptionsFile {
    #[serde(default)]
    connect: ConnectOptions,
}

impl ConnectOptions {
    /// Parse options from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, PropwireError> {
        toml::from_str::<OptionsFile>(text)
            .map(|file| file.connect)
            .map_err(|e| PropwireError::InvalidConfig(e.to_string()))
    }

    /// Read and parse options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PropwireError> {
        let text =
            std::fs::read_to_string(path.as_ref()).map_err(|e| PropwireError::Io(e.to_string()))?;
        Self::from_toml_str(&text)
    }

    /// The name diagnostics use for a component.
    #[must_use]
    pub fn component_name<'a>(&'a self, display_name: Option<&'a str>) -> &'a str {
        display_name.unwrap_or(&self.fallback_name)
    }
}

// =============================================================================
// TESTS
// =============================================================================
