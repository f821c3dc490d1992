//! Theme configuration.
//!
//! All fields have defaults matching the dashboard's markup, so an empty
//! document (or no config at all) yields a working setup.
//!
//! ```yaml
//! storage_key: theme
//! attribute: data-theme
//! marker: __THEME_APPLIED__
//! default_mode: system
//! ```

use serde::Deserialize;

use crate::error::ThemeError;
use crate::theme::ThemeMode;

pub const DEFAULT_STORAGE_KEY: &str = "theme";
pub const DEFAULT_ATTRIBUTE: &str = "data-theme";
pub const DEFAULT_MARKER: &str = "__THEME_APPLIED__";

/// Names shared by the bootstrap script, the document root and the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Key under which the raw mode is persisted.
    pub storage_key: String,
    /// Document root attribute that carries the resolved theme.
    pub attribute: String,
    /// Flag the bootstrap step sets once it has applied a theme.
    pub marker: String,
    /// Mode used on first run and when the persisted value is invalid.
    pub default_mode: ThemeMode,
}

impl ThemeConfig {
    /// Parses a YAML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Config`] for malformed YAML, unknown fields,
    /// an unknown `default_mode`, or empty names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eyesante_theme::{ThemeConfig, ThemeMode};
    ///
    /// let config = ThemeConfig::from_yaml("storage_key: eyesante-theme\ndefault_mode: dark\n").unwrap();
    /// assert_eq!(config.storage_key, "eyesante-theme");
    /// assert_eq!(config.default_mode, ThemeMode::Dark);
    /// assert_eq!(config.attribute, "data-theme");
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, ThemeError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ThemeConfig =
            serde_yaml::from_str(source).map_err(|e| ThemeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ThemeError> {
        for (field, value) in [
            ("storage_key", &self.storage_key),
            ("attribute", &self.attribute),
            ("marker", &self.marker),
        ] {
            if value.trim().is_empty() {
                return Err(ThemeError::Config(format!("'{}' must not be empty", field)));
            }
        }
        Ok(())
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            attribute: DEFAULT_ATTRIBUTE.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            default_mode: ThemeMode::System,
        }
    }
}
