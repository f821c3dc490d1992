//! Theme mode values and the resolution function.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// The user's declared theme intent.
///
/// This is the value that gets persisted. `System` defers to the
/// operating environment's colour-scheme preference at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// All modes, in the order they appear in the theme menu.
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    /// Returns the serialized form (`"light"`, `"dark"` or `"system"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Resolves this mode to a concrete theme.
    ///
    /// `prefers_dark` is the OS colour-scheme signal; `None` means the query
    /// is unsupported and is treated as a light preference. The signal is
    /// only consulted for [`ThemeMode::System`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use eyesante_theme::{ResolvedTheme, ThemeMode};
    ///
    /// assert_eq!(ThemeMode::Dark.resolve(Some(false)), ResolvedTheme::Dark);
    /// assert_eq!(ThemeMode::System.resolve(Some(true)), ResolvedTheme::Dark);
    /// assert_eq!(ThemeMode::System.resolve(None), ResolvedTheme::Light);
    /// ```
    pub fn resolve(self, prefers_dark: Option<bool>) -> ResolvedTheme {
        match self {
            ThemeMode::Light => ResolvedTheme::Light,
            ThemeMode::Dark => ResolvedTheme::Dark,
            ThemeMode::System => ResolvedTheme::from_prefers_dark(prefers_dark.unwrap_or(false)),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(ThemeError::InvalidMode {
                value: other.to_string(),
            }),
        }
    }
}

impl From<ResolvedTheme> for ThemeMode {
    fn from(resolved: ResolvedTheme) -> Self {
        match resolved {
            ResolvedTheme::Light => ThemeMode::Light,
            ResolvedTheme::Dark => ThemeMode::Dark,
        }
    }
}

/// The concrete theme applied to the UI.
///
/// Its string form is used both as the CSS class token on the document
/// root and as the value of the theme data attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    /// Both class tokens, for clearing the document root before applying one.
    pub const TOKENS: [&'static str; 2] = ["light", "dark"];

    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedTheme::Light => "light",
            ResolvedTheme::Dark => "dark",
        }
    }

    /// Maps the OS "is dark preferred" query to a theme.
    pub fn from_prefers_dark(is_dark: bool) -> Self {
        if is_dark {
            ResolvedTheme::Dark
        } else {
            ResolvedTheme::Light
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            ResolvedTheme::Light => ResolvedTheme::Dark,
            ResolvedTheme::Dark => ResolvedTheme::Light,
        }
    }

    /// Parses an applied attribute value. Anything other than the two
    /// tokens yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ResolvedTheme::Light),
            "dark" => Some(ResolvedTheme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mode together with the theme it currently resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePreference {
    pub mode: ThemeMode,
    pub resolved: ResolvedTheme,
}

impl ThemePreference {
    pub fn new(mode: ThemeMode, resolved: ResolvedTheme) -> Self {
        Self { mode, resolved }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_mode() -> impl Strategy<Value = ThemeMode> {
        prop_oneof![
            Just(ThemeMode::Light),
            Just(ThemeMode::Dark),
            Just(ThemeMode::System),
        ]
    }

    #[test]
    fn test_mode_parse_valid() {
        assert_eq!("light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!("system".parse::<ThemeMode>().unwrap(), ThemeMode::System);
    }

    #[test]
    fn test_mode_parse_rejects_unknown() {
        for raw in ["blue", "Dark", "", " light", "SYSTEM"] {
            let err = raw.parse::<ThemeMode>().unwrap_err();
            assert!(matches!(err, ThemeError::InvalidMode { ref value } if value == raw));
        }
    }

    #[test]
    fn test_mode_default_is_system() {
        assert_eq!(ThemeMode::default(), ThemeMode::System);
    }

    #[test]
    fn test_mode_serde_lowercase() {
        let json = serde_json::to_string(&ThemeMode::System).unwrap();
        assert_eq!(json, "\"system\"");
        let mode: ThemeMode = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(mode, ThemeMode::Dark);
    }

    #[test]
    fn test_system_unsupported_signal_is_light() {
        assert_eq!(ThemeMode::System.resolve(None), ResolvedTheme::Light);
    }

    #[test]
    fn test_resolved_parse_rejects_system() {
        assert_eq!(ResolvedTheme::parse("system"), None);
        assert_eq!(ResolvedTheme::parse("dark"), Some(ResolvedTheme::Dark));
    }

    #[test]
    fn test_resolved_opposite() {
        assert_eq!(ResolvedTheme::Light.opposite(), ResolvedTheme::Dark);
        assert_eq!(ResolvedTheme::Dark.opposite(), ResolvedTheme::Light);
    }

    proptest! {
        #[test]
        fn prop_explicit_mode_ignores_signal(signal in proptest::option::of(any::<bool>())) {
            prop_assert_eq!(ThemeMode::Light.resolve(signal), ResolvedTheme::Light);
            prop_assert_eq!(ThemeMode::Dark.resolve(signal), ResolvedTheme::Dark);
        }

        #[test]
        fn prop_system_follows_signal(is_dark in any::<bool>()) {
            let expected = if is_dark { ResolvedTheme::Dark } else { ResolvedTheme::Light };
            prop_assert_eq!(ThemeMode::System.resolve(Some(is_dark)), expected);
        }

        #[test]
        fn prop_mode_string_roundtrip(mode in any_mode()) {
            prop_assert_eq!(mode.as_str().parse::<ThemeMode>().unwrap(), mode);
        }
    }
}
