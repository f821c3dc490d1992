//! Theme switcher widget logic.
//!
//! The dashboard offers two switchers: a dropdown listing every mode, and a
//! single button that flips between light and dark. Only their decisions
//! live here; rendering is up to the host.

use serde::Serialize;

use crate::theme::{ResolvedTheme, ThemeMode, ThemePreference};

/// Icon shown next to a theme option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Sun,
    Moon,
    Monitor,
}

/// One entry of the theme dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeOption {
    pub mode: ThemeMode,
    pub label: &'static str,
    pub icon: Icon,
}

/// Dropdown entries in display order.
pub const THEME_OPTIONS: [ThemeOption; 3] = [
    ThemeOption {
        mode: ThemeMode::Light,
        label: "Light",
        icon: Icon::Sun,
    },
    ThemeOption {
        mode: ThemeMode::Dark,
        label: "Dark",
        icon: Icon::Moon,
    },
    ThemeOption {
        mode: ThemeMode::System,
        label: "System",
        icon: Icon::Monitor,
    },
];

/// The dropdown entry for `mode`, falling back to the first entry.
pub fn current_option(mode: ThemeMode) -> &'static ThemeOption {
    THEME_OPTIONS
        .iter()
        .find(|option| option.mode == mode)
        .unwrap_or(&THEME_OPTIONS[0])
}

/// The mode the single-button toggle switches to.
///
/// In `system` mode the button flips whatever is currently shown; otherwise
/// it flips the explicit mode. The result is never `system`.
///
/// # Example
///
/// ```rust
/// use eyesante_theme::{toggle_target, ResolvedTheme, ThemeMode, ThemePreference};
///
/// let shown_dark = ThemePreference::new(ThemeMode::System, ResolvedTheme::Dark);
/// assert_eq!(toggle_target(shown_dark), ThemeMode::Light);
/// ```
pub fn toggle_target(preference: ThemePreference) -> ThemeMode {
    let current = match preference.mode {
        ThemeMode::Light => ResolvedTheme::Light,
        ThemeMode::Dark => ResolvedTheme::Dark,
        ThemeMode::System => preference.resolved,
    };
    current.opposite().into()
}

/// Icon for the single-button toggle: the theme a click would switch to.
pub fn toggle_icon(preference: ThemePreference) -> Icon {
    match toggle_target(preference) {
        ThemeMode::Dark => Icon::Moon,
        _ => Icon::Sun,
    }
}
