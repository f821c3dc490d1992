//! Theme values.
//!
//! - [`ThemeMode`]: the persisted intent (`light`, `dark` or `system`)
//! - [`ResolvedTheme`]: the concrete theme applied to the document
//! - [`ThemePreference`]: a mode paired with its current resolution

mod mode;

pub use mode::{ResolvedTheme, ThemeMode, ThemePreference};
