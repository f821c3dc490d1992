//! Inline bootstrap script rendering.

use minijinja::{context, Environment};
use once_cell::sync::Lazy;

use crate::config::ThemeConfig;
use crate::error::ThemeError;

static SCRIPT_ENV: Lazy<Environment<'static>> = Lazy::new(Environment::new);

// Every interpolated value goes through `tojson`, which yields a quoted JS
// string literal with `<`, `>` and `&` escaped.
const SCRIPT_TEMPLATE: &str = r#"(function() {
  var root = document.documentElement;
  var apply = function(theme) {
    root.classList.remove('light', 'dark');
    root.classList.add(theme);
    root.setAttribute({{ attribute|tojson }}, theme);
  };
  try {
    var theme = localStorage.getItem({{ storage_key|tojson }});
    if (['light', 'dark', 'system'].indexOf(theme) === -1) {
      theme = {{ default_mode|tojson }};
    }
    var resolved = theme;
    if (theme === 'system') {
      var query = window.matchMedia && window.matchMedia('(prefers-color-scheme: dark)');
      resolved = query && query.matches ? 'dark' : 'light';
    }
    apply(resolved);
  } catch (e) {
    apply('light');
  }
  window[{{ marker|tojson }}] = true;
})();"#;

/// Renders the inline bootstrap script body for the page head.
///
/// The script performs the same sequence as
/// [`run_bootstrap`](super::run_bootstrap), using the names from `config`.
///
/// # Example
///
/// ```rust
/// use eyesante_theme::{render_bootstrap_script, ThemeConfig};
///
/// let script = render_bootstrap_script(&ThemeConfig::default()).unwrap();
/// assert!(script.contains(r#"localStorage.getItem("theme")"#));
/// assert!(script.contains(r#"window["__THEME_APPLIED__"] = true"#));
/// ```
pub fn render_bootstrap_script(config: &ThemeConfig) -> Result<String, ThemeError> {
    let script = SCRIPT_ENV.render_str(
        SCRIPT_TEMPLATE,
        context! {
            storage_key => &config.storage_key,
            attribute => &config.attribute,
            marker => &config.marker,
            default_mode => config.default_mode.as_str(),
        },
    )?;
    Ok(script)
}

/// Renders the bootstrap script wrapped in a `<script>` element.
pub fn render_bootstrap_tag(config: &ThemeConfig) -> Result<String, ThemeError> {
    Ok(format!("<script>{}</script>", render_bootstrap_script(config)?))
}
