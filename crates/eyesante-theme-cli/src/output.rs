//! Terminal and JSON output.

use console::Style;
use eyesante_theme::{current_option, ResolvedTheme, ThemeOption, ThemePreference};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Report<'a> {
    mode: &'a str,
    resolved: &'a str,
    degraded: bool,
}

fn theme_style(resolved: ResolvedTheme) -> Style {
    match resolved {
        ResolvedTheme::Light => Style::new().yellow().bold(),
        ResolvedTheme::Dark => Style::new().magenta().bold(),
    }
}

/// Formats a preference for display.
pub fn preference(pref: ThemePreference, degraded: bool, json: bool) -> anyhow::Result<String> {
    if json {
        let report = Report {
            mode: pref.mode.as_str(),
            resolved: pref.resolved.as_str(),
            degraded,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let option = current_option(pref.mode);
    let mut out = format!(
        "mode:     {}\nresolved: {}",
        option.label,
        theme_style(pref.resolved).apply_to(pref.resolved)
    );
    if degraded {
        out.push_str(&format!(
            "\n{}",
            Style::new().dim().apply_to("(storage unavailable, change not saved)")
        ));
    }
    Ok(out)
}

/// Formats the theme menu, marking the active entry.
pub fn options(options: &[ThemeOption], active: ThemePreference, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(options)?);
    }
    let lines: Vec<String> = options
        .iter()
        .map(|option| {
            let marker = if option.mode == active.mode { "●" } else { " " };
            format!("{} {:<7} ({})", marker, option.label, option.mode)
        })
        .collect();
    Ok(lines.join("\n"))
}
