//! Command handlers.

use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use eyesante_theme::{
    render_bootstrap_script, render_bootstrap_tag, ColorSchemeSignal, SystemSignal, THEME_OPTIONS,
};

use crate::cli::{Cli, Command};
use crate::host::{load_config, Host};
use crate::output;

/// Runs the parsed command line, returning the text to print.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = load_config(cli.config.as_deref())?;
    let system = Rc::new(SystemSignal::new());
    let signal: Rc<dyn ColorSchemeSignal> = system.clone();
    let host = Host::new(config, &cli.store, signal);

    if let Command::Watch { interval_ms } = cli.command {
        watch(&host, &system, Duration::from_millis(interval_ms), cli.json)?;
        return Ok(String::new());
    }
    execute(&cli.command, &host, cli.json)
}

/// Runs every command except `watch` against `host`.
pub fn execute(command: &Command, host: &Host, json: bool) -> anyhow::Result<String> {
    match command {
        Command::Script { tag } => {
            let script = if *tag {
                render_bootstrap_tag(&host.config)?
            } else {
                render_bootstrap_script(&host.config)?
            };
            Ok(script)
        }
        Command::Show => {
            let session = host.start();
            output::preference(session.theme.snapshot(), session.theme.is_degraded(), json)
        }
        Command::Set { mode } => {
            let session = host.start();
            session
                .theme
                .set_mode_str(mode)
                .with_context(|| format!("cannot set theme to '{}'", mode))?;
            output::preference(session.theme.snapshot(), session.theme.is_degraded(), json)
        }
        Command::Toggle => {
            let session = host.start();
            let target = session.theme.toggle();
            tracing::debug!(mode = %target, "toggled theme");
            output::preference(session.theme.snapshot(), session.theme.is_degraded(), json)
        }
        Command::Options => {
            let session = host.start();
            output::options(&THEME_OPTIONS, session.theme.snapshot(), json)
        }
        Command::Watch { .. } => anyhow::bail!("watch needs the system colour-scheme signal"),
    }
}

fn watch(host: &Host, system: &SystemSignal, interval: Duration, json: bool) -> anyhow::Result<()> {
    let session = host.start();
    println!(
        "{}",
        output::preference(session.theme.snapshot(), session.theme.is_degraded(), json)?
    );

    let mut last = session.theme.snapshot();
    loop {
        thread::sleep(interval);
        if !system.poll() {
            continue;
        }
        let current = session.mounted.context().snapshot();
        if current != last {
            println!("{}", output::preference(current, session.theme.is_degraded(), json)?);
            last = current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyesante_theme::ManualSignal;
    use std::fs;
    use tempfile::TempDir;

    fn host(dir: &TempDir, prefers_dark: Option<bool>) -> Host {
        Host::new(
            eyesante_theme::ThemeConfig::default(),
            dir.path().join("prefs.json"),
            Rc::new(ManualSignal::new(prefers_dark)),
        )
    }

    fn json(out: &str) -> serde_json::Value {
        serde_json::from_str(out).unwrap()
    }

    #[test]
    fn test_show_first_run_writes_system() {
        let dir = TempDir::new().unwrap();
        let host = host(&dir, Some(true));

        let out = json(&execute(&Command::Show, &host, true).unwrap());
        assert_eq!(out["mode"], "system");
        assert_eq!(out["resolved"], "dark");

        let saved = fs::read_to_string(dir.path().join("prefs.json")).unwrap();
        assert!(saved.contains("\"system\""));
    }

    #[test]
    fn test_set_then_show() {
        let dir = TempDir::new().unwrap();
        let host = host(&dir, Some(true));

        execute(
            &Command::Set {
                mode: "light".to_string(),
            },
            &host,
            true,
        )
        .unwrap();

        let out = json(&execute(&Command::Show, &host, true).unwrap());
        assert_eq!(out["mode"], "light");
        assert_eq!(out["resolved"], "light");
    }

    #[test]
    fn test_set_invalid_mode_fails() {
        let dir = TempDir::new().unwrap();
        let host = host(&dir, Some(false));

        let err = execute(
            &Command::Set {
                mode: "blue".to_string(),
            },
            &host,
            false,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("invalid theme mode 'blue'"));
    }

    #[test]
    fn test_toggle_flips_resolved() {
        let dir = TempDir::new().unwrap();
        let host = host(&dir, Some(false));

        let out = json(&execute(&Command::Toggle, &host, true).unwrap());
        assert_eq!(out["mode"], "dark");
        let out = json(&execute(&Command::Toggle, &host, true).unwrap());
        assert_eq!(out["mode"], "light");
    }

    #[test]
    fn test_script_tag() {
        let dir = TempDir::new().unwrap();
        let host = host(&dir, None);
        let out = execute(&Command::Script { tag: true }, &host, false).unwrap();
        assert!(out.starts_with("<script>"));
    }

    #[test]
    fn test_corrupt_store_degrades() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prefs.json"), "{not json").unwrap();
        let host = host(&dir, Some(true));

        let out = json(
            &execute(
                &Command::Set {
                    mode: "dark".to_string(),
                },
                &host,
                true,
            )
            .unwrap(),
        );
        assert_eq!(out["mode"], "dark");
        assert_eq!(out["degraded"], true);
    }
}
