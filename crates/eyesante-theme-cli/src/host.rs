//! Native host wiring: file store, OS signal and an in-memory document root.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use eyesante_theme::{
    run_bootstrap, ColorSchemeSignal, FileStore, MemoryDocument, Mounted, ResolvedTheme,
    ThemeConfig, ThemeContext,
};

/// Everything a theme context needs, minus the context itself.
pub struct Host {
    pub config: ThemeConfig,
    pub store_path: PathBuf,
    pub signal: Rc<dyn ColorSchemeSignal>,
    pub document: MemoryDocument,
}

/// A started host: the bootstrap result and the mounted context.
pub struct Session {
    pub painted: ResolvedTheme,
    pub theme: ThemeContext,
    pub mounted: Mounted,
}

impl Host {
    pub fn new(config: ThemeConfig, store_path: impl Into<PathBuf>, signal: Rc<dyn ColorSchemeSignal>) -> Self {
        Self {
            config,
            store_path: store_path.into(),
            signal,
            document: MemoryDocument::new(),
        }
    }

    /// Runs the page lifecycle: bootstrap, initialize, mount.
    pub fn start(&self) -> Session {
        let store = FileStore::new(&self.store_path);
        let painted = run_bootstrap(&store, self.signal.as_ref(), &self.document, &self.config);
        let theme = ThemeContext::new(
            self.config.clone(),
            store,
            Rc::clone(&self.signal),
            self.document.clone(),
        );
        let first = theme.initialize();
        tracing::debug!(mode = %first.mode, resolved = %first.resolved, "theme initialized");
        let mounted = theme.mount();
        Session {
            painted,
            theme,
            mounted,
        }
    }
}

/// Loads the YAML config at `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ThemeConfig> {
    let Some(path) = path else {
        return Ok(ThemeConfig::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    ThemeConfig::from_yaml(&source).with_context(|| format!("invalid config {}", path.display()))
}
