//! Visual state of the document root.
//!
//! The resolved theme is applied twice over: as a class token (`light` or
//! `dark`) for stylesheets, and as an attribute (`data-theme` by default)
//! that the bootstrap step and the resolver read back. Both must always
//! agree, which is why [`apply_theme`] is the only writer.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use crate::config::ThemeConfig;
use crate::theme::ResolvedTheme;

/// The root element of the rendered page.
pub trait DocumentRoot {
    fn add_class(&self, token: &str);
    fn remove_class(&self, token: &str);
    fn has_class(&self, token: &str) -> bool;

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);

    /// Whether the flag named `marker` has been set.
    fn marker(&self, marker: &str) -> bool;
    fn set_marker(&self, marker: &str);
}

/// Applies `resolved` to the document root.
///
/// Removes any existing theme token first so exactly one is present.
pub fn apply_theme(doc: &dyn DocumentRoot, resolved: ResolvedTheme, config: &ThemeConfig) {
    for token in ResolvedTheme::TOKENS {
        doc.remove_class(token);
    }
    doc.add_class(resolved.as_str());
    doc.set_attribute(&config.attribute, resolved.as_str());
    tracing::debug!(theme = %resolved, attribute = %config.attribute, "applied theme to document");
}

/// Reads the theme previously applied to the document, if any.
///
/// Values other than `light` and `dark` are treated as absent.
pub fn read_applied_theme(doc: &dyn DocumentRoot, config: &ThemeConfig) -> Option<ResolvedTheme> {
    doc.attribute(&config.attribute)
        .and_then(|value| ResolvedTheme::parse(&value))
}

#[derive(Debug, Default)]
struct Inner {
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    markers: HashSet<String>,
}

/// An in-memory document root.
///
/// Cloning yields another handle to the same element. Class tokens keep
/// insertion order and never repeat, like a DOM `classList`.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class tokens in insertion order.
    pub fn classes(&self) -> Vec<String> {
        self.inner.borrow().classes.clone()
    }
}

impl DocumentRoot for MemoryDocument {
    fn add_class(&self, token: &str) {
        let mut inner = self.inner.borrow_mut();
        if !inner.classes.iter().any(|c| c == token) {
            inner.classes.push(token.to_string());
        }
    }

    fn remove_class(&self, token: &str) {
        self.inner.borrow_mut().classes.retain(|c| c != token);
    }

    fn has_class(&self, token: &str) -> bool {
        self.inner.borrow().classes.iter().any(|c| c == token)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.inner.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.inner
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn marker(&self, marker: &str) -> bool {
        self.inner.borrow().markers.contains(marker)
    }

    fn set_marker(&self, marker: &str) {
        self.inner.borrow_mut().markers.insert(marker.to_string());
    }
}
