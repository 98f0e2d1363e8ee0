//! Document-level theme marker
//!
//! Global styling that isn't owned by a component keys off a class on the
//! document root. The store updates it on every mode change.

use crate::mode::ThemeMode;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Receives the active mode so global styling can react to it
pub trait DocumentMarker: Send + Sync {
    fn apply(&self, mode: ThemeMode);
}

impl<T: DocumentMarker + ?Sized> DocumentMarker for Arc<T> {
    fn apply(&self, mode: ThemeMode) {
        (**self).apply(mode)
    }
}

impl<T: DocumentMarker + ?Sized> DocumentMarker for Box<T> {
    fn apply(&self, mode: ThemeMode) {
        (**self).apply(mode)
    }
}

/// Marker that does nothing (headless hosts without a document)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMarker;

impl DocumentMarker for NoopMarker {
    fn apply(&self, _mode: ThemeMode) {}
}

/// In-memory model of the root element's class list.
///
/// Theme classes are mutually exclusive; unrelated classes are left alone.
#[derive(Debug, Default)]
pub struct RootClassList {
    classes: Mutex<BTreeSet<String>>,
}

impl RootClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unrelated class (e.g. set by other global code)
    pub fn add(&self, class: impl Into<String>) {
        self.lock().insert(class.into());
    }

    pub fn contains(&self, class: &str) -> bool {
        self.lock().contains(class)
    }

    /// Sorted snapshot of the class list
    pub fn classes(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    /// The `class` attribute value
    pub fn class_attr(&self) -> String {
        self.classes().join(" ")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        self.classes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentMarker for RootClassList {
    fn apply(&self, mode: ThemeMode) {
        let mut classes = self.lock();
        for other in ThemeMode::ALL {
            classes.remove(other.root_class());
        }
        classes.insert(mode.root_class().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_classes_are_exclusive() {
        let root = RootClassList::new();
        root.add("no-js");

        root.apply(ThemeMode::Alternate);
        root.apply(ThemeMode::Default);

        assert_eq!(root.classes(), vec!["no-js", "theme-portfolio"]);
        assert_eq!(root.class_attr(), "no-js theme-portfolio");
    }
}
