//! Named style registry

use std::collections::BTreeMap;

use sheetmark_core::StyleDescriptor;

use crate::error::LookupError;
use crate::presets::presets;

/// Named styles referenced by `data-xls-apply`
///
/// The registry starts with the preset catalogue. It is only read during an
/// interpretation, so one registry can serve many calls.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    styles: BTreeMap<String, StyleDescriptor>,
}

impl StyleRegistry {
    /// Registry holding the presets
    pub fn new() -> Self {
        Self { styles: presets() }
    }

    /// Registry without any style
    pub fn empty() -> Self {
        Self {
            styles: BTreeMap::new(),
        }
    }

    /// Presets with `overrides` on top; an override replaces the preset of the same name
    pub fn with_overrides<I, S>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, StyleDescriptor)>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (name, style) in overrides {
            registry.register(name, style);
        }
        registry
    }

    /// Check whether a style exists
    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Look up a style
    pub fn get(&self, name: &str) -> Result<&StyleDescriptor, LookupError> {
        self.styles.get(name).ok_or_else(|| LookupError {
            name: name.to_string(),
            known: self.names().map(str::to_string).collect(),
        })
    }

    /// Add or replace a style
    pub fn register<S: Into<String>>(&mut self, name: S, style: StyleDescriptor) {
        self.styles.insert(name.into(), style);
    }

    /// Every style, by name
    pub fn all(&self) -> &BTreeMap<String, StyleDescriptor> {
        &self.styles
    }

    /// Style names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Number of styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
