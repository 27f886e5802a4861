//! Element state for host nodes.
//!
//! Mirrors the three stores the attribute synchronizer writes to:
//! string attributes, live boolean properties, and the live style object.
//! Boolean properties are deliberately separate from attributes - setting
//! `checked` never produces a `checked="true"` attribute string.

use compact_str::CompactString;

use crate::attr::StyleMap;

/// Mutable state of a host element.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Tag name
    pub tag: CompactString,
    /// String attributes as key-value pairs
    pub attrs: Vec<(CompactString, String)>,
    /// Live boolean properties (distinct from attributes)
    pub bool_props: Vec<(CompactString, bool)>,
    /// Live inline style
    pub style: StyleMap,
}

impl ElementData {
    /// Create element state for a tag.
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self { tag: tag.into(), ..Default::default() }
    }

    /// Get attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Set attribute value (update if exists, add if not).
    pub fn set_attr(&mut self, name: impl Into<CompactString>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.attrs.iter_mut().find(|(k, _)| k == &name) {
            attr.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Remove attribute by name, returning the old value if it existed.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs
            .iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.attrs.remove(pos).1)
    }

    /// Check if attribute exists.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    /// Get a live boolean property. `None` means never written.
    pub fn get_bool_prop(&self, name: &str) -> Option<bool> {
        self.bool_props.iter().find(|(k, _)| k == name).map(|(_, v)| *v)
    }

    /// Set a live boolean property.
    pub fn set_bool_prop(&mut self, name: impl Into<CompactString>, value: bool) {
        let name = name.into();
        if let Some(prop) = self.bool_props.iter_mut().find(|(k, _)| k == &name) {
            prop.1 = value;
        } else {
            self.bool_props.push((name, value));
        }
    }

    /// Get a live style property.
    pub fn get_style(&self, name: &str) -> Option<&str> {
        self.style.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Set a live style property (shallow merge target).
    pub fn set_style(&mut self, name: impl Into<CompactString>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.style.iter_mut().find(|(k, _)| k == &name) {
            entry.1 = value;
        } else {
            self.style.push((name, value));
        }
    }

    /// Drop the entire live style.
    pub fn clear_style(&mut self) {
        self.style.clear();
    }
}
