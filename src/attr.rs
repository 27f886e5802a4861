//! Prop system and the attribute synchronizer.
//!
//! Props are simple key-value pairs, `Vec<(CompactString, PropValue)>`,
//! with an extension trait for map-like access. `sync_attributes` applies
//! the difference between two prop bags to a host element, classifying
//! each key in priority order: `children` (skipped), `on*` handlers,
//! `className`, `style` objects, boolean props, and plain attributes.

use compact_str::CompactString;
use tracing::trace;

use crate::dom::DomNode;
use crate::events::{EventHandler, EventRegistry};

/// Prop bag as simple key-value pairs.
pub type Props = Vec<(CompactString, PropValue)>;

/// Inline style as (property, value) pairs.
pub type StyleMap = Vec<(CompactString, String)>;

/// A single prop value.
///
/// The variant determines how the synchronizer applies the prop to the
/// host element. `Handler` compares by identity; everything else is
/// structural.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// String value, applied as an attribute
    Str(String),
    /// Numeric value, stringified into an attribute
    Num(f64),
    /// Boolean, applied as a live property (never an attribute string)
    Bool(bool),
    /// Style object, shallow-merged into the element's live style
    Style(StyleMap),
    /// Event handler, registered through the delegation registry
    Handler(EventHandler),
}

impl PropValue {
    /// Build a style value from (property, value) pairs.
    pub fn style<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<CompactString>,
        V: Into<String>,
    {
        PropValue::Style(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Get the handler, if this is a handler value.
    pub fn as_handler(&self) -> Option<&EventHandler> {
        match self {
            PropValue::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// String form used when the value lands in a plain attribute.
    fn to_attr_string(&self) -> String {
        match self {
            PropValue::Str(s) => s.clone(),
            PropValue::Num(n) => fmt_number(*n),
            PropValue::Bool(b) => b.to_string(),
            PropValue::Style(map) => map
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; "),
            PropValue::Handler(_) => String::new(),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Str(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Num(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Num(n as f64)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<EventHandler> for PropValue {
    fn from(handler: EventHandler) -> Self {
        PropValue::Handler(handler)
    }
}

/// Format a number the way the text layer expects: integral values print
/// without a fractional part.
pub(crate) fn fmt_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

// =============================================================================
// PropsExt
// =============================================================================

/// Extension trait for prop operations on `Props`.
pub trait PropsExt {
    /// Get a prop value by name
    fn get_prop(&self, name: &str) -> Option<&PropValue>;

    /// Check if a prop exists
    fn has_prop(&self, name: &str) -> bool;

    /// Set a prop value (insert or update)
    fn set_prop(&mut self, name: impl Into<CompactString>, value: impl Into<PropValue>);

    /// Remove a prop by name, returning the old value if present
    fn remove_prop(&mut self, name: &str) -> Option<PropValue>;
}

impl PropsExt for Props {
    fn get_prop(&self, name: &str) -> Option<&PropValue> {
        self.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    fn has_prop(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_prop(&mut self, name: impl Into<CompactString>, value: impl Into<PropValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(prop) = self.iter_mut().find(|(k, _)| k == &name) {
            prop.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn remove_prop(&mut self, name: &str) -> Option<PropValue> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }
}

// =============================================================================
// Attribute synchronizer
// =============================================================================

/// Check whether a prop key names a delegated event handler slot.
fn is_event_key(key: &str) -> bool {
    key.len() > 2 && key.starts_with("on")
}

/// Derive the delegated event type from a handler prop key:
/// `onClick` -> `click`.
fn event_type_of(key: &str) -> CompactString {
    CompactString::from(key[2..].to_lowercase())
}

/// Apply the difference between two prop bags to a host element.
///
/// Absent bags are treated as empty. A prop is touched only when the new
/// value differs from the old one (`PartialEq`, which is identity for
/// handlers); keys present in the old bag but absent from the new one are
/// removed along the path their old value's shape dictates.
pub fn sync_attributes(
    target: &DomNode,
    new_props: Option<&Props>,
    old_props: Option<&Props>,
    registry: &EventRegistry,
) {
    let empty = Props::new();
    let new_props = new_props.unwrap_or(&empty);
    let old_props = old_props.unwrap_or(&empty);

    // Removal pass: keys gone from the new bag, routed by the old value's
    // shape. Arm order is the classification priority.
    for (key, old_value) in old_props {
        if new_props.has_prop(key) || key == "children" {
            continue;
        }
        match old_value {
            PropValue::Handler(handler) if is_event_key(key) => {
                registry.remove_event(target, &event_type_of(key), handler);
            }
            _ if key == "className" => target.remove_attr("class"),
            PropValue::Style(_) if key == "style" => target.clear_style(),
            // A stale `true` must not survive prop removal.
            PropValue::Bool(_) => target.set_bool_prop(key.clone(), false),
            _ => target.remove_attr(key),
        }
        trace!(key = %key, "prop removed");
    }

    // Update pass: added or changed keys.
    for (key, value) in new_props {
        if old_props.get_prop(key) == Some(value) || key == "children" {
            continue;
        }
        match value {
            PropValue::Handler(handler) if is_event_key(key) => {
                let event_type = event_type_of(key);
                // Deregister the stale handler first so the registry never
                // holds both and never fires the old identity again.
                if let Some(old_handler) = old_props.get_prop(key).and_then(PropValue::as_handler) {
                    registry.remove_event(target, &event_type, old_handler);
                }
                registry.add_event(target, &*event_type, handler.clone());
            }
            _ if key == "className" => target.set_attr("class", value.to_attr_string()),
            PropValue::Style(style) if key == "style" => {
                for (style_key, style_value) in style {
                    target.set_style(style_key.clone(), style_value.clone());
                }
            }
            PropValue::Bool(b) => target.set_bool_prop(key.clone(), *b),
            _ => target.set_attr(key.clone(), value.to_attr_string()),
        }
        trace!(key = %key, "prop applied");
    }
}

// =============================================================================
// Tests
// =============================================================================
