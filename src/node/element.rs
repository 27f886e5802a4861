//! Element node - tag or component, props, children
//!
//! The only structured variant of `VNode`. Builder methods cover the
//! shapes the prop classifier distinguishes: plain attributes, class,
//! inline style, boolean properties, and delegated event handlers.

use compact_str::CompactString;

use crate::attr::{Props, PropsExt, PropValue, StyleMap};
use crate::events::EventHandler;

use super::{Children, Component, VNode};

/// What an element renders as: a concrete tag, or a component still to be
/// resolved by the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A literal tag name ("div", "span", ...)
    Tag(CompactString),
    /// A function component; compares by identity
    Component(Component),
}

/// Element node in a virtual tree.
#[derive(Debug, Clone, PartialEq)]
pub struct VElement {
    /// Tag name or component reference
    pub kind: ElementKind,
    /// Property bag (attributes, handlers, style, boolean props)
    pub props: Props,
    /// Child nodes, flat
    pub children: Children,
}

impl VElement {
    /// Create an element with a literal tag and no props or children.
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            kind: ElementKind::Tag(tag.into()),
            props: Props::new(),
            children: Children::new(),
        }
    }

    /// Create a component element, resolved later by the normalizer.
    pub fn component(component: Component) -> Self {
        Self {
            kind: ElementKind::Component(component),
            props: Props::new(),
            children: Children::new(),
        }
    }

    /// Tag name, if this is a tag element.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Tag(tag) => Some(tag),
            ElementKind::Component(_) => None,
        }
    }

    /// Check if this element is an unresolved component.
    pub fn is_component(&self) -> bool {
        matches!(self.kind, ElementKind::Component(_))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder API
    // ─────────────────────────────────────────────────────────────────────────

    /// Set a prop (attribute, number, string...).
    pub fn attr(mut self, name: impl Into<CompactString>, value: impl Into<PropValue>) -> Self {
        self.props.set_prop(name, value.into());
        self
    }

    /// Set the `className` prop (mapped to the `class` attribute on sync).
    pub fn class(mut self, value: impl Into<String>) -> Self {
        self.props.set_prop("className", PropValue::Str(value.into()));
        self
    }

    /// Set the `style` prop from (property, value) pairs.
    pub fn style<K, V>(mut self, style: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<CompactString>,
        V: Into<String>,
    {
        let map: StyleMap = style.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.props.set_prop("style", PropValue::Style(map));
        self
    }

    /// Set a boolean prop (synced as a live property, not an attribute).
    pub fn toggle(mut self, name: impl Into<CompactString>, value: bool) -> Self {
        self.props.set_prop(name, PropValue::Bool(value));
        self
    }

    /// Register a delegated event handler, e.g. `.on("click", handler)`.
    ///
    /// Stored as the `on<event>` prop; the synchronizer derives the event
    /// type back by lowercasing the part after `on`.
    pub fn on(mut self, event: &str, handler: EventHandler) -> Self {
        let key = CompactString::from(format!("on{event}"));
        self.props.set_prop(key, PropValue::Handler(handler));
        self
    }

    /// Append a child node.
    pub fn child(mut self, node: impl Into<VNode>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a text child.
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(VNode::Text(content.into()));
        self
    }

    /// Append every node in an iterator as children.
    pub fn children(mut self, nodes: impl IntoIterator<Item = VNode>) -> Self {
        self.children.extend(nodes);
        self
    }
}

impl From<VElement> for VNode {
    fn from(element: VElement) -> Self {
        VNode::Element(Box::new(element))
    }
}
