//! Virtual node types.
//!
//! A `VNode` is the lightweight tree description consumed by the engine:
//! primitives (null, booleans, text), flat sequences, and elements whose
//! kind is either a literal tag or a component resolved by the normalizer.
//!
//! Equality is structural except for handlers and components, which
//! compare by identity - exactly the change-detection semantics the
//! attribute synchronizer relies on.

mod component;
mod element;

pub use component::Component;
pub use element::{ElementKind, VElement};

use smallvec::SmallVec;

/// Node in a virtual tree.
#[derive(Debug, Clone, PartialEq)]
pub enum VNode {
    /// Absent value; renders as an empty text node
    Null,
    /// Boolean primitive; renders as an empty text node
    Bool(bool),
    /// Text content (numbers are stringified on construction)
    Text(String),
    /// A sequence of sibling nodes (fragment-equivalent)
    List(Vec<VNode>),
    /// An element or unresolved component
    Element(Box<VElement>),
}

/// Type alias for element children collections.
pub type Children = SmallVec<[VNode; 8]>;

impl VNode {
    /// Text node constructor.
    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text(content.into())
    }

    /// Check if this is an element node.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, VNode::Element(_))
    }

    /// Check if this is a text node.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, VNode::Text(_))
    }

    /// Check if this is a sequence of sibling nodes.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, VNode::List(_))
    }

    /// Get as element reference.
    #[inline]
    pub fn as_element(&self) -> Option<&VElement> {
        match self {
            VNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get as mutable element reference.
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut VElement> {
        match self {
            VNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content, if this is a text node.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            VNode::Text(t) => Some(t),
            _ => None,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<&str> for VNode {
    fn from(s: &str) -> Self {
        VNode::Text(s.to_string())
    }
}

impl From<String> for VNode {
    fn from(s: String) -> Self {
        VNode::Text(s)
    }
}

impl From<bool> for VNode {
    fn from(b: bool) -> Self {
        VNode::Bool(b)
    }
}

impl From<i32> for VNode {
    fn from(n: i32) -> Self {
        VNode::Text(n.to_string())
    }
}

impl From<i64> for VNode {
    fn from(n: i64) -> Self {
        VNode::Text(n.to_string())
    }
}

impl From<usize> for VNode {
    fn from(n: usize) -> Self {
        VNode::Text(n.to_string())
    }
}

impl From<f64> for VNode {
    fn from(n: f64) -> Self {
        VNode::Text(crate::attr::fmt_number(n))
    }
}

impl From<Vec<VNode>> for VNode {
    fn from(nodes: Vec<VNode>) -> Self {
        VNode::List(nodes)
    }
}

impl<T: Into<VNode>> From<Option<T>> for VNode {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => VNode::Null,
        }
    }
}
