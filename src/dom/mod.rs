//! Headless host tree.
//!
//! The real, mutable counterpart of the virtual tree. `DomNode` is a cheap
//! reference-counted handle; parents own their children and children hold a
//! weak backlink, so dropping a subtree's last external handle frees it.
//!
//! Fragments follow DocumentFragment semantics: appending or inserting a
//! fragment splices its children into the target and leaves it empty.

mod element;

pub use element::ElementData;

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use compact_str::CompactString;

use crate::attr::StyleMap;

/// Node kind and kind-specific state.
#[derive(Debug)]
enum NodeData {
    Element(ElementData),
    Text(String),
    Fragment,
}

struct NodeInner {
    parent: Weak<RefCell<NodeInner>>,
    children: Vec<DomNode>,
    data: NodeData,
}

/// Handle to a host-tree node. Clones refer to the same node.
#[derive(Clone)]
pub struct DomNode {
    inner: Rc<RefCell<NodeInner>>,
}

/// Weak handle to a host-tree node; does not keep the node alive.
#[derive(Clone)]
pub struct WeakDomNode {
    inner: Weak<RefCell<NodeInner>>,
}

impl WeakDomNode {
    /// Upgrade back to a strong handle, if the node is still alive.
    pub fn upgrade(&self) -> Option<DomNode> {
        self.inner.upgrade().map(|inner| DomNode { inner })
    }
}

impl DomNode {
    fn from_data(data: NodeData) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeInner {
                parent: Weak::new(),
                children: Vec::new(),
                data,
            })),
        }
    }

    /// Create an element node.
    pub fn element(tag: impl Into<CompactString>) -> Self {
        Self::from_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::from_data(NodeData::Text(content.into()))
    }

    /// Create an empty fragment.
    pub fn fragment() -> Self {
        Self::from_data(NodeData::Fragment)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identity
    // ─────────────────────────────────────────────────────────────────────────

    /// Check whether two handles refer to the same node.
    pub fn same_node(&self, other: &DomNode) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Stable address-based identity, valid while the node is alive.
    pub(crate) fn node_id(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }

    /// Downgrade to a weak handle.
    pub fn downgrade(&self) -> WeakDomNode {
        WeakDomNode { inner: Rc::downgrade(&self.inner) }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Kind checks and content
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self.inner.borrow().data, NodeData::Element(_))
    }

    /// Check if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self.inner.borrow().data, NodeData::Text(_))
    }

    /// Check if this is a fragment.
    pub fn is_fragment(&self) -> bool {
        matches!(self.inner.borrow().data, NodeData::Fragment)
    }

    /// Tag name, if this is an element.
    pub fn tag(&self) -> Option<CompactString> {
        match &self.inner.borrow().data {
            NodeData::Element(data) => Some(data.tag.clone()),
            _ => None,
        }
    }

    /// Text content, if this is a text node.
    pub fn as_text(&self) -> Option<String> {
        match &self.inner.borrow().data {
            NodeData::Text(content) => Some(content.clone()),
            _ => None,
        }
    }

    /// Concatenated text content of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut buf = String::new();
        self.collect_text(&mut buf);
        buf
    }

    fn collect_text(&self, buf: &mut String) {
        let inner = self.inner.borrow();
        if let NodeData::Text(content) = &inner.data {
            buf.push_str(content);
        }
        for child in &inner.children {
            child.collect_text(buf);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Structure
    // ─────────────────────────────────────────────────────────────────────────

    /// Parent node, if attached.
    pub fn parent(&self) -> Option<DomNode> {
        self.inner.borrow().parent.upgrade().map(|inner| DomNode { inner })
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    /// Check if this node has any children.
    pub fn has_children(&self) -> bool {
        !self.inner.borrow().children.is_empty()
    }

    /// Child at a position.
    pub fn child_at(&self, index: usize) -> Option<DomNode> {
        self.inner.borrow().children.get(index).cloned()
    }

    /// First child.
    pub fn first_child(&self) -> Option<DomNode> {
        self.child_at(0)
    }

    /// Snapshot of the child handles.
    pub fn children(&self) -> Vec<DomNode> {
        self.inner.borrow().children.clone()
    }

    /// Append a child. Appending a fragment splices its children in.
    pub fn append_child(&self, child: &DomNode) {
        if child.is_fragment() {
            for item in child.take_children() {
                self.append_child(&item);
            }
            return;
        }
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.push(child.clone());
    }

    /// Insert a child at a position (clamped to the child count).
    /// Inserting a fragment splices its children in at that position.
    pub fn insert_child_at(&self, index: usize, child: &DomNode) {
        if child.is_fragment() {
            for (offset, item) in child.take_children().into_iter().enumerate() {
                self.insert_child_at(index + offset, &item);
            }
            return;
        }
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        let mut inner = self.inner.borrow_mut();
        let index = index.min(inner.children.len());
        inner.children.insert(index, child.clone());
    }

    /// Remove and return the child at a position, detaching its parent link.
    pub fn remove_child_at(&self, index: usize) -> Option<DomNode> {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            if index >= inner.children.len() {
                return None;
            }
            inner.children.remove(index)
        };
        removed.inner.borrow_mut().parent = Weak::new();
        Some(removed)
    }

    /// Replace the child at a position, returning the old child.
    /// Replacing with a fragment splices the fragment's children in.
    pub fn replace_child_at(&self, index: usize, new_child: &DomNode) -> Option<DomNode> {
        let old = self.remove_child_at(index)?;
        self.insert_child_at(index, new_child);
        Some(old)
    }

    /// Check whether `other` is this node or one of its descendants.
    pub fn contains(&self, other: &DomNode) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if self.same_node(&node) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    fn take_children(&self) -> Vec<DomNode> {
        std::mem::take(&mut self.inner.borrow_mut().children)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Element state (no-ops / None on non-element nodes)
    // ─────────────────────────────────────────────────────────────────────────

    fn with_element<R>(&self, f: impl FnOnce(&ElementData) -> R) -> Option<R> {
        match &self.inner.borrow().data {
            NodeData::Element(data) => Some(f(data)),
            _ => None,
        }
    }

    fn with_element_mut<R>(&self, f: impl FnOnce(&mut ElementData) -> R) -> Option<R> {
        match &mut self.inner.borrow_mut().data {
            NodeData::Element(data) => Some(f(data)),
            _ => None,
        }
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<String> {
        self.with_element(|data| data.get_attr(name).map(str::to_string)).flatten()
    }

    /// Set an attribute value.
    pub fn set_attr(&self, name: impl Into<CompactString>, value: impl Into<String>) {
        self.with_element_mut(|data| data.set_attr(name, value));
    }

    /// Remove an attribute.
    pub fn remove_attr(&self, name: &str) {
        self.with_element_mut(|data| data.remove_attr(name));
    }

    /// Check if an attribute exists.
    pub fn has_attr(&self, name: &str) -> bool {
        self.with_element(|data| data.has_attr(name)).unwrap_or(false)
    }

    /// Snapshot of the string attributes.
    pub fn attrs(&self) -> Vec<(CompactString, String)> {
        self.with_element(|data| data.attrs.clone()).unwrap_or_default()
    }

    /// Get a live boolean property. `None` means never written.
    pub fn bool_prop(&self, name: &str) -> Option<bool> {
        self.with_element(|data| data.get_bool_prop(name)).flatten()
    }

    /// Set a live boolean property.
    pub fn set_bool_prop(&self, name: impl Into<CompactString>, value: bool) {
        self.with_element_mut(|data| data.set_bool_prop(name, value));
    }

    /// Get a live style property.
    pub fn style(&self, name: &str) -> Option<String> {
        self.with_element(|data| data.get_style(name).map(str::to_string)).flatten()
    }

    /// Set a live style property.
    pub fn set_style(&self, name: impl Into<CompactString>, value: impl Into<String>) {
        self.with_element_mut(|data| data.set_style(name, value));
    }

    /// Drop the element's entire live style.
    pub fn clear_style(&self) {
        self.with_element_mut(ElementData::clear_style);
    }

    /// Snapshot of the live style.
    pub fn styles(&self) -> StyleMap {
        self.with_element(|data| data.style.clone()).unwrap_or_default()
    }
}

impl fmt::Debug for DomNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        match &inner.data {
            NodeData::Element(data) => f
                .debug_struct("DomNode")
                .field("tag", &data.tag)
                .field("children", &inner.children.len())
                .finish(),
            NodeData::Text(content) => f.debug_tuple("DomNode::Text").field(content).finish(),
            NodeData::Fragment => f
                .debug_struct("DomNode::Fragment")
                .field("children", &inner.children.len())
                .finish(),
        }
    }
}
