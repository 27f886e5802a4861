//! Delegated event registration and dispatch.
//!
//! Handlers are never attached to individual nodes. The registry keeps one
//! table of element -> listeners, a set of known event types, and, per
//! render root, the set of types whose (conceptual) native listener has
//! been installed. Installation is idempotent: one native listener per
//! type per root, no matter how many delegated handlers come and go.
//!
//! Dispatch walks the ancestor chain from the event target upward,
//! invoking every matching listener in registration order at each level -
//! bubbling realized entirely in the registry. The listener list is
//! snapshotted per level before any handler runs, so handlers may mutate
//! registrations or trigger re-entrant renders safely.
//!
//! The element table is weakly keyed: entries hold `WeakDomNode` and are
//! evicted eagerly when the differ detaches a subtree, so a removed
//! element can never leak registrations onto a later allocation at the
//! same address.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::dom::{DomNode, WeakDomNode};

// =============================================================================
// Event and handler types
// =============================================================================

/// An event as delivered to delegated handlers.
#[derive(Debug, Clone)]
pub struct Event {
    /// Event type ("click", "input", ...)
    pub event_type: CompactString,
    /// The node the event originated at
    pub target: DomNode,
}

impl Event {
    /// Create an event aimed at a target node.
    pub fn new(event_type: impl Into<CompactString>, target: &DomNode) -> Self {
        Self { event_type: event_type.into(), target: target.clone() }
    }
}

/// A delegated event handler. Clones share identity; the registry and the
/// prop differ both compare handlers by identity, never by value.
#[derive(Clone)]
pub struct EventHandler {
    f: Rc<dyn Fn(&Event)>,
}

impl EventHandler {
    /// Wrap a closure as a handler.
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self { f: Rc::new(f) }
    }

    /// Invoke the handler.
    pub fn call(&self, event: &Event) {
        (self.f)(event)
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler").finish_non_exhaustive()
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// One registration: event type plus handler identity.
struct Listener {
    event_type: CompactString,
    handler: EventHandler,
}

/// Listener list for one element, with a weak handle for liveness checks.
struct ElementListeners {
    element: WeakDomNode,
    entries: Vec<Listener>,
}

impl ElementListeners {
    /// The entry is only valid while its weak handle still resolves to the
    /// node it was created for; an address reused by a new allocation must
    /// not inherit stale listeners.
    fn is_for(&self, node: &DomNode) -> bool {
        self.element.upgrade().is_some_and(|n| n.same_node(node))
    }
}

/// Per-root installation state.
struct RootEntry {
    root: WeakDomNode,
    installed: FxHashSet<CompactString>,
}

#[derive(Default)]
struct RegistryInner {
    listeners: FxHashMap<usize, ElementListeners>,
    event_types: FxHashSet<CompactString>,
    roots: FxHashMap<usize, RootEntry>,
}

/// Shared handle to the delegation table. Clones share state; the renderer
/// and the attribute synchronizer pass one handle through a render pass.
#[derive(Clone, Default)]
pub struct EventRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl EventRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an event type on an element.
    ///
    /// The event type joins the known set; the native listener for it is
    /// installed on each root at the next [`install`](Self::install).
    pub fn add_event(&self, element: &DomNode, event_type: impl Into<CompactString>, handler: EventHandler) {
        let event_type = event_type.into();
        let mut inner = self.inner.borrow_mut();
        inner.event_types.insert(event_type.clone());

        let entry = inner
            .listeners
            .entry(element.node_id())
            .or_insert_with(|| ElementListeners { element: element.downgrade(), entries: Vec::new() });
        if !entry.is_for(element) {
            entry.element = element.downgrade();
            entry.entries.clear();
        }
        trace!(event_type = %event_type, "listener added");
        entry.entries.push(Listener { event_type, handler });
    }

    /// Remove the registration matching this event type AND handler
    /// identity. Other listeners on the element are untouched; an element
    /// whose list empties is dropped from the table entirely.
    pub fn remove_event(&self, element: &DomNode, event_type: &str, handler: &EventHandler) {
        let mut inner = self.inner.borrow_mut();
        let key = element.node_id();
        if let Some(entry) = inner.listeners.get_mut(&key) {
            entry
                .entries
                .retain(|l| l.event_type != event_type || !l.handler.ptr_eq(handler));
            if entry.entries.is_empty() {
                inner.listeners.remove(&key);
            }
            trace!(event_type = %event_type, "listener removed");
        }
    }

    /// Install every known event type's native listener on a root.
    /// Idempotent: a type already installed on that root is a no-op.
    pub fn install(&self, root: &DomNode) {
        let inner = &mut *self.inner.borrow_mut();
        let entry = inner
            .roots
            .entry(root.node_id())
            .or_insert_with(|| RootEntry { root: root.downgrade(), installed: FxHashSet::default() });
        if !entry.root.upgrade().is_some_and(|n| n.same_node(root)) {
            entry.root = root.downgrade();
            entry.installed.clear();
        }
        for event_type in &inner.event_types {
            if entry.installed.insert(event_type.clone()) {
                debug!(event_type = %event_type, "native listener installed on root");
            }
        }
    }

    /// Check whether a native listener for the type is installed on a root.
    pub fn is_installed(&self, root: &DomNode, event_type: &str) -> bool {
        self.inner
            .borrow()
            .roots
            .get(&root.node_id())
            .is_some_and(|entry| {
                entry.root.upgrade().is_some_and(|n| n.same_node(root))
                    && entry.installed.contains(event_type)
            })
    }

    /// Number of live registrations on an element (all event types).
    pub fn listener_count(&self, element: &DomNode) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(&element.node_id())
            .filter(|entry| entry.is_for(element))
            .map_or(0, |entry| entry.entries.len())
    }

    /// Deliver an event through a root's native listener: no-op unless the
    /// type is installed on the root and the target lives under it, then a
    /// bubbling walk from the target up through its ancestors.
    ///
    /// The propagation path is fixed before any handler runs; each level's
    /// matching handlers are snapshotted before invocation. A handler that
    /// panics aborts the remaining walk (the panic propagates).
    pub fn dispatch(&self, root: &DomNode, event: &Event) {
        if !self.is_installed(root, &event.event_type) {
            return;
        }
        if !root.contains(&event.target) {
            return;
        }
        trace!(event_type = %event.event_type, "dispatching");

        let mut path = Vec::new();
        let mut current = Some(event.target.clone());
        while let Some(node) = current {
            current = node.parent();
            path.push(node);
        }

        for node in &path {
            if !node.is_element() {
                continue;
            }
            let handlers: Vec<EventHandler> = {
                let inner = self.inner.borrow();
                match inner.listeners.get(&node.node_id()) {
                    Some(entry) if entry.is_for(node) => entry
                        .entries
                        .iter()
                        .filter(|l| l.event_type == event.event_type)
                        .map(|l| l.handler.clone())
                        .collect(),
                    _ => Vec::new(),
                }
            };
            for handler in handlers {
                handler.call(event);
            }
        }
    }

    /// Evict the registrations of a node and every descendant. Called by
    /// the differ and renderer whenever a real subtree is detached.
    pub fn detach_subtree(&self, node: &DomNode) {
        self.inner.borrow_mut().listeners.remove(&node.node_id());
        for child in node.children() {
            self.detach_subtree(&child);
        }
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EventRegistry")
            .field("elements", &inner.listeners.len())
            .field("event_types", &inner.event_types.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (DomNode, DomNode, DomNode) {
        let root = DomNode::element("div");
        let mid = DomNode::element("section");
        let leaf = DomNode::element("button");
        root.append_child(&mid);
        mid.append_child(&leaf);
        (root, mid, leaf)
    }

    #[test]
    fn test_add_then_remove_by_identity() {
        let registry = EventRegistry::new();
        let el = DomNode::element("button");
        let handler = EventHandler::new(|_| {});

        registry.add_event(&el, "click", handler.clone());
        assert_eq!(registry.listener_count(&el), 1);

        registry.remove_event(&el, "click", &handler);
        assert_eq!(registry.listener_count(&el), 0);
    }

    #[test]
    fn test_remove_requires_both_type_and_identity() {
        let registry = EventRegistry::new();
        let el = DomNode::element("button");
        let handler = EventHandler::new(|_| {});
        let other = EventHandler::new(|_| {});

        registry.add_event(&el, "click", handler.clone());
        registry.remove_event(&el, "keydown", &handler);
        registry.remove_event(&el, "click", &other);
        assert_eq!(registry.listener_count(&el), 1);
    }

    #[test]
    fn test_unmatched_removal_leaves_siblings() {
        let registry = EventRegistry::new();
        let el = DomNode::element("input");
        let a = EventHandler::new(|_| {});
        let b = EventHandler::new(|_| {});

        registry.add_event(&el, "click", a.clone());
        registry.add_event(&el, "input", b.clone());
        registry.remove_event(&el, "click", &a);
        assert_eq!(registry.listener_count(&el), 1);
    }

    #[test]
    fn test_dispatch_bubbles_in_ancestor_order() {
        let registry = EventRegistry::new();
        let (root, mid, leaf) = tree();

        let order = Rc::new(RefCell::new(Vec::new()));
        for (name, node) in [("leaf", &leaf), ("mid", &mid), ("root", &root)] {
            let order = order.clone();
            registry.add_event(node, "click", EventHandler::new(move |_| order.borrow_mut().push(name)));
        }
        registry.install(&root);

        registry.dispatch(&root, &Event::new("click", &leaf));
        assert_eq!(*order.borrow(), ["leaf", "mid", "root"]);
    }

    #[test]
    fn test_dispatch_same_level_registration_order() {
        let registry = EventRegistry::new();
        let (root, _, leaf) = tree();

        let order = Rc::new(RefCell::new(Vec::new()));
        for n in [1, 2, 3] {
            let order = order.clone();
            registry.add_event(&leaf, "click", EventHandler::new(move |_| order.borrow_mut().push(n)));
        }
        registry.install(&root);

        registry.dispatch(&root, &Event::new("click", &leaf));
        assert_eq!(*order.borrow(), [1, 2, 3]);
    }

    #[test]
    fn test_dispatch_filters_event_type() {
        let registry = EventRegistry::new();
        let (root, _, leaf) = tree();

        let fired = Rc::new(RefCell::new(0));
        let count = fired.clone();
        registry.add_event(&leaf, "keydown", EventHandler::new(move |_| *count.borrow_mut() += 1));
        registry.install(&root);

        registry.dispatch(&root, &Event::new("click", &leaf));
        assert_eq!(*fired.borrow(), 0);

        registry.dispatch(&root, &Event::new("keydown", &leaf));
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_dispatch_requires_install() {
        let registry = EventRegistry::new();
        let (root, _, leaf) = tree();

        let fired = Rc::new(RefCell::new(0));
        let count = fired.clone();
        registry.add_event(&leaf, "click", EventHandler::new(move |_| *count.borrow_mut() += 1));

        // No install yet: the native listener does not exist.
        registry.dispatch(&root, &Event::new("click", &leaf));
        assert_eq!(*fired.borrow(), 0);

        registry.install(&root);
        registry.install(&root); // idempotent
        assert!(registry.is_installed(&root, "click"));

        registry.dispatch(&root, &Event::new("click", &leaf));
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_dispatch_ignores_foreign_target() {
        let registry = EventRegistry::new();
        let (root, _, _) = tree();
        let stranger = DomNode::element("button");

        let fired = Rc::new(RefCell::new(0));
        let count = fired.clone();
        registry.add_event(&stranger, "click", EventHandler::new(move |_| *count.borrow_mut() += 1));
        registry.install(&root);

        registry.dispatch(&root, &Event::new("click", &stranger));
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_handler_may_mutate_registrations_mid_dispatch() {
        let registry = EventRegistry::new();
        let (root, mid, leaf) = tree();

        let fired = Rc::new(RefCell::new(Vec::new()));
        {
            let registry2 = registry.clone();
            let mid2 = mid.clone();
            let fired = fired.clone();
            let removed_late: Rc<RefCell<Option<EventHandler>>> = Rc::new(RefCell::new(None));
            let slot = removed_late.clone();
            let late_fired = Rc::new(RefCell::new(false));
            let late_flag = late_fired.clone();
            let late = EventHandler::new(move |_| *late_flag.borrow_mut() = true);
            *slot.borrow_mut() = Some(late.clone());
            registry.add_event(&mid, "click", late);

            let fired_leaf = fired.clone();
            registry.add_event(
                &leaf,
                "click",
                EventHandler::new(move |_| {
                    fired_leaf.borrow_mut().push("leaf");
                    // Deregister the ancestor's handler while dispatch is walking.
                    let handler = removed_late.borrow().clone().unwrap();
                    registry2.remove_event(&mid2, "click", &handler);
                }),
            );
            registry.install(&root);
            registry.dispatch(&root, &Event::new("click", &leaf));

            assert_eq!(*fired.borrow(), ["leaf"]);
            // Removed before its level was snapshotted: it never fires.
            assert!(!*late_fired.borrow());
        }
    }

    #[test]
    fn test_detach_subtree_evicts_entries() {
        let registry = EventRegistry::new();
        let (root, mid, leaf) = tree();

        registry.add_event(&mid, "click", EventHandler::new(|_| {}));
        registry.add_event(&leaf, "click", EventHandler::new(|_| {}));
        registry.detach_subtree(&mid);

        assert_eq!(registry.listener_count(&mid), 0);
        assert_eq!(registry.listener_count(&leaf), 0);
        let _ = root;
    }

    #[test]
    fn test_dead_element_never_counted() {
        let registry = EventRegistry::new();
        let el = DomNode::element("button");
        registry.add_event(&el, "click", EventHandler::new(|_| {}));

        let probe = el.clone();
        drop(el);
        assert_eq!(registry.listener_count(&probe), 1);
        drop(probe);
        // The weak entry is dead; a fresh node at any address starts clean.
        let fresh = DomNode::element("button");
        assert_eq!(registry.listener_count(&fresh), 0);
    }
}
