//! Normalization: canonicalize a virtual tree for diffing.
//!
//! After this pass the tree contains only text, lists, and tag elements:
//! null and boolean primitives collapse to the empty-text marker (which is
//! why `null` and `false` at the same position compare equal during a
//! diff), and components are invoked and replaced by their normalized
//! output. The materializer and differ only ever see normalized trees.

use crate::node::{ElementKind, VElement, VNode};

/// Normalize a virtual node.
///
/// Pure apart from running user component functions; errors or panics
/// they raise propagate to the caller unmodified. Idempotent: normalizing
/// an already-normalized tree returns an identical tree.
pub fn normalize(node: VNode) -> VNode {
    match node {
        VNode::Null | VNode::Bool(_) => VNode::Text(String::new()),
        text @ VNode::Text(_) => text,
        VNode::List(items) => VNode::List(items.into_iter().map(normalize).collect()),
        VNode::Element(element) => {
            let VElement { kind, props, children } = *element;
            match kind {
                ElementKind::Component(component) => {
                    let rendered = component.render(&props, &children);
                    normalize(rendered)
                }
                ElementKind::Tag(tag) => {
                    let children = children.into_iter().map(normalize).collect();
                    VNode::Element(Box::new(VElement { kind: ElementKind::Tag(tag), props, children }))
                }
            }
        }
    }
}
