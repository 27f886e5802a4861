//! Materialization: build a real subtree from a virtual node.
//!
//! The unconditional path - first render, or anywhere the differ decides a
//! stale subtree must be replaced wholesale. Raw primitives and lists are
//! tolerated (they collapse the same way the normalizer collapses them),
//! but an unresolved component is a contract violation: resolving
//! components is the normalizer's job.

use tracing::trace;

use crate::attr::sync_attributes;
use crate::dom::DomNode;
use crate::error::{VdomError, VdomResult};
use crate::events::EventRegistry;
use crate::node::{ElementKind, VNode};

/// Build the real subtree for a virtual node.
///
/// Props are applied through the attribute synchronizer with an empty old
/// bag, so handler props register themselves in `registry` as a side
/// effect of creation.
pub fn materialize(node: &VNode, registry: &EventRegistry) -> VdomResult<DomNode> {
    match node {
        VNode::Null | VNode::Bool(_) => Ok(DomNode::text("")),
        VNode::Text(content) => Ok(DomNode::text(content.clone())),
        VNode::List(items) => {
            let fragment = DomNode::fragment();
            for item in items {
                let child = materialize(item, registry)?;
                fragment.append_child(&child);
            }
            Ok(fragment)
        }
        VNode::Element(element) => match &element.kind {
            ElementKind::Component(component) => Err(VdomError::unsupported(format!(
                "component `{}` must be resolved by normalize before materialization",
                component.name()
            ))),
            ElementKind::Tag(tag) => {
                trace!(tag = %tag, "materializing element");
                let node = DomNode::element(tag.clone());
                sync_attributes(&node, Some(&element.props), None, registry);
                for child in &element.children {
                    let real_child = materialize(child, registry)?;
                    node.append_child(&real_child);
                }
                Ok(node)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventHandler;
    use crate::node::{Component, VElement};

    #[test]
    fn test_empty_values_become_empty_text() {
        let registry = EventRegistry::new();
        for node in [VNode::Null, VNode::Bool(true), VNode::Bool(false)] {
            let real = materialize(&node, &registry).unwrap();
            assert!(real.is_text());
            assert_eq!(real.as_text().as_deref(), Some(""));
        }
    }

    #[test]
    fn test_text_node() {
        let registry = EventRegistry::new();
        let real = materialize(&VNode::text("hello"), &registry).unwrap();
        assert_eq!(real.as_text().as_deref(), Some("hello"));
    }

    #[test]
    fn test_list_becomes_fragment() {
        let registry = EventRegistry::new();
        let node = VNode::List(vec![VNode::text("a"), VElement::new("b").into()]);
        let real = materialize(&node, &registry).unwrap();
        assert!(real.is_fragment());
        assert_eq!(real.child_count(), 2);
        assert_eq!(real.child_at(1).unwrap().tag().as_deref(), Some("b"));
    }

    #[test]
    fn test_element_with_props_and_children() {
        let registry = EventRegistry::new();
        let node: VNode = VElement::new("div")
            .attr("id", "main")
            .class("box")
            .toggle("hidden", true)
            .child(VElement::new("span").text("Hi"))
            .into();

        let real = materialize(&node, &registry).unwrap();
        assert_eq!(real.tag().as_deref(), Some("div"));
        assert_eq!(real.attr("id").as_deref(), Some("main"));
        assert_eq!(real.attr("class").as_deref(), Some("box"));
        assert_eq!(real.bool_prop("hidden"), Some(true));

        let span = real.first_child().unwrap();
        assert_eq!(span.tag().as_deref(), Some("span"));
        assert_eq!(span.text_content(), "Hi");
        assert!(span.parent().unwrap().same_node(&real));
    }

    #[test]
    fn test_handler_props_register() {
        let registry = EventRegistry::new();
        let node: VNode = VElement::new("button").on("click", EventHandler::new(|_| {})).into();
        let real = materialize(&node, &registry).unwrap();
        assert_eq!(registry.listener_count(&real), 1);
    }

    #[test]
    fn test_unresolved_component_is_an_error() {
        let registry = EventRegistry::new();
        let node: VNode = VElement::component(Component::named("Late", |_, _| VNode::Null)).into();
        let err = materialize(&node, &registry).unwrap_err();
        assert!(matches!(err, VdomError::UnsupportedNode { .. }));
        assert!(err.to_string().contains("Late"));
    }
}
