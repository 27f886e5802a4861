//! Render entry point.
//!
//! One render pass: normalize the tree, materialize on first render or
//! diff against the previous tree otherwise, persist the new tree as
//! "previous" for that container, then make sure every known event type
//! has its native listener installed on the container.
//!
//! Previous-tree state is owned per render root - a map from container
//! identity to its last normalized tree - so independent roots never
//! clobber each other. `render` takes `&self`: a delegated handler may
//! re-enter the renderer while a dispatch walk is in progress.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::diff::patch;
use crate::dom::DomNode;
use crate::error::VdomResult;
use crate::events::{Event, EventRegistry};
use crate::materialize::materialize;
use crate::node::VNode;
use crate::normalize::normalize;

/// Last rendered tree for one container. Holding the container keeps its
/// identity stable for the lifetime of the entry.
struct RootState {
    container: DomNode,
    tree: VNode,
}

/// Orchestrates render passes and owns the per-container previous trees.
#[derive(Default)]
pub struct Renderer {
    registry: EventRegistry,
    previous: RefCell<FxHashMap<usize, RootState>>,
}

impl Renderer {
    /// Create a renderer with a fresh event registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer sharing an existing registry.
    pub fn with_registry(registry: EventRegistry) -> Self {
        Self { registry, previous: RefCell::new(FxHashMap::default()) }
    }

    /// The delegation registry, for direct `add_event`/`remove_event` use.
    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    /// Render a virtual tree into a container.
    pub fn render(&self, vnode: impl Into<VNode>, container: &DomNode) -> VdomResult<()> {
        let new_tree = normalize(vnode.into());

        if container.has_children() {
            let old_tree = self.previous.borrow().get(&container.node_id()).and_then(|state| {
                state.container.same_node(container).then(|| state.tree.clone())
            });
            debug!(has_previous = old_tree.is_some(), "patching render root");
            patch(container, Some(&new_tree), old_tree.as_ref(), 0, &self.registry)?;
        } else {
            debug!("first render");
            let real = materialize(&new_tree, &self.registry)?;
            container.append_child(&real);
        }

        self.previous.borrow_mut().insert(
            container.node_id(),
            RootState { container: container.clone(), tree: new_tree },
        );
        self.registry.install(container);
        Ok(())
    }

    /// Deliver a native event through a container's root listener.
    pub fn dispatch(&self, container: &DomNode, event: &Event) {
        self.registry.dispatch(container, event);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::events::EventHandler;
    use crate::node::{Component, VElement};
    use crate::serialize::outer_html;

    #[test]
    fn test_first_render_materializes() {
        let renderer = Renderer::new();
        let container = DomNode::element("root");

        renderer
            .render(VElement::new("div").text("hello"), &container)
            .unwrap();

        assert_eq!(container.child_count(), 1);
        assert_eq!(container.text_content(), "hello");
    }

    #[test]
    fn test_second_render_patches_in_place() {
        let renderer = Renderer::new();
        let container = DomNode::element("root");

        renderer
            .render(VElement::new("div").child(VElement::new("span").text("A")), &container)
            .unwrap();
        let div = container.first_child().unwrap();
        let span = div.first_child().unwrap();

        renderer
            .render(
                VElement::new("div")
                    .child(VElement::new("span").text("B"))
                    .child(VElement::new("p").text("C")),
                &container,
            )
            .unwrap();

        assert!(container.first_child().unwrap().same_node(&div));
        assert!(div.first_child().unwrap().same_node(&span));
        assert_eq!(span.text_content(), "B");
        assert_eq!(div.child_at(1).unwrap().text_content(), "C");
    }

    #[test]
    fn test_component_roots_resolve() {
        let renderer = Renderer::new();
        let container = DomNode::element("root");
        let greeter = Component::named("Greeter", |_, _| VElement::new("h1").text("hi").into());

        renderer.render(VElement::component(greeter), &container).unwrap();
        assert_eq!(container.first_child().unwrap().tag().as_deref(), Some("h1"));
    }

    #[test]
    fn test_independent_containers() {
        let renderer = Renderer::new();
        let left = DomNode::element("root");
        let right = DomNode::element("root");

        renderer.render(VElement::new("div").text("left"), &left).unwrap();
        renderer.render(VElement::new("div").text("right"), &right).unwrap();

        // Re-render left; right's previous tree must be unaffected.
        renderer.render(VElement::new("div").text("left2"), &left).unwrap();
        renderer.render(VElement::new("div").text("right"), &right).unwrap();

        assert_eq!(left.text_content(), "left2");
        assert_eq!(right.text_content(), "right");
        assert_eq!(right.child_count(), 1);
    }

    #[test]
    fn test_render_installs_listeners() {
        let renderer = Renderer::new();
        let container = DomNode::element("root");

        let clicks = Rc::new(RefCell::new(0));
        let count = clicks.clone();
        renderer
            .render(
                VElement::new("button")
                    .text("go")
                    .on("click", EventHandler::new(move |_| *count.borrow_mut() += 1)),
                &container,
            )
            .unwrap();

        let button = container.first_child().unwrap();
        renderer.dispatch(&container, &Event::new("click", &button));
        assert_eq!(*clicks.borrow(), 1);
    }

    #[test]
    fn test_handler_rerender_reuses_previous_tree() {
        let renderer = Renderer::new();
        let container = DomNode::element("root");

        let view = |label: &str| {
            VElement::new("div").child(VElement::new("button").text(label.to_string()))
        };

        renderer.render(view("first"), &container).unwrap();
        let div = container.first_child().unwrap();
        renderer.render(view("second"), &container).unwrap();

        // The div survived both passes: the previous tree was consulted.
        assert!(container.first_child().unwrap().same_node(&div));
        assert_eq!(container.text_content(), "second");
    }

    #[test]
    fn test_reentrant_render_during_dispatch() {
        let renderer = Rc::new(Renderer::new());
        let container = DomNode::element("root");
        let side = DomNode::element("root");

        let root_fired = Rc::new(RefCell::new(false));

        let side2 = side.clone();
        let renderer2 = renderer.clone();
        let tree = VElement::new("div")
            .child(
                VElement::new("button").text("go").on(
                    "click",
                    EventHandler::new(move |_| {
                        // Trigger a full render pass mid-dispatch.
                        renderer2
                            .render(VElement::new("aside").text("injected"), &side2)
                            .unwrap();
                    }),
                ),
            )
            .on("click", {
                let flag = root_fired.clone();
                EventHandler::new(move |_| *flag.borrow_mut() = true)
            });

        renderer.render(tree, &container).unwrap();
        let button = container.first_child().unwrap().first_child().unwrap();
        renderer.dispatch(&container, &Event::new("click", &button));

        // The nested render completed...
        assert_eq!(side.text_content(), "injected");
        // ...and the walk still reached the ancestor's handler.
        assert!(*root_fired.borrow());
    }

    #[test]
    fn test_rendered_output_matches_serialization() {
        let renderer = Renderer::new();
        let container = DomNode::element("root");
        renderer
            .render(
                VElement::new("div")
                    .class("wrap")
                    .child(VElement::new("img").attr("src", "a.png")),
                &container,
            )
            .unwrap();

        assert_eq!(
            outer_html(&container.first_child().unwrap()),
            r#"<div class="wrap"><img src="a.png" /></div>"#
        );
    }
}
