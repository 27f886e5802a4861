//! Component type - callable nodes resolved during normalization
//!
//! A component is a function from (props, children) to a virtual tree.
//! The normalizer invokes it and recurses into the result; the
//! materializer and differ never see one.

use std::fmt;
use std::rc::Rc;

use super::VNode;
use crate::attr::Props;

/// A function component: invoked with the element's props and children,
/// returns the virtual tree to render in its place.
#[derive(Clone)]
pub struct Component {
    name: Option<&'static str>,
    render: Rc<dyn Fn(&Props, &[VNode]) -> VNode>,
}

impl Component {
    /// Create an anonymous component.
    pub fn new(render: impl Fn(&Props, &[VNode]) -> VNode + 'static) -> Self {
        Self { name: None, render: Rc::new(render) }
    }

    /// Create a named component (the name shows up in Debug output and errors).
    pub fn named(name: &'static str, render: impl Fn(&Props, &[VNode]) -> VNode + 'static) -> Self {
        Self { name: Some(name), render: Rc::new(render) }
    }

    /// Component name, or a placeholder for anonymous components.
    pub fn name(&self) -> &'static str {
        self.name.unwrap_or("<anonymous>")
    }

    /// Invoke the component function.
    pub fn render(&self, props: &Props, children: &[VNode]) -> VNode {
        (self.render)(props, children)
    }

    /// Identity comparison: two handles to the same component function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.render, &other.render)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component").field("name", &self.name()).finish_non_exhaustive()
    }
}

/// Components compare by identity, matching the reference-equality
/// semantics of callable values.
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}
