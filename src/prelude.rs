//! Prelude module for common imports.
//!
//! ```ignore
//! use ripple_vdom::prelude::*;
//! ```

// Node types
pub use crate::node::{Children, Component, ElementKind, VElement, VNode};

// Props
pub use crate::attr::{PropValue, Props, PropsExt, StyleMap, sync_attributes};

// Host tree
pub use crate::dom::{DomNode, WeakDomNode};

// Events
pub use crate::events::{Event, EventHandler, EventRegistry};

// Core operations
pub use crate::diff::patch;
pub use crate::materialize::materialize;
pub use crate::normalize::normalize;
pub use crate::render::Renderer;

// Serialization
pub use crate::serialize::{inner_html, outer_html};

// Error
pub use crate::error::{VdomError, VdomResult};
