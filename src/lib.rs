//! ripple-vdom - Minimal virtual DOM with positional diffing and delegated events
//!
//! ## Core Concepts
//!
//! **Normalize, then converge**: raw virtual trees (primitives, lists,
//! components) are canonicalized once, then either materialized wholesale
//! (first render) or positionally diffed against the previous tree so only
//! the changed parts of the real tree are touched.
//!
//! **Delegated events**: handlers never attach to individual nodes. One
//! conceptual native listener per event type sits at the render root; a
//! registry keyed by element identity dispatches along the ancestor chain,
//! and handler identity (`Rc` pointer equality) keeps registrations
//! correct as props change across renders.
//!
//! ## Modules
//! - `node`: virtual tree types (`VNode`, `VElement`, `Component`)
//! - `attr`: prop bags and the attribute synchronizer
//! - `normalize`: canonicalization pass
//! - `dom`: headless host tree (`DomNode`)
//! - `events`: delegation registry and dispatch
//! - `materialize`: virtual -> real subtree construction
//! - `diff`: positional patch algorithm
//! - `render`: render entry point with per-container previous trees
//! - `serialize`: host tree -> HTML string
//!
//! ## Usage
//!
//! ```ignore
//! use ripple_vdom::prelude::*;
//!
//! let renderer = Renderer::new();
//! let container = DomNode::element("root");
//!
//! let view = VElement::new("div")
//!     .class("counter")
//!     .child(VElement::new("button")
//!         .text("+1")
//!         .on("click", EventHandler::new(|_| { /* ... */ })));
//!
//! renderer.render(view, &container)?;
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Virtual tree types: VNode, VElement, Component
pub mod node;

/// Prop system and attribute synchronizer
pub mod attr;

/// Normalization pass
pub mod normalize;

/// Headless host tree
pub mod dom;

/// Event delegation registry and dispatch
pub mod events;

/// Materialization of virtual nodes into real subtrees
pub mod materialize;

/// Positional diff/patch algorithm
pub mod diff;

/// Render entry point
pub mod render;

/// HTML serialization of the host tree
pub mod serialize;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Children, Component, ElementKind, VElement, VNode};

// Props
pub use attr::{PropValue, Props, PropsExt, StyleMap, sync_attributes};

// Host tree
pub use dom::{DomNode, WeakDomNode};

// Events
pub use events::{Event, EventHandler, EventRegistry};

// Core operations
pub use diff::patch;
pub use materialize::materialize;
pub use normalize::normalize;
pub use render::Renderer;

// Serialization
pub use serialize::{inner_html, outer_html};

// Error types
pub use error::{VdomError, VdomResult};

// =============================================================================
// Tests
// =============================================================================
