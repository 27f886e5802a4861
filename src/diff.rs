//! Positional tree diff.
//!
//! Converges the real tree under a parent toward a new virtual tree by
//! comparing it position-by-position against the previous virtual tree.
//! No keyed matching: children are aligned strictly by index, so
//! reordering degenerates to replacing the shifted tail.
//!
//! # Algorithm
//!
//! For the pair at one position, the first matching rule applies:
//!
//! 1. new absent, old present -> remove the real child at the index
//! 2. new present, old absent -> materialize and append
//! 3. both lists -> diff positionally against the same parent, offset by
//!    the index (list items splice into the parent, one slot each)
//! 4. old is a list, new is not -> clear the list's slot span, insert
//! 5. both text -> replace the real text node only if the values differ
//!    (`null` and `false` both normalize to empty text, so they compare
//!    equal here and cause no mutation)
//! 6. elements with the same tag -> reuse the real node: sync props,
//!    recurse over `0..max(n, o)` child positions, then drop surplus old
//!    children in descending index order
//! 7. anything else (tag changed, text vs element either way) ->
//!    materialize the new node and replace the real child
//!
//! Every removal or replacement detaches the doomed subtree from the
//! event registry before the real tree mutation.

use tracing::trace;

use crate::attr::sync_attributes;
use crate::dom::DomNode;
use crate::error::VdomResult;
use crate::events::EventRegistry;
use crate::materialize::materialize;
use crate::node::VNode;

/// Patch the real child of `parent` at `index` from `old` toward `new`.
///
/// Both virtual nodes are expected to be normalized (see
/// [`normalize`](crate::normalize::normalize)); `None` marks an absent
/// side. The registry receives every handler registration change implied
/// by prop syncing and every eviction implied by subtree removal.
pub fn patch(
    parent: &DomNode,
    new: Option<&VNode>,
    old: Option<&VNode>,
    index: usize,
    registry: &EventRegistry,
) -> VdomResult<()> {
    match (new, old) {
        (None, None) => Ok(()),
        (None, Some(_)) => {
            remove_at(parent, index, registry);
            Ok(())
        }
        (Some(new), None) => {
            let real = materialize(new, registry)?;
            parent.append_child(&real);
            Ok(())
        }
        (Some(new), Some(old)) => patch_existing(parent, new, old, index, registry),
    }
}

fn patch_existing(
    parent: &DomNode,
    new: &VNode,
    old: &VNode,
    index: usize,
    registry: &EventRegistry,
) -> VdomResult<()> {
    match (new, old) {
        // Both sequences: items occupy one parent slot each, so diff them
        // against the same parent at an offset.
        (VNode::List(new_items), VNode::List(old_items)) => {
            let max_len = new_items.len().max(old_items.len());
            for i in 0..max_len {
                patch(parent, new_items.get(i), old_items.get(i), index + i, registry)?;
            }
            if old_items.len() > new_items.len() {
                for i in (new_items.len()..old_items.len()).rev() {
                    remove_at(parent, index + i, registry);
                }
            }
            Ok(())
        }

        // The old sequence spans several slots; clear them all before the
        // replacement goes in.
        (_, VNode::List(old_items)) => {
            for i in (0..old_items.len()).rev() {
                remove_at(parent, index + i, registry);
            }
            let real = materialize(new, registry)?;
            parent.insert_child_at(index, &real);
            Ok(())
        }

        (VNode::Text(new_text), VNode::Text(old_text)) => {
            if new_text != old_text {
                trace!(index, "text updated");
                replace_at(parent, index, DomNode::text(new_text.clone()), registry);
            }
            Ok(())
        }

        (VNode::Element(new_el), VNode::Element(old_el)) if new_el.kind == old_el.kind => {
            // Same tag: the real node is reused, only its state converges.
            let Some(child) = parent.child_at(index) else {
                return Ok(());
            };
            sync_attributes(&child, Some(&new_el.props), Some(&old_el.props), registry);

            let new_children = &new_el.children;
            let old_children = &old_el.children;
            let max_len = new_children.len().max(old_children.len());
            for i in 0..max_len {
                patch(&child, new_children.get(i), old_children.get(i), i, registry)?;
            }
            // Surplus old children go in descending index order so lower
            // indices stay stable during the removal loop.
            if old_children.len() > new_children.len() {
                for i in (new_children.len()..old_children.len()).rev() {
                    remove_at(&child, i, registry);
                }
            }
            Ok(())
        }

        // Tag changed, or the category flipped between text and element:
        // rebuild the slot wholesale.
        _ => {
            trace!(index, "child replaced");
            let real = materialize(new, registry)?;
            replace_at(parent, index, real, registry);
            Ok(())
        }
    }
}

/// Remove the real child at `index`, evicting its registry entries first.
fn remove_at(parent: &DomNode, index: usize, registry: &EventRegistry) {
    if let Some(child) = parent.child_at(index) {
        registry.detach_subtree(&child);
        parent.remove_child_at(index);
        trace!(index, "child removed");
    }
}

/// Put `new_child` at `index`, evicting and replacing whatever real child
/// sits there, or appending when the position is past the end.
fn replace_at(parent: &DomNode, index: usize, new_child: DomNode, registry: &EventRegistry) {
    if let Some(old_child) = parent.child_at(index) {
        registry.detach_subtree(&old_child);
        parent.replace_child_at(index, &new_child);
    } else {
        parent.append_child(&new_child);
    }
}

// =============================================================================
// Tests
// =============================================================================
