//! HTML serialization of the host tree.
//!
//! Renders real subtrees to HTML strings - the structural description
//! used by tests and debugging to compare trees. Text and attribute
//! values are escaped; void elements self-close; fragments render their
//! children only. Live boolean properties are not attributes and are
//! deliberately not serialized; the live style is reflected as a `style`
//! attribute when the element does not already carry one.

use crate::dom::DomNode;

/// Render a node and its subtree to HTML.
pub fn outer_html(node: &DomNode) -> String {
    let mut output = String::new();
    write_node(node, &mut output);
    output
}

/// Render only the children of a node to HTML.
pub fn inner_html(node: &DomNode) -> String {
    let mut output = String::new();
    for child in node.children() {
        write_node(&child, &mut output);
    }
    output
}

fn write_node(node: &DomNode, output: &mut String) {
    if let Some(content) = node.as_text() {
        output.push_str(&escape_html(&content));
        return;
    }
    if node.is_fragment() {
        for child in node.children() {
            write_node(&child, output);
        }
        return;
    }

    let tag = node.tag().unwrap_or_default();
    output.push('<');
    output.push_str(&tag);

    for (name, value) in node.attrs() {
        output.push(' ');
        output.push_str(&name);
        output.push_str("=\"");
        output.push_str(&escape_attr(&value));
        output.push('"');
    }

    let styles = node.styles();
    if !styles.is_empty() && !node.has_attr("style") {
        let css = styles
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        output.push_str(" style=\"");
        output.push_str(&escape_attr(&css));
        output.push('"');
    }

    if is_void_element(&tag) {
        output.push_str(" />");
        return;
    }

    output.push('>');
    for child in node.children() {
        write_node(&child, output);
    }
    output.push_str("</");
    output.push_str(&tag);
    output.push('>');
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Check if element is a void element (self-closing).
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

// =============================================================================
// Tests
// =============================================================================
