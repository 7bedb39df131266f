//! Page layout for nutriplan.
//!
//! This crate provides the node vocabulary the writers understand and the
//! [`layout`] step that turns a [`DietPlan`] into printable pages.
//! It re-exports `nutriplan-core` so users only need one import.

pub use nutriplan_core::*;

pub mod builder;
mod render;

pub use render::{BeforeAfter, LayoutOptions, labels, layout};

/// Node kind constants.
pub mod node {
    /// Root document container; its children are pages.
    pub const DOCUMENT: &str = "document";
    /// One printable page (use `page_kind` property).
    pub const PAGE: &str = "page";
    /// A generic block container.
    pub const DIV: &str = "div";
    /// A heading (use `level` property for h1-h6).
    pub const HEADING: &str = "heading";
    /// A paragraph of text.
    pub const PARAGRAPH: &str = "paragraph";
    /// An inline container.
    pub const SPAN: &str = "span";
    /// Plain text content (use `content` property).
    pub const TEXT: &str = "text";
    /// A hard line break.
    pub const LINE_BREAK: &str = "line_break";
    /// An embedded image (use `resource` property).
    pub const IMAGE: &str = "image";
}

/// Property key constants.
pub mod prop {
    /// Heading level (1-6).
    pub const LEVEL: &str = "level";
    /// Text content.
    pub const CONTENT: &str = "content";
    /// Space-separated CSS classes.
    pub const CLASSES: &str = "classes";
    /// Embedded resource ID.
    pub const RESOURCE_ID: &str = "resource";
    /// Alt text for images.
    pub const ALT: &str = "alt";
    /// Page kind of a page node.
    pub const PAGE_KIND: &str = crate::PageKind::PROP;
}

/// Helper functions for creating common nodes.
pub mod helpers {
    use crate::{Node, PageKind, ResourceId, node, prop};

    /// Create a text node with the given content.
    pub fn text(content: impl Into<String>) -> Node {
        Node::new(node::TEXT).prop(prop::CONTENT, content.into())
    }

    /// Create a hard line break.
    pub fn line_break() -> Node {
        Node::new(node::LINE_BREAK)
    }

    /// Text nodes for each line, separated by line breaks.
    pub fn lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Node> {
        let mut out = Vec::new();
        for line in lines {
            if !out.is_empty() {
                out.push(line_break());
            }
            out.push(text(line));
        }
        out
    }

    /// Create a heading with the given level and children.
    pub fn heading(level: i64, children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::HEADING)
            .prop(prop::LEVEL, level)
            .children(children)
    }

    /// Create a paragraph with children.
    pub fn paragraph(children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::PARAGRAPH).children(children)
    }

    /// Create a classed block container.
    pub fn div(classes: &str, children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::DIV)
            .prop(prop::CLASSES, classes)
            .children(children)
    }

    /// Create a classed inline container holding text.
    pub fn span(classes: &str, content: impl Into<String>) -> Node {
        Node::new(node::SPAN)
            .prop(prop::CLASSES, classes)
            .child(text(content))
    }

    /// Create an image referencing an embedded resource.
    pub fn image(resource: &ResourceId, alt: impl Into<String>) -> Node {
        Node::new(node::IMAGE)
            .prop(prop::RESOURCE_ID, resource.as_str())
            .prop(prop::ALT, alt.into())
    }

    /// Create a page of the given kind.
    pub fn page(kind: PageKind, children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::PAGE)
            .prop(prop::PAGE_KIND, kind.as_str())
            .children(children)
    }

    /// Create a document root.
    pub fn document(children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(node::DOCUMENT).children(children)
    }
}
