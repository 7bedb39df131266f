//! Closure-based page builders.
//!
//! # Example
//!
//! ```rust
//! use nutriplan_layout::PageKind;
//! use nutriplan_layout::builder::*;
//!
//! let notes = page(PageKind::Notes, |p| p
//!     .h1("ملاحظات عامة")
//!     .div("notes-content", |d| d.lines(["اشرب ماء", "نم جيدا"]))
//! );
//! ```

use crate::{Node, PageKind, ResourceId, helpers, node, prop};

/// Build a page of the given kind.
pub fn page<F>(kind: PageKind, f: F) -> Node
where
    F: FnOnce(BlockBuilder) -> BlockBuilder,
{
    helpers::page(kind, f(BlockBuilder::new()).children)
}

/// Builder for block content inside a page or container.
#[derive(Default)]
pub struct BlockBuilder {
    children: Vec<Node>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a level 1 heading.
    pub fn h1(self, content: impl Into<String>) -> Self {
        self.heading(1, "", content)
    }

    /// Add a heading with a level and optional classes.
    pub fn heading(mut self, level: i64, classes: &str, content: impl Into<String>) -> Self {
        let mut heading = helpers::heading(level, [helpers::text(content)]);
        if !classes.is_empty() {
            heading = heading.prop(prop::CLASSES, classes);
        }
        self.children.push(heading);
        self
    }

    /// Add a classed paragraph.
    pub fn para(mut self, classes: &str, content: impl Into<String>) -> Self {
        self.children.push(
            helpers::paragraph([helpers::text(content)]).prop(prop::CLASSES, classes),
        );
        self
    }

    /// Add a classed container.
    pub fn div<F>(mut self, classes: &str, f: F) -> Self
    where
        F: FnOnce(BlockBuilder) -> BlockBuilder,
    {
        let inner = f(BlockBuilder::new());
        self.children.push(helpers::div(classes, inner.children));
        self
    }

    /// Add a classed inline text container.
    pub fn span(mut self, classes: &str, content: impl Into<String>) -> Self {
        self.children.push(helpers::span(classes, content));
        self
    }

    /// Add plain text.
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(helpers::text(content));
        self
    }

    /// Add lines of text separated by line breaks.
    pub fn lines<'a>(mut self, lines: impl IntoIterator<Item = &'a str>) -> Self {
        self.children.extend(helpers::lines(lines));
        self
    }

    /// Add an embedded image.
    pub fn image(mut self, resource: &ResourceId, alt: impl Into<String>) -> Self {
        self.children.push(helpers::image(resource, alt));
        self
    }

    /// Add an already built node.
    pub fn node(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Apply `f` only when `cond` holds.
    pub fn when<F>(self, cond: bool, f: F) -> Self
    where
        F: FnOnce(BlockBuilder) -> BlockBuilder,
    {
        if cond { f(self) } else { self }
    }

    /// Build into a classed container node.
    pub fn build(self, classes: &str) -> Node {
        Node::new(node::DIV)
            .prop(prop::CLASSES, classes)
            .children(self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_page() {
        let p = page(PageKind::Notes, |p| {
            p.h1("title").div("notes-content", |d| d.lines(["a", "b"]))
        });

        assert_eq!(p.kind.as_str(), node::PAGE);
        assert_eq!(p.children.len(), 2);
        assert_eq!(p.children[0].kind.as_str(), node::HEADING);
        assert_eq!(p.children[0].props.get_int(prop::LEVEL), Some(1));
        assert_eq!(p.children[0].props.get_str(prop::CLASSES), None);
        assert_eq!(p.children[1].props.get_str(prop::CLASSES), Some("notes-content"));
        assert_eq!(p.children[1].children.len(), 3);
    }

    #[test]
    fn test_when() {
        let p = page(PageKind::Diet, |p| p.when(false, |p| p.text("x")).when(true, |p| p.text("y")));
        assert_eq!(p.children.len(), 1);
        assert_eq!(p.children[0].props.get_str(prop::CONTENT), Some("y"));
    }

    #[test]
    fn test_build_container() {
        let card = BlockBuilder::new().heading(4, "", "t").text("c").build("meal-card");
        assert_eq!(card.props.get_str(prop::CLASSES), Some("meal-card"));
        assert_eq!(card.children.len(), 2);
    }
}
