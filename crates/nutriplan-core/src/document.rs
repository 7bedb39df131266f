//! Page document - the layout output consumed by writers.

use crate::{DietPlan, Node, Resource, ResourceId, ResourceMap};

/// A rendered document: a root node whose children are pages, plus the
/// images those pages reference.
#[derive(Debug, Clone)]
pub struct Document {
    /// Root node; its children are the pages in print order.
    pub content: Node,
    /// Embedded images.
    pub resources: ResourceMap,
    /// The plan this document was laid out from, if any.
    pub plan: Option<DietPlan>,
}

/// Which kind of page a page node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Client photo comparison page.
    BeforeAfter,
    /// General notes page.
    Notes,
    /// Meals and macro summary page.
    Diet,
}

impl PageKind {
    /// Property key under which page nodes store their kind.
    pub const PROP: &'static str = "page_kind";

    /// Identifier stored on the page node.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::BeforeAfter => "before_after",
            PageKind::Notes => "notes",
            PageKind::Diet => "diet",
        }
    }

    /// CSS class added next to `page`.
    pub fn css_class(&self) -> &'static str {
        match self {
            PageKind::BeforeAfter => "ba-page",
            PageKind::Notes => "notes-page",
            PageKind::Diet => "diet-page",
        }
    }

    /// Parse the identifier stored on a page node.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "before_after" => Some(PageKind::BeforeAfter),
            "notes" => Some(PageKind::Notes),
            "diet" => Some(PageKind::Diet),
            _ => None,
        }
    }

    /// Page kind of a node, if it is a page.
    pub fn of(node: &Node) -> Option<Self> {
        node.props.get_str(Self::PROP).and_then(Self::parse)
    }
}

/// One page rendered to markup, ready for rasterizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub kind: PageKind,
    pub html: String,
}

impl RenderedPage {
    /// Create a rendered page.
    pub fn new(kind: PageKind, html: impl Into<String>) -> Self {
        Self {
            kind,
            html: html.into(),
        }
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            content: Node::new("document"),
            resources: ResourceMap::new(),
            plan: None,
        }
    }

    /// Set the root node.
    pub fn with_content(mut self, content: Node) -> Self {
        self.content = content;
        self
    }

    /// Attach the source plan.
    pub fn with_plan(mut self, plan: DietPlan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Pages in print order.
    pub fn pages(&self) -> impl Iterator<Item = (PageKind, &Node)> {
        self.content
            .children
            .iter()
            .filter_map(|n| PageKind::of(n).map(|k| (k, n)))
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages().count()
    }

    /// Embed a resource and return its ID.
    ///
    /// IDs are assigned sequentially per document.
    pub fn embed(&mut self, resource: Resource) -> ResourceId {
        let id = ResourceId::from_string(format!("res_{}", self.resources.len()));
        self.resources.insert(id.clone(), resource);
        id
    }

    /// Get a resource by ID.
    pub fn resource(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.get(id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_skip_non_page_children() {
        let doc = Document::new().with_content(
            Node::new("document")
                .child(Node::new("page").prop(PageKind::PROP, "notes"))
                .child(Node::new("div"))
                .child(Node::new("page").prop(PageKind::PROP, "diet")),
        );
        let kinds: Vec<_> = doc.pages().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![PageKind::Notes, PageKind::Diet]);
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_embed_assigns_sequential_ids() {
        let mut doc = Document::new();
        let a = doc.embed(Resource::jpeg(vec![0xFF, 0xD8]));
        let b = doc.embed(Resource::png(vec![0x89]));
        assert_eq!(a.as_str(), "res_0");
        assert_eq!(b.as_str(), "res_1");
        assert_eq!(doc.resource(&b).map(|r| r.mime_type.as_str()), Some("image/png"));
    }
}
