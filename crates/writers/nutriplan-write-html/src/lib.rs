//! HTML writer for nutriplan.
//!
//! Emits laid-out pages as HTML: a fragment with every page, a complete
//! print document with the A4 stylesheet, or one [`RenderedPage`] per page
//! for rasterizing. Embedded images become `data:` URIs.

mod style;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use nutriplan_core::{
    ConversionResult, Document, EmitError, EmitOptions, Emitter, FidelityWarning, Node, PageKind,
    RenderedPage, ResourceId, Severity, WarningKind,
};
use nutriplan_layout::{node, prop};

pub use style::DEFAULT_STYLESHEET;

/// Emit every page as one HTML fragment.
pub fn emit(doc: &Document) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    emit_with_options(doc, &EmitOptions::default())
}

/// Emit with custom options. `full_document` wraps the pages in a complete
/// print document.
pub fn emit_with_options(
    doc: &Document,
    options: &EmitOptions,
) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    if options.full_document {
        return emit_full_document(doc, options);
    }

    let mut ctx = EmitContext::new(doc, options);
    emit_nodes(&doc.content.children, &mut ctx);

    Ok(ConversionResult::with_warnings(
        ctx.output.into_bytes(),
        ctx.warnings,
    ))
}

/// Emit a complete right-to-left HTML document with the print stylesheet.
pub fn emit_full_document(
    doc: &Document,
    options: &EmitOptions,
) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    let mut ctx = EmitContext::new(doc, options);

    write_head(&mut ctx);
    emit_nodes(&doc.content.children, &mut ctx);
    write_tail(&mut ctx);

    Ok(ConversionResult::with_warnings(
        ctx.output.into_bytes(),
        ctx.warnings,
    ))
}

/// Emit each page separately, in print order.
///
/// With `full_document` each page is a standalone document carrying the
/// stylesheet, which is what a rasterizer needs.
pub fn emit_pages(
    doc: &Document,
    options: &EmitOptions,
) -> Result<ConversionResult<Vec<RenderedPage>>, EmitError> {
    let mut pages = Vec::new();
    let mut warnings = Vec::new();

    for (kind, page) in doc.pages() {
        let mut ctx = EmitContext::new(doc, options);
        if options.full_document {
            write_head(&mut ctx);
        }
        emit_node(page, &mut ctx);
        if options.full_document {
            write_tail(&mut ctx);
        }
        pages.push(RenderedPage::new(kind, ctx.output));
        warnings.extend(ctx.warnings);
    }

    Ok(ConversionResult::with_warnings(pages, warnings))
}

/// [`Emitter`] for the `html` format.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlWriter;

impl Emitter for HtmlWriter {
    fn formats(&self) -> &[&str] {
        &["html"]
    }

    fn emit(
        &self,
        doc: &Document,
        options: &EmitOptions,
    ) -> Result<ConversionResult<Vec<u8>>, EmitError> {
        emit_with_options(doc, options)
    }
}

/// Emit context for tracking state during emission.
struct EmitContext<'a> {
    doc: &'a Document,
    options: &'a EmitOptions,
    output: String,
    warnings: Vec<FidelityWarning>,
}

impl<'a> EmitContext<'a> {
    fn new(doc: &'a Document, options: &'a EmitOptions) -> Self {
        Self {
            doc,
            options,
            output: String::new(),
            warnings: Vec::new(),
        }
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.output.push('\n');
        }
    }
}

fn write_head(ctx: &mut EmitContext) {
    ctx.write("<!DOCTYPE html>\n<html lang=\"ar\" dir=\"rtl\">\n<head>\n<meta charset=\"utf-8\">\n");
    ctx.write("<title>Nutrition Plan</title>\n<style>\n");
    let css = ctx
        .options
        .stylesheet
        .as_deref()
        .unwrap_or(DEFAULT_STYLESHEET);
    ctx.write(&escape_style(css));
    if let Some(background) = ctx.options.background.as_deref() {
        ctx.write("\n.page { background-image: url(\"");
        ctx.write(&escape_css_string(background));
        ctx.write("\") !important; }\n");
    }
    ctx.write("</style>\n</head>\n<body>\n");
}

fn write_tail(ctx: &mut EmitContext) {
    ctx.write("\n</body>\n</html>\n");
}

/// Emit a sequence of nodes.
fn emit_nodes(nodes: &[Node], ctx: &mut EmitContext) {
    for node in nodes {
        emit_node(node, ctx);
    }
}

/// Emit a single node.
fn emit_node(node: &Node, ctx: &mut EmitContext) {
    match node.kind.as_str() {
        node::DOCUMENT => emit_nodes(&node.children, ctx),
        node::PAGE => emit_page(node, ctx),
        node::DIV => emit_tag("div", node, ctx),
        node::HEADING => emit_heading(node, ctx),
        node::PARAGRAPH => emit_tag("p", node, ctx),
        node::SPAN => emit_tag("span", node, ctx),
        node::TEXT => emit_text(node, ctx),
        node::LINE_BREAK => ctx.write("<br>"),
        node::IMAGE => emit_image(node, ctx),
        _ => {
            ctx.warnings.push(FidelityWarning::new(
                Severity::Minor,
                WarningKind::UnsupportedNode(node.kind.as_str().to_string()),
                format!("Unknown node type: {}", node.kind.as_str()),
            ));
            // Try to emit children
            emit_nodes(&node.children, ctx);
        }
    }
}

/// Emit a simple tag with children.
fn emit_tag(tag: &str, node: &Node, ctx: &mut EmitContext) {
    ctx.write("<");
    ctx.write(tag);
    emit_class_attr(node, ctx);
    ctx.write(">");
    emit_nodes(&node.children, ctx);
    ctx.write("</");
    ctx.write(tag);
    ctx.write(">");
}

fn emit_class_attr(node: &Node, ctx: &mut EmitContext) {
    if let Some(classes) = node.props.get_str(prop::CLASSES) {
        ctx.write(" class=\"");
        ctx.write(&escape_attr(classes));
        ctx.write("\"");
    }
}

/// Emit a page container: `<div class="page notes-page">`.
fn emit_page(node: &Node, ctx: &mut EmitContext) {
    ctx.write("<div class=\"page");
    if let Some(kind) = PageKind::of(node) {
        ctx.write(" ");
        ctx.write(kind.css_class());
    }
    ctx.write("\">");
    emit_nodes(&node.children, ctx);
    ctx.write("</div>");
    ctx.newline();
}

/// Emit a heading element.
fn emit_heading(node: &Node, ctx: &mut EmitContext) {
    let level = node.props.get_int(prop::LEVEL).unwrap_or(1);
    let tag = match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    };
    emit_tag(tag, node, ctx);
}

/// Emit text content.
fn emit_text(node: &Node, ctx: &mut EmitContext) {
    if let Some(content) = node.props.get_str(prop::CONTENT) {
        ctx.write(&escape_html(content));
    }
}

/// Emit an embedded image as a `data:` URI.
fn emit_image(node: &Node, ctx: &mut EmitContext) {
    let Some(id) = node.props.get_str(prop::RESOURCE_ID) else {
        return;
    };
    let Some(resource) = ctx.doc.resource(&ResourceId::from_string(id)) else {
        ctx.warnings.push(FidelityWarning::new(
            Severity::Minor,
            WarningKind::MissingResource(id.to_string()),
            format!("image references missing resource {id}"),
        ));
        return;
    };

    let uri = format!(
        "data:{};base64,{}",
        resource.mime_type,
        STANDARD.encode(&resource.data)
    );
    ctx.write("<img src=\"");
    ctx.write(&escape_attr(&uri));
    ctx.write("\"");
    if let Some(alt) = node.props.get_str(prop::ALT) {
        ctx.write(" alt=\"");
        ctx.write(&escape_attr(alt));
        ctx.write("\"");
    }
    ctx.write(">");
}

/// Escape HTML special characters in text content.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape HTML special characters in attribute values.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Keep a stylesheet from closing its `<style>` element.
fn escape_style(css: &str) -> String {
    css.replace("</", "<\\/")
}

/// Escape a value for a double-quoted CSS string.
fn escape_css_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '<' => result.push_str("\\3C "),
            '\n' | '\r' => {}
            _ => result.push(c),
        }
    }
    result
}
