//! Plain text writer for nutriplan.
//!
//! Emits laid-out pages as plain text for terminal previews, stripping all
//! styling but preserving structure through whitespace.

use nutriplan_core::{ConversionResult, Document, EmitError, EmitOptions, Emitter, Node, PageKind};
use nutriplan_layout::{node, prop};

/// Emit a document as plain text.
pub fn emit(doc: &Document) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    emit_with_options(doc, &EmitOptions::default())
}

/// Emit a document as plain text with custom options.
pub fn emit_with_options(
    doc: &Document,
    _options: &EmitOptions,
) -> Result<ConversionResult<Vec<u8>>, EmitError> {
    let mut ctx = EmitContext::new();

    emit_nodes(&doc.content.children, &mut ctx);

    // Trim trailing whitespace and ensure single trailing newline
    let output = ctx.output.trim_end().to_string() + "\n";

    Ok(ConversionResult::ok(output.into_bytes()))
}

/// [`Emitter`] for the `text` format.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextWriter;

impl Emitter for PlaintextWriter {
    fn formats(&self) -> &[&str] {
        &["text", "plain"]
    }

    fn emit(
        &self,
        doc: &Document,
        options: &EmitOptions,
    ) -> Result<ConversionResult<Vec<u8>>, EmitError> {
        emit_with_options(doc, options)
    }
}

struct EmitContext {
    output: String,
    page: usize,
}

impl EmitContext {
    fn new() -> Self {
        Self {
            output: String::new(),
            page: 0,
        }
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn ensure_blank_line(&mut self) {
        if self.output.is_empty() {
            return;
        }
        let trimmed = self.output.trim_end_matches([' ', '\n']).len();
        self.output.truncate(trimmed);
        self.output.push_str("\n\n");
    }

    fn ensure_newline(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
    }

    fn at_line_start(&self) -> bool {
        self.output.is_empty() || self.output.ends_with('\n')
    }
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

        node::PAGE => {
            ctx.page += 1;
            ctx.ensure_blank_line();
            let kind = PageKind::of(node).map_or("page", |k| k.as_str());
            ctx.write(&format!("--- {} ({}) ---\n", ctx.page, kind));
            emit_nodes(&node.children, ctx);
        }

        node::HEADING => {
            ctx.ensure_blank_line();
            emit_nodes(&node.children, ctx);
            ctx.ensure_newline();
        }

        node::DIV | node::PARAGRAPH => {
            ctx.ensure_newline();
            emit_nodes(&node.children, ctx);
            ctx.ensure_newline();
        }

        node::SPAN => {
            if !ctx.at_line_start() {
                ctx.write(" ");
            }
            emit_nodes(&node.children, ctx);
        }

        node::TEXT => {
            if let Some(content) = node.props.get_str(prop::CONTENT) {
                ctx.write(content);
            }
        }

        node::LINE_BREAK => ctx.write("\n"),

        node::IMAGE => {
            let alt = node.props.get_str(prop::ALT).unwrap_or("image");
            ctx.write(&format!("[{alt}]"));
        }

        _ => emit_nodes(&node.children, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriplan_layout::{BeforeAfter, DietPlan, LayoutOptions, Resource, layout};
    use pretty_assertions::assert_eq;

    fn emit_str(doc: &Document) -> String {
        String::from_utf8(emit(doc).unwrap().value).unwrap()
    }

    #[test]
    fn test_diet_page_preview() {
        let plan = nutriplan_read_plan::parse("الإفطار بيض\nخبز\nسعرات 2000\nبروتين 180");
        let text = emit_str(&layout(&plan, &LayoutOptions::default()).value);

        assert_eq!(
            text,
            "--- 1 (diet) ---\n\
             \n\
             🍎 النظام الغذائي\n\
             \n\
             Your Daily Nutrition Plan\n\
             \n\
             🌅 الإفطار\n\
             بيض\n\
             خبز\n\
             السعرات 2000 kcal\n\
             البروتين 180 g\n\
             الكارب 0 g\n\
             الدهون 0 g\n"
        );
    }

    #[test]
    fn test_pages_are_numbered() {
        let plan = nutriplan_read_plan::parse("ملاحظات نم جيدا\nالعشاء جبنة");
        let text = emit_str(&layout(&plan, &LayoutOptions::default()).value);
        assert!(text.starts_with("--- 1 (notes) ---\n"));
        assert!(text.contains("\n\n--- 2 (diet) ---\n"));
    }

    #[test]
    fn test_before_after_preview() {
        let data = BeforeAfter::new()
            .with_client_name("سارة")
            .with_after_image(Resource::png(vec![1]));
        let options = LayoutOptions::default().with_before_after(data);
        let text = emit_str(&layout(&DietPlan::new(), &options).value);
        assert!(text.contains("سارة"));
        assert!(text.contains("[After]"));
        assert!(text.contains("Before"));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(emit_str(&Document::new()), "\n");
    }
}
