#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nutriplan_core::EmitOptions;
use nutriplan_layout::{BeforeAfter, LayoutOptions, layout};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    before_after: Option<PhotoPage<'a>>,
    full_document: bool,
}

#[derive(Debug, Arbitrary)]
struct PhotoPage<'a> {
    client_name: &'a str,
    before_label: &'a str,
    after_label: &'a str,
    notes: &'a str,
}

fuzz_target!(|input: Input| {
    let plan = nutriplan_read_plan::parse(input.text);

    let mut options = LayoutOptions::default();
    if let Some(page) = input.before_after {
        options = options.with_before_after(
            BeforeAfter::new()
                .with_client_name(page.client_name)
                .with_labels(page.before_label, page.after_label)
                .with_notes(page.notes),
        );
    }
    let doc = layout(&plan, &options).value;

    let mut emit_options = EmitOptions::default();
    emit_options.full_document = input.full_document;
    let html = nutriplan_write_html::emit_with_options(&doc, &emit_options)
        .expect("html emit is infallible")
        .value;
    let html = String::from_utf8(html).expect("html output is UTF-8");

    // User text never opens an element of its own
    assert!(!html.contains("<script"), "unescaped markup in output");

    let pages = nutriplan_write_html::emit_pages(&doc, &emit_options)
        .expect("html emit is infallible")
        .value;
    assert_eq!(pages.len(), doc.page_count());
});
