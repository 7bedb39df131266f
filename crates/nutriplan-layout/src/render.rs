//! Plan to page layout.

use crate::builder::{BlockBuilder, page};
use crate::{
    ConversionResult, DietPlan, Document, FidelityWarning, MacroKey, MealEntry, Node, PageKind,
    Resource, Severity, WarningKind, helpers,
};

/// Fixed page text.
pub mod labels {
    /// Client name shown when none was given.
    pub const CLIENT_PLACEHOLDER: &str = "اسم العميل";
    /// Default caption and placeholder of the "before" photo.
    pub const BEFORE: &str = "Before";
    /// Default caption and placeholder of the "after" photo.
    pub const AFTER: &str = "After";
    /// Heading of the notes block on the before/after page.
    pub const BA_NOTES_HEADING: &str = "ملاحظات";
    /// Heading of a notes page.
    pub const NOTES_HEADING: &str = "ملاحظات عامة 📝";
    /// Title of the diet page.
    pub const DIET_TITLE: &str = "🍎 النظام الغذائي";
    /// Subtitle of the diet page.
    pub const DIET_SUBTITLE: &str = "Your Daily Nutrition Plan";
}

/// Data for the before/after photo page.
#[derive(Debug, Clone, Default)]
pub struct BeforeAfter {
    /// Client name; blank shows a placeholder.
    pub client_name: String,
    /// Caption under the "before" photo; blank uses the default.
    pub before_label: String,
    /// Caption under the "after" photo; blank uses the default.
    pub after_label: String,
    pub before_image: Option<Resource>,
    pub after_image: Option<Resource>,
    /// Free text, one line per `\n`. Blank hides the notes block.
    pub notes: String,
}

impl BeforeAfter {
    /// Create empty before/after data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client name.
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Set both photo captions.
    pub fn with_labels(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.before_label = before.into();
        self.after_label = after.into();
        self
    }

    /// Set the "before" photo.
    pub fn with_before_image(mut self, image: Resource) -> Self {
        self.before_image = Some(image);
        self
    }

    /// Set the "after" photo.
    pub fn with_after_image(mut self, image: Resource) -> Self {
        self.after_image = Some(image);
        self
    }

    /// Set the notes text.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Whether there is enough data to warrant the page: a client name or
    /// at least one photo.
    pub fn has_content(&self) -> bool {
        !self.client_name.trim().is_empty()
            || self.before_image.is_some()
            || self.after_image.is_some()
    }
}

/// Options for [`layout`].
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    /// Before/after page data. `None` omits the page.
    pub before_after: Option<BeforeAfter>,
}

impl LayoutOptions {
    /// Include a before/after page.
    pub fn with_before_after(mut self, data: BeforeAfter) -> Self {
        self.before_after = Some(data);
        self
    }
}

/// Lay out a plan as pages: the before/after page when requested, then one
/// page per notes entry with content, then the diet page when there is at
/// least one regular meal or one macro value.
pub fn layout(plan: &DietPlan, options: &LayoutOptions) -> ConversionResult<Document> {
    let mut doc = Document::new().with_plan(plan.clone());
    let mut pages = Vec::new();
    let mut warnings = Vec::new();

    if let Some(data) = &options.before_after {
        pages.push(before_after_page(&mut doc, data));
    }

    for notes in plan.notes() {
        if notes.has_content() {
            pages.push(notes_page(notes));
        } else {
            warnings.push(FidelityWarning::new(
                Severity::Info,
                WarningKind::EmptyNotes(notes.title.clone()),
                format!("'{}' has no content, no page emitted", notes.title),
            ));
        }
    }

    if plan.regular_meals().next().is_some() || !plan.stats.is_empty() {
        pages.push(diet_page(plan));
    }

    doc.content = helpers::document(pages);
    ConversionResult::with_warnings(doc, warnings)
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() { default } else { value }
}

fn before_after_page(doc: &mut Document, data: &BeforeAfter) -> Node {
    let after = photo_box(doc, data.after_image.clone(), labels::AFTER, &data.after_label, "ba-after");
    let before = photo_box(doc, data.before_image.clone(), labels::BEFORE, &data.before_label, "ba-before");
    let notes = data.notes.trim();

    page(PageKind::BeforeAfter, |p| {
        p.div("ba-content", |c| {
            c.heading(
                2,
                "ba-client-name",
                or_default(&data.client_name, labels::CLIENT_PLACEHOLDER),
            )
            .div("ba-images-row", |row| row.node(after).node(before))
            .when(!notes.is_empty(), |c| {
                c.div("ba-notes-section", |s| {
                    s.heading(3, "", labels::BA_NOTES_HEADING)
                        .div("ba-notes-box", |b| b.lines(notes.lines().map(str::trim)))
                })
            })
        })
    })
}

fn photo_box(
    doc: &mut Document,
    image: Option<Resource>,
    name: &str,
    label: &str,
    label_class: &str,
) -> Node {
    let frame = match image {
        Some(res) => BlockBuilder::new().image(&doc.embed(res), name),
        None => BlockBuilder::new().div("ba-placeholder", |d| d.text(name)),
    };
    frame
        .para(&format!("ba-label {label_class}"), or_default(label, name))
        .build("ba-image-box")
}

fn notes_page(notes: &MealEntry) -> Node {
    page(PageKind::Notes, |p| {
        p.h1(labels::NOTES_HEADING)
            .div("notes-content", |d| d.lines(notes.lines()))
    })
}

fn diet_page(plan: &DietPlan) -> Node {
    page(PageKind::Diet, |p| {
        p.div("diet-header", |h| {
            h.heading(2, "", labels::DIET_TITLE)
                .heading(3, "", labels::DIET_SUBTITLE)
        })
        .div("meals-container", |m| {
            plan.regular_meals().fold(m, |m, meal| m.node(meal_card(meal)))
        })
        .div("macros-container", |m| {
            MacroKey::ALL.into_iter().fold(m, |m, key| {
                m.div(&format!("macro-stat {key}"), |s| {
                    s.span("label", key.label())
                        .span("value", plan.stats.display(key))
                        .span("unit", key.unit())
                })
            })
        })
    })
}

fn meal_card(meal: &MealEntry) -> Node {
    BlockBuilder::new()
        .heading(4, "", format!("{} {}", meal.icon, meal.title))
        .div("meal-content", |c| c.lines(meal.lines()))
        .build("meal-card")
}
