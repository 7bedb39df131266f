//! Where each rendered page lands in the base document.

use nutriplan_core::PageKind;

/// Page after which nutrition pages go when nothing usable was configured.
pub const DEFAULT_INSERT_AFTER: usize = 5;

/// Position the before/after page is inserted at.
pub const BEFORE_AFTER_INDEX: usize = 1;

/// Read an insertion point typed by a user.
///
/// Leading ASCII digits are read, the rest is ignored. Zero, a missing
/// number or an overflowing one gives [`DEFAULT_INSERT_AFTER`].
pub fn parse_insert_after(input: &str) -> usize {
    let input = input.trim();
    let digits = input
        .find(|c: char| !c.is_ascii_digit())
        .map_or(input, |end| &input[..end]);
    normalize_insert_after(digits.parse().ok())
}

/// Apply the default to a missing or zero insertion point.
pub fn normalize_insert_after(value: Option<usize>) -> usize {
    match value {
        Some(0) | None => DEFAULT_INSERT_AFTER,
        Some(n) => n,
    }
}

/// One page of the insertion plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedPage {
    /// Index into the rendered pages.
    pub source: usize,
    /// 0-based position in the base document at insertion time.
    pub index: usize,
}

/// Insertion order and positions for rendered pages.
///
/// The first before/after page goes to [`BEFORE_AFTER_INDEX`] and is
/// inserted first. The remaining pages keep their order and go to
/// `insert_after + i`, shifted by one when a before/after page was
/// inserted ahead of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPlan {
    pub pages: Vec<PlannedPage>,
}

impl InsertionPlan {
    /// Plan insertions for pages of the given kinds, in render order.
    pub fn new(kinds: &[PageKind], insert_after: usize) -> Self {
        let insert_after = normalize_insert_after(Some(insert_after));
        let before_after = kinds.iter().position(|k| *k == PageKind::BeforeAfter);

        let mut pages = Vec::with_capacity(kinds.len());
        if let Some(source) = before_after {
            pages.push(PlannedPage {
                source,
                index: BEFORE_AFTER_INDEX,
            });
        }

        let start = insert_after + usize::from(before_after.is_some());
        let nutrition = kinds
            .iter()
            .enumerate()
            .filter(|(_, k)| **k != PageKind::BeforeAfter)
            .map(|(source, _)| source);
        pages.extend(
            nutrition
                .enumerate()
                .map(|(i, source)| PlannedPage {
                    source,
                    index: start + i,
                }),
        );

        Self { pages }
    }

    /// Number of pages to insert.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if nothing will be inserted.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
