//! Parsed diet plan: meals in source order plus macro totals.

use crate::MacroStats;

/// Marker placed between content lines inside [`MealEntry::items`].
pub const LINE_BREAK: &str = "<br>";

/// One section of a diet plan, opened by a recognized title keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MealEntry {
    /// The title keyword that opened this section, exactly as listed in the
    /// keyword table.
    pub title: String,
    /// Accumulated content, lines joined with [`LINE_BREAK`].
    pub items: String,
    /// Whether this section holds general notes rather than food.
    #[cfg_attr(feature = "serde", serde(rename = "isNotes"))]
    pub is_notes: bool,
    /// Glyph shown next to the title.
    pub icon: String,
}

impl MealEntry {
    /// Create an entry with no content yet.
    pub fn new(title: impl Into<String>, icon: impl Into<String>, is_notes: bool) -> Self {
        Self {
            title: title.into(),
            items: String::new(),
            is_notes,
            icon: icon.into(),
        }
    }

    /// Set the content.
    pub fn with_items(mut self, items: impl Into<String>) -> Self {
        self.items = items.into();
        self
    }

    /// Append one content line, inserting [`LINE_BREAK`] if content exists.
    pub fn push_line(&mut self, line: &str) {
        if !self.items.is_empty() {
            self.items.push_str(LINE_BREAK);
        }
        self.items.push_str(line);
    }

    /// Iterate over the content lines.
    ///
    /// Newlines are treated like the break marker so hand-built entries
    /// render the same way as parsed ones.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.items
            .split(LINE_BREAK)
            .flat_map(|chunk| chunk.split('\n'))
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    /// Check whether the entry has any visible content.
    pub fn has_content(&self) -> bool {
        self.lines().next().is_some()
    }
}

/// Result of parsing a diet plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DietPlan {
    /// Meal entries in source order.
    pub meals: Vec<MealEntry>,
    /// Macro totals found anywhere in the text.
    pub stats: MacroStats,
}

impl DietPlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing was recognized.
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty() && self.stats.is_empty()
    }

    /// Notes entries, in source order.
    pub fn notes(&self) -> impl Iterator<Item = &MealEntry> {
        self.meals.iter().filter(|m| m.is_notes)
    }

    /// Entries that are not notes, in source order.
    pub fn regular_meals(&self) -> impl Iterator<Item = &MealEntry> {
        self.meals.iter().filter(|m| !m.is_notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_line_joins_with_marker() {
        let mut meal = MealEntry::new("الغداء", "🍽️", false);
        meal.push_line("أرز");
        meal.push_line("سلطة");
        assert_eq!(meal.items, "أرز<br>سلطة");
    }

    #[test]
    fn test_lines_splits_marker_and_newlines() {
        let meal = MealEntry::new("ملاحظات", "📝", true).with_items("a<br>b\nc<br> <br>");
        let lines: Vec<_> = meal.lines().collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_has_content() {
        assert!(!MealEntry::new("العشاء", "🌙", false).has_content());
        assert!(!MealEntry::new("العشاء", "🌙", false).with_items("  ").has_content());
        assert!(MealEntry::new("العشاء", "🌙", false).with_items("جبنة").has_content());
    }

    #[test]
    fn test_split_preserves_order() {
        let plan = DietPlan {
            meals: vec![
                MealEntry::new("ملاحظات", "📝", true).with_items("n1"),
                MealEntry::new("الإفطار", "🌅", false),
                MealEntry::new("ملاحظات عامة", "📝", true).with_items("n2"),
                MealEntry::new("العشاء", "🌙", false),
            ],
            stats: MacroStats::new(),
        };
        let notes: Vec<_> = plan.notes().map(|m| m.items.as_str()).collect();
        let regular: Vec<_> = plan.regular_meals().map(|m| m.title.as_str()).collect();
        assert_eq!(notes, vec!["n1", "n2"]);
        assert_eq!(regular, vec!["الإفطار", "العشاء"]);
    }
}
