//! Fixed keyword tables.
//!
//! Order matters: several short titles are textual prefixes of longer ones
//! (`الإفطار` / `وجبة الإفطار`, `ملاحظات` / `ملاحظات عامة`), so matching walks
//! each table front to back and the longer form is listed first.

use nutriplan_core::MacroKey;

/// A meal-title keyword and its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleKeyword {
    pub text: &'static str,
    pub icon: &'static str,
}

const SUNRISE: &str = "\u{1F305}";
const APPLE: &str = "\u{1F34E}";
const PLATE: &str = "\u{1F37D}\u{FE0F}";
const BICEPS: &str = "\u{1F4AA}";
const LIFTER: &str = "\u{1F3CB}\u{FE0F}";
const MOON: &str = "\u{1F319}";
const MEMO: &str = "\u{1F4DD}";

/// Icon used when a title has no entry in the table.
pub const DEFAULT_ICON: &str = "\u{1F374}";

/// Substring marking a notes title.
pub const NOTES_MARKER: &str = "ملاحظات";

/// Meal titles in match order.
pub const MEAL_TITLES: &[TitleKeyword] = &[
    TitleKeyword { text: "وجبة الإفطار", icon: SUNRISE },
    TitleKeyword { text: "الإفطار", icon: SUNRISE },
    TitleKeyword { text: "الفطار", icon: SUNRISE },
    TitleKeyword { text: "وجبة خفيفة", icon: APPLE },
    TitleKeyword { text: "سناك", icon: APPLE },
    TitleKeyword { text: "الغداء", icon: PLATE },
    TitleKeyword { text: "وجبة قبل التمرين", icon: BICEPS },
    TitleKeyword { text: "قبل التمرين", icon: BICEPS },
    TitleKeyword { text: "وجبة بعد التمرين", icon: LIFTER },
    TitleKeyword { text: "بعد التمرين", icon: LIFTER },
    TitleKeyword { text: "العشاء", icon: MOON },
    TitleKeyword { text: "ملاحظات عامة", icon: MEMO },
    TitleKeyword { text: "ملاحظات", icon: MEMO },
    TitleKeyword { text: "وجبة السحور", icon: MOON },
    TitleKeyword { text: "السحور", icon: MOON },
];

/// Macro labels in match order. Two labels share the carbs key.
pub const MACRO_KEYWORDS: &[(&str, MacroKey)] = &[
    ("سعرات", MacroKey::Calories),
    ("بروتين", MacroKey::Protein),
    ("كارب", MacroKey::Carbs),
    ("كربوهيدرات", MacroKey::Carbs),
    ("دهون", MacroKey::Fats),
];

/// The meal title a line starts with, if any.
pub fn match_title(line: &str) -> Option<&'static TitleKeyword> {
    MEAL_TITLES.iter().find(|t| line.starts_with(t.text))
}

/// The macro label a line starts with, if any.
pub fn match_macro(line: &str) -> Option<(&'static str, MacroKey)> {
    MACRO_KEYWORDS
        .iter()
        .copied()
        .find(|(label, _)| line.starts_with(label))
}

/// Icon for a title, falling back to [`DEFAULT_ICON`].
pub fn icon_for(title: &str) -> &'static str {
    MEAL_TITLES
        .iter()
        .find(|t| t.text == title)
        .map_or(DEFAULT_ICON, |t| t.icon)
}

/// Whether a title opens a notes section.
pub fn is_notes_title(title: &str) -> bool {
    title.contains(NOTES_MARKER)
}

/// Every keyword that starts a new line: titles first, then macro labels.
pub fn line_keywords() -> impl Iterator<Item = &'static str> {
    MEAL_TITLES
        .iter()
        .map(|t| t.text)
        .chain(MACRO_KEYWORDS.iter().map(|(label, _)| *label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longer_title_wins() {
        assert_eq!(match_title("وجبة الإفطار بيض").map(|t| t.text), Some("وجبة الإفطار"));
        assert_eq!(match_title("الإفطار بيض").map(|t| t.text), Some("الإفطار"));
        assert_eq!(match_title("ملاحظات عامة اشرب ماء").map(|t| t.text), Some("ملاحظات عامة"));
        assert_eq!(match_title("وجبة بعد التمرين تونة").map(|t| t.text), Some("وجبة بعد التمرين"));
    }

    #[test]
    fn test_every_longer_form_precedes_its_prefix() {
        for (i, long) in MEAL_TITLES.iter().enumerate() {
            for short in &MEAL_TITLES[..i] {
                assert!(
                    !long.text.starts_with(short.text),
                    "{} is shadowed by {}",
                    long.text,
                    short.text
                );
            }
        }
    }

    #[test]
    fn test_carb_synonyms_share_key() {
        assert_eq!(match_macro("كارب 150").map(|(_, k)| k), Some(MacroKey::Carbs));
        assert_eq!(match_macro("كربوهيدرات 150").map(|(_, k)| k), Some(MacroKey::Carbs));
        assert_eq!(match_macro("الغداء"), None);
    }

    #[test]
    fn test_icons() {
        assert_eq!(icon_for("الغداء"), "\u{1F37D}\u{FE0F}");
        assert_eq!(icon_for("السحور"), "\u{1F319}");
        assert_eq!(icon_for("brunch"), DEFAULT_ICON);
    }

    #[test]
    fn test_notes_titles() {
        assert!(is_notes_title("ملاحظات"));
        assert!(is_notes_title("ملاحظات عامة"));
        assert!(!is_notes_title("العشاء"));
    }

    #[test]
    fn test_line_keywords_order() {
        let all: Vec<_> = line_keywords().collect();
        assert_eq!(all.len(), MEAL_TITLES.len() + MACRO_KEYWORDS.len());
        assert_eq!(all.first(), Some(&"وجبة الإفطار"));
        assert_eq!(all.last(), Some(&"دهون"));
    }
}
