//! Line normalizer: free text in, one keyword per line out.

use crate::keywords;

const QUOTES: [char; 3] = ['"', '\u{201C}', '\u{201D}'];

/// Split free-form text into trimmed, non-empty lines so that every
/// keyword preceded by whitespace (or the start of the text) begins a line.
///
/// A keyword glued to the preceding word, or preceded only by punctuation,
/// is left where it is.
pub fn normalize(text: &str) -> Vec<String> {
    break_before_keywords(strip_quotes(text))
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim whitespace and wrapping quote characters from both ends.
fn strip_quotes(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || QUOTES.contains(&c))
}

/// Replace the whitespace before each boundary keyword with a newline.
fn break_before_keywords(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut prev: Option<char> = None;
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];

        if prev.is_none_or(char::is_whitespace)
            && let Some(keyword) = keywords::line_keywords().find(|k| rest.starts_with(k))
        {
            // The whitespace is consumed by the break.
            if prev.is_some() {
                out.pop();
            }
            out.push('\n');
            out.push_str(keyword);
            i += keyword.len();
            prev = keyword.chars().last();
            continue;
        }

        let Some(c) = rest.chars().next() else {
            break;
        };
        out.push(c);
        prev = Some(c);
        i += c.len_utf8();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_splits_inline_keywords() {
        let lines = normalize("الإفطار بيض الغداء دجاج سعرات 2000");
        assert_eq!(lines, vec!["الإفطار بيض", "الغداء دجاج", "سعرات 2000"]);
    }

    #[test]
    fn test_keyword_glued_to_word_is_not_split() {
        let lines = normalize("الإفطار خبزالغداء");
        assert_eq!(lines, vec!["الإفطار خبزالغداء"]);
    }

    #[test]
    fn test_punctuation_is_not_a_boundary() {
        let lines = normalize("الإفطار بيض،الغداء دجاج");
        assert_eq!(lines, vec!["الإفطار بيض،الغداء دجاج"]);
    }

    #[test]
    fn test_longest_form_wins_at_a_position() {
        let lines = normalize("سناك تفاح وجبة قبل التمرين موزة");
        assert_eq!(lines, vec!["سناك تفاح", "وجبة قبل التمرين موزة"]);
    }

    #[test]
    fn test_strips_wrapping_quotes() {
        assert_eq!(normalize("\"الغداء أرز\""), vec!["الغداء أرز"]);
        assert_eq!(normalize("  \u{201C}الغداء أرز\u{201D}\n"), vec!["الغداء أرز"]);
    }

    #[test]
    fn test_drops_blank_lines_and_trims() {
        let lines = normalize("\n\n   الغداء   \r\n\n  أرز  \n\t\n");
        assert_eq!(lines, vec!["الغداء", "أرز"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t ").is_empty());
        assert!(normalize("\"\"").is_empty());
        assert!(normalize("\" \u{201C} \"").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "وجبة الإفطار 3 بيضات مسلوقة + رغيف بلدي\nسعرات\n2000 بروتين 180",
            "text before الغداء 200جم صدور دجاج ملاحظات عامة نم جيدا",
            "\"السحور زبادي\"",
            "\"\" \u{201C}الغداء سمك\u{201D}\"",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once.join("\n"));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_keyword_at_start_of_text() {
        assert_eq!(normalize("دهون 60"), vec!["دهون 60"]);
    }
}
