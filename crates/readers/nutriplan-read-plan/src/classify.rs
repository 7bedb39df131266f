//! Line classifier and meal accumulator.

use nutriplan_core::{
    ConversionResult, DietPlan, FidelityWarning, MacroKey, MacroStats, MealEntry, Severity,
    WarningKind,
};

use crate::keywords::{self, TitleKeyword};

/// What a normalized line is, in precedence order.
enum Line {
    Title(&'static TitleKeyword),
    Macro(MacroKey),
    Content,
}

fn classify(line: &str) -> Line {
    if let Some(title) = keywords::match_title(line) {
        Line::Title(title)
    } else if let Some((_, key)) = keywords::match_macro(line) {
        Line::Macro(key)
    } else {
        Line::Content
    }
}

/// Single forward pass over normalized lines.
pub(crate) fn parse_lines(lines: &[String]) -> ConversionResult<DietPlan> {
    let mut meals = Vec::new();
    let mut stats = MacroStats::new();
    let mut current: Option<MealEntry> = None;
    let mut warnings = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        match classify(line) {
            Line::Title(title) => {
                meals.extend(current.take());
                current = Some(open_entry(title, line));
            }
            Line::Macro(key) => match macro_value(line, lines.get(idx + 1)) {
                Some(value) => stats.set(key, value),
                None => warnings.push(
                    FidelityWarning::new(
                        Severity::Info,
                        WarningKind::MissingMacroValue(key),
                        format!("no value found for {key}"),
                    )
                    .at(idx),
                ),
            },
            Line::Content => {
                if is_consumed_value(lines, idx) {
                    continue;
                }
                match current.as_mut() {
                    Some(entry) => entry.push_line(line),
                    None => warnings.push(
                        FidelityWarning::new(
                            Severity::Minor,
                            WarningKind::DroppedContent(line.clone()),
                            "text before the first meal title was dropped",
                        )
                        .at(idx),
                    ),
                }
            }
        }
    }

    meals.extend(current);

    ConversionResult::with_warnings(DietPlan { meals, stats }, warnings)
}

/// Open an accumulator for a title line. Text after the title, minus one
/// leading `:` or `-`, becomes the first content.
fn open_entry(title: &TitleKeyword, line: &str) -> MealEntry {
    let mut entry = MealEntry::new(
        title.text,
        title.icon,
        keywords::is_notes_title(title.text),
    );

    let rest = line[title.text.len()..].trim();
    let rest = rest
        .strip_prefix([':', '-'])
        .map_or(rest, str::trim_start);
    if !rest.is_empty() {
        entry.items.push_str(rest);
    }

    entry
}

/// Value of a macro line: the first digit run on the line, otherwise the
/// next line when it is nothing but digits.
fn macro_value<'a>(line: &'a str, next: Option<&'a String>) -> Option<&'a str> {
    first_number(line).or_else(|| next.map(String::as_str).filter(|n| is_numeric(n)))
}

/// A purely numeric line right after a macro line belongs to that macro.
fn is_consumed_value(lines: &[String], idx: usize) -> bool {
    is_numeric(&lines[idx])
        && idx
            .checked_sub(1)
            .and_then(|prev| lines.get(prev))
            .is_some_and(|prev| keywords::match_macro(prev).is_some())
}

fn first_number(line: &str) -> Option<&str> {
    let start = line.find(|c: char| c.is_ascii_digit())?;
    let rest = &line[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

fn is_numeric(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}
