//! Macro-nutrient totals.

use std::collections::BTreeMap;

/// Canonical macro keys, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MacroKey {
    Calories,
    Protein,
    Carbs,
    Fats,
}

impl MacroKey {
    /// All keys in the order the summary block shows them.
    pub const ALL: [MacroKey; 4] = [
        MacroKey::Calories,
        MacroKey::Protein,
        MacroKey::Carbs,
        MacroKey::Fats,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MacroKey::Calories => "calories",
            MacroKey::Protein => "protein",
            MacroKey::Carbs => "carbs",
            MacroKey::Fats => "fats",
        }
    }

    /// Label shown on the summary block.
    pub fn label(&self) -> &'static str {
        match self {
            MacroKey::Calories => "السعرات",
            MacroKey::Protein => "البروتين",
            MacroKey::Carbs => "الكارب",
            MacroKey::Fats => "الدهون",
        }
    }

    /// Unit shown after the value.
    pub fn unit(&self) -> &'static str {
        match self {
            MacroKey::Calories => "kcal",
            _ => "g",
        }
    }

    /// Look up a key by canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for MacroKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Macro totals keyed by [`MacroKey`]. Values are numeric strings as they
/// appeared in the source.
///
/// Missing keys stay missing; use [`MacroStats::display`] to get the
/// rendered value with the `"0"` default applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MacroStats(BTreeMap<MacroKey, String>);

impl MacroStats {
    /// Value rendered when a key was never set.
    pub const MISSING: &'static str = "0";

    /// Create an empty set.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set a value. A later write for the same key replaces the earlier one.
    pub fn set(&mut self, key: MacroKey, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    /// Get a value if it was set.
    pub fn get(&self, key: MacroKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    /// Get the value to render, defaulting to `"0"`.
    pub fn display(&self, key: MacroKey) -> &str {
        self.get(key).unwrap_or(Self::MISSING)
    }

    /// Check if a key was set.
    pub fn contains(&self, key: MacroKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Iterate over set keys in display order.
    pub fn iter(&self) -> impl Iterator<Item = (MacroKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Check if no key was set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of keys set.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}
