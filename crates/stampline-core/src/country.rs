//! Country folders and their flag emoji.
//!
//! A folder counts as a country folder when its name (any casing) is a key in
//! the table. Keys are always stored lowercase.

use std::collections::BTreeMap;

/// Countries known out of the box.
const BUILTIN: &[(&str, &str)] = &[
    ("germany", "🇩🇪"),
    ("canada", "🇨🇦"),
    ("netherlands", "🇳🇱"),
    ("switzerland", "🇨🇭"),
];

/// Lowercase country name → emoji glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryTable {
    entries: BTreeMap<String, String>,
}

impl CountryTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(name, emoji)| (name.to_string(), emoji.to_string()))
                .collect(),
        }
    }

    /// Merge extra entries (e.g. from settings). Later entries win, including over built-ins.
    pub fn with_extra<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, emoji) in extra {
            let key = normalize(name.as_ref());
            if key.is_empty() {
                continue;
            }
            self.entries.insert(key, emoji.into());
        }
        self
    }

    /// Emoji for `name`, matched case-insensitively. Surrounding whitespace is part of the name.
    pub fn emoji(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CountryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Table key form of a country name.
pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
