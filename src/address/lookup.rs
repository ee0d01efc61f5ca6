//! Canonicalization lookup tables.
//!
//! Two flavours back the normalizer:
//! - [`ExactTable`]: key → canonical value, looked up after case folding and
//!   whitespace collapsing.
//! - [`PrioritizedTable`]: ordered `(pattern, value)` entries, tried in
//!   declaration order; the first anchored match wins. Vocabularies list
//!   longer, more specific patterns before shorter ones that could shadow
//!   them.

use std::collections::HashMap;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

/// Fold a lookup key: uppercase, single spaces, no surrounding whitespace.
pub(crate) fn fold_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Key → canonical value table with O(1) lookup.
#[derive(Debug, Clone, Default)]
pub struct ExactTable {
    entries: HashMap<String, String>,
}

impl ExactTable {
    /// Build a table from `(synonym, canonical)` pairs.
    ///
    /// Every canonical value is also registered as a key for itself, so a
    /// lookup of an already-canonical value returns it unchanged even when
    /// the source data only lists the long forms.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries = HashMap::new();
        let mut canonicals = Vec::new();

        for (key, value) in pairs {
            let value = fold_key(value);
            entries.insert(fold_key(key), value.clone());
            canonicals.push(value);
        }
        for canonical in canonicals {
            entries.insert(canonical.clone(), canonical);
        }

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&fold_key(key)).map(String::as_str)
    }

    /// Distinct canonical values, sorted.
    pub fn canonical_values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self.entries.values().map(String::as_str).collect();
        values.sort_unstable();
        values.dedup();
        values
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
struct PrioritizedEntry {
    regex: Regex,
    value: String,
}

/// Ordered pattern → canonical value table. First match wins.
#[derive(Debug, Clone, Default)]
pub struct PrioritizedTable {
    entries: Vec<PrioritizedEntry>,
}

impl PrioritizedTable {
    /// Compile `(pattern, canonical)` pairs in the given order.
    ///
    /// Each pattern is anchored at both ends and matched case-insensitively.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(pattern, value)| {
                let regex = RegexBuilder::new(&format!("^(?:{pattern})$"))
                    .case_insensitive(true)
                    .build()
                    .with_context(|| format!("Invalid lookup pattern '{pattern}' for '{value}'"))?;
                Ok(PrioritizedEntry {
                    regex,
                    value: fold_key(value),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = fold_key(key);
        self.entries
            .iter()
            .find(|entry| entry.regex.is_match(&key))
            .map(|entry| entry.value.as_str())
    }

    /// Canonical values in table order, without duplicates.
    pub fn canonical_values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !values.contains(&entry.value.as_str()) {
                values.push(entry.value.as_str());
            }
        }
        values
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A canonicalization table of either flavour.
#[derive(Debug, Clone)]
pub enum LookupTable {
    Exact(ExactTable),
    Prioritized(PrioritizedTable),
}

impl LookupTable {
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            Self::Exact(table) => table.get(key),
            Self::Prioritized(table) => table.get(key),
        }
    }

    /// Look `value` up, passing it through unchanged when the table has no
    /// entry for it.
    pub fn canonicalize(&self, value: &str) -> String {
        self.get(value)
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string())
    }

    pub fn canonical_values(&self) -> Vec<&str> {
        match self {
            Self::Exact(table) => table.canonical_values(),
            Self::Prioritized(table) => table.canonical_values(),
        }
    }
}

impl From<ExactTable> for LookupTable {
    fn from(table: ExactTable) -> Self {
        Self::Exact(table)
    }
}

impl From<PrioritizedTable> for LookupTable {
    fn from(table: PrioritizedTable) -> Self {
        Self::Prioritized(table)
    }
}
