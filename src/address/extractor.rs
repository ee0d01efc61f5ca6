//! Filtering raw captures down to address fields.

use std::collections::BTreeMap;

use super::compiler::field_for_group;
use super::matcher::RawMatch;
use crate::models::{AddressField, ParsedAddress};

/// Raw captured text per field, before normalization. Only fields that
/// matched a non-blank substring are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    fields: BTreeMap<AddressField, String>,
}

impl MatchResult {
    pub fn get(&self, field: AddressField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: AddressField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AddressField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

impl From<MatchResult> for ParsedAddress {
    /// The captured text as-is, for callers that skip normalization.
    fn from(matched: MatchResult) -> Self {
        matched.fields.into_iter().collect()
    }
}

/// Keep the captures that name an [`AddressField`], trimmed. Bookkeeping
/// groups and blank captures are dropped; if a field was captured twice the
/// first capture wins.
pub fn extract(raw: &RawMatch<'_>) -> MatchResult {
    let mut fields = BTreeMap::new();
    for capture in &raw.captures {
        let Some(field) = field_for_group(capture.group) else {
            continue;
        };
        let value = capture.value.trim();
        if value.is_empty() {
            continue;
        }
        fields.entry(field).or_insert_with(|| value.to_string());
    }
    MatchResult { fields }
}
