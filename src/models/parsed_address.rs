use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::AddressField;

/// The structured result of a successful parse.
///
/// Only fields that were captured (or inferred during normalization) are
/// present; there are no empty-string placeholders. Iteration follows the
/// declaration order of [`AddressField`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedAddress {
    fields: BTreeMap<AddressField, String>,
}

impl ParsedAddress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: AddressField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: AddressField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Sets `field`. Blank values are refused so the map never holds a
    /// placeholder; the return value tells whether the value was stored.
    pub fn insert(&mut self, field: AddressField, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.trim().is_empty() {
            return false;
        }
        self.fields.insert(field, value);
        true
    }

    pub fn remove(&mut self, field: AddressField) -> Option<String> {
        self.fields.remove(&field)
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

    pub fn fields(&self) -> impl Iterator<Item = AddressField> + '_ {
        self.fields.keys().copied()
    }
}

impl FromIterator<(AddressField, String)> for ParsedAddress {
    fn from_iter<I: IntoIterator<Item = (AddressField, String)>>(iter: I) -> Self {
        let mut parsed = Self::new();
        for (field, value) in iter {
            parsed.insert(field, value);
        }
        parsed
    }
}

impl fmt::Display for ParsedAddress {
    /// One `field: value` line per populated field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, value) in self.iter() {
            writeln!(f, "{field}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_not_stored() {
        let mut parsed = ParsedAddress::new();
        assert!(!parsed.insert(AddressField::City, "   "));
        assert!(!parsed.insert(AddressField::City, ""));
        assert!(parsed.is_empty());
        assert!(!parsed.contains(AddressField::City));
    }

    #[test]
    fn test_iteration_follows_field_order() {
        let parsed: ParsedAddress = [
            (AddressField::Zip, "70112".to_string()),
            (AddressField::Number, "1005".to_string()),
            (AddressField::Street, "GRAVIER".to_string()),
        ]
        .into_iter()
        .collect();

        let order: Vec<AddressField> = parsed.fields().collect();
        assert_eq!(
            order,
            vec![AddressField::Number, AddressField::Street, AddressField::Zip]
        );
    }

    #[test]
    fn test_display_lists_populated_fields() {
        let mut parsed = ParsedAddress::new();
        parsed.insert(AddressField::Number, "1");
        parsed.insert(AddressField::Suffix, "LOOP");
        assert_eq!(parsed.to_string(), "number: 1\nsuffix: LOOP\n");
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let mut parsed = ParsedAddress::new();
        parsed.insert(AddressField::StreetLine, "PO BOX 123");
        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"street_line":"PO BOX 123"}"#);
    }
}
