//! Standardization of captured field values.
//!
//! Every value is first stripped of punctuation, then canonicalized with the
//! table for its field. Values without a table entry pass through. Canonical
//! values map to themselves, so normalizing twice changes nothing.

use anyhow::{Context, Result};

use super::extractor::MatchResult;
use super::lookup::{ExactTable, LookupTable, PrioritizedTable};
use super::vocabulary::Vocabulary;
use crate::models::{AddressField, ParsedAddress};

/// Trim and drop every character that is not alphanumeric, whitespace,
/// `/`, `-`, `#` or `&`.
pub fn strip(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '/' | '-' | '#' | '&'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// The canonicalization tables of one country variant.
#[derive(Debug, Clone)]
pub struct Normalizer {
    directionals: LookupTable,
    suffixes: LookupTable,
    regions: LookupTable,
    units: LookupTable,
    apartment_unit: String,
}

impl Normalizer {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        let directionals = ExactTable::from_pairs(
            vocabulary
                .directionals
                .iter()
                .map(|(name, abbreviation)| (name.as_str(), abbreviation.as_str())),
        );
        let suffixes = ExactTable::from_pairs(vocabulary.suffix_pairs());
        let regions = ExactTable::from_pairs(
            vocabulary
                .regions
                .iter()
                .map(|(name, code)| (name.as_str(), code.as_str())),
        );
        let units = PrioritizedTable::from_pairs(
            vocabulary
                .units()
                .map(|unit| (unit.pattern.as_str(), unit.value.as_str())),
        )
        .with_context(|| format!("Invalid secondary units in vocabulary '{}'", vocabulary.name))?;

        Ok(Self {
            directionals: directionals.into(),
            suffixes: suffixes.into(),
            regions: regions.into(),
            units: units.into(),
            apartment_unit: vocabulary.apartment_unit.trim().to_uppercase(),
        })
    }

    fn table(&self, field: AddressField) -> Option<&LookupTable> {
        match field {
            AddressField::Predirectional | AddressField::Postdirectional => {
                Some(&self.directionals)
            }
            AddressField::Suffix => Some(&self.suffixes),
            AddressField::State => Some(&self.regions),
            AddressField::SecondaryUnit => Some(&self.units),
            _ => None,
        }
    }

    /// Strip and canonicalize one value. `None` when nothing is left after
    /// stripping.
    pub fn normalize_value(&self, field: AddressField, value: &str) -> Option<String> {
        let stripped = strip(value);
        if stripped.is_empty() {
            return None;
        }

        let normalized = match field {
            AddressField::Number if !stripped.contains('/') => {
                stripped.split_whitespace().collect::<String>()
            }
            _ => match self.table(field) {
                Some(table) => table.canonicalize(&stripped),
                None => stripped,
            },
        };
        Some(normalized)
    }

    /// Normalize every captured field and infer the unit of a bare
    /// secondary number.
    pub fn normalize(&self, matched: &MatchResult) -> ParsedAddress {
        let mut parsed: ParsedAddress = matched
            .iter()
            .filter_map(|(field, value)| {
                self.normalize_value(field, value)
                    .map(|normalized| (field, normalized))
            })
            .collect();

        if parsed.contains(AddressField::SecondaryNumber)
            && !parsed.contains(AddressField::SecondaryUnit)
        {
            parsed.insert(AddressField::SecondaryUnit, self.apartment_unit.clone());
        }
        parsed
    }

    /// Canonical values of the table behind `field`; empty for fields that
    /// have none.
    pub fn canonical_values(&self, field: AddressField) -> Vec<&str> {
        self.table(field)
            .map(LookupTable::canonical_values)
            .unwrap_or_default()
    }

    pub fn apartment_unit(&self) -> &str {
        &self.apartment_unit
    }
}
