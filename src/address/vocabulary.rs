//! Per-country vocabulary: the data half of the parser.
//!
//! The grammar shapes and normalization rules are the same for every
//! country; everything locale-specific (region names, street-type synonyms,
//! directional translations, unit designators, postal-code shape) lives in a
//! [`Vocabulary`]. Built-in vocabularies are embedded YAML files under
//! `resources/vocabulary/`; custom ones load from YAML or JSON.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

const US_VOCABULARY: &str = include_str!("../../resources/vocabulary/us.yml");
const CA_VOCABULARY: &str = include_str!("../../resources/vocabulary/ca.yml");
const FR_VOCABULARY: &str = include_str!("../../resources/vocabulary/fr.yml");

/// Countries with a built-in vocabulary.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Country {
    Us,
    Ca,
    Fr,
}

/// One secondary-unit designator: a case-insensitive regex and the
/// canonical abbreviation it normalizes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitEntry {
    pub pattern: String,
    pub value: String,
}

/// Military post offices and their pseudo-regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmedForces {
    pub cities: Vec<String>,
    pub regions: Vec<String>,
}

impl ArmedForces {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() || self.regions.is_empty()
    }
}

/// The injectable data of one country variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vocabulary {
    /// Short identifier of the variant, e.g. `us`.
    pub name: String,
    /// Regex for the postal code, including any optional extension.
    pub postal_code: String,
    /// Unit abbreviation inferred when only a secondary number was found.
    pub apartment_unit: String,
    /// Full directional name -> abbreviation (`NORTHEAST: NE`).
    pub directionals: BTreeMap<String, String>,
    /// Region name -> region code (`LOUISIANA: LA`).
    pub regions: BTreeMap<String, String>,
    /// Canonical street suffix -> other accepted spellings.
    pub suffixes: BTreeMap<String, Vec<String>>,
    /// Designators that require a following identifier, in lookup order.
    #[serde(default)]
    pub ranged_units: Vec<UnitEntry>,
    /// Designators that stand alone, in lookup order.
    #[serde(default)]
    pub rangeless_units: Vec<UnitEntry>,
    /// Regexes for the words introducing a postal box number.
    #[serde(default)]
    pub postal_box: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armed_forces: Option<ArmedForces>,
    /// Regexes for street names that must be matched whole before the
    /// general street forms are tried.
    #[serde(default)]
    pub street_exceptions: Vec<String>,
}

impl Vocabulary {
    /// Load the embedded vocabulary of `country`.
    pub fn builtin(country: Country) -> Result<Self> {
        let source = match country {
            Country::Us => US_VOCABULARY,
            Country::Ca => CA_VOCABULARY,
            Country::Fr => FR_VOCABULARY,
        };
        Self::from_yaml_str(source)
            .with_context(|| format!("Failed to load built-in vocabulary for '{country}'"))
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let vocabulary: Vocabulary =
            serde_yaml::from_str(source).context("Failed to parse vocabulary YAML")?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let vocabulary: Vocabulary =
            serde_json::from_str(source).context("Failed to parse vocabulary JSON")?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Load a vocabulary file. `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file: {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let loaded = if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        };
        loaded.with_context(|| format!("Invalid vocabulary file: {}", path.display()))
    }

    /// Check the invariants the grammar builder relies on.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("Vocabulary has an empty name"));
        }
        if self.postal_code.trim().is_empty() {
            return Err(anyhow!("Vocabulary '{}' has no postal code pattern", self.name));
        }
        if self.apartment_unit.trim().is_empty() {
            return Err(anyhow!("Vocabulary '{}' has no apartment unit", self.name));
        }
        if self.directionals.is_empty() {
            return Err(anyhow!("Vocabulary '{}' has no directionals", self.name));
        }
        if self.regions.is_empty() {
            return Err(anyhow!("Vocabulary '{}' has no regions", self.name));
        }
        if self.suffixes.is_empty() {
            return Err(anyhow!("Vocabulary '{}' has no street suffixes", self.name));
        }

        let blank_entry = self
            .directionals
            .iter()
            .chain(self.regions.iter())
            .find(|(key, value)| key.trim().is_empty() || value.trim().is_empty());
        if let Some((key, value)) = blank_entry {
            return Err(anyhow!(
                "Vocabulary '{}' has a blank entry: '{}' -> '{}'",
                self.name,
                key,
                value
            ));
        }

        if let Some(unit) = self
            .units()
            .find(|unit| unit.pattern.trim().is_empty() || unit.value.trim().is_empty())
        {
            return Err(anyhow!(
                "Vocabulary '{}' has a blank unit entry: '{}' -> '{}'",
                self.name,
                unit.pattern,
                unit.value
            ));
        }

        if self.ranged_units.is_empty() && self.rangeless_units.is_empty() {
            warn!(
                "Vocabulary '{}' defines no secondary units; only '#' designators will match",
                self.name
            );
        }
        if self.postal_box.is_empty() {
            warn!("Vocabulary '{}' defines no postal box prefixes", self.name);
        }

        Ok(())
    }

    /// Ranged entries first, then rangeless, each in declaration order.
    pub fn units(&self) -> impl Iterator<Item = &UnitEntry> {
        self.ranged_units.iter().chain(self.rangeless_units.iter())
    }

    /// `(spelling, canonical)` pairs for every suffix, canonical forms included.
    pub fn suffix_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.suffixes.iter().flat_map(|(canonical, spellings)| {
            std::iter::once((canonical.as_str(), canonical.as_str())).chain(
                spellings
                    .iter()
                    .map(move |spelling| (spelling.as_str(), canonical.as_str())),
            )
        })
    }

    pub fn armed_forces(&self) -> Option<&ArmedForces> {
        self.armed_forces.as_ref().filter(|forces| !forces.is_empty())
    }
}
