//! Transport object for handing parse results to outer layers.
//!
//! Collaborators (the CLI's JSON output, a web handler) want a flat record
//! with one optional slot per field rather than a map. The mapping is by
//! field name in both directions and carries no logic of its own.

use serde::{Deserialize, Serialize};

use super::{AddressField, ParsedAddress};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predirectional: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postdirectional: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_number: Option<String>,
}

impl AddressDto {
    fn slot_mut(&mut self, field: AddressField) -> &mut Option<String> {
        match field {
            AddressField::Number => &mut self.number,
            AddressField::Predirectional => &mut self.predirectional,
            AddressField::Street => &mut self.street,
            AddressField::StreetLine => &mut self.street_line,
            AddressField::Suffix => &mut self.suffix,
            AddressField::Postdirectional => &mut self.postdirectional,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Zip => &mut self.zip,
            AddressField::SecondaryUnit => &mut self.secondary_unit,
            AddressField::SecondaryNumber => &mut self.secondary_number,
        }
    }

    fn slot(&self, field: AddressField) -> Option<&String> {
        match field {
            AddressField::Number => self.number.as_ref(),
            AddressField::Predirectional => self.predirectional.as_ref(),
            AddressField::Street => self.street.as_ref(),
            AddressField::StreetLine => self.street_line.as_ref(),
            AddressField::Suffix => self.suffix.as_ref(),
            AddressField::Postdirectional => self.postdirectional.as_ref(),
            AddressField::City => self.city.as_ref(),
            AddressField::State => self.state.as_ref(),
            AddressField::Zip => self.zip.as_ref(),
            AddressField::SecondaryUnit => self.secondary_unit.as_ref(),
            AddressField::SecondaryNumber => self.secondary_number.as_ref(),
        }
    }
}

impl From<&ParsedAddress> for AddressDto {
    fn from(parsed: &ParsedAddress) -> Self {
        let mut dto = AddressDto::default();
        for (field, value) in parsed.iter() {
            *dto.slot_mut(field) = Some(value.to_string());
        }
        dto
    }
}

impl From<&AddressDto> for ParsedAddress {
    fn from(dto: &AddressDto) -> Self {
        use strum::IntoEnumIterator;

        AddressField::iter()
            .filter_map(|field| dto.slot(field).map(|value| (field, value.clone())))
            .collect()
    }
}
