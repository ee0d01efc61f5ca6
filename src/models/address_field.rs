//! Recognized output slots of a parsed address.
//!
//! Each variant is one structured field the grammar can capture. The
//! snake_case name of a variant doubles as the logical capture-group name in
//! grammar text, so `(?P<street_line>...)` binds to [`AddressField::StreetLine`].

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A recognized address field.
///
/// # Serialization
///
/// Variants serialize to snake_case strings (`"street_line"`,
/// `"secondary_number"`, ...). Parsing from a string is case-sensitive and
/// accepts only those names.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use streetwise::models::AddressField;
///
/// let field = AddressField::from_str("secondary_unit").unwrap();
/// assert_eq!(field, AddressField::SecondaryUnit);
/// assert_eq!(field.as_ref(), "secondary_unit");
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AddressField {
    Number,
    Predirectional,
    Street,
    StreetLine,
    Suffix,
    Postdirectional,
    City,
    State,
    Zip,
    SecondaryUnit,
    SecondaryNumber,
}

impl AddressField {
    /// Returns the snake_case identifier of this field.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Fields that only the place part of a full address can populate.
    pub fn is_place(&self) -> bool {
        matches!(self, Self::City | Self::State | Self::Zip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for field in AddressField::iter() {
            assert_eq!(AddressField::from_str(field.as_str()).ok(), Some(field));
        }
    }

    #[test]
    fn test_multi_word_names_are_snake_case() {
        assert_eq!(AddressField::StreetLine.as_str(), "street_line");
        assert_eq!(AddressField::SecondaryNumber.to_string(), "secondary_number");
    }

    #[test]
    fn test_bookkeeping_names_are_rejected() {
        assert!(AddressField::from_str("unit_marker").is_err());
        assert!(AddressField::from_str("Number").is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&AddressField::SecondaryUnit).unwrap();
        assert_eq!(json, "\"secondary_unit\"");
    }

    #[test]
    fn test_place_fields() {
        let place: Vec<AddressField> = AddressField::iter().filter(|f| f.is_place()).collect();
        assert_eq!(
            place,
            vec![AddressField::City, AddressField::State, AddressField::Zip]
        );
    }
}
