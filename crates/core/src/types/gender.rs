//! Gender filter for the product catalog.
//!
//! The try-on service exposes a closed set of gender categories. The
//! filter drives which products are visible and is part of every try-on
//! request; anything outside the closed set is rejected at the parsing
//! boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog gender category.
///
/// A closed enumeration; the service contract defines exactly these
/// three values. Unknown values coming off the wire must be rejected or
/// ignored by callers, never widened into a fourth variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Female,
    Male,
    Unisex,
}

impl Gender {
    /// All valid gender values, in display order.
    pub const ALL: [Self; 3] = [Self::Female, Self::Male, Self::Unisex];

    /// The lowercase wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::Unisex => "unisex",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a gender value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown gender value: {0:?} (expected female, male, or unisex)")]
pub struct GenderParseError(pub String);

impl FromStr for Gender {
    type Err = GenderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            "unisex" => Ok(Self::Unisex),
            _ => Err(GenderParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_genders() {
        assert_eq!("female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("unisex".parse::<Gender>(), Ok(Gender::Unisex));
        // Case-insensitive, matching the service's lowercasing
        assert_eq!("Female".parse::<Gender>(), Ok(Gender::Female));
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!("kids".parse::<Gender>().is_err());
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Gender::Unisex).expect("serialize"),
            "\"unisex\""
        );
        let g: Gender = serde_json::from_str("\"male\"").expect("deserialize");
        assert_eq!(g, Gender::Male);
    }

    #[test]
    fn test_display_matches_wire_form() {
        for gender in Gender::ALL {
            assert_eq!(gender.to_string(), gender.as_str());
        }
    }
}
