//! Closed field enumerations for buyer leads
//!
//! Single definition module for every fixed value set in the schema.
//! Validation, the diff engine, and the CSV boundary all consume these
//! types; the wire strings here are the only spelling of each value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SharedError;

/// Common surface for the closed enumerations: the full variant list and
/// the wire spelling of each variant.
pub trait FieldEnum: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Comma-joined list of allowed wire values, for error messages.
    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn parse_variant<E: FieldEnum>(s: &str) -> Result<E, SharedError> {
    E::ALL
        .iter()
        .find(|v| v.as_str() == s)
        .copied()
        .ok_or_else(|| SharedError::InvalidEnumValue {
            value: s.to_string(),
            allowed: E::allowed(),
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Chandigarh,
    Mohali,
    Zirakpur,
    Panchkula,
    Other,
}

impl FieldEnum for City {
    const ALL: &'static [City] = &[
        City::Chandigarh,
        City::Mohali,
        City::Zirakpur,
        City::Panchkula,
        City::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            City::Chandigarh => "Chandigarh",
            City::Mohali => "Mohali",
            City::Zirakpur => "Zirakpur",
            City::Panchkula => "Panchkula",
            City::Other => "Other",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    Villa,
    Plot,
    Office,
    Retail,
}

impl PropertyType {
    /// Residential types where a bedroom count is meaningful (and required).
    pub fn requires_bhk(&self) -> bool {
        matches!(self, PropertyType::Apartment | PropertyType::Villa)
    }
}

impl FieldEnum for PropertyType {
    const ALL: &'static [PropertyType] = &[
        PropertyType::Apartment,
        PropertyType::Villa,
        PropertyType::Plot,
        PropertyType::Office,
        PropertyType::Retail,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::Villa => "Villa",
            PropertyType::Plot => "Plot",
            PropertyType::Office => "Office",
            PropertyType::Retail => "Retail",
        }
    }
}

/// Bedroom-count category for residential property types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bhk {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    Studio,
}

impl FieldEnum for Bhk {
    const ALL: &'static [Bhk] = &[Bhk::One, Bhk::Two, Bhk::Three, Bhk::Four, Bhk::Studio];

    fn as_str(&self) -> &'static str {
        match self {
            Bhk::One => "1",
            Bhk::Two => "2",
            Bhk::Three => "3",
            Bhk::Four => "4",
            Bhk::Studio => "Studio",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    Buy,
    Rent,
}

impl FieldEnum for Purpose {
    const ALL: &'static [Purpose] = &[Purpose::Buy, Purpose::Rent];

    fn as_str(&self) -> &'static str {
        match self {
            Purpose::Buy => "Buy",
            Purpose::Rent => "Rent",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "0-3m")]
    ZeroToThreeMonths,
    #[serde(rename = "3-6m")]
    ThreeToSixMonths,
    #[serde(rename = ">6m")]
    MoreThanSixMonths,
    Exploring,
}

impl FieldEnum for Timeline {
    const ALL: &'static [Timeline] = &[
        Timeline::ZeroToThreeMonths,
        Timeline::ThreeToSixMonths,
        Timeline::MoreThanSixMonths,
        Timeline::Exploring,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Timeline::ZeroToThreeMonths => "0-3m",
            Timeline::ThreeToSixMonths => "3-6m",
            Timeline::MoreThanSixMonths => ">6m",
            Timeline::Exploring => "Exploring",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Website,
    Referral,
    #[serde(rename = "Walk-in")]
    WalkIn,
    Call,
    Other,
}

impl FieldEnum for Source {
    const ALL: &'static [Source] = &[
        Source::Website,
        Source::Referral,
        Source::WalkIn,
        Source::Call,
        Source::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Source::Website => "Website",
            Source::Referral => "Referral",
            Source::WalkIn => "Walk-in",
            Source::Call => "Call",
            Source::Other => "Other",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    New,
    Qualified,
    Contacted,
    Visited,
    Negotiation,
    Converted,
    Dropped,
}

impl FieldEnum for Status {
    const ALL: &'static [Status] = &[
        Status::New,
        Status::Qualified,
        Status::Contacted,
        Status::Visited,
        Status::Negotiation,
        Status::Converted,
        Status::Dropped,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Status::New => "New",
            Status::Qualified => "Qualified",
            Status::Contacted => "Contacted",
            Status::Visited => "Visited",
            Status::Negotiation => "Negotiation",
            Status::Converted => "Converted",
            Status::Dropped => "Dropped",
        }
    }
}

macro_rules! impl_display_fromstr {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = SharedError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_variant(s)
                }
            }
        )+
    };
}

impl_display_fromstr!(City, PropertyType, Bhk, Purpose, Timeline, Source, Status);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_spellings_round_trip() {
        for v in Timeline::ALL {
            assert_eq!(v.as_str().parse::<Timeline>().unwrap(), *v);
        }
        for v in Source::ALL {
            assert_eq!(v.as_str().parse::<Source>().unwrap(), *v);
        }
        for v in Bhk::ALL {
            assert_eq!(v.as_str().parse::<Bhk>().unwrap(), *v);
        }
    }

    #[test]
    fn unknown_value_lists_allowed_set() {
        let err = "Flat".parse::<PropertyType>().unwrap_err();
        match err {
            SharedError::InvalidEnumValue { value, allowed } => {
                assert_eq!(value, "Flat");
                assert!(allowed.contains("Apartment"));
                assert!(allowed.contains("Retail"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn serde_uses_wire_spellings() {
        assert_eq!(serde_json::to_string(&Bhk::One).unwrap(), "\"1\"");
        assert_eq!(
            serde_json::to_string(&Timeline::MoreThanSixMonths).unwrap(),
            "\">6m\""
        );
        assert_eq!(serde_json::to_string(&Source::WalkIn).unwrap(), "\"Walk-in\"");
        let t: Timeline = serde_json::from_str("\"0-3m\"").unwrap();
        assert_eq!(t, Timeline::ZeroToThreeMonths);
    }
}
