//! Raw wire input for lead writes
//!
//! This is the shape the API and CSV boundaries hand to validation:
//! everything optional, enum fields still strings, numbers possibly
//! quoted. Validation turns it into a typed record or a full list of
//! field errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SharedError;
use crate::types::truncate_to_millis;

/// Tags arrive either as a JSON array or as one delimited string (CSV).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Joined(String),
}

impl TagsInput {
    /// Collapse into the canonical ordered sequence of trimmed,
    /// non-empty tags. An all-empty input normalizes to `None`.
    pub fn normalize(&self) -> Option<Vec<String>> {
        let tags: Vec<String> = match self {
            TagsInput::List(items) => items
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            TagsInput::Joined(joined) => joined
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        };
        if tags.is_empty() {
            None
        } else {
            Some(tags)
        }
    }
}

/// Budget values arrive as JSON numbers or as numeric strings (CSV).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Coerce to an integer; `Ok(None)` when the input is an empty string.
    pub fn as_integer(&self) -> Result<Option<i64>, SharedError> {
        match self {
            NumericInput::Number(n) => {
                // The upper bound is exclusive: i64::MAX as f64 rounds up
                // to 2^63, which does not fit.
                let in_range = *n >= i64::MIN as f64 && *n < i64::MAX as f64;
                if n.is_finite() && n.fract() == 0.0 && in_range {
                    Ok(Some(*n as i64))
                } else {
                    Err(SharedError::InvalidNumber {
                        value: n.to_string(),
                    })
                }
            }
            NumericInput::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| SharedError::InvalidNumber { value: s.clone() })
            }
        }
    }
}

/// The concurrency token arrives as epoch milliseconds or an RFC 3339
/// timestamp string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionInput {
    Millis(i64),
    Text(String),
}

impl VersionInput {
    pub fn parse(&self) -> Result<DateTime<Utc>, SharedError> {
        match self {
            VersionInput::Millis(ms) => {
                DateTime::from_timestamp_millis(*ms).ok_or(SharedError::InvalidTimestamp {
                    value: ms.to_string(),
                })
            }
            VersionInput::Text(s) => s
                .parse::<DateTime<Utc>>()
                .map(truncate_to_millis)
                .map_err(|_| SharedError::InvalidTimestamp { value: s.clone() }),
        }
    }
}

/// Untyped lead payload as received on the wire
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub property_type: Option<String>,
    pub bhk: Option<String>,
    pub purpose: Option<String>,
    pub budget_min: Option<NumericInput>,
    pub budget_max: Option<NumericInput>,
    pub timeline: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<TagsInput>,
    /// Version token; required by validation in update mode only.
    pub updated_at: Option<VersionInput>,
}
