//! Accumulating validation for lead writes
//!
//! One rule set gates every write path (create, update, import). The
//! engine never fails fast: it walks every rule and returns the complete
//! list of violated fields, because batch import has to report every
//! problem of every row in one pass.

use chrono::{DateTime, Utc};
use shared::{
    Bhk, City, LeadFields, LeadInput, NumericInput, PropertyType, Purpose, SharedError, Source,
    Status, Timeline,
};
use std::str::FromStr;

use crate::error::FieldError;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 80;
const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 15;
const NOTES_MAX_CHARS: usize = 1000;

/// Which rule set applies: update mode additionally demands the
/// `updatedAt` version token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

/// A fully typed, normalized lead payload.
///
/// `status` stays optional here: create defaults it to `New`, update
/// retains the stored value when the payload omits it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLead {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub city: City,
    pub property_type: PropertyType,
    pub bhk: Option<Bhk>,
    pub purpose: Purpose,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub timeline: Timeline,
    pub source: Source,
    pub status: Option<Status>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Present iff validated in update mode.
    pub version_token: Option<DateTime<Utc>>,
}

impl ValidatedLead {
    pub fn into_fields(self, fallback_status: Status) -> LeadFields {
        LeadFields {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            city: self.city,
            property_type: self.property_type,
            bhk: self.bhk,
            purpose: self.purpose,
            budget_min: self.budget_min,
            budget_max: self.budget_max,
            timeline: self.timeline,
            source: self.source,
            status: self.status.unwrap_or(fallback_status),
            notes: self.notes,
            tags: self.tags,
        }
    }
}

/// Validate a raw payload against the full rule set.
///
/// On failure the returned list contains every violated field, each
/// tagged with its wire name and a human-readable message.
pub fn validate(input: &LeadInput, mode: ValidationMode) -> Result<ValidatedLead, Vec<FieldError>> {
    let mut errors = Vec::new();

    let full_name = match present(&input.full_name) {
        None => {
            errors.push(FieldError::new("fullName", "fullName is required"));
            None
        }
        Some(name) => {
            let len = name.chars().count();
            if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
                errors.push(FieldError::new(
                    "fullName",
                    format!("must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"),
                ));
                None
            } else {
                Some(name.to_string())
            }
        }
    };

    let phone = match present(&input.phone) {
        None => {
            errors.push(FieldError::new("phone", "phone is required"));
            None
        }
        Some(p) => {
            let digits_only = p.chars().all(|c| c.is_ascii_digit());
            if digits_only && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&p.len()) {
                Some(p.to_string())
            } else {
                errors.push(FieldError::new(
                    "phone",
                    format!("must be {PHONE_MIN_DIGITS}-{PHONE_MAX_DIGITS} digits"),
                ));
                None
            }
        }
    };

    let email = match present(&input.email) {
        None => None,
        Some(e) => {
            if is_valid_email(e) {
                Some(e.to_string())
            } else {
                errors.push(FieldError::new("email", "must be a valid email"));
                None
            }
        }
    };

    let city = parse_required::<City>(&input.city, "city", &mut errors);
    let property_type = parse_required::<PropertyType>(&input.property_type, "propertyType", &mut errors);
    let bhk = parse_optional::<Bhk>(&input.bhk, "bhk", &mut errors);
    let purpose = parse_required::<Purpose>(&input.purpose, "purpose", &mut errors);
    let timeline = parse_required::<Timeline>(&input.timeline, "timeline", &mut errors);
    let source = parse_required::<Source>(&input.source, "source", &mut errors);
    let status = parse_optional::<Status>(&input.status, "status", &mut errors);

    let budget_min = parse_budget(&input.budget_min, "budgetMin", &mut errors);
    let budget_max = parse_budget(&input.budget_max, "budgetMax", &mut errors);

    let notes = match present(&input.notes) {
        None => None,
        Some(n) => {
            if n.chars().count() > NOTES_MAX_CHARS {
                errors.push(FieldError::new(
                    "notes",
                    format!("must be at most {NOTES_MAX_CHARS} characters"),
                ));
                None
            } else {
                Some(n.to_string())
            }
        }
    };

    let tags = input.tags.as_ref().and_then(|t| t.normalize());

    // Cross-field rule 1: residential property types need a bedroom
    // count. Only fires when the bhk input was absent, so an invalid bhk
    // value is not reported twice.
    if let Some(pt) = property_type {
        if pt.requires_bhk() && present(&input.bhk).is_none() {
            errors.push(FieldError::new("bhk", "bhk is required for Apartment/Villa"));
        }
    }

    // Cross-field rule 2: budget range must be ordered when both ends are
    // present. Equal bounds are allowed.
    if let (Some(min), Some(max)) = (budget_min, budget_max) {
        if max < min {
            errors.push(FieldError::new(
                "budgetMax",
                "budgetMax must be greater than or equal to budgetMin",
            ));
        }
    }

    let version_token = match mode {
        ValidationMode::Create => None,
        ValidationMode::Update => match &input.updated_at {
            None => {
                errors.push(FieldError::new("updatedAt", "updatedAt is required"));
                None
            }
            Some(raw) => match raw.parse() {
                Ok(token) => Some(token),
                Err(e) => {
                    errors.push(FieldError::new("updatedAt", e.to_string()));
                    None
                }
            },
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    let (
        Some(full_name),
        Some(phone),
        Some(city),
        Some(property_type),
        Some(purpose),
        Some(timeline),
        Some(source),
    ) = (full_name, phone, city, property_type, purpose, timeline, source)
    else {
        // Unreachable: a missing required field always pushed an error.
        return Err(errors);
    };

    Ok(ValidatedLead {
        full_name,
        email,
        phone,
        city,
        property_type,
        bhk,
        purpose,
        budget_min,
        budget_max,
        timeline,
        source,
        status,
        notes,
        tags,
        version_token,
    })
}

/// Empty optional strings normalize to "absent".
fn present(raw: &Option<String>) -> Option<&str> {
    match raw.as_deref() {
        None => None,
        Some(s) if s.is_empty() => None,
        Some(s) => Some(s),
    }
}

fn parse_required<E>(raw: &Option<String>, field: &'static str, errors: &mut Vec<FieldError>) -> Option<E>
where
    E: FromStr<Err = SharedError>,
{
    match present(raw) {
        None => {
            errors.push(FieldError::new(field, format!("{field} is required")));
            None
        }
        Some(s) => match s.parse::<E>() {
            Ok(v) => Some(v),
            Err(e) => {
                errors.push(FieldError::new(field, e.to_string()));
                None
            }
        },
    }
}

fn parse_optional<E>(raw: &Option<String>, field: &'static str, errors: &mut Vec<FieldError>) -> Option<E>
where
    E: FromStr<Err = SharedError>,
{
    match present(raw) {
        None => None,
        Some(s) => match s.parse::<E>() {
            Ok(v) => Some(v),
            Err(e) => {
                errors.push(FieldError::new(field, e.to_string()));
                None
            }
        },
    }
}

fn parse_budget(
    raw: &Option<NumericInput>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<i64> {
    let value = raw.as_ref()?;
    match value.as_integer() {
        Ok(None) => None,
        Ok(Some(n)) if n >= 0 => Some(n),
        _ => {
            errors.push(FieldError::new(field, "must be a non-negative integer"));
            None
        }
    }
}

/// Shape check only: one `@`, no whitespace, dotted non-edge domain.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
