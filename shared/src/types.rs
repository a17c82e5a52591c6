//! Lead entity, history, and actor identity types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::enums::{Bhk, City, FieldEnum, PropertyType, Purpose, Source, Status, Timeline};
use crate::errors::SharedError;

/// Unique identifier for a buyer lead
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(Uuid);

impl LeadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for LeadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Actor role supplied by the identity provider
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(SharedError::InvalidRole {
                value: other.to_string(),
            }),
        }
    }
}

/// Authenticated caller identity, treated as opaque trusted input.
///
/// Produced upstream by the authentication layer; the core never inspects
/// it beyond the role check and owner comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub role: Role,
    pub email: Option<String>,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// The mutable fields of a buyer lead.
///
/// Everything here is replaced wholesale on update; `id`, `ownerId`, and
/// the `updatedAt` version token live on [`BuyerLead`] instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFields {
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
    pub status: Status,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl LeadFields {
    /// Canonical wire-string form of one field, `None` when absent.
    ///
    /// This is the single string normalization used by both the diff
    /// engine and the CSV exporter, so the two can never disagree.
    pub fn field_as_string(&self, field: LeadField) -> Option<String> {
        match field {
            LeadField::FullName => Some(self.full_name.clone()),
            LeadField::Email => self.email.clone(),
            LeadField::Phone => Some(self.phone.clone()),
            LeadField::City => Some(self.city.as_str().to_string()),
            LeadField::PropertyType => Some(self.property_type.as_str().to_string()),
            LeadField::Bhk => self.bhk.map(|b| b.as_str().to_string()),
            LeadField::Purpose => Some(self.purpose.as_str().to_string()),
            LeadField::BudgetMin => self.budget_min.map(|n| n.to_string()),
            LeadField::BudgetMax => self.budget_max.map(|n| n.to_string()),
            LeadField::Timeline => Some(self.timeline.as_str().to_string()),
            LeadField::Source => Some(self.source.as_str().to_string()),
            LeadField::Status => Some(self.status.as_str().to_string()),
            LeadField::Notes => self.notes.clone(),
            LeadField::Tags => self.tags.as_ref().map(|t| t.join(",")),
        }
    }
}

/// A buyer lead record as held by the store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerLead {
    pub id: LeadId,
    #[serde(flatten)]
    pub fields: LeadFields,
    /// Identity of the creating actor; immutable after creation.
    pub owner_id: String,
    /// Version token for optimistic concurrency; millisecond precision.
    pub updated_at: DateTime<Utc>,
}

/// Names of the mutable lead fields, in their fixed declared order.
///
/// The `Ord` derive follows declaration order, which keeps diff maps and
/// their serialized form byte-stable across runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadField {
    FullName,
    Email,
    Phone,
    City,
    PropertyType,
    Bhk,
    Purpose,
    BudgetMin,
    BudgetMax,
    Timeline,
    Source,
    Status,
    Notes,
    Tags,
}

impl LeadField {
    pub const ALL: &'static [LeadField] = &[
        LeadField::FullName,
        LeadField::Email,
        LeadField::Phone,
        LeadField::City,
        LeadField::PropertyType,
        LeadField::Bhk,
        LeadField::Purpose,
        LeadField::BudgetMin,
        LeadField::BudgetMax,
        LeadField::Timeline,
        LeadField::Source,
        LeadField::Status,
        LeadField::Notes,
        LeadField::Tags,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadField::FullName => "fullName",
            LeadField::Email => "email",
            LeadField::Phone => "phone",
            LeadField::City => "city",
            LeadField::PropertyType => "propertyType",
            LeadField::Bhk => "bhk",
            LeadField::Purpose => "purpose",
            LeadField::BudgetMin => "budgetMin",
            LeadField::BudgetMax => "budgetMax",
            LeadField::Timeline => "timeline",
            LeadField::Source => "source",
            LeadField::Status => "status",
            LeadField::Notes => "notes",
            LeadField::Tags => "tags",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Before/after values for one changed field, in normalized string form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// What a history entry records about a mutation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "changes", rename_all = "lowercase")]
pub enum ChangeSet {
    /// Field-level diff of an update
    Fields(BTreeMap<LeadField, FieldChange>),
    /// Record created directly; there is no "before" state to diff
    Created,
    /// Record created via CSV import
    Imported,
}

/// Append-only audit record for one lead mutation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub buyer_id: LeadId,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
    pub diff: ChangeSet,
}

impl HistoryEntry {
    pub fn new(buyer_id: LeadId, changed_by: &str, changed_at: DateTime<Utc>, diff: ChangeSet) -> Self {
        Self {
            id: Uuid::new_v4(),
            buyer_id,
            changed_by: changed_by.to_string(),
            changed_at,
            diff,
        }
    }
}

/// Drop sub-millisecond precision so stored tokens round-trip exactly
/// through their wire representation.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}
