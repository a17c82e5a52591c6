//! Shared types for the buyer-lead intake system
//!
//! Contains the domain model used across crates: the closed field
//! enumerations, the lead entity and history types, the raw wire input
//! shape, and tracing setup. Component-internal types (coordinator state,
//! HTTP request/response shapes) stay in their respective crates.

pub mod enums;
pub mod errors;
pub mod input;
pub mod logging;
pub mod types;

pub use enums::*;
pub use errors::*;
pub use input::{LeadInput, NumericInput, TagsInput, VersionInput};
pub use types::{
    Actor, BuyerLead, ChangeSet, FieldChange, HistoryEntry, LeadField, LeadFields, LeadId, Role,
};
