//! Core library for the buyer-lead intake system
//!
//! Implements the write path shared by every caller: the accumulating
//! validation rule set, the field-level diff engine, and the coordinators
//! that tie authorization, optimistic concurrency, persistence, and
//! append-only history together. Persistence and rate limiting are
//! injected behind traits so transports and stores stay swappable.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;

// Re-export main types
pub use error::{FieldError, LeadError, LeadResult, RowError};
pub use traits::{LeadFilter, MockRateLimiter, MockRecordStore, RateLimiter, RecordStore};

// Re-export core engines
pub use crate::core::diff::diff;
pub use crate::core::validation::{validate, ValidatedLead, ValidationMode};

// Re-export coordinator and collaborator implementations
pub use services::{
    CreateCoordinator, ImportCoordinator, MemoryStore, TokenBucketLimiter, UpdateCoordinator,
};
