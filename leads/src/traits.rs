//! Collaborator trait definitions with mockall annotations
//!
//! The coordinators depend on persistence and rate limiting only through
//! these traits. Production wiring injects the in-memory implementations
//! from [`crate::services`]; tests inject mocks.

use chrono::{DateTime, Utc};
use shared::{BuyerLead, City, HistoryEntry, LeadFields, LeadId, PropertyType, Status, Timeline};

use crate::error::LeadResult;

/// Filter for the list/export read path.
///
/// `q` is a case-insensitive substring match over full name, phone, and
/// email; the remaining fields are exact enum matches.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub q: Option<String>,
    pub city: Option<City>,
    pub property_type: Option<PropertyType>,
    pub status: Option<Status>,
    pub timeline: Option<Timeline>,
}

/// Persistence operations the core depends on.
///
/// No transaction guarantee is required beyond per-call durability; the
/// coordinators document where they rely on that (and where they
/// knowingly do not get atomicity across two calls).
#[mockall::automock]
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one lead by id, `None` when no record exists.
    async fn find_by_id(&self, id: LeadId) -> LeadResult<Option<BuyerLead>>;

    /// Replace all mutable fields of an existing lead and stamp the new
    /// version token.
    async fn replace_fields(
        &self,
        id: LeadId,
        fields: LeadFields,
        updated_at: DateTime<Utc>,
    ) -> LeadResult<()>;

    /// Insert a single new lead.
    async fn insert_one(&self, lead: BuyerLead) -> LeadResult<()>;

    /// Bulk-insert a batch of new leads (import path).
    async fn insert_many(&self, leads: Vec<BuyerLead>) -> LeadResult<()>;

    /// Append one immutable history entry.
    async fn append_history(&self, entry: HistoryEntry) -> LeadResult<()>;

    /// Bulk-append history entries (import path).
    async fn append_history_many(&self, entries: Vec<HistoryEntry>) -> LeadResult<()>;

    /// List leads matching the filter, most recently updated first.
    async fn query(&self, filter: LeadFilter) -> LeadResult<Vec<BuyerLead>>;

    /// History for one lead, most recent first, capped at `limit`.
    async fn query_history(&self, buyer_id: LeadId, limit: usize) -> LeadResult<Vec<HistoryEntry>>;
}

/// Sliding-window rate limit gate, keyed per actor+origin+operation.
///
/// Coordinators call this before any side effect and abort the whole
/// operation when it denies.
#[mockall::automock]
pub trait RateLimiter: Send + Sync {
    fn allow(&self, key: &str, limit: u32, window_ms: u64) -> bool;
}
