//! Optimistic-concurrency update coordinator
//!
//! One logical operation: validate, authorize, check the version token,
//! persist the full field replacement, append the diff to history. Each
//! gate has its own failure exit; nothing mutates before every gate has
//! passed.

use chrono::{Duration, Utc};
use shared::{types::truncate_to_millis, Actor, BuyerLead, ChangeSet, HistoryEntry, LeadId};
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::diff::diff;
use crate::core::validation::{validate, ValidationMode};
use crate::error::{FieldError, LeadError, LeadResult};
use crate::traits::{RateLimiter, RecordStore};

const UPDATE_LIMIT: u32 = 10;
const UPDATE_WINDOW_MS: u64 = 10_000;

/// Coordinates a single lead update end to end.
pub struct UpdateCoordinator {
    store: Arc<dyn RecordStore>,
    limiter: Arc<dyn RateLimiter>,
}

impl UpdateCoordinator {
    pub fn new(store: Arc<dyn RecordStore>, limiter: Arc<dyn RateLimiter>) -> Self {
        Self { store, limiter }
    }

    /// Apply a full-payload update to one lead.
    ///
    /// Gate order: rate limit → validate → fetch (`NotFound` wins over
    /// authorization, so a caller learns a record is gone before being
    /// told it is not theirs) → authorize (admin or owner) → version
    /// check. The supplied token must equal the stored `updatedAt` at
    /// millisecond precision; a mismatch means the record changed since
    /// the caller last read it and fails with `Conflict` — the caller
    /// refetches and retries, no lock is ever held.
    ///
    /// Every field except `status` is replaced by the payload; an absent
    /// `status` retains the stored value. The persist and the history
    /// append are two store calls with no cross-call atomicity; a crash
    /// between them leaves an un-audited change (accepted, see DESIGN.md).
    pub async fn update(
        &self,
        actor: &Actor,
        origin: &str,
        id: LeadId,
        input: &shared::LeadInput,
    ) -> LeadResult<BuyerLead> {
        let key = format!("update:{}:{}", actor.id, origin);
        if !self.limiter.allow(&key, UPDATE_LIMIT, UPDATE_WINDOW_MS) {
            return Err(LeadError::RateLimited { key });
        }

        let validated = validate(input, ValidationMode::Update)
            .map_err(|errors| LeadError::ValidationFailed { errors })?;

        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| LeadError::NotFound { id: id.to_string() })?;

        if !actor.is_admin() && existing.owner_id != actor.id {
            warn!(lead_id = %id, actor = %actor.id, "update refused: not owner");
            return Err(LeadError::Forbidden);
        }

        let Some(supplied_token) = validated.version_token else {
            // Update-mode validation always yields a token; guard anyway.
            return Err(LeadError::ValidationFailed {
                errors: vec![FieldError::new("updatedAt", "updatedAt is required")],
            });
        };
        if supplied_token.timestamp_millis() != existing.updated_at.timestamp_millis() {
            info!(lead_id = %id, "update rejected: stale version token");
            return Err(LeadError::Conflict);
        }

        let fields = validated.into_fields(existing.fields.status);

        // The new token must be strictly greater than the old one even if
        // two writes land within the same clock millisecond.
        let now = truncate_to_millis(Utc::now());
        let new_updated_at = if now > existing.updated_at {
            now
        } else {
            existing.updated_at + Duration::milliseconds(1)
        };

        self.store
            .replace_fields(id, fields.clone(), new_updated_at)
            .await?;

        let changes = diff(&existing.fields, &fields);
        let entry = HistoryEntry::new(id, &actor.id, new_updated_at, ChangeSet::Fields(changes));
        self.store.append_history(entry).await?;

        info!(lead_id = %id, actor = %actor.id, "lead updated");
        Ok(BuyerLead {
            id,
            fields,
            owner_id: existing.owner_id,
            updated_at: new_updated_at,
        })
    }
}
