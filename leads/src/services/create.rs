//! Single-lead create coordinator

use chrono::Utc;
use shared::{types::truncate_to_millis, Actor, BuyerLead, ChangeSet, HistoryEntry, LeadId, Status};
use std::sync::Arc;
use tracing::info;

use crate::core::validation::{validate, ValidationMode};
use crate::error::{LeadError, LeadResult};
use crate::traits::{RateLimiter, RecordStore};

const CREATE_LIMIT: u32 = 10;
const CREATE_WINDOW_MS: u64 = 10_000;

/// Creates one lead plus its create-origin history entry.
pub struct CreateCoordinator {
    store: Arc<dyn RecordStore>,
    limiter: Arc<dyn RateLimiter>,
}

impl CreateCoordinator {
    pub fn new(store: Arc<dyn RecordStore>, limiter: Arc<dyn RateLimiter>) -> Self {
        Self { store, limiter }
    }

    /// Gate order: rate limit, validate, insert, append history.
    ///
    /// The insert and the history append are two store calls; a crash
    /// between them leaves a lead without its create entry. Accepted for
    /// the single-node deployment model.
    pub async fn create(
        &self,
        actor: &Actor,
        origin: &str,
        input: &shared::LeadInput,
    ) -> LeadResult<BuyerLead> {
        let key = format!("create:{}:{}", actor.id, origin);
        if !self.limiter.allow(&key, CREATE_LIMIT, CREATE_WINDOW_MS) {
            return Err(LeadError::RateLimited { key });
        }

        let validated = validate(input, ValidationMode::Create)
            .map_err(|errors| LeadError::ValidationFailed { errors })?;

        let now = truncate_to_millis(Utc::now());
        let lead = BuyerLead {
            id: LeadId::new(),
            fields: validated.into_fields(Status::New),
            owner_id: actor.id.clone(),
            updated_at: now,
        };

        self.store.insert_one(lead.clone()).await?;
        let entry = HistoryEntry::new(lead.id, &actor.id, now, ChangeSet::Created);
        self.store.append_history(entry).await?;

        info!(lead_id = %lead.id, owner = %actor.id, "lead created");
        Ok(lead)
    }
}
