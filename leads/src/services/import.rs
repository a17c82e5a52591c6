//! Batch import coordinator
//!
//! All-or-nothing semantics: every row validates independently in create
//! mode, and one bad row rejects the whole batch with a row-indexed
//! error report. Nothing is persisted unless every row passes.

use chrono::Utc;
use shared::{
    types::truncate_to_millis, Actor, BuyerLead, ChangeSet, HistoryEntry, LeadId, LeadInput, Status,
};
use std::sync::Arc;
use tracing::info;

use crate::core::validation::{validate, ValidationMode};
use crate::error::{LeadError, LeadResult, RowError};
use crate::traits::RecordStore;

/// Hard cap on rows per import batch.
pub const MAX_IMPORT_ROWS: usize = 200;

/// Validates and bulk-inserts a batch of leads.
pub struct ImportCoordinator {
    store: Arc<dyn RecordStore>,
}

impl ImportCoordinator {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Import a batch of raw rows on behalf of `actor`.
    ///
    /// Returns the number of leads inserted. Row numbers in the error
    /// report are 1-based plus the header row, so the first data row is
    /// row 2. The lead batch and the history batch are two bulk inserts
    /// with no cross-call atomicity (same caveat as the update path).
    pub async fn import(&self, actor: &Actor, rows: &[LeadInput]) -> LeadResult<usize> {
        if rows.len() > MAX_IMPORT_ROWS {
            return Err(LeadError::BatchTooLarge {
                rows: rows.len(),
                max: MAX_IMPORT_ROWS,
            });
        }

        let mut errors = Vec::new();
        let mut valid = Vec::new();
        for (idx, row) in rows.iter().enumerate() {
            match validate(row, ValidationMode::Create) {
                Ok(v) => valid.push(v),
                Err(field_errors) => {
                    let message = field_errors
                        .iter()
                        .map(|e| format!("{}: {}", e.field, e.message))
                        .collect::<Vec<_>>()
                        .join("; ");
                    errors.push(RowError {
                        row: idx + 2,
                        message,
                    });
                }
            }
        }
        if !errors.is_empty() {
            return Err(LeadError::ImportRejected { errors });
        }

        let now = truncate_to_millis(Utc::now());
        let mut leads = Vec::with_capacity(valid.len());
        let mut entries = Vec::with_capacity(valid.len());
        for v in valid {
            let lead = BuyerLead {
                id: LeadId::new(),
                fields: v.into_fields(Status::New),
                owner_id: actor.id.clone(),
                updated_at: now,
            };
            entries.push(HistoryEntry::new(lead.id, &actor.id, now, ChangeSet::Imported));
            leads.push(lead);
        }

        let inserted = leads.len();
        self.store.insert_many(leads).await?;
        self.store.append_history_many(entries).await?;

        info!(count = inserted, actor = %actor.id, "import committed");
        Ok(inserted)
    }
}
