//! In-memory record store
//!
//! Single-node `RecordStore` implementation backing the webserver and
//! the integration tests. Each call is individually consistent; there is
//! no transaction spanning calls, matching the guarantees the
//! coordinators are written against.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{BuyerLead, HistoryEntry, LeadFields, LeadId};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{LeadError, LeadResult};
use crate::traits::{LeadFilter, RecordStore};

#[derive(Default)]
pub struct MemoryStore {
    leads: RwLock<HashMap<LeadId, BuyerLead>>,
    history: RwLock<Vec<HistoryEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of history entries across all leads (test hook).
    pub async fn history_len(&self) -> usize {
        self.history.read().await.len()
    }
}

fn matches_filter(lead: &BuyerLead, filter: &LeadFilter) -> bool {
    if let Some(q) = &filter.q {
        let q = q.to_lowercase();
        let haystacks = [
            Some(lead.fields.full_name.as_str()),
            Some(lead.fields.phone.as_str()),
            lead.fields.email.as_deref(),
        ];
        let hit = haystacks
            .into_iter()
            .flatten()
            .any(|h| h.to_lowercase().contains(&q));
        if !hit {
            return false;
        }
    }
    if let Some(city) = filter.city {
        if lead.fields.city != city {
            return false;
        }
    }
    if let Some(property_type) = filter.property_type {
        if lead.fields.property_type != property_type {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if lead.fields.status != status {
            return false;
        }
    }
    if let Some(timeline) = filter.timeline {
        if lead.fields.timeline != timeline {
            return false;
        }
    }
    true
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_by_id(&self, id: LeadId) -> LeadResult<Option<BuyerLead>> {
        Ok(self.leads.read().await.get(&id).cloned())
    }

    async fn replace_fields(
        &self,
        id: LeadId,
        fields: LeadFields,
        updated_at: DateTime<Utc>,
    ) -> LeadResult<()> {
        let mut leads = self.leads.write().await;
        let lead = leads.get_mut(&id).ok_or_else(|| LeadError::Store {
            message: format!("replace_fields: no lead {id}"),
        })?;
        lead.fields = fields;
        lead.updated_at = updated_at;
        Ok(())
    }

    async fn insert_one(&self, lead: BuyerLead) -> LeadResult<()> {
        let mut leads = self.leads.write().await;
        if leads.insert(lead.id, lead).is_some() {
            return Err(LeadError::Store {
                message: "insert_one: duplicate lead id".to_string(),
            });
        }
        Ok(())
    }

    async fn insert_many(&self, batch: Vec<BuyerLead>) -> LeadResult<()> {
        let mut leads = self.leads.write().await;
        // All-or-nothing: reject the whole batch before touching the map.
        if batch.iter().any(|lead| leads.contains_key(&lead.id)) {
            return Err(LeadError::Store {
                message: "insert_many: duplicate lead id".to_string(),
            });
        }
        for lead in batch {
            leads.insert(lead.id, lead);
        }
        Ok(())
    }

    async fn append_history(&self, entry: HistoryEntry) -> LeadResult<()> {
        self.history.write().await.push(entry);
        Ok(())
    }

    async fn append_history_many(&self, entries: Vec<HistoryEntry>) -> LeadResult<()> {
        self.history.write().await.extend(entries);
        Ok(())
    }

    async fn query(&self, filter: LeadFilter) -> LeadResult<Vec<BuyerLead>> {
        let leads = self.leads.read().await;
        let mut matched: Vec<BuyerLead> = leads
            .values()
            .filter(|lead| matches_filter(lead, &filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(matched)
    }

    async fn query_history(&self, buyer_id: LeadId, limit: usize) -> LeadResult<Vec<HistoryEntry>> {
        let history = self.history.read().await;
        let mut matched: Vec<HistoryEntry> = history
            .iter()
            .filter(|e| e.buyer_id == buyer_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.changed_at.cmp(&a.changed_at));
        matched.truncate(limit);
        Ok(matched)
    }
}
