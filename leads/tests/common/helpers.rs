//! Test helpers for wiring coordinators over the in-memory store

use leads::{
    CreateCoordinator, ImportCoordinator, MemoryStore, TokenBucketLimiter, UpdateCoordinator,
};
use shared::{Actor, BuyerLead};
use std::sync::Arc;

use super::TestFixtures;

/// Coordinators wired over one shared `MemoryStore` and a real limiter.
pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub create: CreateCoordinator,
    pub update: UpdateCoordinator,
    pub import: ImportCoordinator,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let limiter = Arc::new(TokenBucketLimiter::new());
        Self {
            create: CreateCoordinator::new(store.clone(), limiter.clone()),
            update: UpdateCoordinator::new(store.clone(), limiter.clone()),
            import: ImportCoordinator::new(store.clone()),
            store,
        }
    }

    /// Create one valid lead owned by `actor`.
    pub async fn seed_lead(&self, actor: &Actor) -> BuyerLead {
        self.create
            .create(actor, TestFixtures::ORIGIN, &TestFixtures::valid_input())
            .await
            .expect("seed lead should validate")
    }
}
