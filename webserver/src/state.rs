//! Shared application state for the HTTP layer

use leads::{CreateCoordinator, ImportCoordinator, RateLimiter, RecordStore, UpdateCoordinator};
use std::sync::Arc;

/// Coordinators plus direct store access for the read paths.
#[derive(Clone)]
pub struct AppState {
    pub create: Arc<CreateCoordinator>,
    pub update: Arc<UpdateCoordinator>,
    pub import: Arc<ImportCoordinator>,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Wire all coordinators over one store and one rate limiter.
    pub fn new(store: Arc<dyn RecordStore>, limiter: Arc<dyn RateLimiter>) -> Self {
        Self {
            create: Arc::new(CreateCoordinator::new(store.clone(), limiter.clone())),
            update: Arc::new(UpdateCoordinator::new(store.clone(), limiter)),
            import: Arc::new(ImportCoordinator::new(store.clone())),
            store,
        }
    }
}
