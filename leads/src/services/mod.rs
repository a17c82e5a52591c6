//! Coordinators and collaborator implementations
//!
//! The coordinators orchestrate one logical write each; `MemoryStore`
//! and `TokenBucketLimiter` are the production implementations of the
//! collaborator traits for single-node deployments.

pub mod create;
pub mod import;
pub mod limiter;
pub mod memory_store;
pub mod update;

pub use create::CreateCoordinator;
pub use import::ImportCoordinator;
pub use limiter::TokenBucketLimiter;
pub use memory_store::MemoryStore;
pub use update::UpdateCoordinator;
