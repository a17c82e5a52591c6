//! Common test infrastructure for the leads crate

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
pub use helpers::TestHarness;
