//! HTTP surface for the buyer-lead intake system
//!
//! Thin axum layer over the `leads` coordinators: routing, identity
//! extraction from trusted headers, and mapping of the core error
//! taxonomy to HTTP statuses. No business rules live here.

pub mod error;
pub mod state;
pub mod web;

pub use error::{WebServerError, WebServerResult};
pub use state::AppState;
pub use web::build_router;
