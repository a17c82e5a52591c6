//! Test fixtures and data for lead tests
//!
//! Consistent actors and payloads used across the unit and integration
//! suites.

use shared::{Actor, LeadInput, NumericInput, Role, TagsInput, VersionInput};

pub struct TestFixtures;

impl TestFixtures {
    pub const ORIGIN: &'static str = "127.0.0.1";

    pub fn agent() -> Actor {
        Actor {
            id: "agent-1".to_string(),
            role: Role::User,
            email: Some("agent@example.com".to_string()),
        }
    }

    pub fn other_agent() -> Actor {
        Actor {
            id: "agent-2".to_string(),
            role: Role::User,
            email: Some("other@example.com".to_string()),
        }
    }

    pub fn admin() -> Actor {
        Actor {
            id: "admin-1".to_string(),
            role: Role::Admin,
            email: Some("admin@example.com".to_string()),
        }
    }

    /// A payload that passes create-mode validation (Apartment, so bhk
    /// is required and supplied).
    pub fn valid_input() -> LeadInput {
        LeadInput {
            full_name: Some("Asha Rao".to_string()),
            email: Some("asha@example.com".to_string()),
            phone: Some("9876543210".to_string()),
            city: Some("Mohali".to_string()),
            property_type: Some("Apartment".to_string()),
            bhk: Some("3".to_string()),
            purpose: Some("Buy".to_string()),
            budget_min: Some(NumericInput::Number(4_000_000.0)),
            budget_max: Some(NumericInput::Number(6_000_000.0)),
            timeline: Some("0-3m".to_string()),
            source: Some("Website".to_string()),
            status: None,
            notes: Some("prefers sector 70".to_string()),
            tags: Some(TagsInput::List(vec!["hot".to_string(), "nri".to_string()])),
            updated_at: None,
        }
    }

    /// Same payload with the version token required by update mode.
    pub fn update_input(token_millis: i64) -> LeadInput {
        LeadInput {
            updated_at: Some(VersionInput::Millis(token_millis)),
            ..Self::valid_input()
        }
    }

    /// A payload violating both cross-field rules at once.
    pub fn doubly_invalid_input() -> LeadInput {
        LeadInput {
            bhk: None,
            budget_min: Some(NumericInput::Number(100.0)),
            budget_max: Some(NumericInput::Number(50.0)),
            ..Self::valid_input()
        }
    }

    /// `count` distinct valid import rows.
    pub fn import_rows(count: usize) -> Vec<LeadInput> {
        (0..count)
            .map(|i| LeadInput {
                full_name: Some(format!("Lead {i}")),
                phone: Some(format!("98765{i:05}")),
                email: None,
                notes: None,
                tags: None,
                ..Self::valid_input()
            })
            .collect()
    }
}
