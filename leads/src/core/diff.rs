//! Field-level diff between two lead snapshots
//!
//! Powers the history entry written after every update. Comparison is
//! deliberately coarse: each field's canonical wire-string form, with
//! absent normalized to the empty string, so the result matches what a
//! client actually sees change.

use shared::{FieldChange, LeadField, LeadFields};
use std::collections::BTreeMap;

/// Compute the set of changed fields between two snapshots.
///
/// Iterates the mutable fields in their fixed declared order (the
/// version token, `id`, and `ownerId` are not part of the field set), so
/// two diffs of identical inputs serialize byte-identically.
pub fn diff(before: &LeadFields, after: &LeadFields) -> BTreeMap<LeadField, FieldChange> {
    let mut changes = BTreeMap::new();
    for &field in LeadField::ALL {
        let from = before.field_as_string(field);
        let to = after.field_as_string(field);
        if from.as_deref().unwrap_or("") != to.as_deref().unwrap_or("") {
            changes.insert(field, FieldChange { from, to });
        }
    }
    changes
}
